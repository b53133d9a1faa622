//! HTML character reference decoding for attribute values.

/// Named references understood in attribute values.
const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
];

/// Decodes `&name;`, `&#N;` and `&#xH;` references. Unknown or malformed
/// references are left untouched.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_reference(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decodes a single reference at the start of `input` (which begins with `&`).
/// Returns the character and the number of bytes consumed.
fn decode_reference(input: &str) -> Option<(char, usize)> {
    let semi = input.find(';')?;
    let body = &input[1..semi];
    let ch = if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        NAMED
            .iter()
            .find(|(name, _)| *name == body)
            .map(|(_, ch)| *ch)?
    };
    Some((ch, semi + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_references() {
        assert_eq!(decode_entities("a &amp;&amp; b"), "a && b");
        assert_eq!(decode_entities("&quot;x&quot;"), "\"x\"");
        assert_eq!(decode_entities("a &lt; b &gt; c"), "a < b > c");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
    }

    #[test]
    fn test_unknown_references_are_kept() {
        assert_eq!(decode_entities("&copy; & &;"), "&copy; & &;");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_entities("plain"), "plain");
    }
}
