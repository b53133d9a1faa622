//! Grouping of `v-if` / `v-else-if` / `v-else` siblings into chains.

use vue_template_parser::{DirectiveKind, Element, TemplateNode};

/// One branch of a conditional chain.
#[derive(Debug, Clone, Copy)]
pub struct Branch<'a> {
    /// `If`, `ElseIf` or `Else`.
    pub kind: DirectiveKind,
    /// The element carrying the branch directive.
    pub element: &'a Element,
}

impl<'a> Branch<'a> {
    /// The branch condition, `None` for a terminal `v-else`.
    ///
    /// A `v-if`/`v-else-if` without an expression tests `false`.
    pub fn condition(&self) -> Option<&'a str> {
        if self.kind == DirectiveKind::Else {
            return None;
        }
        Some(
            self.element
                .directive(self.kind)
                .and_then(|dir| dir.expression_text())
                .unwrap_or("false"),
        )
    }
}

/// A unit of generation: a lone node or a grouped conditional chain.
#[derive(Debug, Clone)]
pub enum RenderUnit<'a> {
    /// A node rendered on its own.
    Single(&'a TemplateNode),
    /// A chain starting with `v-if`, in source order.
    Chain(Vec<Branch<'a>>),
}

/// Returns the conditional directive kind an element carries, if any.
///
/// `If` wins over `ElseIf`, which wins over `Else`.
pub fn conditional_kind(element: &Element) -> Option<DirectiveKind> {
    [DirectiveKind::If, DirectiveKind::ElseIf, DirectiveKind::Else]
        .into_iter()
        .find(|kind| element.has_directive(*kind))
}

/// Takes the next render unit from the front of `nodes`.
///
/// Returns the unit and how many nodes it consumed, or `None` when `nodes`
/// is empty. An element with `v-if` collects the `v-else-if` elements that
/// directly follow it and an optional final `v-else`. Any other node,
/// including whitespace text or a comment, ends the chain.
pub fn next_unit(nodes: &[TemplateNode]) -> Option<(RenderUnit<'_>, usize)> {
    let (first, rest) = nodes.split_first()?;
    let Some(head) = first
        .as_element()
        .filter(|el| conditional_kind(el) == Some(DirectiveKind::If))
    else {
        return Some((RenderUnit::Single(first), 1));
    };

    let mut branches = vec![Branch {
        kind: DirectiveKind::If,
        element: head,
    }];

    for node in rest {
        let Some(element) = node.as_element() else {
            break;
        };
        match conditional_kind(element) {
            Some(DirectiveKind::ElseIf) => branches.push(Branch {
                kind: DirectiveKind::ElseIf,
                element,
            }),
            Some(DirectiveKind::Else) => {
                branches.push(Branch {
                    kind: DirectiveKind::Else,
                    element,
                });
                break;
            }
            _ => break,
        }
    }

    let consumed = branches.len();
    if consumed > 1 {
        log::debug!("grouped conditional chain of {consumed} branches at <{}>", head.name);
    }
    Some((RenderUnit::Chain(branches), consumed))
}

/// Splits a sibling list into render units, in order.
pub fn group_siblings(nodes: &[TemplateNode]) -> Vec<RenderUnit<'_>> {
    let mut units = Vec::new();
    let mut rest = nodes;
    while let Some((unit, consumed)) = next_unit(rest) {
        units.push(unit);
        rest = &rest[consumed..];
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use vue_template_parser::parse;

    fn nodes(source: &str) -> Vec<TemplateNode> {
        parse(source).document.fragment.nodes
    }

    fn shape(units: &[RenderUnit<'_>]) -> Vec<String> {
        units
            .iter()
            .map(|unit| match unit {
                RenderUnit::Single(TemplateNode::Element(el)) => format!("<{}>", el.name),
                RenderUnit::Single(TemplateNode::Text(t)) => format!("text {:?}", t.data),
                RenderUnit::Single(_) => "node".to_string(),
                RenderUnit::Chain(branches) => format!(
                    "chain {:?}",
                    branches.iter().map(|b| b.kind).collect::<Vec<_>>()
                ),
            })
            .collect()
    }

    #[test]
    fn test_full_chain() {
        let nodes = nodes(
            "<a v-if=\"x\"></a>\n<b v-else-if=\"y\"></b>\n<c v-else-if=\"z\"></c>\n<d v-else></d>\n<e></e>",
        );
        let (unit, consumed) = next_unit(&nodes).unwrap();
        assert_eq!(consumed, 4);
        match unit {
            RenderUnit::Chain(branches) => {
                let conditions: Vec<_> = branches.iter().map(|b| b.condition()).collect();
                assert_eq!(conditions, vec![Some("x"), Some("y"), Some("z"), None]);
            }
            RenderUnit::Single(_) => panic!("expected a chain"),
        }
    }

    #[test]
    fn test_empty_siblings() {
        assert!(next_unit(&[]).is_none());
        assert!(group_siblings(&[]).is_empty());
    }

    #[test]
    fn test_standalone_if_is_chain_of_one() {
        let nodes = nodes(r#"<p v-if="ok">x</p><p>y</p>"#);
        let (unit, consumed) = next_unit(&nodes).unwrap();
        assert_eq!(consumed, 1);
        assert!(matches!(unit, RenderUnit::Chain(ref b) if b.len() == 1));
    }

    #[test]
    fn test_else_terminates_chain() {
        let nodes = nodes(r#"<a v-if="x"></a><b v-else></b><c v-else-if="y"></c>"#);
        assert_eq!(
            shape(&group_siblings(&nodes)),
            vec!["chain [If, Else]", "<c>"]
        );
    }

    #[test]
    fn test_text_breaks_chain() {
        let nodes = nodes(r#"<a v-if="x"></a> <b v-else></b>"#);
        assert_eq!(
            shape(&group_siblings(&nodes)),
            vec!["chain [If]", "text \" \"", "<b>"]
        );
    }

    #[test]
    fn test_comment_breaks_chain() {
        let nodes = nodes("<a v-if=\"x\"></a><!-- c --><b v-else></b>");
        assert_eq!(
            shape(&group_siblings(&nodes)),
            vec!["chain [If]", "node", "<b>"]
        );
    }

    #[test]
    fn test_plain_element_breaks_chain() {
        let nodes = nodes(r#"<a v-if="x"></a><p></p><b v-else></b>"#);
        assert_eq!(group_siblings(&nodes).len(), 3);
    }

    #[test]
    fn test_missing_condition_defaults_to_false() {
        let nodes = nodes(r#"<a v-if></a>"#);
        let (unit, _) = next_unit(&nodes).unwrap();
        match unit {
            RenderUnit::Chain(branches) => assert_eq!(branches[0].condition(), Some("false")),
            RenderUnit::Single(_) => panic!("expected a chain"),
        }
    }
}
