//! Partitioning of an element's props by role.

use std::borrow::Cow;
use vue_template_parser::{Directive, DirectiveKind, Element, Prop};

/// An output attribute, lowered from a plain attribute or a binding directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrSpec<'a> {
    /// `name` or `name="value"`.
    Static {
        name: &'a str,
        value: Option<Cow<'a, str>>,
    },
    /// `:name="expr"`.
    Bound {
        name: &'a str,
        expression: Option<Cow<'a, str>>,
    },
    /// `:[key]="expr"`.
    DynamicKey {
        key: &'a str,
        expression: Option<&'a str>,
    },
    /// `v-bind="object"`.
    Spread { expression: Option<&'a str> },
    /// `@event="handler"`.
    Event {
        event: Option<&'a str>,
        expression: Option<&'a str>,
    },
    /// A directive with no output form, such as `v-model` or `v-slot`.
    Unsupported { raw_name: &'a str },
}

/// The content-injection directive of an element.
#[derive(Debug, Clone, Copy)]
pub enum ContentInjection<'a> {
    /// `v-html`
    Html(&'a Directive),
    /// `v-text`
    Text(&'a Directive),
}

impl<'a> ContentInjection<'a> {
    /// The Astro attribute that replaces the directive.
    pub fn attribute(&self) -> &'static str {
        match self {
            ContentInjection::Html(_) => "set:html",
            ContentInjection::Text(_) => "set:text",
        }
    }

    /// The injected expression, `''` when missing.
    pub fn expression(&self) -> &'a str {
        let dir = match *self {
            ContentInjection::Html(dir) | ContentInjection::Text(dir) => dir,
        };
        dir.expression_text().unwrap_or("''")
    }
}

/// The props of one element, sorted by how they are generated.
#[derive(Debug, Clone, Default)]
pub struct ElementDirectives<'a> {
    /// `v-if`, `v-else-if` or `v-else`.
    pub conditional: Option<&'a Directive>,
    /// `v-for`.
    pub for_loop: Option<&'a Directive>,
    /// `v-show`.
    pub show: Option<&'a Directive>,
    /// `v-html` or `v-text`; `v-html` wins when both are present.
    pub content: Option<ContentInjection<'a>>,
    /// Plain attributes and bindings, in source order.
    pub attrs: Vec<AttrSpec<'a>>,
}

impl<'a> ElementDirectives<'a> {
    /// Partitions the props of `element`. For repeated control directives the
    /// first occurrence is used.
    pub fn extract(element: &'a Element) -> Self {
        let mut out = Self::default();
        let mut html = None;
        let mut text = None;

        for prop in &element.props {
            let dir = match prop {
                Prop::Attribute(attr) => {
                    out.attrs.push(AttrSpec::Static {
                        name: &attr.name,
                        value: attr.value.as_ref().map(|v| Cow::Borrowed(v.content.as_str())),
                    });
                    continue;
                }
                Prop::Directive(dir) => dir,
            };

            match dir.kind {
                DirectiveKind::If | DirectiveKind::ElseIf | DirectiveKind::Else => {
                    out.conditional.get_or_insert(dir);
                }
                DirectiveKind::For => {
                    out.for_loop.get_or_insert(dir);
                }
                DirectiveKind::Show => {
                    out.show.get_or_insert(dir);
                }
                DirectiveKind::Html => {
                    html.get_or_insert(dir);
                }
                DirectiveKind::Text => {
                    text.get_or_insert(dir);
                }
                DirectiveKind::Bind => out.attrs.push(lower_bind(dir)),
                DirectiveKind::On => out.attrs.push(AttrSpec::Event {
                    event: dir.static_arg(),
                    expression: dir.expression_text(),
                }),
                DirectiveKind::Other => out.attrs.push(AttrSpec::Unsupported {
                    raw_name: &dir.raw_name,
                }),
            }
        }

        out.content = html
            .map(ContentInjection::Html)
            .or(text.map(ContentInjection::Text));
        out
    }

    /// The `v-show` condition, `false` when the directive has no expression.
    pub fn show_condition(&self) -> Option<&'a str> {
        self.show
            .map(|dir| dir.expression_text().unwrap_or("false"))
    }
}

fn lower_bind(dir: &Directive) -> AttrSpec<'_> {
    let expression = dir.expression_text();
    match &dir.arg {
        Some(arg) if arg.is_static => AttrSpec::Bound {
            name: &arg.content,
            expression: expression.map(Cow::Borrowed),
        },
        Some(arg) => AttrSpec::DynamicKey {
            key: &arg.content,
            expression,
        },
        None => AttrSpec::Spread { expression },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vue_template_parser::{parse, TemplateNode};

    fn element(source: &str) -> Element {
        match parse(source).document.fragment.nodes.into_iter().next() {
            Some(TemplateNode::Element(el)) => el,
            other => panic!("expected an element, got {other:?}"),
        }
    }

    #[test]
    fn test_partition_preserves_attr_order() {
        let el = element(
            r#"<a class="x" v-if="ok" :href="url" v-for="l in links" @click="go" v-model="m" v-bind="rest" :[k]="v"></a>"#,
        );
        let dirs = ElementDirectives::extract(&el);

        assert_eq!(dirs.conditional.map(|d| d.kind), Some(DirectiveKind::If));
        assert_eq!(
            dirs.for_loop.and_then(|d| d.expression_text()),
            Some("l in links")
        );
        assert_eq!(
            dirs.attrs,
            vec![
                AttrSpec::Static {
                    name: "class",
                    value: Some(Cow::Borrowed("x"))
                },
                AttrSpec::Bound {
                    name: "href",
                    expression: Some(Cow::Borrowed("url"))
                },
                AttrSpec::Event {
                    event: Some("click"),
                    expression: Some("go")
                },
                AttrSpec::Unsupported { raw_name: "v-model" },
                AttrSpec::Spread {
                    expression: Some("rest")
                },
                AttrSpec::DynamicKey {
                    key: "k",
                    expression: Some("v")
                },
            ]
        );
    }

    #[test]
    fn test_html_wins_over_text() {
        let el = element(r#"<div v-text="a" v-html="b"></div>"#);
        let dirs = ElementDirectives::extract(&el);
        let content = dirs.content.expect("content injection");
        assert_eq!(content.attribute(), "set:html");
        assert_eq!(content.expression(), "b");
    }

    #[test]
    fn test_defaults_for_missing_expressions() {
        let el = element(r#"<div v-show v-text=""></div>"#);
        let dirs = ElementDirectives::extract(&el);
        assert_eq!(dirs.show_condition(), Some("false"));
        assert_eq!(dirs.content.map(|c| c.expression()), Some("''"));
    }
}
