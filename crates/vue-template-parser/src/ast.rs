//! AST types for Vue templates.
//!
//! The tree only models what a template body contains: text, mustache
//! interpolations, comments and elements carrying plain attributes or
//! directives. Expression text is never parsed; it is stored as written.

use crate::Span;
use smol_str::SmolStr;

/// A parsed template body.
#[derive(Debug, Clone, Default)]
pub struct TemplateDocument {
    /// The top-level nodes.
    pub fragment: Fragment,
    /// The span of the entire source.
    pub span: Span,
}

/// An ordered list of sibling nodes.
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    /// The child nodes, in source order.
    pub nodes: Vec<TemplateNode>,
    /// The span covered by the nodes.
    pub span: Span,
}

/// A node in the template.
#[derive(Debug, Clone)]
pub enum TemplateNode {
    /// Text content.
    Text(Text),
    /// A mustache interpolation `{{ expr }}`.
    Interpolation(Interpolation),
    /// An element or component.
    Element(Element),
    /// An HTML comment.
    Comment(Comment),
}

impl TemplateNode {
    /// Returns the span of this node.
    pub fn span(&self) -> Span {
        match self {
            TemplateNode::Text(n) => n.span,
            TemplateNode::Interpolation(n) => n.span,
            TemplateNode::Element(n) => n.span,
            TemplateNode::Comment(n) => n.span,
        }
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            TemplateNode::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// Text content.
#[derive(Debug, Clone)]
pub struct Text {
    /// The span of the text.
    pub span: Span,
    /// The text content (raw, entities are not decoded).
    pub data: String,
    /// Whether this text is only whitespace.
    pub is_whitespace: bool,
}

/// A mustache interpolation.
#[derive(Debug, Clone)]
pub struct Interpolation {
    /// The span including the `{{` and `}}` delimiters.
    pub span: Span,
    /// The span of the expression between the delimiters.
    pub expression_span: Span,
    /// The trimmed expression text.
    pub expression: String,
}

/// A comment.
#[derive(Debug, Clone)]
pub struct Comment {
    /// The span of the comment.
    pub span: Span,
    /// The comment content (without `<!--` and `-->`).
    pub data: String,
}

/// An element or component.
#[derive(Debug, Clone)]
pub struct Element {
    /// The span of the element, closing tag included.
    pub span: Span,
    /// The tag name as written.
    pub name: SmolStr,
    /// Attributes and directives in source order.
    pub props: Vec<Prop>,
    /// The child nodes.
    pub children: Vec<TemplateNode>,
    /// Whether the tag was written as `<tag />`.
    pub self_closing: bool,
}

impl Element {
    /// Iterates over the directives of this element.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.props.iter().filter_map(|prop| match prop {
            Prop::Directive(dir) => Some(dir),
            Prop::Attribute(_) => None,
        })
    }

    /// Returns the first directive of the given kind.
    pub fn directive(&self, kind: DirectiveKind) -> Option<&Directive> {
        self.directives().find(|dir| dir.kind == kind)
    }

    /// Returns true if the element carries a directive of the given kind.
    pub fn has_directive(&self, kind: DirectiveKind) -> bool {
        self.directive(kind).is_some()
    }

    /// Returns true if this is a void element that never has children.
    pub fn is_void(&self) -> bool {
        crate::is_void_element(&self.name)
    }
}

/// An attribute or directive on an element.
#[derive(Debug, Clone)]
pub enum Prop {
    /// A plain attribute `name` or `name="value"`.
    Attribute(Attribute),
    /// A directive `v-name:arg.mod="expr"` or one of its shorthands.
    Directive(Directive),
}

impl Prop {
    /// Returns the span of this prop.
    pub fn span(&self) -> Span {
        match self {
            Prop::Attribute(a) => a.span,
            Prop::Directive(d) => d.span,
        }
    }
}

/// A plain attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// The span of the attribute.
    pub span: Span,
    /// The attribute name.
    pub name: SmolStr,
    /// The value, `None` for boolean attributes.
    pub value: Option<AttributeValue>,
}

/// A plain attribute value.
#[derive(Debug, Clone)]
pub struct AttributeValue {
    /// The span of the value without quotes.
    pub span: Span,
    /// The entity-decoded value.
    pub content: String,
}

/// A directive.
#[derive(Debug, Clone)]
pub struct Directive {
    /// The span of the directive.
    pub span: Span,
    /// The attribute name exactly as written (`v-if`, `:class`, `@click.stop`).
    pub raw_name: SmolStr,
    /// The directive kind.
    pub kind: DirectiveKind,
    /// The directive name without the `v-` prefix (`if`, `bind`, `model`).
    pub name: SmolStr,
    /// The argument (`class` in `:class`).
    pub arg: Option<DirectiveArg>,
    /// Modifiers (`stop` in `@click.stop`).
    pub modifiers: Vec<SmolStr>,
    /// The expression value.
    pub expression: Option<Expression>,
}

impl Directive {
    /// Returns the expression text when present and not blank.
    pub fn expression_text(&self) -> Option<&str> {
        self.expression
            .as_ref()
            .map(|exp| exp.content.as_str())
            .filter(|content| !content.trim().is_empty())
    }

    /// Returns the static argument name, if any.
    pub fn static_arg(&self) -> Option<&str> {
        self.arg
            .as_ref()
            .filter(|arg| arg.is_static)
            .map(|arg| arg.content.as_str())
    }
}

/// A directive argument.
#[derive(Debug, Clone)]
pub struct DirectiveArg {
    /// The span of the argument.
    pub span: Span,
    /// The argument text; for dynamic arguments the text between the brackets.
    pub content: SmolStr,
    /// False for dynamic arguments written as `[expr]`.
    pub is_static: bool,
}

/// A directive expression.
#[derive(Debug, Clone)]
pub struct Expression {
    /// The span of the expression text.
    pub span: Span,
    /// The entity-decoded expression text.
    pub content: String,
}

/// The kind of directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `v-if`
    If,
    /// `v-else-if`
    ElseIf,
    /// `v-else`
    Else,
    /// `v-for`
    For,
    /// `v-show`
    Show,
    /// `v-text`
    Text,
    /// `v-html`
    Html,
    /// `v-bind` / `:arg` / `.arg`
    Bind,
    /// `v-on` / `@arg`
    On,
    /// Any other directive (`v-model`, `v-slot`, custom directives).
    Other,
}

impl DirectiveKind {
    /// Maps a directive name (without `v-`) to its kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "if" => DirectiveKind::If,
            "else-if" => DirectiveKind::ElseIf,
            "else" => DirectiveKind::Else,
            "for" => DirectiveKind::For,
            "show" => DirectiveKind::Show,
            "text" => DirectiveKind::Text,
            "html" => DirectiveKind::Html,
            "bind" => DirectiveKind::Bind,
            "on" => DirectiveKind::On,
            _ => DirectiveKind::Other,
        }
    }

    /// Returns true for the kinds that take part in a conditional chain.
    pub fn is_conditional(&self) -> bool {
        matches!(
            self,
            DirectiveKind::If | DirectiveKind::ElseIf | DirectiveKind::Else
        )
    }
}
