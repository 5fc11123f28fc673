//! Syntax tree for JavaScript source with embedded JSX.
//!
//! Contains both the input side (code, markup elements, call sites) produced
//! by the parser and the output side (template literals, tagged templates)
//! produced by the compiler. Both live in the same `Node` enum so a compiled
//! node can replace a markup node in place.

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// A position in source text, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// A run of source nodes.
///
/// A whole program is an expression, and so is the inside of every `{...}`
/// hole in markup. Code between markup elements is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    pub nodes: Vec<Node>,
}

impl Expression {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// An expression made of a single piece of opaque code.
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::Code(text.into())],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether any markup (bare or as a call argument) is still present at this level.
    pub fn contains_markup(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, Node::Markup(_) | Node::Call(_)))
    }
}

/// A node in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Opaque source text.
    Code(String),

    /// A markup element in expression position.
    Markup(Element),

    /// A call whose sole argument is a markup element: `render(<a/>)`.
    Call(CallSite),

    /// A compiled element: `` `<a></a>` ``.
    Template(TemplateLiteral),

    /// A compiled call site: ``render`<a></a>` ``.
    TaggedTemplate(TaggedTemplate),
}

/// A call expression with a markup element as its only argument.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    /// Source text of the callee, e.g. `render` or `view.mount`.
    pub callee: String,
    pub element: Element,
}

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

/// A JSX element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Child>,
    pub self_closing: bool,
    /// Present for every element that is not self-closing.
    pub closing: Option<ClosingTag>,
    pub span: Span,
}

/// The `</tag>` that ends an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingTag {
    pub tag: String,
}

/// An attribute on an opening tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A string value exactly as written, quotes included: `"/about"`.
    Literal(String),

    /// `{expr}`
    Expression(ExpressionContainer),

    /// An attribute without a value: `disabled`.
    Bare,
}

/// A `{...}` hole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionContainer {
    pub expression: Expression,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Element(Element),
    /// Raw text between tags, whitespace included.
    Text(String),
    Expression(ExpressionContainer),
}

// ---------------------------------------------------------------------------
// Templates (compiler output)
// ---------------------------------------------------------------------------

/// A template literal: `quasis.len() == expressions.len() + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateLiteral {
    pub quasis: Vec<TemplateElement>,
    /// Source text of each `${...}` slot.
    pub expressions: Vec<String>,
}

/// One literal segment of a template literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateElement {
    /// Text as it appears between the backticks.
    pub raw: String,
    /// Text the segment evaluates to.
    pub cooked: String,
    /// Whether this is the last segment.
    pub tail: bool,
}

/// A template literal invoked through a tag function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedTemplate {
    pub tag: String,
    pub quasi: TemplateLiteral,
}
