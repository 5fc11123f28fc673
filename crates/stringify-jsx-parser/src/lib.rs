//! stringify-jsx parser
//!
//! Parses JavaScript source with embedded JSX into a tree where ordinary code
//! stays opaque text and markup elements become structured nodes.
//! The compiler rewrites the markup nodes into template nodes; every node
//! renders back to source with `to_source()`.
//!
//! # Example
//!
//! ```
//! use stringify_jsx_parser::{Node, Parser};
//!
//! let program = Parser::parse("const el = <br/>;").unwrap();
//! assert!(matches!(program.nodes[1], Node::Markup(_)));
//! assert_eq!(program.to_source(), "const el = <br/>;");
//! ```

pub mod ast;
pub mod parser;
mod render;
pub mod scanner;

pub use ast::{
    Attribute, AttributeValue, CallSite, Child, ClosingTag, Element, Expression,
    ExpressionContainer, Node, Span, TaggedTemplate, TemplateElement, TemplateLiteral,
};
pub use parser::Parser;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
