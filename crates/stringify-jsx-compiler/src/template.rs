//! Template buffer.
//!
//! Accumulates literal segments and expression slots while an element is
//! compiled. The buffer always alternates `literal, slot, literal, slot, ...`:
//! there is never more than one literal more than there are slots, and never
//! fewer literals than slots. Adjacent literals fuse into one segment, which is
//! what lets the end of an opening tag, a run of children and a closing tag
//! collapse into a single literal.

use stringify_jsx_parser::{TemplateElement, TemplateLiteral};

use crate::CompileError;

/// Literal segments and the slots between them.
///
/// Slots hold the source text of an already compiled expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateBuffer {
    literals: Vec<String>,
    expressions: Vec<String>,
}

impl TemplateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from raw parts without checking them.
    ///
    /// A buffer built this way may be malformed; [`TemplateBuffer::concat`]
    /// and [`TemplateBuffer::materialize`] refuse it.
    pub fn from_parts(literals: Vec<String>, expressions: Vec<String>) -> Self {
        Self {
            literals,
            expressions,
        }
    }

    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    pub fn expressions(&self) -> &[String] {
        &self.expressions
    }

    /// Whether the last thing added was a literal.
    fn ends_with_literal(&self) -> bool {
        self.literals.len() == self.expressions.len() + 1
    }

    /// At least as many literals as slots.
    pub fn is_well_formed(&self) -> bool {
        self.literals.len() >= self.expressions.len()
    }

    /// Append literal text, fusing it onto the last segment when the buffer
    /// already ends in a literal.
    pub fn add_literal(&mut self, text: &str) -> &mut Self {
        let fuse = self.ends_with_literal();
        match self.literals.last_mut() {
            Some(last) if fuse => last.push_str(text),
            _ => self.literals.push(text.to_owned()),
        }
        self
    }

    /// Append an expression slot. A slot directly after another slot gets an
    /// empty literal between them.
    pub fn add_expression(&mut self, expression: impl Into<String>) -> &mut Self {
        if self.literals.len() == self.expressions.len() {
            self.literals.push(String::new());
        }
        self.expressions.push(expression.into());
        self
    }

    /// Replay `other` onto this buffer through `add_literal` and
    /// `add_expression`, so its first literal fuses with our last one.
    ///
    /// Fails without touching `self` when `other` has more slots than literals.
    pub fn concat(&mut self, other: TemplateBuffer) -> Result<&mut Self, CompileError> {
        if !other.is_well_formed() {
            return Err(CompileError::MalformedBuffer {
                literals: other.literals.len(),
                expressions: other.expressions.len(),
            });
        }

        let mut expressions = other.expressions.into_iter();
        for literal in other.literals {
            self.add_literal(&literal);
            if let Some(expression) = expressions.next() {
                self.add_expression(expression);
            }
        }
        Ok(self)
    }

    /// Close the buffer with a trailing literal if needed and turn it into a
    /// template literal.
    ///
    /// Fails when the buffer has more slots than literals, which only a buffer
    /// built with [`TemplateBuffer::from_parts`] can have.
    pub fn materialize(mut self) -> Result<TemplateLiteral, CompileError> {
        if !self.is_well_formed() {
            return Err(CompileError::UnbalancedTemplate {
                literals: self.literals.len(),
                expressions: self.expressions.len(),
            });
        }
        if self.literals.len() == self.expressions.len() {
            self.literals.push(String::new());
        }

        let last = self.literals.len() - 1;
        let quasis = self
            .literals
            .into_iter()
            .enumerate()
            .map(|(i, cooked)| TemplateElement {
                raw: escape_template_raw(&cooked),
                cooked,
                tail: i == last,
            })
            .collect();

        Ok(TemplateLiteral {
            quasis,
            expressions: self.expressions,
        })
    }
}

/// Escape text for use between backticks: `\`, `` ` `` and `${` would
/// otherwise end the literal or open a slot.
pub fn escape_template_raw(text: &str) -> String {
    let mut raw = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => raw.push_str("\\\\"),
            '`' => raw.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => raw.push_str("\\$"),
            _ => raw.push(ch),
        }
    }
    raw
}
