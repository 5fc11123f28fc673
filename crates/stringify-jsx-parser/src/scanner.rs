use crate::ast::Span;
use crate::ParseError;

/// Character cursor over source text.
///
/// Keeps the source as a `Vec<char>` for index-based navigation and tracks
/// line and column on every advance, so any position the parser reaches can
/// be reported in an error.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Scanner {
    /// Create a new scanner for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// The current character, or `'\0'` at end of input.
    pub fn peek(&self) -> char {
        self.peek_at(0)
    }

    pub fn peek_next(&self) -> char {
        self.peek_at(1)
    }

    pub fn peek_at(&self, offset: usize) -> char {
        self.chars.get(self.pos + offset).copied().unwrap_or('\0')
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Consume the current character.
    pub fn advance(&mut self) -> char {
        let ch = self.peek();
        if self.is_at_end() {
            return ch;
        }
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    /// Consume `expected` if it is the current character.
    pub fn eat(&mut self, expected: char) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `expected` or fail with a message naming what was being parsed.
    pub fn expect(&mut self, expected: char, context: &str) -> Result<(), ParseError> {
        if self.eat(expected) {
            Ok(())
        } else if self.is_at_end() {
            Err(self.error(format!("Expected '{expected}' {context}, got end of input")))
        } else {
            Err(self.error(format!(
                "Expected '{expected}' {context}, got '{}'",
                self.peek()
            )))
        }
    }

    pub fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    /// Consume characters while `pred` holds and return them.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut taken = String::new();
        while !self.is_at_end() && pred(self.peek()) {
            taken.push(self.advance());
        }
        taken
    }

    /// The first non-whitespace character ahead, without consuming anything.
    pub fn peek_past_whitespace(&self) -> char {
        self.chars[self.pos.min(self.chars.len())..]
            .iter()
            .copied()
            .find(|c| !c.is_whitespace())
            .unwrap_or('\0')
    }

    /// A zero-width span at the current position.
    pub fn mark(&self) -> Span {
        Span::new(self.pos, self.pos, self.line, self.column)
    }

    /// Extend a span produced by [`Scanner::mark`] to the current position.
    pub fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.pos, start.line, start.column)
    }

    /// An error at the current position.
    pub fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    /// An error at a previously marked position.
    pub fn error_at(&self, span: Span, message: String) -> ParseError {
        ParseError {
            message,
            line: span.line,
            column: span.column,
        }
    }
}
