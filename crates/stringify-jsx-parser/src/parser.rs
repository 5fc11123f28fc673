//! Source parser for JavaScript with embedded JSX.
//!
//! Ordinary code is not parsed: it is copied into `Node::Code` runs while the
//! parser tracks brackets, strings, comments and template literals. A `<` in
//! expression position starts a markup element, which is parsed into an
//! `Element` by recursive descent. `{...}` holes inside markup are parsed as
//! expressions again, so markup nested inside holes is found as well.

use crate::ast::{
    Attribute, AttributeValue, CallSite, Child, ClosingTag, Element, Expression,
    ExpressionContainer, Node, Span,
};
use crate::scanner::Scanner;
use crate::ParseError;

/// Keywords after which a `<` starts markup rather than a comparison.
const EXPRESSION_KEYWORDS: &[&str] = &[
    "return", "yield", "default", "case", "await", "in", "of", "else", "do", "typeof", "void",
    "throw", "delete", "instanceof",
];

/// Punctuation after which a `<` starts markup rather than a comparison.
const EXPRESSION_PUNCTUATION: &[char] = &[
    '(', ',', '=', ':', '?', '[', '{', '!', '&', '|', ';', '+', '-', '*', '%', '~', '^', '>',
];

/// Keywords that can precede `(` without being called. Expression keywords
/// are checked as well.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "while", "for", "switch", "catch", "function", "with", "new", "super", "import",
    "class", "extends",
];

/// Accumulates the nodes of one expression, collecting code text between markup.
#[derive(Default)]
struct ExpressionBuilder {
    nodes: Vec<Node>,
    code: String,
}

impl ExpressionBuilder {
    fn push(&mut self, ch: char) {
        self.code.push(ch);
    }

    fn push_str(&mut self, text: &str) {
        self.code.push_str(text);
    }

    fn push_node(&mut self, node: Node) {
        self.flush_code();
        self.nodes.push(node);
    }

    fn flush_code(&mut self) {
        if !self.code.is_empty() {
            self.nodes.push(Node::Code(std::mem::take(&mut self.code)));
        }
    }

    fn finish(mut self) -> Expression {
        self.flush_code();
        Expression::new(self.nodes)
    }

    /// Whether a `<` at this point starts an expression rather than continues one.
    fn at_expression_start(&self) -> bool {
        let code = self.code.trim_end();
        let Some(last) = code.chars().last() else {
            // Start of input or hole. Directly after markup it is a comparison.
            return self.nodes.is_empty();
        };

        // `i++ < n` compares.
        if code.ends_with("++") || code.ends_with("--") {
            return false;
        }
        if EXPRESSION_PUNCTUATION.contains(&last) {
            return true;
        }

        let word_start = code
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_identifier_char(*c))
            .last()
            .map_or(code.len(), |(i, _)| i);
        EXPRESSION_KEYWORDS.contains(&&code[word_start..])
    }

    /// If the pending code ends in `callee(`, return the byte offset where the
    /// callee starts and the callee text.
    ///
    /// A callee is a member chain rooted at an identifier: `render`,
    /// `view.mount`, `a[0]`, `getRenderer()`, `foo().bar`. `new Foo(` is a
    /// construction, not a call.
    fn trailing_callee(&self) -> Option<(usize, String)> {
        let head = self.code.trim_end().strip_suffix('(')?.trim_end();
        let (start, has_call) = member_chain_start(head)?;
        let callee = &head[start..];

        let root_end = callee
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(callee.len());
        let root = &callee[..root_end];
        if root.is_empty()
            || root.starts_with(|c: char| c.is_ascii_digit())
            || is_keyword(root)
        {
            return None;
        }

        let before = head[..start].trim_end();
        if ends_with_word(before, "new") {
            // `new Foo().bar(` calls `bar` on the new object.
            if !has_call {
                return None;
            }
            let new_start = before.len() - "new".len();
            return Some((new_start, head[new_start..].to_string()));
        }

        Some((start, callee.to_string()))
    }
}

/// Walk back over the member chain that ends `code` and return its byte
/// offset and whether it contains a call.
fn member_chain_start(code: &str) -> Option<(usize, bool)> {
    let chars: Vec<(usize, char)> = code.char_indices().collect();
    let mut i = chars.len();
    let mut has_call = false;

    loop {
        match chars[..i].last()?.1 {
            ')' | ']' => {
                let open = matching_open(&chars[..i])?;
                has_call |= chars[open].1 == '(';
                i = open;
            }
            c if is_identifier_char(c) => {
                while i > 0 && is_identifier_char(chars[i - 1].1) {
                    i -= 1;
                }
                match chars[..i].last() {
                    Some((_, '.')) => {
                        i -= 1;
                        continue;
                    }
                    _ => return Some((chars[i].0, has_call)),
                }
            }
            _ => return None,
        }

        // A group is followed by another group, a `.`, or the identifier it
        // indexes or calls.
        match chars[..i].last() {
            Some((_, ')' | ']')) => {}
            Some((_, '.')) => i -= 1,
            Some((_, c)) if is_identifier_char(*c) => {}
            _ => return None,
        }
    }
}

/// Index of the bracket that opens the group closed by the last char.
fn matching_open(chars: &[(usize, char)]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &(_, c)) in chars.iter().enumerate().rev() {
        match c {
            ')' | ']' | '}' => depth += 1,
            '(' | '[' | '{' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_keyword(word: &str) -> bool {
    CONTROL_KEYWORDS.contains(&word) || EXPRESSION_KEYWORDS.contains(&word)
}

fn ends_with_word(code: &str, word: &str) -> bool {
    code.strip_suffix(word)
        .is_some_and(|rest| !rest.ends_with(|c: char| is_identifier_char(c) || c == '.'))
}

/// Source parser.
///
/// Converts source text into an `Expression` whose markup nodes are fully
/// structured and whose remaining code is kept verbatim.
pub struct Parser {
    scanner: Scanner,
}

impl Parser {
    /// Create a new parser for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            scanner: Scanner::new(source),
        }
    }

    /// Parse source code into an expression tree.
    pub fn parse(source: &str) -> Result<Expression, ParseError> {
        let mut parser = Parser::new(source);
        parser.parse_expression(None)
    }

    /// Parse code up to an unbalanced `terminator` (not consumed), or to end of
    /// input when there is none.
    fn parse_expression(&mut self, terminator: Option<char>) -> Result<Expression, ParseError> {
        let mut builder = ExpressionBuilder::default();
        self.scan_code(&mut builder, terminator)?;
        Ok(builder.finish())
    }

    // =========================================================================
    // Code
    // =========================================================================

    fn scan_code(
        &mut self,
        builder: &mut ExpressionBuilder,
        terminator: Option<char>,
    ) -> Result<(), ParseError> {
        let start = self.scanner.mark();
        let mut depth = 0usize;

        loop {
            if self.scanner.is_at_end() {
                return match terminator {
                    Some(close) => Err(self
                        .scanner
                        .error_at(start, format!("Unterminated expression, expected '{close}'"))),
                    None => Ok(()),
                };
            }

            let ch = self.scanner.peek();
            match ch {
                '(' | '[' | '{' => {
                    depth += 1;
                    builder.push(self.scanner.advance());
                }
                ')' | ']' | '}' => {
                    if depth == 0 && terminator == Some(ch) {
                        return Ok(());
                    }
                    depth = depth.saturating_sub(1);
                    builder.push(self.scanner.advance());
                }
                '\'' | '"' => self.scan_string(builder)?,
                '`' => self.scan_template_literal(builder)?,
                '/' if self.scanner.peek_next() == '/' => self.scan_line_comment(builder),
                '/' if self.scanner.peek_next() == '*' => self.scan_block_comment(builder)?,
                '<' if self.markup_starts_here(builder) => {
                    if self.scan_markup(builder)? {
                        // The call's `(` was counted when it was copied.
                        depth = depth.saturating_sub(1);
                    }
                }
                _ => builder.push(self.scanner.advance()),
            }
        }
    }

    fn markup_starts_here(&self, builder: &ExpressionBuilder) -> bool {
        let next = self.scanner.peek_next();
        (is_tag_start(next) || next == '>') && builder.at_expression_start()
    }

    /// Copy a quoted string literal verbatim.
    fn scan_string(&mut self, builder: &mut ExpressionBuilder) -> Result<(), ParseError> {
        let start = self.scanner.mark();
        let quote = self.scanner.advance();
        builder.push(quote);

        loop {
            if self.scanner.is_at_end() || self.scanner.peek() == '\n' {
                return Err(self
                    .scanner
                    .error_at(start, "Unterminated string".into()));
            }
            let ch = self.scanner.advance();
            builder.push(ch);
            if ch == '\\' {
                builder.push(self.scanner.advance());
            } else if ch == quote {
                return Ok(());
            }
        }
    }

    /// Copy a template literal, scanning its `${...}` holes as code.
    fn scan_template_literal(&mut self, builder: &mut ExpressionBuilder) -> Result<(), ParseError> {
        let start = self.scanner.mark();
        builder.push(self.scanner.advance());

        loop {
            if self.scanner.is_at_end() {
                return Err(self
                    .scanner
                    .error_at(start, "Unterminated template literal".into()));
            }
            match self.scanner.advance() {
                '\\' => {
                    builder.push('\\');
                    builder.push(self.scanner.advance());
                }
                '`' => {
                    builder.push('`');
                    return Ok(());
                }
                '$' if self.scanner.peek() == '{' => {
                    self.scanner.advance();
                    builder.push_str("${");
                    self.scan_code(builder, Some('}'))?;
                    self.scanner.expect('}', "to close template literal hole")?;
                    builder.push('}');
                }
                ch => builder.push(ch),
            }
        }
    }

    fn scan_line_comment(&mut self, builder: &mut ExpressionBuilder) {
        while !self.scanner.is_at_end() && self.scanner.peek() != '\n' {
            builder.push(self.scanner.advance());
        }
    }

    fn scan_block_comment(&mut self, builder: &mut ExpressionBuilder) -> Result<(), ParseError> {
        let start = self.scanner.mark();
        builder.push(self.scanner.advance());
        builder.push(self.scanner.advance());

        loop {
            if self.scanner.is_at_end() {
                return Err(self
                    .scanner
                    .error_at(start, "Unterminated block comment".into()));
            }
            if self.scanner.peek() == '*' && self.scanner.peek_next() == '/' {
                builder.push(self.scanner.advance());
                builder.push(self.scanner.advance());
                return Ok(());
            }
            builder.push(self.scanner.advance());
        }
    }

    /// Parse a markup element and record it either as bare markup or, when it
    /// is the only argument of a call, as a call site. Returns whether the
    /// call's closing parenthesis was consumed.
    fn scan_markup(&mut self, builder: &mut ExpressionBuilder) -> Result<bool, ParseError> {
        let element = self.parse_element()?;

        if self.scanner.peek_past_whitespace() == ')' {
            if let Some((start, callee)) = builder.trailing_callee() {
                builder.code.truncate(start);
                self.scanner.skip_whitespace();
                self.scanner.advance(); // consume `)`
                builder.push_node(Node::Call(CallSite { callee, element }));
                return Ok(true);
            }
        }

        builder.push_node(Node::Markup(element));
        Ok(false)
    }

    // =========================================================================
    // Markup
    // =========================================================================

    /// Parse an element starting at `<`:
    /// ```text
    /// <a href="/x" className={cls}>Hello {name}</a>
    /// ```
    fn parse_element(&mut self) -> Result<Element, ParseError> {
        let start = self.scanner.mark();
        self.scanner.expect('<', "to open an element")?;

        if self.scanner.peek() == '>' {
            return Err(self
                .scanner
                .error_at(start, "JSX fragments are not supported".into()));
        }

        let tag = self.scanner.take_while(is_tag_char);
        if tag.is_empty() {
            return Err(self.scanner.error("Expected tag name".into()));
        }

        let mut attributes = Vec::new();
        let self_closing = loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                '/' => {
                    self.scanner.advance();
                    self.scanner.expect('>', "after '/' in a self-closing tag")?;
                    break true;
                }
                '>' => {
                    self.scanner.advance();
                    break false;
                }
                '{' => {
                    return Err(self
                        .scanner
                        .error("Spread attributes are not supported".into()));
                }
                c if is_attribute_start(c) => attributes.push(self.parse_attribute()?),
                _ if self.scanner.is_at_end() => {
                    return Err(self
                        .scanner
                        .error_at(start, format!("Unterminated opening tag <{tag}>")));
                }
                c => {
                    return Err(self
                        .scanner
                        .error(format!("Unexpected character in <{tag}>: '{c}'")));
                }
            }
        };

        if self_closing {
            return Ok(Element {
                tag,
                attributes,
                children: Vec::new(),
                self_closing: true,
                closing: None,
                span: self.scanner.span_from(start),
            });
        }

        let (children, closing) = self.parse_children(&tag, start)?;

        Ok(Element {
            tag,
            attributes,
            children,
            self_closing: false,
            closing: Some(closing),
            span: self.scanner.span_from(start),
        })
    }

    /// Parse `name`, `name="raw"`, `name='raw'` or `name={expr}`.
    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        let name = self.scanner.take_while(is_attribute_char);
        self.scanner.skip_whitespace();

        if !self.scanner.eat('=') {
            return Ok(Attribute {
                name,
                value: AttributeValue::Bare,
            });
        }
        self.scanner.skip_whitespace();

        let value = match self.scanner.peek() {
            quote @ ('"' | '\'') => {
                let start = self.scanner.mark();
                let mut raw = String::new();
                raw.push(self.scanner.advance());
                loop {
                    if self.scanner.is_at_end() {
                        return Err(self
                            .scanner
                            .error_at(start, format!("Unterminated value for attribute '{name}'")));
                    }
                    let ch = self.scanner.advance();
                    raw.push(ch);
                    if ch == quote {
                        break;
                    }
                }
                AttributeValue::Literal(raw)
            }
            '{' => AttributeValue::Expression(self.parse_expression_container()?),
            _ => {
                return Err(self
                    .scanner
                    .error(format!("Expected value for attribute '{name}'")));
            }
        };

        Ok(Attribute { name, value })
    }

    /// Parse a `{...}` hole, braces included.
    fn parse_expression_container(&mut self) -> Result<ExpressionContainer, ParseError> {
        self.scanner.expect('{', "to open an expression")?;
        let expression = self.parse_expression(Some('}'))?;
        self.scanner.expect('}', "to close an expression")?;
        Ok(ExpressionContainer { expression })
    }

    /// Parse children up to and including the closing tag of `tag`.
    fn parse_children(
        &mut self,
        tag: &str,
        opening: Span,
    ) -> Result<(Vec<Child>, ClosingTag), ParseError> {
        let mut children = Vec::new();

        loop {
            if self.scanner.is_at_end() {
                return Err(self
                    .scanner
                    .error_at(opening, format!("Unclosed element <{tag}>")));
            }

            match self.scanner.peek() {
                '<' if self.scanner.peek_next() == '/' => {
                    let closing = self.scanner.mark();
                    self.scanner.advance();
                    self.scanner.advance();
                    self.scanner.skip_whitespace();
                    let name = self.scanner.take_while(is_tag_char);
                    self.scanner.skip_whitespace();
                    self.scanner.expect('>', "to end a closing tag")?;

                    if name != tag {
                        return Err(self.scanner.error_at(
                            closing,
                            format!("Expected closing tag </{tag}>, got </{name}>"),
                        ));
                    }
                    return Ok((children, ClosingTag { tag: name }));
                }
                '<' => children.push(Child::Element(self.parse_element()?)),
                '{' => children.push(Child::Expression(self.parse_expression_container()?)),
                _ => {
                    let text = self
                        .scanner
                        .take_while(|c| c != '<' && c != '{');
                    children.push(Child::Text(text));
                }
            }
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_tag_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Tag names allow members and namespaces: `Foo.Bar`, `svg:rect`, `my-el`.
fn is_tag_char(c: char) -> bool {
    is_identifier_char(c) || matches!(c, '-' | '.' | ':')
}

fn is_attribute_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_attribute_char(c: char) -> bool {
    is_identifier_char(c) || matches!(c, '-' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Expression {
        Parser::parse(source).unwrap()
    }

    fn only_element(expr: &Expression) -> &Element {
        match expr.nodes.as_slice() {
            [Node::Markup(el)] => el,
            other => panic!("Expected a single Markup node, got {other:?}"),
        }
    }

    fn code(text: &str) -> Node {
        Node::Code(text.into())
    }

    // =========================================================================
    // Plain code
    // =========================================================================

    #[test]
    fn test_empty_source() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_code_without_markup() {
        let expr = parse("const a = b < c && d > e;");
        assert_eq!(expr.nodes, vec![code("const a = b < c && d > e;")]);
    }

    #[test]
    fn test_markup_in_string_is_code() {
        let expr = parse("const s = '<div>' + \"<span>\";");
        assert!(!expr.contains_markup());
    }

    #[test]
    fn test_markup_in_comments_is_code() {
        let expr = parse("// return <div/>\n/* (<span/>) */ x");
        assert!(!expr.contains_markup());
        assert_eq!(expr.to_source(), "// return <div/>\n/* (<span/>) */ x");
    }

    #[test]
    fn test_unterminated_string() {
        let err = Parser::parse("const s = 'abc").unwrap_err();
        assert_eq!(err.message, "Unterminated string");
        assert_eq!(err.column, 11);
    }

    // =========================================================================
    // Elements
    // =========================================================================

    #[test]
    fn test_self_closing_element() {
        let expr = parse("<br/>");
        let el = only_element(&expr);
        assert_eq!(el.tag, "br");
        assert!(el.self_closing);
        assert!(el.closing.is_none());
        assert!(el.children.is_empty());
    }

    #[test]
    fn test_empty_element() {
        let expr = parse("<p></p>");
        let el = only_element(&expr);
        assert!(!el.self_closing);
        assert_eq!(el.closing, Some(ClosingTag { tag: "p".into() }));
    }

    #[test]
    fn test_element_after_assignment() {
        let expr = parse("const el = <br />;");
        assert_eq!(expr.nodes.len(), 3);
        assert_eq!(expr.nodes[0], code("const el = "));
        assert!(matches!(&expr.nodes[1], Node::Markup(el) if el.tag == "br"));
        assert_eq!(expr.nodes[2], code(";"));
    }

    #[test]
    fn test_element_after_return() {
        let expr = parse("function f() { return <i/>; }");
        assert!(expr.contains_markup());
    }

    #[test]
    fn test_element_span() {
        let expr = parse("x =\n  <br/>");
        match &expr.nodes[1] {
            Node::Markup(el) => {
                assert_eq!(el.span.line, 2);
                assert_eq!(el.span.column, 3);
            }
            other => panic!("Expected Markup, got {other:?}"),
        }
    }

    #[test]
    fn test_member_tag_name() {
        let expr = parse("<Foo.Bar/>");
        assert_eq!(only_element(&expr).tag, "Foo.Bar");
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    #[test]
    fn test_literal_attribute_keeps_quotes() {
        let expr = parse("<a href=\"/x\" title='t'/>");
        let el = only_element(&expr);
        assert_eq!(el.attributes[0].name, "href");
        assert_eq!(el.attributes[0].value, AttributeValue::Literal("\"/x\"".into()));
        assert_eq!(el.attributes[1].value, AttributeValue::Literal("'t'".into()));
    }

    #[test]
    fn test_expression_attribute() {
        let expr = parse("<div className={cls}/>");
        let el = only_element(&expr);
        assert_eq!(el.attributes[0].name, "className");
        assert_eq!(
            el.attributes[0].value,
            AttributeValue::Expression(ExpressionContainer {
                expression: Expression::code("cls"),
            })
        );
    }

    #[test]
    fn test_expression_attribute_with_braces() {
        let expr = parse("<div style={{ color: 'red' }}/>");
        let el = only_element(&expr);
        match &el.attributes[0].value {
            AttributeValue::Expression(container) => {
                assert_eq!(container.expression.to_source(), "{ color: 'red' }");
            }
            other => panic!("Expected Expression, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_attribute() {
        let expr = parse("<input disabled data-x=\"1\"/>");
        let el = only_element(&expr);
        assert_eq!(el.attributes[0].value, AttributeValue::Bare);
        assert_eq!(el.attributes[1].name, "data-x");
    }

    #[test]
    fn test_spread_attribute_rejected() {
        let err = Parser::parse("<div {...props}/>").unwrap_err();
        assert_eq!(err.message, "Spread attributes are not supported");
    }

    // =========================================================================
    // Children
    // =========================================================================

    #[test]
    fn test_text_and_expression_children() {
        let expr = parse("<p>Hello {name}!</p>");
        let el = only_element(&expr);
        assert_eq!(
            el.children,
            vec![
                Child::Text("Hello ".into()),
                Child::Expression(ExpressionContainer {
                    expression: Expression::code("name"),
                }),
                Child::Text("!".into()),
            ]
        );
    }

    #[test]
    fn test_nested_elements_keep_whitespace_text() {
        let expr = parse("<ul>\n  <li>a</li>\n</ul>");
        let el = only_element(&expr);
        assert_eq!(el.children.len(), 3);
        assert_eq!(el.children[0], Child::Text("\n  ".into()));
        assert!(matches!(&el.children[1], Child::Element(li) if li.tag == "li"));
        assert_eq!(el.children[2], Child::Text("\n".into()));
    }

    #[test]
    fn test_markup_nested_in_hole() {
        let expr = parse("<ul>{items.map(i => <li>{i}</li>)}</ul>");
        let el = only_element(&expr);
        let Child::Expression(container) = &el.children[0] else {
            panic!("Expected expression child");
        };
        let nodes = &container.expression.nodes;
        assert_eq!(nodes[0], code("items.map(i => "));
        assert!(matches!(&nodes[1], Node::Markup(li) if li.tag == "li"));
        assert_eq!(nodes[2], code(")"));
    }

    #[test]
    fn test_conditional_markup_in_hole() {
        let expr = parse("<div>{ok ? <b/> : <i/>}</div>");
        let el = only_element(&expr);
        let Child::Expression(container) = &el.children[0] else {
            panic!("Expected expression child");
        };
        assert_eq!(container.expression.nodes.len(), 4);
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let err = Parser::parse("<div></span>").unwrap_err();
        assert_eq!(err.message, "Expected closing tag </div>, got </span>");
        assert_eq!(err.column, 6);
    }

    #[test]
    fn test_unclosed_element() {
        let err = Parser::parse("x = <div>text").unwrap_err();
        assert_eq!(err.message, "Unclosed element <div>");
        assert_eq!(err.column, 5);
    }

    #[test]
    fn test_unterminated_hole() {
        let err = Parser::parse("<div>{a</div>").unwrap_err();
        assert!(err.message.starts_with("Unterminated expression"));
    }

    #[test]
    fn test_fragment_rejected() {
        let err = Parser::parse("x = <>a</>").unwrap_err();
        assert_eq!(err.message, "JSX fragments are not supported");
    }

    // =========================================================================
    // Call sites
    // =========================================================================

    #[test]
    fn test_sole_argument_is_call_site() {
        let expr = parse("render(<a href=\"/x\">{label}</a>);");
        assert_eq!(expr.nodes.len(), 2);
        match &expr.nodes[0] {
            Node::Call(call) => {
                assert_eq!(call.callee, "render");
                assert_eq!(call.element.tag, "a");
            }
            other => panic!("Expected Call, got {other:?}"),
        }
        assert_eq!(expr.nodes[1], code(";"));
    }

    #[test]
    fn test_member_callee() {
        let expr = parse("x = view.mount( <br/> )");
        assert_eq!(expr.nodes[0], code("x = "));
        assert!(matches!(&expr.nodes[1], Node::Call(call) if call.callee == "view.mount"));
    }

    #[test]
    fn test_call_site_inside_hole() {
        let expr = parse("<div>{t(<b>x</b>)}</div>");
        let el = only_element(&expr);
        assert_eq!(el.children.len(), 1);
        let Child::Expression(container) = &el.children[0] else {
            panic!("Expected expression child");
        };
        assert!(matches!(container.expression.nodes.as_slice(), [Node::Call(call)] if call.callee == "t"));
    }

    #[test]
    fn test_second_argument_is_not_call_site() {
        let expr = parse("f(a, <br/>)");
        assert_eq!(expr.nodes[0], code("f(a, "));
        assert!(matches!(&expr.nodes[1], Node::Markup(_)));
        assert_eq!(expr.nodes[2], code(")"));
    }

    #[test]
    fn test_parenthesized_markup_is_not_call_site() {
        let expr = parse("x = (<br/>)");
        assert!(matches!(&expr.nodes[1], Node::Markup(_)));
    }

    #[test]
    fn test_keyword_is_not_callee() {
        for source in [
            "return (<br/>)",
            "throw (<br/>)",
            "export default (<br/>)",
            "if (<br/>) {}",
            "await(<br/>)",
        ] {
            let expr = parse(source);
            assert!(
                !expr.nodes.iter().any(|node| matches!(node, Node::Call(_))),
                "{source}: {:?}",
                expr.nodes
            );
        }
    }

    #[test]
    fn test_throw_keeps_markup_in_place() {
        let expr = parse("throw (<br/>)");
        assert_eq!(expr.nodes[0], code("throw ("));
        assert!(matches!(&expr.nodes[1], Node::Markup(_)));
        assert_eq!(expr.nodes[2], code(")"));
    }

    #[test]
    fn test_new_expression_is_not_call_site() {
        let expr = parse("x = new Foo(<br/>)");
        assert_eq!(expr.nodes[0], code("x = new Foo("));
        assert!(matches!(&expr.nodes[1], Node::Markup(_)));
        assert_eq!(expr.nodes[2], code(")"));

        let expr = parse("new ns.Widget(<br/>)");
        assert!(matches!(&expr.nodes[1], Node::Markup(_)));
    }

    #[test]
    fn test_method_on_new_object_is_call_site() {
        let expr = parse("x = new Foo().render(<br/>)");
        assert_eq!(expr.nodes[0], code("x = "));
        assert!(matches!(&expr.nodes[1], Node::Call(call) if call.callee == "new Foo().render"));
    }

    #[test]
    fn test_callee_shapes() {
        for (source, prefix, callee) in [
            ("getRenderer()(<br/>)", "", "getRenderer()"),
            ("x = a[0](<br/>)", "x = ", "a[0]"),
            ("foo().bar(<br/>)", "", "foo().bar"),
            ("a.b[k](1)(<br/>)", "", "a.b[k](1)"),
            ("if (ok) views[i].show(<br/>)", "if (ok) ", "views[i].show"),
        ] {
            let expr = parse(source);
            if prefix.is_empty() {
                assert_eq!(expr.nodes.len(), 1, "{source}");
            } else {
                assert_eq!(expr.nodes[0], code(prefix), "{source}");
            }
            let call = expr.nodes.iter().find_map(|node| match node {
                Node::Call(call) => Some(call),
                _ => None,
            });
            assert_eq!(call.map(|c| c.callee.as_str()), Some(callee), "{source}");
        }
    }

    #[test]
    fn test_unrooted_callee_is_not_call_site() {
        for source in ["x = (a || b)(<br/>)", "x = a?.b(<br/>)", "x = 1(<br/>)"] {
            let expr = parse(source);
            assert!(
                !expr.nodes.iter().any(|node| matches!(node, Node::Call(_))),
                "{source}"
            );
        }
    }

    #[test]
    fn test_postfix_update_then_comparison() {
        assert_eq!(parse("x = i-- <n").nodes, vec![code("x = i-- <n")]);
        assert_eq!(
            parse("while (j++ < limit) {}").nodes,
            vec![code("while (j++ < limit) {}")]
        );
    }

    #[test]
    fn test_markup_in_template_literal_hole() {
        let expr = parse("s = `a ${<br/>} b`");
        assert_eq!(expr.nodes[0], code("s = `a ${"));
        assert!(matches!(&expr.nodes[1], Node::Markup(_)));
        assert_eq!(expr.nodes[2], code("} b`"));
    }

    // =========================================================================
    // Round trip
    // =========================================================================

    #[test]
    fn test_source_round_trip() {
        let source = "const view = <div className={cls} id=\"main\">\n  <h1>{title}</h1>\n  {items.map(i => <li key={i}>{i}</li>)}\n</div>;";
        assert_eq!(parse(source).to_source(), source);
    }
}
