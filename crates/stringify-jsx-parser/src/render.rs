//! Source rendering.
//!
//! Every node prints back to the text it was parsed from. Code is printed
//! verbatim, markup is printed as JSX, compiled nodes as template literals.

use std::fmt::{self, Display, Formatter};

use crate::ast::{
    Attribute, AttributeValue, CallSite, Child, ClosingTag, Element, Expression,
    ExpressionContainer, Node, TaggedTemplate, TemplateLiteral,
};

impl Expression {
    /// Render this expression back to source text.
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl Element {
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl ClosingTag {
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl TemplateLiteral {
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.nodes.iter().try_for_each(|node| node.fmt(f))
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Code(code) => f.write_str(code),
            Node::Markup(element) => element.fmt(f),
            Node::Call(call) => call.fmt(f),
            Node::Template(template) => template.fmt(f),
            Node::TaggedTemplate(tagged) => tagged.fmt(f),
        }
    }
}

impl Display for CallSite {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.callee, self.element)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for attribute in &self.attributes {
            attribute.fmt(f)?;
        }

        if self.self_closing {
            return f.write_str("/>");
        }

        f.write_str(">")?;
        for child in &self.children {
            child.fmt(f)?;
        }
        match &self.closing {
            Some(closing) => closing.fmt(f),
            None => Ok(()),
        }
    }
}

impl Display for ClosingTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "</{}>", self.tag)
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.value {
            AttributeValue::Literal(raw) => write!(f, " {}={raw}", self.name),
            AttributeValue::Expression(container) => write!(f, " {}={container}", self.name),
            AttributeValue::Bare => write!(f, " {}", self.name),
        }
    }
}

impl Display for ExpressionContainer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.expression)
    }
}

impl Display for Child {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Child::Element(element) => element.fmt(f),
            Child::Text(text) => f.write_str(text),
            Child::Expression(container) => container.fmt(f),
        }
    }
}

impl Display for TemplateLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("`")?;
        for (i, quasi) in self.quasis.iter().enumerate() {
            f.write_str(&quasi.raw)?;
            if let Some(expression) = self.expressions.get(i) {
                write!(f, "${{{expression}}}")?;
            }
        }
        f.write_str("`")
    }
}

impl Display for TaggedTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag, self.quasi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TemplateElement;
    use pretty_assertions::assert_eq;

    fn quasi(raw: &str, tail: bool) -> TemplateElement {
        TemplateElement {
            raw: raw.into(),
            cooked: raw.into(),
            tail,
        }
    }

    #[test]
    fn test_render_code() {
        assert_eq!(Expression::code("a + b").to_source(), "a + b");
    }

    #[test]
    fn test_render_element_with_attributes() {
        let element = Element {
            tag: "input".into(),
            attributes: vec![
                Attribute {
                    name: "type".into(),
                    value: AttributeValue::Literal("'text'".into()),
                },
                Attribute {
                    name: "value".into(),
                    value: AttributeValue::Expression(ExpressionContainer {
                        expression: Expression::code("name"),
                    }),
                },
                Attribute {
                    name: "disabled".into(),
                    value: AttributeValue::Bare,
                },
            ],
            self_closing: true,
            ..Element::default()
        };
        assert_eq!(element.to_source(), "<input type='text' value={name} disabled/>");
    }

    #[test]
    fn test_render_element_with_children() {
        let element = Element {
            tag: "p".into(),
            children: vec![
                Child::Text("Hi ".into()),
                Child::Expression(ExpressionContainer {
                    expression: Expression::code("user"),
                }),
            ],
            closing: Some(ClosingTag { tag: "p".into() }),
            ..Element::default()
        };
        assert_eq!(element.to_source(), "<p>Hi {user}</p>");
    }

    #[test]
    fn test_render_template() {
        let template = TemplateLiteral {
            quasis: vec![quasi("<b>", false), quasi("</b>", true)],
            expressions: vec!["name".into()],
        };
        assert_eq!(template.to_source(), "`<b>${name}</b>`");
    }

    #[test]
    fn test_render_tagged_template() {
        let tagged = Node::TaggedTemplate(TaggedTemplate {
            tag: "html".into(),
            quasi: TemplateLiteral {
                quasis: vec![quasi("<br/>", true)],
                expressions: Vec::new(),
            },
        });
        assert_eq!(Expression::new(vec![tagged]).to_source(), "html`<br/>`");
    }

    #[test]
    fn test_render_call_site() {
        let call = Node::Call(CallSite {
            callee: "render".into(),
            element: Element {
                tag: "br".into(),
                self_closing: true,
                ..Element::default()
            },
        });
        assert_eq!(Expression::new(vec![call]).to_source(), "render(<br/>)");
    }
}
