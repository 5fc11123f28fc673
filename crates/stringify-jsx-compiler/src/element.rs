//! Element compiler.
//!
//! Turns one markup element into a template buffer:
//!
//! ```text
//! <div className={x}>hello</div>
//!   opening   "<div class=\"" ${x} "\">"
//!   children  "hello"
//!   closing   "</div>"
//!   result    "<div class=\"" ${x} "\">hello</div>"
//! ```
//!
//! Every expression is searched for nested markup and compiled before it is
//! captured as a slot, so markup inside conditionals, calls and maps ends up
//! as nested templates.

use stringify_jsx_parser::{
    Attribute, AttributeValue, Child, ClosingTag, Element, Expression, Node,
};

use crate::attributes::resolve_attribute_name;
use crate::binder;
use crate::options::CompileOptions;
use crate::template::TemplateBuffer;
use crate::whitespace::trim_text;
use crate::CompileError;

/// Compile an element and everything nested in it.
pub fn compile_element(
    element: Element,
    options: &CompileOptions,
) -> Result<TemplateBuffer, CompileError> {
    let Element {
        tag,
        attributes,
        children,
        self_closing,
        closing,
        ..
    } = element;

    let mut buffer = compile_opening_element(&tag, attributes, self_closing, options)?;
    if !self_closing {
        buffer.concat(compile_children(children, options)?)?;
    }
    buffer.concat(compile_closing_element(closing.as_ref()))?;
    Ok(buffer)
}

fn compile_opening_element(
    tag: &str,
    attributes: Vec<Attribute>,
    self_closing: bool,
    options: &CompileOptions,
) -> Result<TemplateBuffer, CompileError> {
    let mut buffer = TemplateBuffer::new();
    buffer.add_literal(&format!("<{tag}"));

    for Attribute { name, value } in attributes {
        let name = resolve_attribute_name(&name, options);
        match value {
            AttributeValue::Literal(raw) => {
                buffer.add_literal(&format!(" {name}={raw}"));
            }
            AttributeValue::Expression(container) => {
                let expression = compile_expression(container.expression, options)?;
                buffer
                    .add_literal(&format!(" {name}=\""))
                    .add_expression(expression.to_source())
                    .add_literal("\"");
            }
            AttributeValue::Bare => {
                buffer.add_literal(&format!(" {name}"));
            }
        }
    }

    buffer.add_literal(if self_closing { "/>" } else { ">" });
    Ok(buffer)
}

fn compile_children(
    children: Vec<Child>,
    options: &CompileOptions,
) -> Result<TemplateBuffer, CompileError> {
    let mut buffer = TemplateBuffer::new();

    for child in children {
        match child {
            Child::Element(element) => {
                buffer.concat(compile_element(element, options)?)?;
            }
            Child::Text(text) => {
                buffer.add_literal(trim_text(&text, options));
            }
            Child::Expression(container) => {
                let expression = compile_expression(container.expression, options)?;
                buffer.add_expression(expression.to_source());
            }
        }
    }

    Ok(buffer)
}

fn compile_closing_element(closing: Option<&ClosingTag>) -> TemplateBuffer {
    let mut buffer = TemplateBuffer::new();
    if let Some(closing) = closing {
        buffer.add_literal(&closing.to_source());
    }
    buffer
}

/// Compile every markup element found in `expression`, depth first, and
/// return the rewritten expression.
pub fn compile_expression(
    expression: Expression,
    options: &CompileOptions,
) -> Result<Expression, CompileError> {
    if !expression.contains_markup() {
        return Ok(expression);
    }

    let nodes = expression
        .nodes
        .into_iter()
        .map(|node| {
            if let Node::Markup(element) = &node {
                tracing::trace!(tag = %element.tag, line = element.span.line, "nested markup");
            }
            binder::bind(node, options)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expression::new(nodes))
}
