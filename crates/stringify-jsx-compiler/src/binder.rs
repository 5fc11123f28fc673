//! Call-site binding.
//!
//! Decides what replaces a compiled element. A bare element becomes a
//! template literal; a call whose only argument is an element becomes a
//! tagged template with the callee as the tag:
//!
//! ```text
//! <br/>           ->  `<br/>`
//! render(<br/>)   ->  render`<br/>`
//! ```

use stringify_jsx_parser::{Element, Node, TaggedTemplate, TemplateLiteral};

use crate::element::compile_element;
use crate::options::CompileOptions;
use crate::CompileError;

/// Compile `element` and materialize it as a template literal.
pub fn compile_template(
    element: Element,
    options: &CompileOptions,
) -> Result<TemplateLiteral, CompileError> {
    compile_element(element, options)?.materialize()
}

/// Replace a markup or call-site node with its compiled form. Other nodes are
/// returned unchanged.
pub fn bind(node: Node, options: &CompileOptions) -> Result<Node, CompileError> {
    match node {
        Node::Markup(element) => Ok(Node::Template(compile_template(element, options)?)),
        Node::Call(call) => {
            tracing::trace!(callee = %call.callee, tag = %call.element.tag, "binding call site");
            Ok(Node::TaggedTemplate(TaggedTemplate {
                tag: call.callee,
                quasi: compile_template(call.element, options)?,
            }))
        }
        other => Ok(other),
    }
}
