//! stringify-jsx compiler
//!
//! Compiles JSX elements into template literals. Each element is flattened
//! into alternating literal segments and `${...}` slots; a call whose only
//! argument is an element becomes a tagged template.
//!
//! ```text
//! Expression (parsed) → transform() → Expression (markup replaced by templates)
//! ```
//!
//! # Example
//!
//! ```
//! use stringify_jsx_compiler::{transform_source, OptionsOverrides};
//!
//! let out = transform_source("render(<p className={cls}>Hi</p>)", OptionsOverrides::default()).unwrap();
//! assert_eq!(out, "render`<p class=\"${cls}\">Hi</p>`");
//! ```

pub mod attributes;
pub mod binder;
pub mod element;
pub mod options;
pub mod template;
pub mod whitespace;

use stringify_jsx_parser::{Expression, Node, ParseError, Parser};

pub use element::compile_element;
pub use options::{AttributeReplacementFn, CompileOptions, OptionsOverrides};
pub use template::TemplateBuffer;

/// Compilation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A buffer with fewer literals than slots was passed to `concat`.
    #[error("Trying to concat malformed template: {literals} literals for {expressions} expressions")]
    MalformedBuffer { literals: usize, expressions: usize },
    /// A buffer with fewer literals than slots was materialized.
    #[error("Cannot materialize malformed template: {literals} literals for {expressions} expressions")]
    UnbalancedTemplate { literals: usize, expressions: usize },
}

/// Error from the parse-compile-render pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Replace every markup element in `expression` with its compiled template.
///
/// The input is consumed; on error nothing of it is returned.
pub fn transform(
    expression: Expression,
    options: &CompileOptions,
) -> Result<Expression, CompileError> {
    let mut compiled = 0usize;
    let nodes = expression
        .nodes
        .into_iter()
        .map(|node| {
            if let Node::Markup(element) = &node {
                tracing::debug!(tag = %element.tag, line = element.span.line, "compiling element");
                compiled += 1;
            } else if let Node::Call(call) = &node {
                tracing::debug!(
                    callee = %call.callee,
                    line = call.element.span.line,
                    "compiling call site"
                );
                compiled += 1;
            }
            binder::bind(node, options)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(elements = compiled, "transform finished");
    Ok(Expression::new(nodes))
}

/// Parse `source`, compile its markup with `overrides` merged onto the
/// default options, and render the result.
pub fn transform_source(source: &str, overrides: OptionsOverrides) -> Result<String, TransformError> {
    let options = CompileOptions::merge(overrides);
    let program = Parser::parse(source)?;
    let compiled = transform(program, &options)?;
    Ok(compiled.to_source())
}
