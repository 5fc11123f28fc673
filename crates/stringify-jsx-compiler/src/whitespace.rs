use crate::options::CompileOptions;

/// Decide what a text child contributes to the template.
///
/// Whitespace-only text (source indentation between elements) is dropped
/// unless `preserve_whitespace` is set. Any other text is kept verbatim,
/// including its own newlines and indentation.
pub fn trim_text<'a>(text: &'a str, options: &CompileOptions) -> &'a str {
    if options.preserve_whitespace || !text.trim().is_empty() {
        text
    } else {
        ""
    }
}
