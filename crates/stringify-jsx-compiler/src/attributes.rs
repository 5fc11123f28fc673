//! Attribute name resolution.
//!
//! JSX spells some HTML attributes differently (`className`, `htmlFor`).
//! These are mapped back to their HTML names unless the caller overrides the
//! mapping.

use crate::options::CompileOptions;

/// JSX attribute names and the HTML attribute each one stands for.
pub const DEFAULT_ATTRIBUTE_REPLACEMENTS: &[(&str, &str)] =
    &[("className", "class"), ("htmlFor", "for")];

/// The built-in replacement for `name`, if there is one.
pub fn default_replacement(name: &str) -> Option<&'static str> {
    DEFAULT_ATTRIBUTE_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
}

/// Resolve the output name of an attribute.
///
/// First match wins: the replacement function, then the caller's table, then
/// the built-in table, then the name itself. An empty entry in the caller's
/// table counts as no entry.
pub fn resolve_attribute_name(name: &str, options: &CompileOptions) -> String {
    let default = default_replacement(name);

    if let Some(replace) = &options.custom_attribute_replacement_fn {
        return replace(name, default);
    }

    options
        .custom_attribute_replacements
        .get(name)
        .map(String::as_str)
        .filter(|replacement| !replacement.is_empty())
        .or(default)
        .unwrap_or(name)
        .to_string()
}
