//! Compiler options.
//!
//! `OptionsOverrides` is what a caller or a config file supplies; every field
//! is optional. `CompileOptions::merge` overlays it onto the defaults once per
//! top-level compilation, and the merged options are then passed by reference
//! through the whole recursion.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Decides the output name of an attribute.
///
/// Called with the input name and the built-in replacement for it, if any.
/// Its result is used as is.
pub type AttributeReplacementFn = Arc<dyn Fn(&str, Option<&str>) -> String + Send + Sync>;

/// Effective options for one compilation.
#[derive(Clone, Default)]
pub struct CompileOptions {
    /// Keep whitespace-only text between elements.
    pub preserve_whitespace: bool,
    /// Attribute names to replace, checked before the built-in table.
    pub custom_attribute_replacements: HashMap<String, String>,
    /// Takes precedence over both replacement tables.
    pub custom_attribute_replacement_fn: Option<AttributeReplacementFn>,
}

impl CompileOptions {
    /// Overlay `overrides` onto the default options.
    pub fn merge(overrides: OptionsOverrides) -> Self {
        let defaults = Self::default();
        let merged = Self {
            preserve_whitespace: overrides
                .preserve_whitespace
                .unwrap_or(defaults.preserve_whitespace),
            custom_attribute_replacements: overrides
                .custom_attribute_replacements
                .unwrap_or(defaults.custom_attribute_replacements),
            custom_attribute_replacement_fn: overrides
                .custom_attribute_replacement_fn
                .or(defaults.custom_attribute_replacement_fn),
        };
        tracing::trace!(options = ?merged, "merged compile options");
        merged
    }

    pub fn with_attribute_replacement_fn(
        mut self,
        replace: impl Fn(&str, Option<&str>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.custom_attribute_replacement_fn = Some(Arc::new(replace));
        self
    }
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("preserve_whitespace", &self.preserve_whitespace)
            .field(
                "custom_attribute_replacements",
                &self.custom_attribute_replacements,
            )
            .field(
                "custom_attribute_replacement_fn",
                &self.custom_attribute_replacement_fn.as_ref().map(|_| ".."),
            )
            .finish()
    }
}

/// Caller-supplied options. Unset fields fall back to the defaults.
///
/// Deserializes from the camelCase keys used in config files:
///
/// ```json
/// { "preserveWhitespace": true, "customAttributeReplacements": { "tabIndex": "tabindex" } }
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptionsOverrides {
    pub preserve_whitespace: Option<bool>,
    pub custom_attribute_replacements: Option<HashMap<String, String>>,
    #[serde(skip)]
    pub custom_attribute_replacement_fn: Option<AttributeReplacementFn>,
}

impl fmt::Debug for OptionsOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsOverrides")
            .field("preserve_whitespace", &self.preserve_whitespace)
            .field(
                "custom_attribute_replacements",
                &self.custom_attribute_replacements,
            )
            .field(
                "custom_attribute_replacement_fn",
                &self.custom_attribute_replacement_fn.as_ref().map(|_| ".."),
            )
            .finish()
    }
}
