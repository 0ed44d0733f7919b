//! Configuration surface (SPEC_FULL §4.10): a single in-process struct, no
//! config file, no environment variable. [`Converter`] is the only stateful
//! convenience wrapper on top of it.

use std::collections::BTreeMap;

/// Options recognised by [`crate::facade::convert`] and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Raise `DiagnosticsError` if any error-or-fatal diagnostic was emitted.
    pub strict: bool,
    /// Parse as a body fragment (no implicit html/head/body scaffolding).
    pub fragment: bool,
    /// Use the indented serializer instead of the compact one.
    pub formatted: bool,
    /// Template used by [`crate::facade::render`]; `None` uses the built-in default.
    pub template: Option<String>,
    /// Free-form metadata. Recognised key: `preamble`, appended verbatim to
    /// the inferred package preamble.
    pub metadata: BTreeMap<String, String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strict: true,
            fragment: true,
            formatted: true,
            template: None,
            metadata: BTreeMap::new(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn fragment(mut self, fragment: bool) -> Self {
        self.fragment = fragment;
        self
    }

    pub fn formatted(mut self, formatted: bool) -> Self {
        self.formatted = formatted;
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
