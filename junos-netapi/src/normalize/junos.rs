//! Encodings shared by every Junos payload.
//!
//! JSON: every scalar is a one-element array of `{"data": "..."}` objects,
//! and every container is an array. Empty elements appear as `[null]`.
//!
//! XML: leaves are simple elements, some with `junos:` attributes.

use serde::Deserialize;

/// One `{"data": ...}` object.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Data {
    #[serde(default)]
    pub data: String,
}

/// A JSON leaf: `[{"data": "..."}]`.
pub(crate) type Leaf = Vec<Option<Data>>;

/// Text of the first `data` object, trimmed; empty when absent.
pub(crate) fn leaf(values: &Leaf) -> String {
    values
        .iter()
        .flatten()
        .next()
        .map(|d| d.data.trim().to_string())
        .unwrap_or_default()
}

/// First element of a JSON container, if any.
pub(crate) fn first<T>(values: &[Option<T>]) -> Option<&T> {
    values.iter().flatten().next()
}

/// XML leaf whose element may carry attributes, e.g.
/// `<date-time junos:seconds="1714557600">2024-05-01 10:00:00 UTC</date-time>`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Text {
    #[serde(rename = "$text", default)]
    pub text: String,
}

impl Text {
    pub fn trimmed(&self) -> String {
        self.text.trim().to_string()
    }
}

/// Trim the whitespace Junos places around XML leaf values.
pub(crate) fn trim(value: &str) -> String {
    value.trim().to_string()
}
