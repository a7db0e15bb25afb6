//! Shortcode occurrence type.

use crate::Attributes;

/// One shortcode found in (or attached to) a content string.
///
/// `position` is a byte offset into the content. `len` is how many bytes of
/// the content the occurrence replaces: zero for descriptors supplied by the
/// content API, the full token length for `[tag ...]` matches found in the
/// text itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occurrence {
    /// Shortcode tag (`contact_form`, `alert`, ...).
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Byte offset into the content.
    pub position: usize,
    /// Attribute data.
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Attributes,
    /// Number of content bytes consumed by the occurrence.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_zero"))]
    pub len: usize,
}

impl Occurrence {
    /// Create a structured occurrence that consumes no content.
    #[must_use]
    pub fn new(kind: impl Into<String>, position: usize) -> Self {
        Self {
            kind: kind.into(),
            position,
            data: Attributes::new(),
            len: 0,
        }
    }

    /// Attach attribute data.
    #[must_use]
    pub fn with_data(mut self, data: Attributes) -> Self {
        self.data = data;
        self
    }

    /// Set the number of consumed content bytes.
    #[must_use]
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Byte offset just past the consumed content.
    #[must_use]
    pub fn end(&self) -> usize {
        self.position + self.len
    }

    /// Source text this occurrence replaces (empty for structured descriptors).
    #[must_use]
    pub fn source<'a>(&self, content: &'a str) -> &'a str {
        content.get(self.position..self.end()).unwrap_or_default()
    }
}

#[cfg(feature = "serde")]
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &usize) -> bool {
    *n == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_occurrence_consumes_nothing() {
        let occ = Occurrence::new("contact_form", 4);
        assert_eq!(occ.end(), 4);
        assert_eq!(occ.source("abcdefgh"), "");
    }

    #[test]
    fn test_text_occurrence_source() {
        let content = "<p>a</p>[divider]<p>b</p>";
        let occ = Occurrence::new("divider", 8).with_len(9);
        assert_eq!(occ.source(content), "[divider]");
    }

    #[test]
    fn test_source_out_of_range_is_empty() {
        let occ = Occurrence::new("divider", 8).with_len(9);
        assert_eq!(occ.source("short"), "");
    }
}
