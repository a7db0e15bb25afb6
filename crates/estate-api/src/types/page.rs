//! CMS page types.

use estate_shortcode::{AttrValue, Attributes, Occurrence};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CMS page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Page {
    #[serde(default)]
    pub id: u64,
    pub slug: String,
    pub title: String,
    /// HTML body, possibly with inline `[tag ...]` shortcodes.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub content: String,
    /// Layout template (`default`, `contact`, `about`, `full-width`, ...).
    #[serde(default)]
    pub template: Option<String>,
    /// Structured shortcode descriptors. When non-empty, inline tokens in
    /// `content` are not scanned.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub shortcodes: Vec<PageShortcode>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Page {
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            slug: slug.into(),
            title: title.into(),
            content: String::new(),
            template: None,
            shortcodes: Vec::new(),
            meta_title: None,
            meta_description: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Structured occurrences for the shortcode renderer.
    #[must_use]
    pub fn occurrences(&self) -> Vec<Occurrence> {
        self.shortcodes.iter().map(PageShortcode::to_occurrence).collect()
    }
}

/// Shortcode descriptor attached to a page by the API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PageShortcode {
    /// Tag in the API vocabulary (`contact-form`, `property-inquiry-form`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Byte offset into the page content.
    pub position: usize,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub data: serde_json::Map<String, Value>,
}

impl PageShortcode {
    /// Convert to a renderer occurrence.
    ///
    /// Integers stay integers; strings stay text; other scalars and nested
    /// values become their JSON text. `null` entries are dropped.
    #[must_use]
    pub fn to_occurrence(&self) -> Occurrence {
        let data: Attributes = self
            .data
            .iter()
            .filter_map(|(key, value)| attr_value(value).map(|v| (key.clone(), v)))
            .collect();
        Occurrence::new(&self.kind, self.position).with_data(data)
    }
}

fn attr_value(value: &Value) -> Option<AttrValue> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(AttrValue::Text(s.clone())),
        Value::Number(n) => Some(
            n.as_i64()
                .map_or_else(|| AttrValue::Text(n.to_string()), AttrValue::Int),
        ),
        Value::Bool(b) => Some(AttrValue::Text(b.to_string())),
        Value::Array(_) | Value::Object(_) => Some(AttrValue::Text(value.to_string())),
    }
}
