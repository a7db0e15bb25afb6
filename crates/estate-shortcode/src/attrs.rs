//! Shortcode attribute parsing.
//!
//! Parses the `key="value"` pairs found inside a bracketed shortcode token:
//! `[cta title="Hello" id="123"]`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// `name="value"` pair. Names are ASCII word characters, values cannot contain `"`.
static ATTR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z0-9_]+)="([^"]*)""#).unwrap());

/// A single attribute value.
///
/// Values consisting only of ASCII digits are coerced to [`AttrValue::Int`];
/// everything else (including digit strings too large for `i64`) stays text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    /// Integer value (`columns="3"`).
    Int(i64),
    /// Text value (`title="Hi"`).
    Text(String),
}

impl AttrValue {
    /// Build a value from raw attribute text, coercing digit-only strings.
    ///
    /// # Example
    ///
    /// ```
    /// use estate_shortcode::AttrValue;
    ///
    /// assert_eq!(AttrValue::coerce("42"), AttrValue::Int(42));
    /// assert_eq!(AttrValue::coerce("4x2"), AttrValue::Text("4x2".to_owned()));
    /// ```
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        if !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && let Ok(n) = raw.parse()
        {
            return Self::Int(n);
        }
        Self::Text(raw.to_owned())
    }

    /// Borrow the text value, if this is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// Integer view of the value.
    ///
    /// Text values are parsed leniently (surrounding whitespace ignored) so
    /// that API descriptors sending `"42"` still resolve.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Attribute mapping of a shortcode occurrence.
///
/// Unspecified attributes are simply absent; defaults are applied by the
/// block that reads them, never here.
///
/// # Example
///
/// ```
/// use estate_shortcode::{AttrValue, Attributes};
///
/// let attrs = Attributes::parse(r#"columns="3" title="Hi""#);
/// assert_eq!(attrs.get("columns"), Some(&AttrValue::Int(3)));
/// assert_eq!(attrs.get("title"), Some(&AttrValue::Text("Hi".to_owned())));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Attributes {
    entries: BTreeMap<String, AttrValue>,
}

impl Attributes {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an attribute string.
    ///
    /// Scans left to right for non-overlapping `name="value"` pairs. Anything
    /// that is not a well-formed pair (unterminated quotes, bare words,
    /// single-quoted values) is skipped. A repeated name keeps its last value.
    /// Never fails.
    #[must_use]
    pub fn parse(attrs_str: &str) -> Self {
        let mut attrs = Self::new();

        for caps in ATTR_PATTERN.captures_iter(attrs_str) {
            attrs.insert(&caps[1], AttrValue::coerce(&caps[2]));
        }

        attrs
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a raw value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Get the first present key among `keys` as text.
    ///
    /// Blank values count as absent, so `title=""` falls through to the
    /// block's default just like a missing attribute.
    #[must_use]
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.entries.get(*key))
            .map(ToString::to_string)
            .find(|value| !value.trim().is_empty())
    }

    /// Get the first present key among `keys` as text, or `default`.
    #[must_use]
    pub fn text_or(&self, keys: &[&str], default: &str) -> String {
        self.text(keys).unwrap_or_else(|| default.to_owned())
    }

    /// Get the first key among `keys` that holds an integer.
    #[must_use]
    pub fn int(&self, keys: &[&str]) -> Option<i64> {
        keys.iter()
            .filter_map(|key| self.entries.get(*key))
            .find_map(AttrValue::as_int)
    }

    /// Interpret a flag attribute.
    ///
    /// `false`, `0`, `no` and `off` (any case) are false; anything else present
    /// is true; a missing key yields `default`.
    #[must_use]
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.entries.get(key) {
            Some(AttrValue::Int(n)) => *n != 0,
            Some(AttrValue::Text(s)) => !matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "false" | "0" | "no" | "off"
            ),
            None => default,
        }
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert!(Attributes::parse("").is_empty());
    }

    #[test]
    fn test_numeric_coercion() {
        let attrs = Attributes::parse(r#"columns="3" title="Hi""#);
        assert_eq!(attrs.get("columns"), Some(&AttrValue::Int(3)));
        assert_eq!(attrs.get("title"), Some(&AttrValue::Text("Hi".to_owned())));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_value_with_spaces() {
        let attrs = Attributes::parse(r#"title="Contact Us Today""#);
        assert_eq!(attrs.text(&["title"]), Some("Contact Us Today".to_owned()));
    }

    #[test]
    fn test_non_digit_numbers_stay_text() {
        let attrs = Attributes::parse(r#"a="-1" b="1.5" c="40px" d=" 7""#);
        assert_eq!(attrs.get("a"), Some(&AttrValue::Text("-1".to_owned())));
        assert_eq!(attrs.get("b"), Some(&AttrValue::Text("1.5".to_owned())));
        assert_eq!(attrs.get("c"), Some(&AttrValue::Text("40px".to_owned())));
        assert_eq!(attrs.get("d"), Some(&AttrValue::Text(" 7".to_owned())));
    }

    #[test]
    fn test_overflowing_digits_stay_text() {
        let attrs = Attributes::parse(r#"id="99999999999999999999""#);
        assert_eq!(
            attrs.get("id"),
            Some(&AttrValue::Text("99999999999999999999".to_owned()))
        );
    }

    #[test]
    fn test_malformed_fragments_skipped() {
        let attrs = Attributes::parse(r#"stray title="ok" broken="unterminated"#);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.text(&["title"]), Some("ok".to_owned()));
    }

    #[test]
    fn test_single_quotes_and_unquoted_ignored() {
        let attrs = Attributes::parse("title='Hi' width=560");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_empty_value_is_present_but_blank() {
        let attrs = Attributes::parse(r#"alt="""#);
        assert_eq!(attrs.get("alt"), Some(&AttrValue::Text(String::new())));
        assert_eq!(attrs.text(&["alt"]), None);
        assert_eq!(attrs.text_or(&["alt"], "fallback"), "fallback");
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let attrs = Attributes::parse(r#"title="one" title="two""#);
        assert_eq!(attrs.text(&["title"]), Some("two".to_owned()));
    }

    #[test]
    fn test_text_falls_through_key_list() {
        let attrs = Attributes::parse(r#"text="Careful""#);
        assert_eq!(
            attrs.text_or(&["message", "text"], "Alert message"),
            "Careful"
        );
    }

    #[test]
    fn test_int_accessor() {
        let attrs: Attributes = [("property_id", AttrValue::from("42"))].into_iter().collect();
        assert_eq!(attrs.int(&["propertyId", "property_id"]), Some(42));
        assert_eq!(attrs.int(&["missing"]), None);
    }

    #[test]
    fn test_int_renders_as_text() {
        let attrs = Attributes::parse(r#"number="250""#);
        assert_eq!(attrs.text(&["number"]), Some("250".to_owned()));
    }

    #[test]
    fn test_flag() {
        let attrs = Attributes::parse(r#"a="false" b="true" c="0" d="yes""#);
        assert!(!attrs.flag("a", true));
        assert!(attrs.flag("b", false));
        assert!(!attrs.flag("c", true));
        assert!(attrs.flag("d", false));
        assert!(attrs.flag("missing", true));
        assert!(!attrs.flag("missing", false));
    }
}
