//! Shortcode token scanning.
//!
//! Produces the ordered occurrence list for a content string, either from
//! descriptors supplied by the content API or by scanning the text for
//! `[tag attr="value"]` tokens.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::{Attributes, Occurrence};

/// `[tag]` or `[tag attrs...]`, tag being ASCII word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9_]+)(?:\s+([^\]]+))?\]").unwrap());

/// How occurrences were obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScanMode {
    /// Descriptors supplied out-of-band; the text was not inspected.
    Structured,
    /// Tokens found by scanning the text.
    Text,
}

/// Scanner output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scan {
    /// Scan mode that produced the occurrences.
    pub mode: ScanMode,
    /// Occurrences in ascending position order.
    pub occurrences: Vec<Occurrence>,
    /// Non-fatal problems (positions that had to be adjusted).
    pub warnings: Vec<String>,
}

/// Find the shortcode occurrences of `content`.
///
/// A non-empty `structured` list selects structured mode: the descriptors are
/// stably sorted by position and the text is never inspected. `None` and an
/// empty list both fall back to scanning the text.
///
/// # Example
///
/// ```
/// use estate_shortcode::{ScanMode, scan};
///
/// let result = scan(r#"<p>Hi</p>[cta title="Go"]"#, Some(&[]));
/// assert_eq!(result.mode, ScanMode::Text);
/// assert_eq!(result.occurrences[0].kind, "cta");
/// assert_eq!(result.occurrences[0].position, 9);
/// ```
#[must_use]
pub fn scan(content: &str, structured: Option<&[Occurrence]>) -> Scan {
    match structured {
        Some(list) if !list.is_empty() => scan_structured(content, list),
        _ => scan_text(content),
    }
}

fn scan_structured(content: &str, list: &[Occurrence]) -> Scan {
    let mut warnings = Vec::new();
    let mut occurrences: Vec<Occurrence> = list
        .iter()
        .map(|occ| normalize(content, occ, &mut warnings))
        .collect();

    // `sort_by_key` is stable: equal positions keep their input order.
    occurrences.sort_by_key(|occ| occ.position);

    Scan {
        mode: ScanMode::Structured,
        occurrences,
        warnings,
    }
}

fn scan_text(content: &str) -> Scan {
    let occurrences = TOKEN_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let token = caps.get(0)?;
            let data = caps
                .get(2)
                .map_or_else(Attributes::new, |m| Attributes::parse(m.as_str()));
            Some(
                Occurrence::new(&caps[1], token.start())
                    .with_data(data)
                    .with_len(token.len()),
            )
        })
        .collect();

    Scan {
        mode: ScanMode::Text,
        occurrences,
        warnings: Vec::new(),
    }
}

/// Keep a descriptor inside `content` and on character boundaries.
fn normalize(content: &str, occ: &Occurrence, warnings: &mut Vec<String>) -> Occurrence {
    let position = floor_char_boundary(content, occ.position);
    let end = floor_char_boundary(content, occ.position.saturating_add(occ.len)).max(position);

    if position != occ.position {
        let message = format!(
            "shortcode '{}' position {} adjusted to {} (content is {} bytes)",
            occ.kind,
            occ.position,
            position,
            content.len()
        );
        warn!(kind = %occ.kind, requested = occ.position, position, "Shortcode position adjusted");
        warnings.push(message);
    }

    Occurrence {
        kind: occ.kind.clone(),
        position,
        data: occ.data.clone(),
        len: end - position,
    }
}

/// Largest char boundary `<= index`, clamped to the content length.
fn floor_char_boundary(content: &str, index: usize) -> usize {
    let mut index = index.min(content.len());
    while !content.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::AttrValue;

    fn kinds(scan: &Scan) -> Vec<(&str, usize)> {
        scan.occurrences
            .iter()
            .map(|o| (o.kind.as_str(), o.position))
            .collect()
    }

    #[test]
    fn test_text_mode_when_none() {
        let result = scan("before [contact_form] after", None);
        assert_eq!(result.mode, ScanMode::Text);
        assert_eq!(kinds(&result), vec![("contact_form", 7)]);
        assert_eq!(result.occurrences[0].len, "[contact_form]".len());
        assert!(result.occurrences[0].data.is_empty());
    }

    #[test]
    fn test_empty_structured_list_falls_back_to_text() {
        let result = scan("<p>x</p>[divider]", Some(&[]));
        assert_eq!(result.mode, ScanMode::Text);
        assert_eq!(kinds(&result), vec![("divider", 8)]);
    }

    #[test]
    fn test_text_mode_parses_attributes() {
        let result = scan(r#"[alert type="error" message="Bad"]"#, None);
        let data = &result.occurrences[0].data;
        assert_eq!(data.get("type"), Some(&AttrValue::Text("error".to_owned())));
        assert_eq!(data.get("message"), Some(&AttrValue::Text("Bad".to_owned())));
    }

    #[test]
    fn test_text_mode_multiple_tokens_in_order() {
        let result = scan(r#"[a][grid columns="2"] text [b x="1"]"#, None);
        assert_eq!(kinds(&result), vec![("a", 0), ("grid", 3), ("b", 27)]);
        assert_eq!(result.occurrences[1].data.int(&["columns"]), Some(2));
    }

    #[test]
    fn test_text_mode_ignores_non_word_tags() {
        let result = scan("[not-a-tag] [ spaced] [] [ok]", None);
        assert_eq!(kinds(&result), vec![("ok", 25)]);
    }

    #[test]
    fn test_text_mode_without_tokens() {
        let result = scan("<p>No shortcodes here.</p>", None);
        assert!(result.occurrences.is_empty());
    }

    #[test]
    fn test_structured_mode_sorts_by_position() {
        let list = vec![
            Occurrence::new("cta", 20),
            Occurrence::new("contact-form", 5),
            Occurrence::new("divider", 10),
        ];
        let content = "x".repeat(30);
        let result = scan(&content, Some(&list));
        assert_eq!(result.mode, ScanMode::Structured);
        assert_eq!(
            kinds(&result),
            vec![("contact-form", 5), ("divider", 10), ("cta", 20)]
        );
    }

    #[test]
    fn test_structured_mode_is_stable_on_ties() {
        let list = vec![
            Occurrence::new("first", 3),
            Occurrence::new("early", 1),
            Occurrence::new("second", 3),
            Occurrence::new("third", 3),
        ];
        let result = scan("abcdef", Some(&list));
        assert_eq!(
            kinds(&result),
            vec![("early", 1), ("first", 3), ("second", 3), ("third", 3)]
        );
    }

    #[test]
    fn test_structured_mode_does_not_inspect_text() {
        let list = vec![Occurrence::new("contact-form", 0)];
        let result = scan("[divider]", Some(&list));
        assert_eq!(kinds(&result), vec![("contact-form", 0)]);
    }

    #[test]
    fn test_structured_position_clamped_to_length() {
        let list = vec![Occurrence::new("cta", 100)];
        let result = scan("short", Some(&list));
        assert_eq!(kinds(&result), vec![("cta", 5)]);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("100"));
    }

    #[test]
    fn test_structured_position_moved_to_char_boundary() {
        // 'é' occupies bytes 1..3
        let list = vec![Occurrence::new("cta", 2)];
        let result = scan("aé", Some(&list));
        assert_eq!(kinds(&result), vec![("cta", 1)]);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_text_mode_positions_are_byte_offsets() {
        let content = "héllo [divider]";
        let result = scan(content, None);
        let occ = &result.occurrences[0];
        assert_eq!(occ.source(content), "[divider]");
    }
}
