//! Segment composition.
//!
//! Splits content into literal HTML runs and shortcode markers, in document order.

use crate::Occurrence;

/// A contiguous piece of rendered content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Segment {
    /// Literal HTML passed through unchanged.
    Literal {
        /// Raw HTML.
        html: String,
    },
    /// A single shortcode occurrence.
    Shortcode {
        /// The occurrence to dispatch.
        occurrence: Occurrence,
    },
}

impl Segment {
    /// Create a literal segment.
    #[must_use]
    pub fn literal(html: impl Into<String>) -> Self {
        Self::Literal { html: html.into() }
    }

    /// Literal HTML, if this is a literal segment.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal { html } => Some(html),
            Self::Shortcode { .. } => None,
        }
    }

    /// Occurrence, if this is a shortcode segment.
    #[must_use]
    pub fn as_shortcode(&self) -> Option<&Occurrence> {
        match self {
            Self::Shortcode { occurrence } => Some(occurrence),
            Self::Literal { .. } => None,
        }
    }
}

/// Interleave literal content with shortcode occurrences.
///
/// `occurrences` must be in ascending position order with positions on
/// character boundaries of `content` (what [`scan`](crate::scan) returns).
/// Content between occurrences becomes a literal segment unless it is
/// whitespace-only. The cursor moves past the bytes each occurrence consumes,
/// so matched `[tag]` tokens never reappear as text. Without occurrences the
/// whole content is returned as one literal, even when blank.
///
/// # Example
///
/// ```
/// use estate_shortcode::{Occurrence, Segment, compose};
///
/// let segments = compose("<p>A</p><p>B</p>", &[Occurrence::new("divider", 8)]);
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[0], Segment::literal("<p>A</p>"));
/// assert_eq!(segments[2], Segment::literal("<p>B</p>"));
/// ```
#[must_use]
pub fn compose(content: &str, occurrences: &[Occurrence]) -> Vec<Segment> {
    if occurrences.is_empty() {
        return vec![Segment::literal(content)];
    }

    let mut segments = Vec::with_capacity(occurrences.len() * 2 + 1);
    let mut cursor = 0;

    for occurrence in occurrences {
        if occurrence.position > cursor {
            push_literal(&mut segments, content.get(cursor..occurrence.position));
        }

        segments.push(Segment::Shortcode {
            occurrence: occurrence.clone(),
        });
        cursor = cursor.max(occurrence.end());
    }

    if cursor < content.len() {
        push_literal(&mut segments, content.get(cursor..));
    }

    segments
}

fn push_literal(segments: &mut Vec<Segment>, text: Option<&str>) {
    if let Some(text) = text
        && !text.trim().is_empty()
    {
        segments.push(Segment::literal(text));
    }
}
