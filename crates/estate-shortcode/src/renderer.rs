//! Content rendering pipeline.

use tracing::{debug, warn};

use crate::html::{BlockRenderer, HtmlBlocks, RenderNode};
use crate::{Occurrence, Segment, Shortcode, compose, scan};

/// Result of rendering one content string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderOutput {
    /// Output nodes in document order.
    pub nodes: Vec<RenderNode>,
    /// Non-fatal problems encountered while rendering.
    pub warnings: Vec<String>,
}

impl RenderOutput {
    /// Concatenated HTML of all nodes.
    #[must_use]
    pub fn html(&self) -> String {
        self.nodes.iter().map(RenderNode::as_html).collect()
    }
}

/// Renders CMS content with embedded shortcodes.
///
/// Generic over the block renderer; [`HtmlBlocks`] is the default.
///
/// # Example
///
/// ```
/// use estate_shortcode::ShortcodeRenderer;
///
/// let output = ShortcodeRenderer::new().render("<p>Hi</p>[divider]<p>Bye</p>", None);
/// assert_eq!(output.nodes.len(), 3);
/// assert!(output.html().contains("sc-divider"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ShortcodeRenderer<B: BlockRenderer = HtmlBlocks> {
    blocks: B,
}

impl ShortcodeRenderer {
    /// Create a renderer producing default HTML blocks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: BlockRenderer> ShortcodeRenderer<B> {
    /// Create a renderer with a custom block renderer.
    #[must_use]
    pub fn with_blocks(blocks: B) -> Self {
        Self { blocks }
    }

    /// Block renderer in use.
    #[must_use]
    pub fn blocks(&self) -> &B {
        &self.blocks
    }

    /// Render `content`, using `structured` occurrences when non-empty and
    /// scanning the text for `[tag ...]` tokens otherwise.
    ///
    /// Never fails: unknown tags and unusable block data render as
    /// [`RenderNode::Empty`] and are reported in [`RenderOutput::warnings`].
    pub fn render(&self, content: &str, structured: Option<&[Occurrence]>) -> RenderOutput {
        let result = scan(content, structured);
        debug!(
            mode = ?result.mode,
            occurrences = result.occurrences.len(),
            "Scanned content"
        );

        let mut warnings = result.warnings;
        let nodes = compose(content, &result.occurrences)
            .into_iter()
            .map(|segment| self.render_segment(segment, &mut warnings))
            .collect();

        RenderOutput { nodes, warnings }
    }

    fn render_segment(&self, segment: Segment, warnings: &mut Vec<String>) -> RenderNode {
        match segment {
            Segment::Literal { html } => RenderNode::Html(html),
            Segment::Shortcode { occurrence } => {
                let block = Shortcode::from_occurrence(&occurrence);
                let before = warnings.len();
                let node = self.blocks.render(&block, warnings);
                for message in &warnings[before..] {
                    warn!(kind = %occurrence.kind, position = occurrence.position, "{message}");
                }
                node
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Attributes;

    #[test]
    fn test_plain_content_single_node() {
        let output = ShortcodeRenderer::new().render("<p>Just text</p>", None);
        assert_eq!(output.nodes, vec![RenderNode::Html("<p>Just text</p>".to_owned())]);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_structured_contact_form() {
        let content = "<p>Intro</p><p>Outro</p>";
        let occurrences = [Occurrence::new("contact-form", 12)];
        let output = ShortcodeRenderer::new().render(content, Some(&occurrences));

        assert_eq!(output.nodes.len(), 3);
        assert_eq!(output.nodes[0].as_html(), "<p>Intro</p>");
        assert!(output.nodes[1].as_html().contains(r#"action="/contact""#));
        assert_eq!(output.nodes[2].as_html(), "<p>Outro</p>");
    }

    #[test]
    fn test_text_mode_alert() {
        let content = r#"<p>Hi</p>[alert type="error" message="Bad"]<p>Bye</p>"#;
        let output = ShortcodeRenderer::new().render(content, None);

        assert_eq!(output.nodes.len(), 3);
        let alert = output.nodes[1].as_html();
        assert!(alert.contains("sc-alert-error"));
        assert!(alert.contains("Bad"));
        assert!(!output.html().contains("[alert"));
    }

    #[test]
    fn test_unknown_tag_renders_empty_and_warns() {
        let output = ShortcodeRenderer::new().render("<p>a</p>[unknown_widget]<p>b</p>", None);

        assert_eq!(output.nodes.len(), 3);
        assert!(output.nodes[1].is_empty());
        assert_eq!(output.warnings, vec!["Unknown shortcode type: unknown_widget"]);
        assert_eq!(output.html(), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_structured_with_data() {
        let mut data = Attributes::new();
        data.insert("propertyId", 7);
        data.insert("propertyTitle", "Sea View");
        let occurrences = [Occurrence::new("property-inquiry-form", 0).with_data(data)];

        let output = ShortcodeRenderer::new().render("<p>Details</p>", Some(&occurrences));
        assert!(output.nodes[0].as_html().contains(r#"value="7""#));
        assert!(output.nodes[0].as_html().contains("Sea View"));
    }

    #[test]
    fn test_scan_warnings_are_reported() {
        let occurrences = [Occurrence::new("divider", 99)];
        let output = ShortcodeRenderer::new().render("<p>x</p>", Some(&occurrences));
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.nodes.len(), 2);
    }

    struct Names;

    impl BlockRenderer for Names {
        fn render(&self, block: &Shortcode, _warnings: &mut Vec<String>) -> RenderNode {
            RenderNode::Html(format!("<{block:?}>"))
        }
    }

    #[test]
    fn test_custom_block_renderer() {
        let output = ShortcodeRenderer::with_blocks(Names).render("[divider]", None);
        assert_eq!(output.html(), "<Divider>");
    }
}
