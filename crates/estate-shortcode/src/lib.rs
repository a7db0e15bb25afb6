//! Shortcode rendering for CMS page content.
//!
//! Content authored in the CMS is HTML with embedded shortcodes. Shortcodes
//! arrive either as structured descriptors (`{type, position, data}`) from the
//! content API or as inline `[tag attr="value"]` tokens in the text.
//!
//! # Architecture
//!
//! Rendering runs in four stages:
//! - [`scan`]: produce the ordered [`Occurrence`] list (structured or text mode)
//! - [`compose`]: split content into literal and shortcode [`Segment`]s
//! - [`Shortcode::from_occurrence`]: resolve each tag to a typed block
//! - [`BlockRenderer`]: turn blocks into [`RenderNode`]s ([`HtmlBlocks`] by default)
//!
//! [`ShortcodeRenderer`] ties the stages together.
//!
//! # Example
//!
//! ```
//! use estate_shortcode::ShortcodeRenderer;
//!
//! let content = r#"<p>Hi</p>[alert type="error" message="Bad"]<p>Bye</p>"#;
//! let output = ShortcodeRenderer::new().render(content, None);
//!
//! assert_eq!(output.nodes.len(), 3);
//! assert!(output.html().contains("sc-alert-error"));
//! assert!(output.warnings.is_empty());
//! ```

mod attrs;
mod html;
mod occurrence;
mod renderer;
mod scanner;
mod segment;
mod shortcode;

pub use attrs::{AttrValue, Attributes};
pub use html::{BlockRenderer, HtmlBlocks, RenderNode, escape_html, initials, safe_url};
pub use occurrence::Occurrence;
pub use renderer::{RenderOutput, ShortcodeRenderer};
pub use scanner::{Scan, ScanMode, scan};
pub use segment::{Segment, compose};
pub use shortcode::{
    AlertTone, ButtonStyle, DEFAULT_GRID_COLUMNS, DEFAULT_SPACER_HEIGHT, MAX_GRID_COLUMNS, Shortcode,
};

