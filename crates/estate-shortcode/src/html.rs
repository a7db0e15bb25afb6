//! HTML rendering of shortcode blocks.
//!
//! [`HtmlBlocks`] produces semantic HTML5 fragments. Every field is escaped
//! except the raw-HTML `columns` panes; link targets are restricted to safe
//! schemes.

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::shortcode::{AlertTone, ButtonStyle, DEFAULT_SPACER_HEIGHT, Shortcode};

static CSS_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?(px|rem|em|vh|vw|%)?$").unwrap());

/// One rendered output node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "html", rename_all = "lowercase"))]
pub enum RenderNode {
    /// HTML fragment.
    Html(String),
    /// Nothing to show (unknown tag or unusable data).
    Empty,
}

impl RenderNode {
    /// HTML of the node (empty string for [`RenderNode::Empty`]).
    #[must_use]
    pub fn as_html(&self) -> &str {
        match self {
            Self::Html(html) => html,
            Self::Empty => "",
        }
    }

    /// Check if the node renders nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Renders resolved shortcode blocks.
///
/// Implementations never fail: unusable input yields [`RenderNode::Empty`]
/// and a message pushed onto `warnings`.
pub trait BlockRenderer: Send + Sync {
    /// Render one block.
    fn render(&self, block: &Shortcode, warnings: &mut Vec<String>) -> RenderNode;
}

/// Default HTML block renderer.
///
/// Forms post to `/contact` and `/property-inquiry` unless configured otherwise.
#[derive(Clone, Debug)]
pub struct HtmlBlocks {
    contact_action: String,
    inquiry_action: String,
}

impl Default for HtmlBlocks {
    fn default() -> Self {
        Self {
            contact_action: "/contact".to_owned(),
            inquiry_action: "/property-inquiry".to_owned(),
        }
    }
}

impl HtmlBlocks {
    /// Create a renderer with default form actions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the form submission targets.
    #[must_use]
    pub fn with_form_actions(
        mut self,
        contact: impl Into<String>,
        inquiry: impl Into<String>,
    ) -> Self {
        self.contact_action = contact.into();
        self.inquiry_action = inquiry.into();
        self
    }
}

impl BlockRenderer for HtmlBlocks {
    #[allow(clippy::too_many_lines)]
    fn render(&self, block: &Shortcode, warnings: &mut Vec<String>) -> RenderNode {
        let mut out = String::new();

        match block {
            Shortcode::ContactForm {
                property_id,
                property_title,
            } => {
                let heading = property_title.as_ref().map_or(Cow::Borrowed("Contact Us"), |t| {
                    Cow::Owned(format!("Inquire about {t}"))
                });
                let action = if property_id.is_some() {
                    &self.inquiry_action
                } else {
                    &self.contact_action
                };
                contact_form(action, &heading, *property_id, &mut out);
            }
            Shortcode::PropertyInquiryForm {
                property_id,
                property_title,
            } => {
                let heading = property_title.as_ref().map_or(
                    Cow::Borrowed("Property Inquiry"),
                    |t| Cow::Owned(format!("Inquire about {t}")),
                );
                contact_form(&self.inquiry_action, &heading, *property_id, &mut out);
            }
            Shortcode::Alert {
                title,
                message,
                tone,
            } => {
                let role = match tone {
                    AlertTone::Error | AlertTone::Warning => "alert",
                    AlertTone::Info | AlertTone::Success => "status",
                };
                write!(
                    out,
                    r#"<div class="sc-alert sc-alert-{}" role="{role}">"#,
                    tone.as_str()
                )
                .unwrap();
                if let Some(title) = title {
                    write!(out, r#"<p class="sc-alert-title">{}</p>"#, escape_html(title)).unwrap();
                }
                write!(out, "<p>{}</p></div>", escape_html(message)).unwrap();
            }
            Shortcode::Button {
                text,
                url,
                style,
                target,
                icon,
            } => {
                button(text, url, *style, target.as_deref(), *icon, &mut out);
            }
            Shortcode::Card {
                title,
                image,
                text,
                url,
                link_text,
            } => {
                out.push_str(r#"<div class="sc-card">"#);
                if let Some(image) = image {
                    write!(
                        out,
                        r#"<img class="sc-card-image" src="{}" alt="{}" loading="lazy">"#,
                        escape_html(safe_url(image)),
                        escape_html(title.as_deref().unwrap_or_default())
                    )
                    .unwrap();
                }
                out.push_str(r#"<div class="sc-card-body">"#);
                if let Some(title) = title {
                    write!(out, "<h3>{}</h3>", escape_html(title)).unwrap();
                }
                if let Some(text) = text {
                    write!(out, "<p>{}</p>", escape_html(text)).unwrap();
                }
                if let Some(url) = url {
                    write!(
                        out,
                        r#"<a class="sc-card-link" href="{}">{}</a>"#,
                        escape_html(safe_url(url)),
                        escape_html(link_text)
                    )
                    .unwrap();
                }
                out.push_str("</div></div>");
            }
            Shortcode::Grid { columns } => {
                write!(
                    out,
                    r#"<div class="sc-grid" data-columns="{columns}" style="grid-template-columns: repeat({columns}, minmax(0, 1fr))"></div>"#
                )
                .unwrap();
            }
            Shortcode::Columns { left, right } => {
                write!(
                    out,
                    r#"<div class="sc-columns"><div class="sc-column">{}</div><div class="sc-column">{}</div></div>"#,
                    left.as_deref().unwrap_or_default(),
                    right.as_deref().unwrap_or_default()
                )
                .unwrap();
            }
            Shortcode::FeatureBox { icon, title, text } => {
                out.push_str(r#"<div class="sc-feature">"#);
                if let Some(icon) = icon {
                    write!(
                        out,
                        r#"<span class="sc-feature-icon" aria-hidden="true">{}</span>"#,
                        escape_html(icon)
                    )
                    .unwrap();
                }
                if let Some(title) = title {
                    write!(out, "<h3>{}</h3>", escape_html(title)).unwrap();
                }
                if let Some(text) = text {
                    write!(out, "<p>{}</p>", escape_html(text)).unwrap();
                }
                out.push_str("</div>");
            }
            Shortcode::Stats {
                number,
                label,
                description,
            } => {
                write!(
                    out,
                    r#"<div class="sc-stat"><span class="sc-stat-number">{}</span><span class="sc-stat-label">{}</span>"#,
                    escape_html(number),
                    escape_html(label)
                )
                .unwrap();
                if let Some(description) = description {
                    write!(out, "<p>{}</p>", escape_html(description)).unwrap();
                }
                out.push_str("</div>");
            }
            Shortcode::Testimonial {
                avatar,
                name,
                title,
                text,
            } => {
                write!(
                    out,
                    r#"<figure class="sc-testimonial"><blockquote>{}</blockquote><figcaption>"#,
                    escape_html(text)
                )
                .unwrap();
                match avatar {
                    Some(avatar) => write!(
                        out,
                        r#"<img class="sc-avatar" src="{}" alt="{}" loading="lazy">"#,
                        escape_html(safe_url(avatar)),
                        escape_html(name)
                    )
                    .unwrap(),
                    None => write!(
                        out,
                        r#"<span class="sc-avatar sc-avatar-initials">{}</span>"#,
                        escape_html(&initials(name))
                    )
                    .unwrap(),
                }
                write!(out, "<cite>{}</cite>", escape_html(name)).unwrap();
                if let Some(title) = title {
                    write!(out, r#"<span class="sc-testimonial-title">{}</span>"#, escape_html(title))
                        .unwrap();
                }
                out.push_str("</figcaption></figure>");
            }
            Shortcode::Cta {
                title,
                text,
                button_text,
                button_url,
            } => {
                out.push_str(r#"<section class="sc-cta">"#);
                if let Some(title) = title {
                    write!(out, "<h2>{}</h2>", escape_html(title)).unwrap();
                }
                if let Some(text) = text {
                    write!(out, "<p>{}</p>", escape_html(text)).unwrap();
                }
                if let Some(button_text) = button_text {
                    button(button_text, button_url, ButtonStyle::Solid, None, false, &mut out);
                }
                out.push_str("</section>");
            }
            Shortcode::Spacer { height } => {
                let height = css_length(height).unwrap_or_else(|| {
                    warnings.push(format!("spacer height is not a CSS length: {height}"));
                    Cow::Borrowed(DEFAULT_SPACER_HEIGHT)
                });
                write!(
                    out,
                    r#"<div class="sc-spacer" style="height: {height}" aria-hidden="true"></div>"#
                )
                .unwrap();
            }
            Shortcode::Divider => out.push_str(r#"<hr class="sc-divider">"#),
            Shortcode::Video { url } => {
                let Some(src) = url.as_deref().and_then(embed_url) else {
                    warnings.push(format!(
                        "video shortcode has no usable url: {}",
                        url.as_deref().unwrap_or("(missing)")
                    ));
                    return RenderNode::Empty;
                };
                write!(
                    out,
                    r#"<div class="sc-video"><iframe src="{}" title="Embedded video" loading="lazy" sandbox="allow-scripts allow-same-origin allow-presentation" allow="encrypted-media; picture-in-picture; fullscreen" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen></iframe></div>"#,
                    escape_html(&src)
                )
                .unwrap();
            }
            Shortcode::Unknown { name } => {
                warnings.push(format!("Unknown shortcode type: {name}"));
                return RenderNode::Empty;
            }
        }

        RenderNode::Html(out)
    }
}

/// Normalise a CSS length. Bare numbers are taken as pixels.
fn css_length(value: &str) -> Option<Cow<'_, str>> {
    let value = value.trim();
    let caps = CSS_LENGTH.captures(value)?;
    if caps.get(1).is_some() {
        Some(Cow::Borrowed(value))
    } else {
        Some(Cow::Owned(format!("{value}px")))
    }
}

fn contact_form(action: &str, heading: &str, property_id: Option<i64>, out: &mut String) {
    write!(
        out,
        r#"<form class="sc-form" method="post" action="{}"><h3>{}</h3>"#,
        escape_html(action),
        escape_html(heading)
    )
    .unwrap();
    if let Some(id) = property_id {
        write!(out, r#"<input type="hidden" name="property_id" value="{id}">"#).unwrap();
    }
    out.push_str(concat!(
        r#"<label>Name <input type="text" name="name" required></label>"#,
        r#"<label>Surname <input type="text" name="surname"></label>"#,
        r#"<label>Email <input type="email" name="email" required></label>"#,
        r#"<label>Phone <input type="tel" name="phone"></label>"#,
        r#"<label>Message <textarea name="message" rows="5" required></textarea></label>"#,
        r#"<button type="submit">Send</button></form>"#,
    ));
}

fn button(
    text: &str,
    url: &str,
    style: ButtonStyle,
    target: Option<&str>,
    icon: bool,
    out: &mut String,
) {
    write!(
        out,
        r#"<a class="sc-button sc-button-{}" href="{}""#,
        style.as_str(),
        escape_html(safe_url(url))
    )
    .unwrap();
    if let Some(target) = target {
        write!(out, r#" target="{}""#, escape_html(target)).unwrap();
        if target == "_blank" {
            out.push_str(r#" rel="noopener noreferrer""#);
        }
    }
    write!(out, ">{}", escape_html(text)).unwrap();
    if icon {
        out.push_str(r#"<span class="sc-button-icon" aria-hidden="true">&rarr;</span>"#);
    }
    out.push_str("</a>");
}

/// Escape text for HTML element content and attribute values.
///
/// # Example
///
/// ```
/// use estate_shortcode::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Restrict a link target to relative URLs and http(s)/mailto/tel schemes.
///
/// Anything else (`javascript:`, `data:`, ...) becomes `#`.
#[must_use]
pub fn safe_url(url: &str) -> &str {
    let trimmed = url.trim();
    let scheme_end = trimmed.find(':');
    let path_start = trimmed.find(['/', '?', '#']);

    match (scheme_end, path_start) {
        (Some(colon), path) if path.is_none_or(|p| colon < p) => {
            let scheme = trimmed[..colon].to_ascii_lowercase();
            if matches!(scheme.as_str(), "http" | "https" | "mailto" | "tel") {
                trimmed
            } else {
                "#"
            }
        }
        _ => trimmed,
    }
}

/// Embeddable URL for a video link.
///
/// YouTube and Vimeo page URLs are rewritten to their player URLs; other
/// http(s) URLs are embedded as-is. Returns `None` for anything else.
fn embed_url(url: &str) -> Option<String> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let rest = rest.strip_prefix("www.").unwrap_or(rest);

    if let Some(query) = rest.strip_prefix("youtube.com/watch?") {
        let id = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("v="))
            .filter(|id| is_video_id(id))?;
        return Some(format!("https://www.youtube.com/embed/{id}"));
    }
    if let Some(id) = rest.strip_prefix("youtu.be/") {
        let id = id.split(['?', '#']).next().unwrap_or_default();
        return is_video_id(id).then(|| format!("https://www.youtube.com/embed/{id}"));
    }
    if let Some(id) = rest.strip_prefix("vimeo.com/") {
        let id = id.split(['?', '#', '/']).next().unwrap_or_default();
        if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            return Some(format!("https://player.vimeo.com/video/{id}"));
        }
    }

    Some(url.to_owned())
}

fn is_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Up to two uppercase initials of a name (`"Jane Doe"` becomes `"JD"`).
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
