//! Known shortcode blocks.
//!
//! Maps an occurrence's tag to a typed block, reading the fields that block
//! recognizes and substituting its defaults.

use crate::{Attributes, Occurrence};

/// Presentation of an `alert` block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertTone {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl AlertTone {
    fn parse(value: Option<String>) -> Self {
        match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("warning") => Self::Warning,
            Some("error") => Self::Error,
            Some("success") => Self::Success,
            _ => Self::Info,
        }
    }

    /// CSS modifier name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

/// Presentation of a `button` block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonStyle {
    #[default]
    Solid,
    Outline,
    Ghost,
}

impl ButtonStyle {
    fn parse(value: Option<String>) -> Self {
        match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("outline") => Self::Outline,
            Some("ghost") => Self::Ghost,
            _ => Self::Solid,
        }
    }

    /// CSS modifier name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Outline => "outline",
            Self::Ghost => "ghost",
        }
    }
}

/// Spacer height when none (or no usable one) is given.
pub const DEFAULT_SPACER_HEIGHT: &str = "40px";

/// Default number of `grid` columns.
pub const DEFAULT_GRID_COLUMNS: u32 = 3;
/// Largest accepted number of `grid` columns.
pub const MAX_GRID_COLUMNS: u32 = 12;

/// A shortcode resolved to its block and fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shortcode {
    /// General contact form, optionally about a property.
    ContactForm {
        property_id: Option<i64>,
        property_title: Option<String>,
    },
    /// Inquiry form for a specific property.
    PropertyInquiryForm {
        property_id: Option<i64>,
        property_title: Option<String>,
    },
    Alert {
        title: Option<String>,
        message: String,
        tone: AlertTone,
    },
    Button {
        text: String,
        url: String,
        style: ButtonStyle,
        target: Option<String>,
        icon: bool,
    },
    Card {
        title: Option<String>,
        image: Option<String>,
        text: Option<String>,
        url: Option<String>,
        link_text: String,
    },
    Grid {
        columns: u32,
    },
    /// Two raw-HTML columns.
    Columns {
        left: Option<String>,
        right: Option<String>,
    },
    FeatureBox {
        icon: Option<String>,
        title: Option<String>,
        text: Option<String>,
    },
    Stats {
        number: String,
        label: String,
        description: Option<String>,
    },
    Testimonial {
        avatar: Option<String>,
        name: String,
        title: Option<String>,
        text: String,
    },
    Cta {
        title: Option<String>,
        text: Option<String>,
        button_text: Option<String>,
        button_url: String,
    },
    /// Vertical space; `height` is passed through as a CSS length.
    Spacer {
        height: String,
    },
    Divider,
    Video {
        url: Option<String>,
    },
    /// Tag with no block; renders as an empty node.
    Unknown {
        name: String,
    },
}

impl Shortcode {
    /// Resolve an occurrence to its block.
    ///
    /// Tags are matched case-insensitively with `-` and `_` treated alike, so
    /// `contact-form` (API descriptors) and `contact_form` (text tokens) are
    /// the same block.
    ///
    /// # Example
    ///
    /// ```
    /// use estate_shortcode::{Attributes, Occurrence, Shortcode};
    ///
    /// let occ = Occurrence::new("spacer", 0).with_data(Attributes::parse(r#"height="2rem""#));
    /// assert_eq!(Shortcode::from_occurrence(&occ), Shortcode::Spacer { height: "2rem".to_owned() });
    /// ```
    #[must_use]
    pub fn from_occurrence(occurrence: &Occurrence) -> Self {
        let data = &occurrence.data;

        match normalize_tag(&occurrence.kind).as_str() {
            "contact_form" => Self::ContactForm {
                property_id: property_id(data),
                property_title: property_title(data),
            },
            "property_inquiry_form" => Self::PropertyInquiryForm {
                property_id: property_id(data),
                property_title: property_title(data),
            },
            "alert" => Self::Alert {
                title: data.text(&["title"]),
                message: data.text_or(&["message", "text"], "Alert message"),
                tone: AlertTone::parse(data.text(&["type"])),
            },
            "button" => Self::Button {
                text: data.text_or(&["text"], "Click Here"),
                url: data.text_or(&["url"], "#"),
                style: ButtonStyle::parse(data.text(&["style"])),
                target: data.text(&["target"]),
                icon: data.flag("icon", true),
            },
            "card" => Self::Card {
                title: data.text(&["title"]),
                image: data.text(&["image"]),
                text: data.text(&["text"]),
                url: data.text(&["url"]),
                link_text: data.text_or(&["link_text", "linkText"], "Learn More"),
            },
            "grid" => Self::Grid {
                columns: grid_columns(data),
            },
            "columns" => Self::Columns {
                left: data.text(&["left"]),
                right: data.text(&["right"]),
            },
            "feature_box" => Self::FeatureBox {
                icon: data.text(&["icon"]),
                title: data.text(&["title"]),
                text: data.text(&["text"]),
            },
            "stats" => Self::Stats {
                number: data.text_or(&["number"], "0"),
                label: data.text_or(&["label"], "Stat"),
                description: data.text(&["description"]),
            },
            "testimonial" => Self::Testimonial {
                avatar: data.text(&["avatar"]),
                name: data.text_or(&["name"], "Anonymous"),
                title: data.text(&["title"]),
                text: data.text_or(&["text", "quote"], "Testimonial text"),
            },
            "cta" => Self::Cta {
                title: data.text(&["title"]),
                text: data.text(&["text"]),
                button_text: data.text(&["button_text", "buttonText"]),
                button_url: data.text_or(&["button_url", "buttonUrl"], "#"),
            },
            "spacer" => Self::Spacer {
                height: data.text_or(&["height"], DEFAULT_SPACER_HEIGHT),
            },
            "divider" => Self::Divider,
            "video" => Self::Video {
                url: data.text(&["url"]),
            },
            _ => Self::Unknown {
                name: occurrence.kind.clone(),
            },
        }
    }

    /// Check if this is the fallback for an unrecognized tag.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase().replace('-', "_")
}

fn property_id(data: &Attributes) -> Option<i64> {
    data.int(&["property_id", "propertyId"])
}

fn property_title(data: &Attributes) -> Option<String> {
    data.text(&["property_title", "propertyTitle"])
}

fn grid_columns(data: &Attributes) -> u32 {
    data.int(&["columns"])
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| (1..=MAX_GRID_COLUMNS).contains(n))
        .unwrap_or(DEFAULT_GRID_COLUMNS)
}
