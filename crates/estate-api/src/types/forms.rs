//! Form submission payloads.
//!
//! Payloads deserialize from URL-encoded form posts and serialize to the JSON
//! bodies the API expects.

use serde::{Deserialize, Deserializer, Serialize};

/// Form endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// General contact (`/contact`).
    Contact,
    /// Interest in a specific property (`/property-inquiry`).
    PropertyInquiry,
    /// Property search preferences (`/inquiry`).
    Inquiry,
    /// Request to list a property for sale or rent (`/mandate`).
    Mandate,
}

impl FormKind {
    /// API path of the endpoint.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Contact => "/contact",
            Self::PropertyInquiry => "/property-inquiry",
            Self::Inquiry => "/inquiry",
            Self::Mandate => "/mandate",
        }
    }
}

/// Contact details shared by every form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// Inquiry about one property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PropertyInquiry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub property_id: Option<u64>,
}

/// Inquiry describing what the visitor is looking for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralInquiry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
}

/// Request to market the visitor's own property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Mandate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub city_id: String,
    #[serde(default)]
    pub listing_type: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub bedrooms: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub square_meters: String,
}

/// A validated form ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Contact(ContactForm),
    PropertyInquiry(PropertyInquiry),
    Inquiry(GeneralInquiry),
    Mandate(Mandate),
}

impl Submission {
    /// Endpoint the submission is posted to.
    #[must_use]
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Contact(_) => FormKind::Contact,
            Self::PropertyInquiry(_) => FormKind::PropertyInquiry,
            Self::Inquiry(_) => FormKind::Inquiry,
            Self::Mandate(_) => FormKind::Mandate,
        }
    }

    /// Contact fields as `(name, email, message)`.
    #[must_use]
    pub fn contact_fields(&self) -> (&str, &str, &str) {
        match self {
            Self::Contact(f) => (&f.name, &f.email, &f.message),
            Self::PropertyInquiry(f) => (&f.name, &f.email, &f.message),
            Self::Inquiry(f) => (&f.name, &f.email, &f.message),
            Self::Mandate(f) => (&f.name, &f.email, &f.message),
        }
    }

    /// JSON request body.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let value = match self {
            Self::Contact(f) => serde_json::to_value(f),
            Self::PropertyInquiry(f) => serde_json::to_value(f),
            Self::Inquiry(f) => serde_json::to_value(f),
            Self::Mandate(f) => serde_json::to_value(f),
        };
        // Plain string/integer structs always serialize.
        value.unwrap_or_default()
    }
}

/// Reply to a form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: String,
}

/// Form replies come either bare or inside a `data` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum FormReplyBody {
    Wrapped { data: FormReply },
    Bare(FormReply),
}

impl From<FormReplyBody> for FormReply {
    fn from(body: FormReplyBody) -> Self {
        match body {
            FormReplyBody::Wrapped { data } | FormReplyBody::Bare(data) => data,
        }
    }
}

/// Accept a number, a numeric string, or a blank string (as `None`).
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid property id: {s}"))),
    }
}
