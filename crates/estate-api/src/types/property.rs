//! Property listing types.

use serde::{Deserialize, Serialize};

use super::{Agent, City, District};

/// A value the API sends either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    /// JSON number.
    Number(f64),
    /// Numeric text such as `"125.50"`.
    Text(String),
}

impl Numeric {
    /// Numeric value, parsing text leniently.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// City of a property: a plain name or the full record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CityRef {
    /// City name only.
    Name(String),
    /// Expanded city record.
    Detail(Box<City>),
}

impl CityRef {
    /// City name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detail(city) => &city.name,
        }
    }
}

/// Property image record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PropertyImage {
    #[serde(default)]
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub is_primary: bool,
}

/// Image entry: bare URL or full record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ImageRef {
    /// Bare image URL.
    Url(String),
    /// Image record.
    Image(PropertyImage),
}

/// Property feature (`Pool`, `Parking: 2 spaces`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PropertyFeature {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// SEO overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Seo {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
}

/// Property listing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Property {
    pub id: u64,
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(default)]
    pub price: Option<Numeric>,
    #[serde(default)]
    pub price_formatted: Option<String>,
    /// Property kind (`apartment`, `house`, `villa`, `land`, `commercial`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// `sale` or `rent`.
    #[serde(default)]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    /// `available`, `sold`, `rented` or `pending`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub square_meters: Option<Numeric>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub year_built: Option<u32>,
    #[serde(default)]
    pub energy_class: Option<String>,
    #[serde(default)]
    pub garage: Option<u32>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub address: String,
    #[serde(default)]
    pub city: Option<CityRef>,
    #[serde(default)]
    pub city_id: Option<u64>,
    #[serde(default)]
    pub district: Option<District>,
    #[serde(default)]
    pub district_id: Option<u64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub images: Vec<ImageRef>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub features: Vec<PropertyFeature>,
    #[serde(default)]
    pub extra_details: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub agent_id: Option<u64>,
    #[serde(default)]
    pub agent: Option<Agent>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub seo: Option<Seo>,
}

impl Property {
    /// Minimal listing, mostly for tests and fixtures.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            slug: None,
            title: title.into(),
            description: String::new(),
            price: None,
            price_formatted: None,
            kind: None,
            listing_type: None,
            property_type: None,
            status: None,
            bedrooms: None,
            bathrooms: None,
            square_meters: None,
            area: None,
            year_built: None,
            energy_class: None,
            garage: None,
            address: String::new(),
            city: None,
            city_id: None,
            district: None,
            district_id: None,
            state: None,
            country: None,
            postal_code: None,
            zip_code: None,
            latitude: None,
            longitude: None,
            featured_image: None,
            images: Vec::new(),
            features: Vec::new(),
            extra_details: None,
            agent_id: None,
            agent: None,
            is_featured: false,
            published_at: None,
            created_at: None,
            updated_at: None,
            seo: None,
        }
    }

    /// Property kind, preferring `property_type` over `type`.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.property_type.as_deref().or(self.kind.as_deref())
    }

    /// City name, if any.
    #[must_use]
    pub fn city_name(&self) -> Option<&str> {
        self.city.as_ref().map(CityRef::name)
    }
}
