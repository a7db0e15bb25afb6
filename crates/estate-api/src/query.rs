//! Listing filters and query-string mapping.
//!
//! Filters map to API query parameters with unset fields omitted, and parse
//! back from page URL query pairs, ignoring blank or unparsable values.

use std::fmt::Write;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unencoded in query keys/values and path segments.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Default property listing page size.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Query parameters as ordered `(key, value)` pairs.
pub type QueryPairs = Vec<(&'static str, String)>;

/// Percent-encode one URL component.
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Encode pairs as `k=v&k=v` (no leading `?`).
#[must_use]
pub fn encode_query<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    let mut out = String::new();
    for (key, value) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        write!(
            out,
            "{}={}",
            encode_component(key.as_ref()),
            encode_component(value.as_ref())
        )
        .unwrap();
    }
    out
}

fn push<T: ToString>(pairs: &mut QueryPairs, key: &'static str, value: Option<&T>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

fn parse<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

fn text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Property listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilters {
    /// `sale` or `rent` (query key `type`).
    pub listing_type: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub city_id: Option<u64>,
    pub district_id: Option<u64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PropertyFilters {
    /// Parse filters from URL query pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use estate_api::PropertyFilters;
    ///
    /// let filters = PropertyFilters::from_pairs([("type", "rent"), ("bedrooms", "two")]);
    /// assert_eq!(filters.listing_type.as_deref(), Some("rent"));
    /// assert_eq!(filters.bedrooms, None);
    /// ```
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            filters.set(key.as_ref(), value.as_ref());
        }
        filters
    }

    /// Set one field from a query pair. Returns `false` for unknown keys.
    fn set(&mut self, key: &str, value: &str) -> bool {
        match key {
            "type" => self.listing_type = text(value),
            "property_type" => self.property_type = text(value),
            "min_price" => self.min_price = parse(value),
            "max_price" => self.max_price = parse(value),
            "bedrooms" => self.bedrooms = parse(value),
            "bathrooms" => self.bathrooms = parse(value),
            "city_id" => self.city_id = parse(value),
            "district_id" => self.district_id = parse(value),
            "page" => self.page = parse(value),
            "per_page" => self.per_page = parse(value),
            _ => return false,
        }
        true
    }

    /// Fill in listing defaults: page 1 and `per_page`.
    #[must_use]
    pub fn with_page_defaults(mut self, per_page: u32) -> Self {
        self.page = Some(self.page.unwrap_or(1).max(1));
        self.per_page = Some(self.per_page.unwrap_or(per_page));
        self
    }

    /// Check if any narrowing filter (besides paging) is set.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.listing_type.is_some()
            || self.property_type.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.bedrooms.is_some()
            || self.bathrooms.is_some()
            || self.city_id.is_some()
            || self.district_id.is_some()
    }

    /// API query parameters; unset fields are omitted.
    #[must_use]
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        push(&mut pairs, "type", self.listing_type.as_ref());
        push(&mut pairs, "property_type", self.property_type.as_ref());
        push(&mut pairs, "min_price", self.min_price.as_ref());
        push(&mut pairs, "max_price", self.max_price.as_ref());
        push(&mut pairs, "bedrooms", self.bedrooms.as_ref());
        push(&mut pairs, "bathrooms", self.bathrooms.as_ref());
        push(&mut pairs, "city_id", self.city_id.as_ref());
        push(&mut pairs, "district_id", self.district_id.as_ref());
        push(&mut pairs, "page", self.page.as_ref());
        push(&mut pairs, "per_page", self.per_page.as_ref());
        pairs
    }
}

/// Free-text property search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySearch {
    pub filters: PropertyFilters,
    pub q: Option<String>,
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
}

impl PropertySearch {
    /// Parse a search from URL query pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut search = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "q" => search.q = text(value),
                "sort" => search.sort = text(value),
                "order" => {
                    search.order = text(value)
                        .map(|o| o.to_ascii_lowercase())
                        .filter(|o| o == "asc" || o == "desc");
                }
                _ => {
                    search.filters.set(key, value);
                }
            }
        }
        search
    }

    /// Check if a free-text query is present.
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.q.is_some()
    }

    /// API query parameters; unset fields are omitted.
    #[must_use]
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        push(&mut pairs, "q", self.q.as_ref());
        push(&mut pairs, "sort", self.sort.as_ref());
        push(&mut pairs, "order", self.order.as_ref());
        pairs.extend(self.filters.to_query());
        pairs
    }
}

/// Blog listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilters {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PostFilters {
    /// Parse filters from URL query pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "category" => filters.category = text(value),
                "tag" => filters.tag = text(value),
                "page" => filters.page = parse(value),
                "per_page" => filters.per_page = parse(value),
                _ => {}
            }
        }
        filters
    }

    /// API query parameters; unset fields are omitted.
    #[must_use]
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        push(&mut pairs, "category", self.category.as_ref());
        push(&mut pairs, "tag", self.tag.as_ref());
        push(&mut pairs, "page", self.page.as_ref());
        push(&mut pairs, "per_page", self.per_page.as_ref());
        pairs
    }
}

/// Plain page/per-page request for agents and cities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// Parse from URL query pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "page" => request.page = parse(value.as_ref()),
                "per_page" => request.per_page = parse(value.as_ref()),
                _ => {}
            }
        }
        request
    }

    /// API query parameters; unset fields are omitted.
    #[must_use]
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        push(&mut pairs, "page", self.page.as_ref());
        push(&mut pairs, "per_page", self.per_page.as_ref());
        pairs
    }
}
