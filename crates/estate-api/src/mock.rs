//! In-memory content source for testing.
//!
//! Provides [`MockSource`] for exercising the site and server without a
//! running API.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::ApiError;
use crate::query::{DEFAULT_PER_PAGE, PageRequest, PostFilters, PropertyFilters, PropertySearch};
use crate::source::ContentSource;
use crate::types::{
    Agent, City, District, FormReply, MenuItem, MenuLocation, Numeric, Page, Paginated, Post,
    Property, Setting, Settings, Submission,
};

/// Mock content source.
///
/// Holds content in memory and records submitted forms. Use the builder
/// methods to configure it with test data.
///
/// # Example
///
/// ```
/// use estate_api::{ContentSource, MockSource, Page};
///
/// let source = MockSource::new().with_page(Page {
///     id: 1,
///     slug: "about".to_owned(),
///     title: "About".to_owned(),
///     content: "<p>Hi</p>".to_owned(),
///     template: None,
///     shortcodes: Vec::new(),
///     meta_title: None,
///     meta_description: None,
///     created_at: None,
///     updated_at: None,
/// });
///
/// assert_eq!(source.page("about").unwrap().title, "About");
/// assert!(source.page("missing").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    pages: Vec<Page>,
    properties: Vec<Property>,
    agents: Vec<Agent>,
    posts: Vec<Post>,
    cities: Vec<City>,
    districts: Vec<District>,
    menus: HashMap<MenuLocation, Vec<MenuItem>>,
    settings: Vec<Setting>,
    failures: HashMap<&'static str, u16>,
    submissions: Mutex<Vec<Submission>>,
}

impl MockSource {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    #[must_use]
    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.push(post);
        self
    }

    #[must_use]
    pub fn with_city(mut self, city: City) -> Self {
        self.cities.push(city);
        self
    }

    #[must_use]
    pub fn with_district(mut self, district: District) -> Self {
        self.districts.push(district);
        self
    }

    #[must_use]
    pub fn with_menu(mut self, location: MenuLocation, items: Vec<MenuItem>) -> Self {
        self.menus.insert(location, items);
        self
    }

    #[must_use]
    pub fn with_setting(mut self, setting: Setting) -> Self {
        self.settings.push(setting);
        self
    }

    /// Make every call to `resource` fail with `status`.
    ///
    /// Resource names match the API path root: `pages`, `properties`,
    /// `agents`, `posts`, `cities`, `menu`, `settings`, `forms`.
    #[must_use]
    pub fn with_failure(mut self, resource: &'static str, status: u16) -> Self {
        self.failures.insert(resource, status);
        self
    }

    /// Forms submitted so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    fn check(&self, resource: &'static str) -> Result<(), ApiError> {
        match self.failures.get(resource) {
            Some(&status) => Err(ApiError::Status {
                status,
                message: format!("{resource} unavailable"),
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            message: "Not found".to_owned(),
        }
    }

    fn matching_properties(&self, filters: &PropertyFilters) -> Vec<Property> {
        self.properties
            .iter()
            .filter(|p| matches_filters(p, filters))
            .cloned()
            .collect()
    }
}

fn matches_filters(property: &Property, filters: &PropertyFilters) -> bool {
    let price = property.price.as_ref().and_then(Numeric::as_f64);
    let eq = |want: Option<&String>, have: Option<&str>| {
        want.is_none_or(|w| have.is_some_and(|h| h.eq_ignore_ascii_case(w)))
    };

    #[allow(clippy::cast_precision_loss)]
    let price_ok = filters
        .min_price
        .is_none_or(|min| price.is_some_and(|p| p >= min as f64))
        && filters
            .max_price
            .is_none_or(|max| price.is_some_and(|p| p <= max as f64));

    eq(filters.listing_type.as_ref(), property.listing_type.as_deref())
        && eq(filters.property_type.as_ref(), property.kind())
        && price_ok
        && filters
            .bedrooms
            .is_none_or(|n| property.bedrooms.is_some_and(|b| b >= n))
        && filters
            .bathrooms
            .is_none_or(|n| property.bathrooms.is_some_and(|b| b >= n))
        && filters.city_id.is_none_or(|id| property.city_id == Some(id))
        && filters
            .district_id
            .is_none_or(|id| property.district_id == Some(id))
}

fn paginate<T>(items: Vec<T>, page: Option<u32>, per_page: Option<u32>) -> Paginated<T> {
    Paginated::from_items(
        items,
        page.unwrap_or(1),
        per_page.unwrap_or(DEFAULT_PER_PAGE),
    )
}

fn take<T: Clone>(items: &[T], limit: u32) -> Vec<T> {
    items.iter().take(limit as usize).cloned().collect()
}

impl ContentSource for MockSource {
    fn page(&self, slug: &str) -> Result<Page, ApiError> {
        self.check("pages")?;
        self.pages
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    fn properties(&self, filters: &PropertyFilters) -> Result<Paginated<Property>, ApiError> {
        self.check("properties")?;
        Ok(paginate(
            self.matching_properties(filters),
            filters.page,
            filters.per_page,
        ))
    }

    fn property(&self, id: u64) -> Result<Property, ApiError> {
        self.check("properties")?;
        self.properties
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    fn featured_properties(&self, limit: u32) -> Result<Vec<Property>, ApiError> {
        self.check("properties")?;
        let featured: Vec<Property> = self
            .properties
            .iter()
            .filter(|p| p.is_featured)
            .cloned()
            .collect();
        Ok(take(&featured, limit))
    }

    fn search_properties(
        &self,
        search: &PropertySearch,
    ) -> Result<Paginated<Property>, ApiError> {
        self.check("properties")?;
        let needle = search.q.as_deref().map(str::to_lowercase);
        let found = self
            .matching_properties(&search.filters)
            .into_iter()
            .filter(|p| {
                needle.as_deref().is_none_or(|q| {
                    p.title.to_lowercase().contains(q) || p.description.to_lowercase().contains(q)
                })
            })
            .collect();
        Ok(paginate(found, search.filters.page, search.filters.per_page))
    }

    fn similar_properties(&self, id: u64, limit: u32) -> Result<Vec<Property>, ApiError> {
        let property = self.property(id)?;
        let similar: Vec<Property> = self
            .properties
            .iter()
            .filter(|p| p.id != id && p.kind() == property.kind())
            .cloned()
            .collect();
        Ok(take(&similar, limit))
    }

    fn agents(&self, request: &PageRequest) -> Result<Paginated<Agent>, ApiError> {
        self.check("agents")?;
        Ok(paginate(self.agents.clone(), request.page, request.per_page))
    }

    fn agent(&self, id: u64) -> Result<Agent, ApiError> {
        self.check("agents")?;
        self.agents
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    fn posts(&self, filters: &PostFilters) -> Result<Paginated<Post>, ApiError> {
        self.check("posts")?;
        let posts = self
            .posts
            .iter()
            .filter(|p| {
                filters
                    .category
                    .as_deref()
                    .is_none_or(|c| p.category.as_deref() == Some(c))
                    && filters
                        .tag
                        .as_deref()
                        .is_none_or(|t| p.tags.iter().any(|tag| tag == t))
            })
            .cloned()
            .collect();
        Ok(paginate(posts, filters.page, filters.per_page))
    }

    fn post(&self, slug: &str) -> Result<Post, ApiError> {
        self.check("posts")?;
        self.posts
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    fn latest_posts(&self, limit: u32) -> Result<Vec<Post>, ApiError> {
        self.check("posts")?;
        Ok(take(&self.posts, limit))
    }

    fn cities(&self, request: &PageRequest) -> Result<Paginated<City>, ApiError> {
        self.check("cities")?;
        Ok(paginate(self.cities.clone(), request.page, request.per_page))
    }

    fn city(&self, id: u64) -> Result<City, ApiError> {
        self.check("cities")?;
        self.cities
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    fn districts(&self, city_id: u64) -> Result<Vec<District>, ApiError> {
        self.check("cities")?;
        Ok(self
            .districts
            .iter()
            .filter(|d| d.city_id == city_id)
            .cloned()
            .collect())
    }

    fn menu(&self, location: MenuLocation) -> Result<Vec<MenuItem>, ApiError> {
        self.check("menu")?;
        if location == MenuLocation::All {
            return Ok(self.menus.values().flatten().cloned().collect());
        }
        Ok(self.menus.get(&location).cloned().unwrap_or_default())
    }

    fn settings(&self) -> Result<Settings, ApiError> {
        self.check("settings")?;
        Ok(self
            .settings
            .iter()
            .map(|s| (s.key.clone(), serde_json::Value::String(s.value.clone())))
            .collect())
    }

    fn settings_group(&self, group: &str) -> Result<Settings, ApiError> {
        self.check("settings")?;
        Ok(self
            .settings
            .iter()
            .filter(|s| s.group.as_deref() == Some(group))
            .map(|s| (s.key.clone(), serde_json::Value::String(s.value.clone())))
            .collect())
    }

    fn setting(&self, key: &str) -> Result<Setting, ApiError> {
        self.check("settings")?;
        self.settings
            .iter()
            .find(|s| s.key == key)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    fn submit(&self, submission: &Submission) -> Result<FormReply, ApiError> {
        self.check("forms")?;
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(FormReply {
            success: Some(true),
            message: "Thank you! We will get back to you soon.".to_owned(),
        })
    }
}
