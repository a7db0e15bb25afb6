//! Content source abstraction.
//!
//! The site layer reads everything through [`ContentSource`], so pages can be
//! rendered from the live API or from in-memory data in tests.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::query::{PageRequest, PostFilters, PropertyFilters, PropertySearch};
use crate::types::{
    Agent, City, District, FormReply, MenuItem, MenuLocation, Page, Paginated, Post, Property,
    Setting, Settings, Submission,
};

/// Read access to site content plus form submission.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait ContentSource: Send + Sync {
    /// CMS page by slug.
    fn page(&self, slug: &str) -> Result<Page, ApiError>;

    /// Property listing page.
    fn properties(&self, filters: &PropertyFilters) -> Result<Paginated<Property>, ApiError>;

    /// Property by id.
    fn property(&self, id: u64) -> Result<Property, ApiError>;

    /// Featured properties.
    fn featured_properties(&self, limit: u32) -> Result<Vec<Property>, ApiError>;

    /// Free-text property search.
    fn search_properties(&self, search: &PropertySearch)
    -> Result<Paginated<Property>, ApiError>;

    /// Properties similar to `id`.
    fn similar_properties(&self, id: u64, limit: u32) -> Result<Vec<Property>, ApiError>;

    /// Agent listing page.
    fn agents(&self, request: &PageRequest) -> Result<Paginated<Agent>, ApiError>;

    /// Agent by id.
    fn agent(&self, id: u64) -> Result<Agent, ApiError>;

    /// Blog listing page.
    fn posts(&self, filters: &PostFilters) -> Result<Paginated<Post>, ApiError>;

    /// Blog post by slug.
    fn post(&self, slug: &str) -> Result<Post, ApiError>;

    /// Most recent posts.
    fn latest_posts(&self, limit: u32) -> Result<Vec<Post>, ApiError>;

    /// City listing page.
    fn cities(&self, request: &PageRequest) -> Result<Paginated<City>, ApiError>;

    /// City by id.
    fn city(&self, id: u64) -> Result<City, ApiError>;

    /// Districts of a city.
    fn districts(&self, city_id: u64) -> Result<Vec<District>, ApiError>;

    /// Menu items for a location.
    fn menu(&self, location: MenuLocation) -> Result<Vec<MenuItem>, ApiError>;

    /// All settings.
    fn settings(&self) -> Result<Settings, ApiError>;

    /// Settings of one group.
    fn settings_group(&self, group: &str) -> Result<Settings, ApiError>;

    /// One setting by key.
    fn setting(&self, key: &str) -> Result<Setting, ApiError>;

    /// Submit a form.
    fn submit(&self, submission: &Submission) -> Result<FormReply, ApiError>;
}

impl ContentSource for ApiClient {
    fn page(&self, slug: &str) -> Result<Page, ApiError> {
        Self::page(self, slug)
    }

    fn properties(&self, filters: &PropertyFilters) -> Result<Paginated<Property>, ApiError> {
        Self::properties(self, filters)
    }

    fn property(&self, id: u64) -> Result<Property, ApiError> {
        Self::property(self, id)
    }

    fn featured_properties(&self, limit: u32) -> Result<Vec<Property>, ApiError> {
        Self::featured_properties(self, limit)
    }

    fn search_properties(
        &self,
        search: &PropertySearch,
    ) -> Result<Paginated<Property>, ApiError> {
        Self::search_properties(self, search)
    }

    fn similar_properties(&self, id: u64, limit: u32) -> Result<Vec<Property>, ApiError> {
        Self::similar_properties(self, id, limit)
    }

    fn agents(&self, request: &PageRequest) -> Result<Paginated<Agent>, ApiError> {
        Self::agents(self, request)
    }

    fn agent(&self, id: u64) -> Result<Agent, ApiError> {
        Self::agent(self, id)
    }

    fn posts(&self, filters: &PostFilters) -> Result<Paginated<Post>, ApiError> {
        Self::posts(self, filters)
    }

    fn post(&self, slug: &str) -> Result<Post, ApiError> {
        Self::post(self, slug)
    }

    fn latest_posts(&self, limit: u32) -> Result<Vec<Post>, ApiError> {
        Self::latest_posts(self, limit)
    }

    fn cities(&self, request: &PageRequest) -> Result<Paginated<City>, ApiError> {
        Self::cities(self, request)
    }

    fn city(&self, id: u64) -> Result<City, ApiError> {
        Self::city(self, id)
    }

    fn districts(&self, city_id: u64) -> Result<Vec<District>, ApiError> {
        Self::districts(self, city_id)
    }

    fn menu(&self, location: MenuLocation) -> Result<Vec<MenuItem>, ApiError> {
        Self::menu(self, location)
    }

    fn settings(&self) -> Result<Settings, ApiError> {
        Self::settings(self)
    }

    fn settings_group(&self, group: &str) -> Result<Settings, ApiError> {
        Self::settings_group(self, group)
    }

    fn setting(&self, key: &str) -> Result<Setting, ApiError> {
        Self::setting(self, key)
    }

    fn submit(&self, submission: &Submission) -> Result<FormReply, ApiError> {
        Self::submit(self, submission)
    }
}
