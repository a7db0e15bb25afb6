//! Property and agent endpoints.

use tracing::info;

use super::ApiClient;
use crate::error::ApiError;
use crate::query::{PageRequest, PropertyFilters, PropertySearch, QueryPairs};
use crate::types::{Agent, Paginated, Property};

impl ApiClient {
    /// List properties matching `filters`.
    pub fn properties(&self, filters: &PropertyFilters) -> Result<Paginated<Property>, ApiError> {
        let result: Paginated<Property> = self.get("/properties", &filters.to_query())?;
        info!(
            count = result.data.len(),
            total = result.meta.total,
            "Fetched properties"
        );
        Ok(result)
    }

    /// Get one property.
    pub fn property(&self, id: u64) -> Result<Property, ApiError> {
        self.get_data(&format!("/properties/{id}"), &QueryPairs::new())
    }

    /// Featured properties, at most `limit`.
    pub fn featured_properties(&self, limit: u32) -> Result<Vec<Property>, ApiError> {
        self.get_data("/properties/featured", &vec![("limit", limit.to_string())])
    }

    /// Free-text property search.
    pub fn search_properties(
        &self,
        search: &PropertySearch,
    ) -> Result<Paginated<Property>, ApiError> {
        self.get("/properties/search", &search.to_query())
    }

    /// Properties similar to property `id`, at most `limit`.
    pub fn similar_properties(&self, id: u64, limit: u32) -> Result<Vec<Property>, ApiError> {
        self.get_data(
            &format!("/properties/{id}/similar"),
            &vec![("limit", limit.to_string())],
        )
    }

    /// List agents.
    pub fn agents(&self, request: &PageRequest) -> Result<Paginated<Agent>, ApiError> {
        self.get("/agents", &request.to_query())
    }

    /// Get one agent.
    pub fn agent(&self, id: u64) -> Result<Agent, ApiError> {
        self.get_data(&format!("/agents/{id}"), &QueryPairs::new())
    }
}
