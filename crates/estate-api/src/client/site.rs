//! Locations, menus and settings.

use super::ApiClient;
use crate::error::ApiError;
use crate::query::{PageRequest, QueryPairs, encode_component};
use crate::types::{City, District, MenuItem, MenuLocation, Paginated, Setting, Settings};

impl ApiClient {
    /// List cities.
    pub fn cities(&self, request: &PageRequest) -> Result<Paginated<City>, ApiError> {
        self.get("/cities", &request.to_query())
    }

    /// Get one city.
    pub fn city(&self, id: u64) -> Result<City, ApiError> {
        self.get_data(&format!("/cities/{id}"), &QueryPairs::new())
    }

    /// Districts of a city.
    pub fn districts(&self, city_id: u64) -> Result<Vec<District>, ApiError> {
        self.get_data(&format!("/cities/{city_id}/districts"), &QueryPairs::new())
    }

    /// Menu items for a location.
    pub fn menu(&self, location: MenuLocation) -> Result<Vec<MenuItem>, ApiError> {
        self.get_data(location.path(), &QueryPairs::new())
    }

    /// All settings as a key/value map.
    pub fn settings(&self) -> Result<Settings, ApiError> {
        self.get_data("/settings", &QueryPairs::new())
    }

    /// Settings of one group as a key/value map.
    pub fn settings_group(&self, group: &str) -> Result<Settings, ApiError> {
        self.get_data(
            &format!("/settings/group/{}", encode_component(group)),
            &QueryPairs::new(),
        )
    }

    /// One setting by key.
    pub fn setting(&self, key: &str) -> Result<Setting, ApiError> {
        self.get_data(
            &format!("/settings/{}", encode_component(key)),
            &QueryPairs::new(),
        )
    }
}
