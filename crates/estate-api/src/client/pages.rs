//! Page and blog endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::query::{PostFilters, QueryPairs, encode_component};
use crate::types::{Page, Paginated, Post};

impl ApiClient {
    /// Get a CMS page by slug.
    pub fn page(&self, slug: &str) -> Result<Page, ApiError> {
        self.get_data(
            &format!("/pages/{}", encode_component(slug)),
            &QueryPairs::new(),
        )
    }

    /// Get a CMS page by numeric id.
    pub fn page_by_id(&self, id: u64) -> Result<Page, ApiError> {
        self.get_data(&format!("/pages/{id}"), &QueryPairs::new())
    }

    /// List blog posts.
    pub fn posts(&self, filters: &PostFilters) -> Result<Paginated<Post>, ApiError> {
        self.get("/posts", &filters.to_query())
    }

    /// Get a blog post by slug.
    pub fn post(&self, slug: &str) -> Result<Post, ApiError> {
        self.get_data(
            &format!("/posts/{}", encode_component(slug)),
            &QueryPairs::new(),
        )
    }

    /// Most recent posts, at most `limit`.
    pub fn latest_posts(&self, limit: u32) -> Result<Vec<Post>, ApiError> {
        self.get_data("/posts/latest", &vec![("limit", limit.to_string())])
    }
}
