//! Typed client for the real-estate content API.
//!
//! The API serves pages, property listings, agents, blog posts, locations,
//! menus and settings as JSON, and accepts contact and inquiry forms.
//!
//! - [`ApiClient`]: blocking HTTP client (base URL passed at construction)
//! - [`ContentSource`]: trait the site layer reads through
//! - [`MockSource`]: in-memory source for tests (feature `mock`)
//!
//! # Example
//!
//! ```no_run
//! use estate_api::{ApiClient, PropertyFilters};
//!
//! let client = ApiClient::new("http://localhost:8192/api");
//! let filters = PropertyFilters::from_pairs([("type", "sale")]).with_page_defaults(12);
//! let listing = client.properties(&filters)?;
//! println!("{} properties", listing.meta.total);
//! # Ok::<(), estate_api::ApiError>(())
//! ```

mod client;
mod error;
#[cfg(feature = "mock")]
mod mock;
mod query;
mod source;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use query::{
    DEFAULT_PER_PAGE, PageRequest, PostFilters, PropertyFilters, PropertySearch, QueryPairs,
    encode_component, encode_query,
};
pub use source::ContentSource;
pub use types::*;
