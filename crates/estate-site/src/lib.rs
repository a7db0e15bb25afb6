//! Page views for the real-estate site.
//!
//! This crate turns content API data into complete HTML documents:
//! - [`Site`]: one method per route, backed by a [`ContentSource`](estate_api::ContentSource)
//! - [`Template`]: CMS page templates
//! - formatting helpers for prices, areas, dates and descriptions
//! - [`Pagination`] for listing pages
//!
//! CMS pages go through the shortcode pipeline of `estate-shortcode`;
//! shortcode warnings are reported on [`RenderedPage`]. Blog post bodies are
//! emitted as stored.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use estate_api::ApiClient;
//! use estate_site::{Site, SiteConfig};
//!
//! let client = Arc::new(ApiClient::new("http://localhost:8192/api"));
//! let site = Site::new(client, SiteConfig::default());
//!
//! let page = site.page("about-us")?;
//! for warning in &page.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok::<(), estate_site::SiteError>(())
//! ```

mod error;
pub mod format;
mod images;
mod pagination;
mod site;
mod views;

pub use error::SiteError;
pub use images::{gallery, primary_image};
pub use pagination::{Pagination, page_href, page_window};
pub use site::{RenderedPage, Site, SiteConfig};
pub use views::forms::validate;
pub use views::page::Template;
