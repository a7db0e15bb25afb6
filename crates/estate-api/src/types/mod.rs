//! Content API data model.

mod content;
mod forms;
mod page;
mod property;
mod response;

use serde::{Deserialize, Deserializer};

pub use content::{Agent, City, District, MenuItem, MenuLocation, Post, Setting, Settings};
pub(crate) use forms::FormReplyBody;
pub use forms::{
    ContactForm, FormKind, FormReply, GeneralInquiry, Mandate, PropertyInquiry, Submission,
};
pub use page::{Page, PageShortcode};
pub use property::{CityRef, ImageRef, Numeric, Property, PropertyFeature, PropertyImage, Seo};
pub use response::{ApiResponse, PageMeta, Paginated, PaginationLinks};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
