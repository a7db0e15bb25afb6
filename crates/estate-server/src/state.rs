//! Application state.

use estate_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page renderer backed by the content API.
    pub(crate) site: Site,
    /// Log page warnings.
    pub(crate) verbose: bool,
    /// Application version for `ETag`s.
    pub(crate) version: String,
}
