//! Listing pagination.

use std::fmt::Write;

use estate_api::{PageMeta, encode_query};
use estate_shortcode::escape_html;

/// Most page numbers shown at once.
const WINDOW: u32 = 5;

/// Pagination state for one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub last: u32,
    /// Page numbers to link, ascending.
    pub pages: Vec<u32>,
}

impl Pagination {
    /// Pagination for the current and last page reported by the API.
    #[must_use]
    pub fn new(current: u32, last: u32) -> Self {
        let last = last.max(1);
        let current = current.clamp(1, last);
        Self {
            current,
            last,
            pages: page_window(current, last),
        }
    }

    /// Pagination from API metadata.
    #[must_use]
    pub fn from_meta(meta: &PageMeta) -> Self {
        Self::new(meta.current_page, meta.last_page)
    }

    /// Previous page, if any.
    #[must_use]
    pub fn prev(&self) -> Option<u32> {
        (self.current > 1).then(|| self.current - 1)
    }

    /// Next page, if any.
    #[must_use]
    pub fn next(&self) -> Option<u32> {
        (self.current < self.last).then(|| self.current + 1)
    }

    /// Render the pagination bar. Empty when there is a single page.
    ///
    /// Links point at `path` and keep every query parameter except `page`.
    pub fn render(&self, path: &str, params: &[(String, String)], out: &mut String) {
        if self.last <= 1 {
            return;
        }

        out.push_str(r#"<nav class="pagination" aria-label="Pagination">"#);
        if let Some(prev) = self.prev() {
            write!(
                out,
                r#"<a class="page-prev" rel="prev" href="{}">Previous</a>"#,
                escape_html(&page_href(path, params, prev))
            )
            .unwrap();
        }
        for &page in &self.pages {
            if page == self.current {
                write!(out, r#"<span class="page-current" aria-current="page">{page}</span>"#)
                    .unwrap();
            } else {
                write!(
                    out,
                    r#"<a class="page-link" href="{}">{page}</a>"#,
                    escape_html(&page_href(path, params, page))
                )
                .unwrap();
            }
        }
        if let Some(next) = self.next() {
            write!(
                out,
                r#"<a class="page-next" rel="next" href="{}">Next</a>"#,
                escape_html(&page_href(path, params, next))
            )
            .unwrap();
        }
        out.push_str("</nav>");
    }
}

/// Up to five page numbers centred on `current`, pinned at either end.
///
/// # Example
///
/// ```
/// use estate_site::page_window;
///
/// assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
/// assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
/// assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
/// ```
#[must_use]
pub fn page_window(current: u32, last: u32) -> Vec<u32> {
    if last <= WINDOW {
        return (1..=last).collect();
    }
    let start = current
        .saturating_sub(WINDOW / 2)
        .max(1)
        .min(last - WINDOW + 1);
    (start..start + WINDOW).collect()
}

/// Link to `page` of a listing, preserving the other query parameters.
#[must_use]
pub fn page_href(path: &str, params: &[(String, String)], page: u32) -> String {
    let mut pairs: Vec<(&str, String)> = params
        .iter()
        .filter(|(key, value)| key != "page" && !value.is_empty())
        .map(|(key, value)| (key.as_str(), value.clone()))
        .collect();
    pairs.push(("page", page.to_string()));
    format!("{path}?{}", encode_query(&pairs))
}
