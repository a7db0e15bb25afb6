//! Response envelopes.

use serde::{Deserialize, Serialize};

/// `{ "data": ..., "message": ... }` envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Pagination links returned with a page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationLinks {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageMeta {
    pub current_page: u32,
    pub from: Option<u64>,
    pub last_page: u32,
    pub path: String,
    pub per_page: u32,
    pub to: Option<u64>,
    pub total: u64,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            from: None,
            last_page: 1,
            path: String::new(),
            per_page: 0,
            to: None,
            total: 0,
        }
    }
}

/// One page of a paginated collection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub links: Option<PaginationLinks>,
    #[serde(default)]
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Slice `items` into the requested page (1-based, clamped to at least 1).
    #[must_use]
    pub fn from_items(items: Vec<T>, page: u32, per_page: u32) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total = items.len() as u64;
        let last_page = u32::try_from(total.div_ceil(u64::from(per_page)))
            .unwrap_or(u32::MAX)
            .max(1);

        let skip = (page as usize - 1).saturating_mul(per_page as usize);
        let data: Vec<T> = items.into_iter().skip(skip).take(per_page as usize).collect();
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            (Some(skip as u64 + 1), Some((skip + data.len()) as u64))
        };

        Self {
            data,
            links: None,
            meta: PageMeta {
                current_page: page,
                from,
                last_page,
                path: String::new(),
                per_page,
                to,
                total,
            },
        }
    }

    /// An empty first page.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            links: None,
            meta: PageMeta::default(),
        }
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_deserialize_with_meta() {
        let json = r#"{
            "data": [1, 2],
            "links": {"first": "/p?page=1", "next": null},
            "meta": {"current_page": 2, "last_page": 5, "per_page": 2, "total": 10, "from": 3, "to": 4, "path": "/p"}
        }"#;
        let page: Paginated<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.meta.current_page, 2);
        assert_eq!(page.meta.last_page, 5);
        assert_eq!(page.meta.total, 10);
    }

    #[test]
    fn test_deserialize_without_meta() {
        let page: Paginated<u32> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.last_page, 1);
    }

    #[test]
    fn test_from_items() {
        let page = Paginated::from_items((1..=25).collect::<Vec<u32>>(), 3, 10);
        assert_eq!(page.data, (21..=25).collect::<Vec<u32>>());
        assert_eq!(page.meta.last_page, 3);
        assert_eq!(page.meta.total, 25);
        assert_eq!(page.meta.from, Some(21));
        assert_eq!(page.meta.to, Some(25));
    }

    #[test]
    fn test_from_items_past_end() {
        let page = Paginated::from_items(vec![1, 2, 3], 9, 2);
        assert!(page.data.is_empty());
        assert_eq!(page.meta.last_page, 2);
        assert_eq!(page.meta.from, None);
    }
}
