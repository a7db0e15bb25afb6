//! Agents, posts, locations, menus and settings.

use serde::{Deserialize, Serialize};

/// Real-estate agent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Agent {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub properties_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Agent {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: String::new(),
            phone: None,
            mobile: None,
            avatar: None,
            bio: None,
            position: None,
            facebook: None,
            twitter: None,
            linkedin: None,
            instagram: None,
            properties_count: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Social profile links that are set, as `(network, url)`.
    pub fn social_links(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Facebook", self.facebook.as_deref()),
            ("Twitter", self.twitter.as_deref()),
            ("LinkedIn", self.linkedin.as_deref()),
            ("Instagram", self.instagram.as_deref()),
        ]
        .into_iter()
        .filter_map(|(network, url)| url.filter(|u| !u.is_empty()).map(|u| (network, u)))
    }
}

/// Blog post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Post {
    #[serde(default)]
    pub id: u64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Post {
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            slug: slug.into(),
            title: title.into(),
            excerpt: None,
            content: String::new(),
            featured_image: None,
            author: None,
            category: None,
            tags: Vec::new(),
            meta_title: None,
            meta_description: None,
            published_at: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// City.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct City {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub properties_count: Option<u64>,
}

impl City {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: None,
            country: None,
            state: None,
            latitude: None,
            longitude: None,
            properties_count: None,
        }
    }
}

/// District within a city.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct District {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub city_id: u64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub properties_count: Option<u64>,
}

/// Navigation menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MenuItem {
    #[serde(default)]
    pub id: u64,
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub open_in_new_tab: bool,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    #[must_use]
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: 0,
            label: label.into(),
            url: url.into(),
            icon: None,
            sort_order: 0,
            open_in_new_tab: false,
            parent_id: None,
            children: Vec::new(),
        }
    }
}

/// Menu location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuLocation {
    /// Every menu item.
    All,
    Header,
    Footer,
}

impl MenuLocation {
    /// API path for this location.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::All => "/menu",
            Self::Header => "/menu/header",
            Self::Footer => "/menu/footer",
        }
    }
}

/// Site setting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Setting {
    #[serde(default)]
    pub id: u64,
    pub key: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub value: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Settings as a key/value map.
pub type Settings = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_social_links_skip_empty() {
        let mut agent = Agent::new(1, "Ana");
        agent.facebook = Some("https://fb.com/ana".to_owned());
        agent.twitter = Some(String::new());
        agent.instagram = Some("https://instagram.com/ana".to_owned());

        let links: Vec<_> = agent.social_links().collect();
        assert_eq!(
            links,
            vec![
                ("Facebook", "https://fb.com/ana"),
                ("Instagram", "https://instagram.com/ana")
            ]
        );
    }

    #[test]
    fn test_menu_nested_children() {
        let json = r#"[{"label": "Buy", "url": "/properties?type=sale", "children": [
            {"label": "Villas", "url": "/properties?property_type=villa", "open_in_new_tab": true}
        ]}]"#;
        let items: Vec<MenuItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].children.len(), 1);
        assert!(items[0].children[0].open_in_new_tab);
    }
}
