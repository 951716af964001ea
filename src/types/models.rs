use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored bookmark. `sort_index` is unique within a category and defines
/// the manual display order there; it is never globally unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub is_favorite: bool,
    pub sort_index: i64,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new link. The store assigns id, created_at, usage_count,
/// and the append-to-end sort_index.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub icon_url: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub is_favorite: bool,
}

/// A partial update. `None` means "leave the field untouched", never
/// "clear it". A patch with nothing set is rejected by the store.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub icon_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_favorite: Option<bool>,
}

impl LinkPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.icon.is_none()
            && self.icon_url.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.is_favorite.is_none()
    }
}

/// One entry of a bulk reorder batch. Positions are taken as given; the
/// caller is trusted to submit a consistent ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderItem {
    pub id: i64,
    pub category: String,
    pub sort_index: i64,
}

/// Read-side filters for listing links.
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    pub category: Option<String>,
    pub favorite: Option<bool>,
}

/// Site branding and category display preferences. Replaced wholesale on
/// update; reads fall back to defaults for any missing key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub site_title: String,
    pub site_logo: String,
    pub hidden_categories: Vec<String>,
    #[serde(default)]
    pub category_order: Vec<String>,
}
