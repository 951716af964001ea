mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    /// Creates tables and applies additive migrations. Safe to call on
    /// every startup.
    fn initialize(&self) -> Result<()>;

    // Link catalog operations
    fn create_link(&self, link: &NewLink) -> Result<Link>;
    fn get_link(&self, id: i64) -> Result<Option<Link>>;
    /// Links matching `filter`, excluding `hidden` categories (pass an
    /// empty slice for an authenticated caller). Ordered by the category's
    /// position in `order` (unlisted categories follow alphabetically),
    /// then sort_index ascending, then created_at descending.
    fn list_links(&self, filter: &LinkFilter, hidden: &[String], order: &[String])
    -> Result<Vec<Link>>;
    fn update_link(&self, id: i64, patch: &LinkPatch) -> Result<Link>;
    fn reorder_links(&self, items: &[ReorderItem]) -> Result<()>;
    /// Best-effort click telemetry: increments usage_count, silently does
    /// nothing for an unknown id.
    fn track_click(&self, id: i64) -> Result<()>;
    fn delete_link(&self, id: i64) -> Result<bool>;
    /// Distinct categories, those named in `order` first in that relative
    /// order, the rest alphabetically.
    fn list_categories(&self, order: &[String]) -> Result<Vec<String>>;

    // Settings operations
    fn get_settings(&self) -> Result<Settings>;
    fn put_settings(&self, settings: &Settings) -> Result<()>;
    fn get_category_order(&self) -> Result<Vec<String>>;
    fn put_category_order(&self, order: &[String]) -> Result<()>;

    // Admin credential operations
    fn get_admin_hash(&self) -> Result<Option<String>>;
    fn set_admin_hash(&self, hash: &str) -> Result<()>;
    /// Creates the admin row with the given hash if it does not exist.
    /// Returns true when the row was created.
    fn ensure_admin(&self, default_hash: &str) -> Result<bool>;

    /// Seeds the starter link set when the catalog is empty. Returns true
    /// when links were inserted.
    fn seed_default_links(&self) -> Result<bool>;
}
