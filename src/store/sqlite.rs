use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter, types::Value};

use super::Store;
use super::schema::{INDEXES, LINK_MIGRATIONS, SCHEMA};
use crate::auth::ADMIN_USERNAME;
use crate::error::{Error, Result};
use crate::types::*;

const DEFAULT_SITE_TITLE: &str = "Aesthetic Nav";
const DEFAULT_SITE_LOGO: &str =
    "https://www.gstatic.com/images/branding/product/1x/keep_2020q4_48dp.png";

/// Starter catalog inserted the first time the service runs against an
/// empty database: (title, url, icon, category, description, sort_index).
const DEFAULT_LINKS: &[(&str, &str, &str, &str, &str, i64)] = &[
    (
        "Instagram",
        "https://instagram.com",
        "instagram",
        "Social Media",
        "Visual inspiration and photo sharing platform.",
        1,
    ),
    (
        "Twitter (X)",
        "https://twitter.com",
        "twitter",
        "Social Media",
        "Real-time news and public conversation.",
        2,
    ),
    (
        "LinkedIn",
        "https://linkedin.com",
        "linkedin",
        "Social Media",
        "Professional networking and career development.",
        3,
    ),
    (
        "Figma",
        "https://figma.com",
        "figma",
        "Design Tools",
        "Collaborative interface design tool.",
        1,
    ),
    (
        "Dribbble",
        "https://dribbble.com",
        "dribbble",
        "Design Tools",
        "World's leading destination for design inspiration.",
        2,
    ),
    (
        "Behance",
        "https://behance.net",
        "behance",
        "Design Tools",
        "Showcase and discover creative work.",
        3,
    ),
    (
        "The Verge",
        "https://theverge.com",
        "theverge",
        "News & Media",
        "Tech news, reviews, and futuristic features.",
        1,
    ),
    (
        "Medium",
        "https://medium.com",
        "medium",
        "News & Media",
        "A place to read, write, and deepen understanding.",
        2,
    ),
    (
        "YouTube",
        "https://youtube.com",
        "youtube",
        "News & Media",
        "World's most popular video hosting service.",
        3,
    ),
];

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Rebuilds sort_index per category as 1..N in created_at order. Runs once,
/// when the sort_index column is first added to a pre-existing database.
fn backfill_sort_index(conn: &Connection) -> Result<()> {
    let categories: Vec<String> = {
        let mut stmt = conn.prepare("SELECT DISTINCT category FROM links")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()?
    };

    for category in categories {
        let ids: Vec<i64> = {
            let mut stmt = conn.prepare(
                "SELECT id FROM links WHERE category = ?1 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![category], |row| row.get(0))?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        };

        for (idx, id) in ids.iter().enumerate() {
            conn.execute(
                "UPDATE links SET sort_index = ?1 WHERE id = ?2",
                params![idx as i64 + 1, id],
            )?;
        }
    }

    Ok(())
}

const LINK_COLUMNS: &str = "id, title, url, icon, icon_url, description, category, \
                            is_favorite, sort_index, usage_count, created_at";

fn row_to_link(row: &rusqlite::Row<'_>) -> rusqlite::Result<Link> {
    Ok(Link {
        id: row.get(0)?,
        title: row.get(1)?,
        url: row.get(2)?,
        icon: row.get(3)?,
        icon_url: row.get(4)?,
        description: row.get(5)?,
        category: row.get(6)?,
        is_favorite: row.get(7)?,
        sort_index: row.get(8)?,
        usage_count: row.get(9)?,
        created_at: parse_datetime(&row.get::<_, String>(10)?),
    })
}

fn query_link(conn: &Connection, id: i64) -> Result<Option<Link>> {
    conn.query_row(
        &format!("SELECT {LINK_COLUMNS} FROM links WHERE id = ?1"),
        params![id],
        row_to_link,
    )
    .optional()
    .map_err(Error::from)
}

fn next_sort_index(conn: &Connection, category: &str) -> Result<i64> {
    conn.query_row(
        "SELECT COALESCE(MAX(sort_index), 0) + 1 FROM links WHERE category = ?1",
        params![category],
        |row| row.get(0),
    )
    .map_err(Error::from)
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM settings WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .map_err(Error::from)
}

fn put_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

fn parse_list(value: Option<&str>) -> Vec<String> {
    value
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA)?;

        for (column, ddl) in LINK_MIGRATIONS {
            if !has_column(&conn, "links", column)? {
                conn.execute_batch(ddl)?;
                if *column == "sort_index" {
                    backfill_sort_index(&conn)?;
                }
            }
        }

        conn.execute_batch(INDEXES)?;
        Ok(())
    }

    // Link catalog operations

    fn create_link(&self, link: &NewLink) -> Result<Link> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        // Append to the end of the category's order; the MAX lookup and
        // the insert commit together so concurrent creates cannot share a
        // sort_index.
        let sort_index = next_sort_index(&tx, &link.category)?;
        tx.execute(
            "INSERT INTO links (title, url, icon, icon_url, description, category,
                                is_favorite, sort_index, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                link.title,
                link.url,
                link.icon,
                link.icon_url,
                link.description,
                link.category,
                link.is_favorite,
                sort_index,
                format_datetime(&Utc::now()),
            ],
        )?;

        let id = tx.last_insert_rowid();
        let created = query_link(&tx, id)?.ok_or(Error::NotFound)?;
        tx.commit()?;
        Ok(created)
    }

    fn get_link(&self, id: i64) -> Result<Option<Link>> {
        query_link(&self.conn(), id)
    }

    fn list_links(
        &self,
        filter: &LinkFilter,
        hidden: &[String],
        order: &[String],
    ) -> Result<Vec<Link>> {
        let conn = self.conn();

        let mut sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE 1=1");
        let mut values: Vec<Value> = Vec::new();

        if !hidden.is_empty() {
            let placeholders = vec!["?"; hidden.len()].join(",");
            sql.push_str(&format!(" AND category NOT IN ({placeholders})"));
            values.extend(hidden.iter().cloned().map(Value::from));
        }
        if let Some(category) = &filter.category {
            sql.push_str(" AND category = ?");
            values.push(category.clone().into());
        }
        if let Some(favorite) = filter.favorite {
            sql.push_str(" AND is_favorite = ?");
            values.push(favorite.into());
        }

        sql.push_str(" ORDER BY category ASC, sort_index ASC, created_at DESC, id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), row_to_link)?;
        let mut links = rows
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)?;

        // SQL gave us alphabetical category blocks; promote explicitly
        // ordered categories while keeping the rest alphabetical. The sort
        // is stable, so within-category ordering is untouched.
        if !order.is_empty() {
            let rank = |category: &str| {
                order
                    .iter()
                    .position(|o| o.as_str() == category)
                    .unwrap_or(order.len())
            };
            links.sort_by_key(|link| rank(&link.category));
        }

        Ok(links)
    }

    fn update_link(&self, id: i64, patch: &LinkPatch) -> Result<Link> {
        if patch.is_empty() {
            return Err(Error::InvalidArgument("no fields to update".to_string()));
        }

        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let current_category: String = tx
            .query_row(
                "SELECT category FROM links WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(Error::NotFound)?;

        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(title) = &patch.title {
            sets.push("title = ?");
            values.push(title.clone().into());
        }
        if let Some(url) = &patch.url {
            sets.push("url = ?");
            values.push(url.clone().into());
        }
        if let Some(icon) = &patch.icon {
            sets.push("icon = ?");
            values.push(icon.clone().into());
        }
        if let Some(icon_url) = &patch.icon_url {
            sets.push("icon_url = ?");
            values.push(icon_url.clone().into());
        }
        if let Some(description) = &patch.description {
            sets.push("description = ?");
            values.push(description.clone().into());
        }
        if let Some(category) = &patch.category {
            sets.push("category = ?");
            values.push(category.clone().into());

            // Moving to another category always lands at that category's
            // end; the caller cannot pick a position through update.
            if *category != current_category {
                let sort_index = next_sort_index(&tx, category)?;
                sets.push("sort_index = ?");
                values.push(sort_index.into());
            }
        }
        if let Some(is_favorite) = patch.is_favorite {
            sets.push("is_favorite = ?");
            values.push(is_favorite.into());
        }

        values.push(id.into());
        let sql = format!("UPDATE links SET {} WHERE id = ?", sets.join(", "));
        tx.execute(&sql, params_from_iter(values))?;

        let updated = query_link(&tx, id)?.ok_or(Error::NotFound)?;
        tx.commit()?;
        Ok(updated)
    }

    fn reorder_links(&self, items: &[ReorderItem]) -> Result<()> {
        if items.is_empty() {
            return Err(Error::InvalidArgument("no items to reorder".to_string()));
        }

        // Trusted bulk overwrite: positions are applied as given, in one
        // transaction so readers never observe a half-applied batch.
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        for item in items {
            tx.execute(
                "UPDATE links SET category = ?1, sort_index = ?2 WHERE id = ?3",
                params![item.category, item.sort_index, item.id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn track_click(&self, id: i64) -> Result<()> {
        self.conn().execute(
            "UPDATE links SET usage_count = usage_count + 1 WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    fn delete_link(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM links WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn list_categories(&self, order: &[String]) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT DISTINCT category FROM links")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let present = rows
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(Error::from)?;

        let mut ordered: Vec<String> = order
            .iter()
            .filter(|c| present.contains(*c))
            .cloned()
            .collect();
        let mut remaining: Vec<String> = present
            .into_iter()
            .filter(|c| !ordered.contains(c))
            .collect();
        remaining.sort();
        ordered.extend(remaining);
        Ok(ordered)
    }

    // Settings operations

    fn get_settings(&self) -> Result<Settings> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let stored = rows
            .collect::<std::result::Result<HashMap<String, String>, _>>()
            .map_err(Error::from)?;

        Ok(Settings {
            site_title: stored
                .get("site_title")
                .cloned()
                .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string()),
            site_logo: stored
                .get("site_logo")
                .cloned()
                .unwrap_or_else(|| DEFAULT_SITE_LOGO.to_string()),
            hidden_categories: parse_list(stored.get("hidden_categories").map(String::as_str)),
            category_order: parse_list(stored.get("category_order").map(String::as_str)),
        })
    }

    fn put_settings(&self, settings: &Settings) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        put_setting(&tx, "site_title", &settings.site_title)?;
        put_setting(&tx, "site_logo", &settings.site_logo)?;
        put_setting(
            &tx,
            "hidden_categories",
            &serde_json::to_string(&settings.hidden_categories)?,
        )?;
        put_setting(
            &tx,
            "category_order",
            &serde_json::to_string(&settings.category_order)?,
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_category_order(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        Ok(parse_list(
            get_setting(&conn, "category_order")?.as_deref(),
        ))
    }

    fn put_category_order(&self, order: &[String]) -> Result<()> {
        let conn = self.conn();
        put_setting(&conn, "category_order", &serde_json::to_string(order)?)
    }

    // Admin credential operations

    fn get_admin_hash(&self) -> Result<Option<String>> {
        self.conn()
            .query_row(
                "SELECT password_hash FROM admin WHERE username = ?1",
                params![ADMIN_USERNAME],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::from)
    }

    fn set_admin_hash(&self, hash: &str) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE admin SET password_hash = ?1 WHERE username = ?2",
            params![hash, ADMIN_USERNAME],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn ensure_admin(&self, default_hash: &str) -> Result<bool> {
        let conn = self.conn();
        let rows = conn.execute(
            "INSERT OR IGNORE INTO admin (username, password_hash, created_at)
             VALUES (?1, ?2, ?3)",
            params![ADMIN_USERNAME, default_hash, format_datetime(&Utc::now())],
        )?;
        Ok(rows > 0)
    }

    fn seed_default_links(&self) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let count: i64 = tx.query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(false);
        }

        for (title, url, icon, category, description, sort_index) in DEFAULT_LINKS {
            tx.execute(
                "INSERT INTO links (title, url, icon, category, description,
                                    sort_index, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    title,
                    url,
                    icon,
                    category,
                    description,
                    sort_index,
                    format_datetime(&Utc::now()),
                ],
            )?;
        }

        tx.commit()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().expect("create temp dir");
        let store = SqliteStore::new(dir.path().join("test.db")).expect("open store");
        store.initialize().expect("initialize");
        (store, dir)
    }

    fn new_link(title: &str, category: &str) -> NewLink {
        NewLink {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            icon: None,
            icon_url: None,
            description: None,
            category: category.to_string(),
            is_favorite: false,
        }
    }

    #[test]
    fn create_appends_within_category() {
        let (store, _dir) = open_store();

        for n in 1..=4i64 {
            let link = store.create_link(&new_link(&format!("link-{n}"), "Tools")).unwrap();
            assert_eq!(link.sort_index, n);
            assert_eq!(link.usage_count, 0);
        }
    }

    #[test]
    fn sort_index_is_per_category() {
        let (store, _dir) = open_store();

        let a = store.create_link(&new_link("a", "Alpha")).unwrap();
        let b = store.create_link(&new_link("b", "Beta")).unwrap();

        assert_eq!(a.sort_index, 1);
        assert_eq!(b.sort_index, 1);
    }

    #[test]
    fn ids_are_monotonic() {
        let (store, _dir) = open_store();

        let first = store.create_link(&new_link("first", "Tools")).unwrap();
        let second = store.create_link(&new_link("second", "Tools")).unwrap();
        store.delete_link(second.id).unwrap();
        let third = store.create_link(&new_link("third", "Tools")).unwrap();

        assert!(second.id > first.id);
        assert!(third.id > second.id);
    }

    #[test]
    fn update_applies_only_given_fields() {
        let (store, _dir) = open_store();

        let link = store
            .create_link(&NewLink {
                description: Some("original description".to_string()),
                icon: Some("wrench".to_string()),
                ..new_link("tool", "Tools")
            })
            .unwrap();

        let patch = LinkPatch {
            title: Some("renamed".to_string()),
            is_favorite: Some(true),
            ..Default::default()
        };
        let updated = store.update_link(link.id, &patch).unwrap();

        assert_eq!(updated.title, "renamed");
        assert!(updated.is_favorite);
        assert_eq!(updated.description.as_deref(), Some("original description"));
        assert_eq!(updated.icon.as_deref(), Some("wrench"));
        assert_eq!(updated.url, link.url);
        assert_eq!(updated.sort_index, link.sort_index);
    }

    #[test]
    fn update_empty_patch_is_invalid() {
        let (store, _dir) = open_store();
        let link = store.create_link(&new_link("a", "Tools")).unwrap();

        let result = store.update_link(link.id, &LinkPatch::default());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn update_missing_link_is_not_found() {
        let (store, _dir) = open_store();

        let patch = LinkPatch {
            title: Some("x".to_string()),
            ..Default::default()
        };
        assert!(matches!(store.update_link(999, &patch), Err(Error::NotFound)));
    }

    #[test]
    fn category_move_appends_to_destination() {
        let (store, _dir) = open_store();

        store.create_link(&new_link("dst-1", "Destination")).unwrap();
        store.create_link(&new_link("dst-2", "Destination")).unwrap();
        let moved = store.create_link(&new_link("mover", "Source")).unwrap();

        let patch = LinkPatch {
            category: Some("Destination".to_string()),
            ..Default::default()
        };
        let updated = store.update_link(moved.id, &patch).unwrap();

        assert_eq!(updated.category, "Destination");
        assert_eq!(updated.sort_index, 3);
    }

    #[test]
    fn category_move_to_empty_category_starts_at_one() {
        let (store, _dir) = open_store();

        let link = store.create_link(&new_link("a", "Tools")).unwrap();
        store.create_link(&new_link("b", "Tools")).unwrap();

        let patch = LinkPatch {
            category: Some("Fresh".to_string()),
            ..Default::default()
        };
        let updated = store.update_link(link.id, &patch).unwrap();

        assert_eq!(updated.sort_index, 1);
    }

    #[test]
    fn same_category_update_keeps_position() {
        let (store, _dir) = open_store();

        store.create_link(&new_link("a", "Tools")).unwrap();
        let link = store.create_link(&new_link("b", "Tools")).unwrap();

        let patch = LinkPatch {
            category: Some("Tools".to_string()),
            title: Some("b-renamed".to_string()),
            ..Default::default()
        };
        let updated = store.update_link(link.id, &patch).unwrap();

        assert_eq!(updated.sort_index, 2);
    }

    #[test]
    fn reorder_overrides_positions() {
        let (store, _dir) = open_store();

        let first = store.create_link(&new_link("first", "A")).unwrap();
        let second = store.create_link(&new_link("second", "A")).unwrap();

        store
            .reorder_links(&[
                ReorderItem {
                    id: second.id,
                    category: "A".to_string(),
                    sort_index: 1,
                },
                ReorderItem {
                    id: first.id,
                    category: "A".to_string(),
                    sort_index: 2,
                },
            ])
            .unwrap();

        let listed = store
            .list_links(
                &LinkFilter {
                    category: Some("A".to_string()),
                    favorite: None,
                },
                &[],
                &[],
            )
            .unwrap();
        let ids: Vec<i64> = listed.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn reorder_can_move_across_categories() {
        let (store, _dir) = open_store();

        let link = store.create_link(&new_link("mover", "A")).unwrap();
        store
            .reorder_links(&[ReorderItem {
                id: link.id,
                category: "B".to_string(),
                sort_index: 7,
            }])
            .unwrap();

        let moved = store.get_link(link.id).unwrap().unwrap();
        assert_eq!(moved.category, "B");
        assert_eq!(moved.sort_index, 7);
    }

    #[test]
    fn reorder_empty_batch_is_invalid() {
        let (store, _dir) = open_store();

        assert!(matches!(
            store.reorder_links(&[]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn track_click_counts_every_call() {
        let (store, _dir) = open_store();
        let link = store.create_link(&new_link("a", "Tools")).unwrap();

        for _ in 0..3 {
            store.track_click(link.id).unwrap();
        }

        let clicked = store.get_link(link.id).unwrap().unwrap();
        assert_eq!(clicked.usage_count, 3);
    }

    #[test]
    fn track_click_on_missing_id_is_a_noop() {
        let (store, _dir) = open_store();
        let link = store.create_link(&new_link("a", "Tools")).unwrap();

        store.track_click(999).unwrap();

        let untouched = store.get_link(link.id).unwrap().unwrap();
        assert_eq!(untouched.usage_count, 0);
    }

    #[test]
    fn delete_reports_whether_a_row_existed() {
        let (store, _dir) = open_store();
        let link = store.create_link(&new_link("a", "Tools")).unwrap();

        assert!(store.delete_link(link.id).unwrap());
        assert!(!store.delete_link(link.id).unwrap());
    }

    #[test]
    fn list_hides_categories_for_anonymous_readers() {
        let (store, _dir) = open_store();

        store.create_link(&new_link("public", "Open")).unwrap();
        store.create_link(&new_link("secret", "Private")).unwrap();

        let anonymous = store
            .list_links(&LinkFilter::default(), &["Private".to_string()], &[])
            .unwrap();
        assert_eq!(anonymous.len(), 1);
        assert_eq!(anonymous[0].category, "Open");

        let admin = store.list_links(&LinkFilter::default(), &[], &[]).unwrap();
        assert_eq!(admin.len(), 2);
    }

    #[test]
    fn list_orders_categories_by_preference_then_alphabetically() {
        let (store, _dir) = open_store();

        store.create_link(&new_link("a", "Apples")).unwrap();
        store.create_link(&new_link("b", "Bananas")).unwrap();
        store.create_link(&new_link("c", "Cherries")).unwrap();

        let order = vec!["Cherries".to_string(), "Apples".to_string()];
        let links = store
            .list_links(&LinkFilter::default(), &[], &order)
            .unwrap();
        let categories: Vec<&str> = links.iter().map(|l| l.category.as_str()).collect();

        assert_eq!(categories, vec!["Cherries", "Apples", "Bananas"]);
    }

    #[test]
    fn list_filters_by_favorite() {
        let (store, _dir) = open_store();

        store.create_link(&new_link("plain", "Tools")).unwrap();
        store
            .create_link(&NewLink {
                is_favorite: true,
                ..new_link("starred", "Tools")
            })
            .unwrap();

        let favorites = store
            .list_links(
                &LinkFilter {
                    category: None,
                    favorite: Some(true),
                },
                &[],
                &[],
            )
            .unwrap();

        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].title, "starred");
    }

    #[test]
    fn categories_follow_explicit_order_with_alphabetical_tail() {
        let (store, _dir) = open_store();

        store.create_link(&new_link("a", "A")).unwrap();
        store.create_link(&new_link("b", "B")).unwrap();
        store.create_link(&new_link("c", "C")).unwrap();

        let order = vec!["B".to_string(), "A".to_string()];
        let categories = store.list_categories(&order).unwrap();

        assert_eq!(categories, vec!["B", "A", "C"]);
    }

    #[test]
    fn orphaned_order_entries_are_skipped() {
        let (store, _dir) = open_store();

        store.create_link(&new_link("a", "A")).unwrap();

        let order = vec!["Ghost".to_string(), "A".to_string()];
        let categories = store.list_categories(&order).unwrap();

        assert_eq!(categories, vec!["A"]);
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let (store, _dir) = open_store();

        let settings = store.get_settings().unwrap();
        assert_eq!(settings.site_title, DEFAULT_SITE_TITLE);
        assert_eq!(settings.site_logo, DEFAULT_SITE_LOGO);
        assert!(settings.hidden_categories.is_empty());
        assert!(settings.category_order.is_empty());
    }

    #[test]
    fn settings_roundtrip() {
        let (store, _dir) = open_store();

        let settings = Settings {
            site_title: "My Deck".to_string(),
            site_logo: "https://example.com/logo.png".to_string(),
            hidden_categories: vec!["Private".to_string()],
            category_order: vec!["B".to_string(), "A".to_string()],
        };
        store.put_settings(&settings).unwrap();

        let stored = store.get_settings().unwrap();
        assert_eq!(stored.site_title, "My Deck");
        assert_eq!(stored.hidden_categories, vec!["Private"]);
        assert_eq!(stored.category_order, vec!["B", "A"]);
    }

    #[test]
    fn category_order_accessors_share_the_settings_value() {
        let (store, _dir) = open_store();

        let order = vec!["X".to_string(), "Y".to_string()];
        store.put_category_order(&order).unwrap();

        assert_eq!(store.get_category_order().unwrap(), order);
        assert_eq!(store.get_settings().unwrap().category_order, order);
    }

    #[test]
    fn admin_row_is_created_once() {
        let (store, _dir) = open_store();

        assert!(store.ensure_admin("hash-1").unwrap());
        assert!(!store.ensure_admin("hash-2").unwrap());
        assert_eq!(store.get_admin_hash().unwrap().as_deref(), Some("hash-1"));

        store.set_admin_hash("hash-3").unwrap();
        assert_eq!(store.get_admin_hash().unwrap().as_deref(), Some("hash-3"));
    }

    #[test]
    fn set_admin_hash_without_row_is_not_found() {
        let (store, _dir) = open_store();

        assert!(matches!(store.set_admin_hash("h"), Err(Error::NotFound)));
    }

    #[test]
    fn seeds_default_links_only_when_empty() {
        let (store, _dir) = open_store();

        assert!(store.seed_default_links().unwrap());
        assert!(!store.seed_default_links().unwrap());

        let links = store.list_links(&LinkFilter::default(), &[], &[]).unwrap();
        assert_eq!(links.len(), DEFAULT_LINKS.len());
    }

    #[test]
    fn migrates_a_pre_sort_index_database() {
        let dir = TempDir::new().expect("create temp dir");
        let db_path = dir.path().join("old.db");

        // Database layout from before description/icon_url/sort_index
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute_batch(
                "CREATE TABLE links (
                     id INTEGER PRIMARY KEY AUTOINCREMENT,
                     title TEXT NOT NULL,
                     url TEXT NOT NULL,
                     icon TEXT,
                     category TEXT NOT NULL DEFAULT 'Uncategorized',
                     is_favorite INTEGER NOT NULL DEFAULT 0,
                     usage_count INTEGER NOT NULL DEFAULT 0,
                     created_at TEXT DEFAULT (datetime('now'))
                 );",
            )
            .unwrap();
            conn.execute_batch(
                "INSERT INTO links (title, url, category, created_at)
                 VALUES ('oldest', 'https://a.example', 'Tools', '2023-01-01 10:00:00'),
                        ('middle', 'https://b.example', 'Tools', '2023-01-02 10:00:00'),
                        ('newest', 'https://c.example', 'Tools', '2023-01-03 10:00:00'),
                        ('other',  'https://d.example', 'Media', '2023-01-01 10:00:00');",
            )
            .unwrap();
        }

        let store = SqliteStore::new(&db_path).unwrap();
        store.initialize().unwrap();

        let links = store
            .list_links(
                &LinkFilter {
                    category: Some("Tools".to_string()),
                    favorite: None,
                },
                &[],
                &[],
            )
            .unwrap();
        let positions: Vec<(String, i64)> = links
            .iter()
            .map(|l| (l.title.clone(), l.sort_index))
            .collect();

        assert_eq!(
            positions,
            vec![
                ("oldest".to_string(), 1),
                ("middle".to_string(), 2),
                ("newest".to_string(), 3),
            ]
        );

        let other = store
            .list_links(
                &LinkFilter {
                    category: Some("Media".to_string()),
                    favorite: None,
                },
                &[],
                &[],
            )
            .unwrap();
        assert_eq!(other[0].sort_index, 1);
    }
}
