pub const SCHEMA: &str = r#"
-- Bookmarked links. Categories are not first-class rows; they are the
-- distinct category strings present here, plus ordering/visibility
-- preferences in the settings table.
CREATE TABLE IF NOT EXISTS links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    url TEXT NOT NULL,
    icon TEXT,
    category TEXT NOT NULL DEFAULT 'Uncategorized',
    is_favorite INTEGER NOT NULL DEFAULT 0,
    usage_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Exactly one row: the fixed admin identity
CREATE TABLE IF NOT EXISTS admin (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,          -- argon2id hash with embedded salt
    created_at TEXT DEFAULT (datetime('now'))
);

-- Branding and category preferences; list values are JSON arrays
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Columns added after the initial schema shipped. Applied with ALTER
/// TABLE when missing, so pre-existing databases pick them up with safe
/// defaults.
pub const LINK_MIGRATIONS: &[(&str, &str)] = &[
    ("description", "ALTER TABLE links ADD COLUMN description TEXT"),
    ("icon_url", "ALTER TABLE links ADD COLUMN icon_url TEXT"),
    (
        "sort_index",
        "ALTER TABLE links ADD COLUMN sort_index INTEGER NOT NULL DEFAULT 0",
    ),
];

pub const INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_links_category_sort ON links(category, sort_index);
"#;
