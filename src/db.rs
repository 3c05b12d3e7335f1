// ==========================================
// Bakery Cost Calculator - SQLite connection setup
// ==========================================
// Goals:
// - every Connection::open gets the same PRAGMAs (foreign keys on)
// - one busy_timeout for all connections
// - tables are created idempotently, settings row seeded once
// ==========================================

use crate::domain::settings::CostSettings;
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version written by `init_schema`
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS materials (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL CHECK (category IN ('flour', 'dairy', 'sugar', 'fat', 'other')),
    unit TEXT NOT NULL CHECK (unit IN ('gram', 'milliliter', 'piece')),
    unit_price REAL NOT NULL,
    package_size REAL NOT NULL CHECK (package_size > 0),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS recipes (
    id TEXT PRIMARY KEY,
    product_name TEXT NOT NULL,
    yield INTEGER NOT NULL CHECK (yield > 0),
    labor_time INTEGER NOT NULL CHECK (labor_time >= 0),
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS recipe_materials (
    recipe_id TEXT NOT NULL,
    material_id TEXT NOT NULL,
    line_no INTEGER NOT NULL,
    quantity REAL NOT NULL CHECK (quantity >= 0),
    PRIMARY KEY (recipe_id, material_id),
    FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
    FOREIGN KEY (material_id) REFERENCES materials(id) ON DELETE RESTRICT
);

CREATE INDEX IF NOT EXISTS idx_recipe_materials_material ON recipe_materials(material_id);

CREATE TABLE IF NOT EXISTS cost_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    labor_cost_per_hour REAL NOT NULL,
    overhead_cost_per_unit REAL NOT NULL,
    target_profit_margin REAL NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Apply the shared PRAGMAs to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the shared PRAGMAs applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create all tables (idempotent) and seed the settings singleton.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    let defaults = CostSettings::default();
    let seeded = conn.execute(
        r#"
        INSERT OR IGNORE INTO cost_settings (
            id, labor_cost_per_hour, overhead_cost_per_unit, target_profit_margin, updated_at
        ) VALUES (1, ?1, ?2, ?3, ?4)
        "#,
        params![
            defaults.labor_cost_per_hour,
            defaults.overhead_cost_per_unit,
            defaults.target_profit_margin,
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    if seeded > 0 {
        tracing::info!("cost settings initialized with defaults");
    }

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        params![CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Open a connection and make sure the schema exists.
pub fn open_and_init(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = open_sqlite_connection(db_path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Read schema_version (None if the table does not exist).
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
