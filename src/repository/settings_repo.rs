// ==========================================
// Bakery Cost Calculator - cost settings repository
// ==========================================
// cost_settings holds exactly one row (id = 1)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::settings::CostSettings;
use crate::engine::repositories::SettingsStore;
use crate::repository::error::{parse_timestamp, RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct CostSettingsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CostSettingsRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Current settings and the time they were last written.
    ///
    /// Re-seeds the defaults if the row has gone missing.
    pub fn get_with_timestamp(&self) -> RepositoryResult<(CostSettings, DateTime<Utc>)> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT labor_cost_per_hour, overhead_cost_per_unit, target_profit_margin, updated_at
                FROM cost_settings
                WHERE id = 1
                "#,
                [],
                |row| {
                    let settings = CostSettings {
                        labor_cost_per_hour: row.get(0)?,
                        overhead_cost_per_unit: row.get(1)?,
                        target_profit_margin: row.get(2)?,
                    };
                    let updated_at = parse_timestamp(3, &row.get::<_, String>(3)?)?;
                    Ok((settings, updated_at))
                },
            )
            .optional()?;

        match row {
            Some(found) => Ok(found),
            None => {
                tracing::warn!("cost_settings row missing, restoring defaults");
                let defaults = CostSettings::default();
                let now = Utc::now();
                upsert(&conn, &defaults, now)?;
                Ok((defaults, now))
            }
        }
    }

    pub fn get(&self) -> RepositoryResult<CostSettings> {
        Ok(self.get_with_timestamp()?.0)
    }

    /// Overwrite the singleton. No validation happens here.
    pub fn update(&self, settings: &CostSettings) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        upsert(&conn, settings, Utc::now())?;
        Ok(())
    }
}

impl SettingsStore for CostSettingsRepository {
    fn current(&self) -> RepositoryResult<CostSettings> {
        self.get()
    }

    fn save(&self, settings: &CostSettings) -> RepositoryResult<()> {
        self.update(settings)
    }
}

fn upsert(conn: &Connection, settings: &CostSettings, updated_at: DateTime<Utc>) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO cost_settings (
            id, labor_cost_per_hour, overhead_cost_per_unit, target_profit_margin, updated_at
        ) VALUES (1, ?1, ?2, ?3, ?4)
        ON CONFLICT(id) DO UPDATE SET
            labor_cost_per_hour = excluded.labor_cost_per_hour,
            overhead_cost_per_unit = excluded.overhead_cost_per_unit,
            target_profit_margin = excluded.target_profit_margin,
            updated_at = excluded.updated_at
        "#,
        params![
            settings.labor_cost_per_hour,
            settings.overhead_cost_per_unit,
            settings.target_profit_margin,
            updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}
