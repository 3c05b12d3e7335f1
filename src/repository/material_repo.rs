// ==========================================
// Bakery Cost Calculator - material repository
// ==========================================
// Data access only, no business rules.
// All queries are parameterized.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::material::Material;
use crate::domain::types::{MaterialCategory, MaterialUnit};
use crate::engine::repositories::MaterialResolver;
use crate::repository::error::{
    invalid_text_column, parse_timestamp, RepositoryError, RepositoryResult,
};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

const MATERIAL_COLUMNS: &str =
    "id, name, category, unit, unit_price, package_size, created_at, updated_at";

// ==========================================
// MaterialRepository
// ==========================================
/// CRUD over the materials table
pub struct MaterialRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MaterialRepository {
    /// Open a dedicated connection to `db_path`.
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(&self, material: &Material) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO materials (
                id, name, category, unit, unit_price, package_size, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                material.id,
                material.name,
                material.category.to_db_str(),
                material.unit.to_db_str(),
                material.unit_price,
                material.package_size,
                material.created_at.to_rfc3339(),
                material.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Update every editable column of an existing material.
    ///
    /// # Errors
    /// - NotFound: no row with `material.id`
    pub fn update(&self, material: &Material) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE materials
            SET name = ?1, category = ?2, unit = ?3, unit_price = ?4, package_size = ?5, updated_at = ?6
            WHERE id = ?7
            "#,
            params![
                material.name,
                material.category.to_db_str(),
                material.unit.to_db_str(),
                material.unit_price,
                material.package_size,
                material.updated_at.to_rfc3339(),
                material.id,
            ],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Material", &material.id));
        }
        Ok(())
    }

    pub fn find_by_id(&self, material_id: &str) -> RepositoryResult<Option<Material>> {
        let conn = self.get_conn()?;
        Ok(find_in(&conn, material_id)?)
    }

    /// All materials ordered by category, then name.
    pub fn list_all(&self) -> RepositoryResult<Vec<Material>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM materials ORDER BY category ASC, name ASC",
            MATERIAL_COLUMNS
        ))?;
        let materials = stmt
            .query_map([], map_material_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(materials)
    }

    /// Number of recipe lines that reference `material_id`.
    pub fn count_recipe_references(&self, material_id: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM recipe_materials WHERE material_id = ?1",
            params![material_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Delete a material.
    ///
    /// The foreign key on recipe_materials refuses the delete while a
    /// recipe still references the material (ForeignKeyViolation).
    pub fn delete(&self, material_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM materials WHERE id = ?1", params![material_id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Material", material_id));
        }
        Ok(())
    }
}

impl MaterialResolver for MaterialRepository {
    fn resolve(&self, ids: &BTreeSet<String>) -> RepositoryResult<HashMap<String, Material>> {
        let conn = self.get_conn()?;
        let mut resolved = HashMap::with_capacity(ids.len());
        for id in ids {
            let material = find_in(&conn, id)?.ok_or_else(|| RepositoryError::not_found("Material", id))?;
            resolved.insert(id.clone(), material);
        }
        Ok(resolved)
    }
}

fn find_in(conn: &Connection, material_id: &str) -> SqliteResult<Option<Material>> {
    conn.query_row(
        &format!("SELECT {} FROM materials WHERE id = ?1", MATERIAL_COLUMNS),
        params![material_id],
        map_material_row,
    )
    .optional()
}

fn map_material_row(row: &Row<'_>) -> SqliteResult<Material> {
    let category_raw: String = row.get(2)?;
    let category = MaterialCategory::from_db_str(&category_raw)
        .ok_or_else(|| invalid_text_column(2, format!("unknown category '{}'", category_raw)))?;
    let unit_raw: String = row.get(3)?;
    let unit = MaterialUnit::from_db_str(&unit_raw)
        .ok_or_else(|| invalid_text_column(3, format!("unknown unit '{}'", unit_raw)))?;

    Ok(Material {
        id: row.get(0)?,
        name: row.get(1)?,
        category,
        unit,
        unit_price: row.get(4)?,
        package_size: row.get(5)?,
        created_at: parse_timestamp(6, &row.get::<_, String>(6)?)?,
        updated_at: parse_timestamp(7, &row.get::<_, String>(7)?)?,
    })
}
