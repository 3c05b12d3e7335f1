// ==========================================
// Bakery Cost Calculator - recipe repository
// ==========================================
// recipes + recipe_materials, always written together
// in one transaction.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::recipe::{Recipe, RecipeLine};
use crate::engine::repositories::RecipeCatalog;
use crate::repository::error::{parse_timestamp, RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const RECIPE_COLUMNS: &str = "id, product_name, yield, labor_time, notes, created_at, updated_at";

// ==========================================
// RecipeRepository
// ==========================================
/// CRUD over recipes and their lines
pub struct RecipeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RecipeRepository {
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

    /// Insert a recipe with all of its lines.
    pub fn insert(&self, recipe: &Recipe) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO recipes (
                id, product_name, yield, labor_time, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                recipe.id,
                recipe.product_name,
                recipe.yield_count,
                recipe.labor_time_minutes,
                recipe.notes,
                recipe.created_at.to_rfc3339(),
                recipe.updated_at.to_rfc3339(),
            ],
        )?;
        insert_lines(&tx, &recipe.id, &recipe.materials)?;

        tx.commit()?;
        Ok(())
    }

    /// Update the header and replace every line.
    ///
    /// # Errors
    /// - NotFound: no row with `recipe.id` (nothing is written)
    pub fn update(&self, recipe: &Recipe) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let affected = tx.execute(
            r#"
            UPDATE recipes
            SET product_name = ?1, yield = ?2, labor_time = ?3, notes = ?4, updated_at = ?5
            WHERE id = ?6
            "#,
            params![
                recipe.product_name,
                recipe.yield_count,
                recipe.labor_time_minutes,
                recipe.notes,
                recipe.updated_at.to_rfc3339(),
                recipe.id,
            ],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Recipe", &recipe.id));
        }

        tx.execute(
            "DELETE FROM recipe_materials WHERE recipe_id = ?1",
            params![recipe.id],
        )?;
        insert_lines(&tx, &recipe.id, &recipe.materials)?;

        tx.commit()?;
        Ok(())
    }

    pub fn find_by_id(&self, recipe_id: &str) -> RepositoryResult<Option<Recipe>> {
        let conn = self.get_conn()?;
        let recipe = conn
            .query_row(
                &format!("SELECT {} FROM recipes WHERE id = ?1", RECIPE_COLUMNS),
                params![recipe_id],
                map_recipe_row,
            )
            .optional()?;

        match recipe {
            Some(mut recipe) => {
                recipe.materials = load_lines(&conn, &recipe.id)?;
                Ok(Some(recipe))
            }
            None => Ok(None),
        }
    }

    /// All recipes ordered by product name, lines embedded.
    pub fn list_all(&self) -> RepositoryResult<Vec<Recipe>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recipes ORDER BY product_name ASC",
            RECIPE_COLUMNS
        ))?;
        let mut recipes = stmt
            .query_map([], map_recipe_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        for recipe in recipes.iter_mut() {
            recipe.materials = load_lines(&conn, &recipe.id)?;
        }
        Ok(recipes)
    }

    /// Delete a recipe; its lines go with it (ON DELETE CASCADE).
    pub fn delete(&self, recipe_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM recipes WHERE id = ?1", params![recipe_id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Recipe", recipe_id));
        }
        Ok(())
    }
}

impl RecipeCatalog for RecipeRepository {
    fn list_all(&self) -> RepositoryResult<Vec<Recipe>> {
        RecipeRepository::list_all(self)
    }

    fn find(&self, recipe_id: &str) -> RepositoryResult<Option<Recipe>> {
        self.find_by_id(recipe_id)
    }
}

fn insert_lines(conn: &Connection, recipe_id: &str, lines: &[RecipeLine]) -> SqliteResult<()> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO recipe_materials (recipe_id, material_id, line_no, quantity)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )?;
    for (line_no, line) in lines.iter().enumerate() {
        stmt.execute(params![recipe_id, line.material_id, line_no as i64, line.quantity])?;
    }
    Ok(())
}

fn load_lines(conn: &Connection, recipe_id: &str) -> SqliteResult<Vec<RecipeLine>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT material_id, quantity
        FROM recipe_materials
        WHERE recipe_id = ?1
        ORDER BY line_no ASC
        "#,
    )?;
    let lines = stmt
        .query_map(params![recipe_id], |row| {
            Ok(RecipeLine {
                material_id: row.get(0)?,
                quantity: row.get(1)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(lines)
}

fn map_recipe_row(row: &Row<'_>) -> SqliteResult<Recipe> {
    Ok(Recipe {
        id: row.get(0)?,
        product_name: row.get(1)?,
        yield_count: row.get(2)?,
        labor_time_minutes: row.get(3)?,
        notes: row.get(4)?,
        materials: Vec::new(),
        created_at: parse_timestamp(5, &row.get::<_, String>(5)?)?,
        updated_at: parse_timestamp(6, &row.get::<_, String>(6)?)?,
    })
}
