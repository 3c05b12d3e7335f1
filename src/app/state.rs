// ==========================================
// Bakery Cost Calculator - application state
// ==========================================
// Wires repositories and APIs over one shared connection
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{ApiError, ApiResult, CostApi, MaterialApi, RecipeApi};
use crate::db::{configure_sqlite_connection, init_schema, open_and_init};
use crate::engine::CostRepositories;
use crate::repository::{CostSettingsRepository, MaterialRepository, RecipeRepository};

/// All API instances plus the shared connection
pub struct AppState {
    pub db_path: String,

    pub material_api: Arc<MaterialApi>,
    pub recipe_api: Arc<RecipeApi>,
    pub cost_api: Arc<CostApi>,
}

impl AppState {
    /// Open (creating if needed) the database at `db_path` and build every API.
    ///
    /// # Errors
    /// - DatabaseConnectionError: the file cannot be opened or the schema cannot be applied
    pub fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!(db_path = %db_path, "initializing AppState");

        let conn = open_and_init(&db_path).map_err(|e| {
            ApiError::DatabaseConnectionError(format!("cannot open database {}: {}", db_path, e))
        })?;

        let mut state = Self::from_connection(Arc::new(Mutex::new(conn)));
        state.db_path = db_path;
        Ok(state)
    }

    /// Build the state over an already opened connection.
    ///
    /// PRAGMAs and schema are applied idempotently.
    pub fn with_connection(conn: Connection) -> ApiResult<Self> {
        configure_sqlite_connection(&conn)
            .and_then(|_| init_schema(&conn))
            .map_err(|e| ApiError::DatabaseConnectionError(format!("schema init failed: {}", e)))?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        // ==========================================
        // Repositories
        // ==========================================
        let material_repo = Arc::new(MaterialRepository::from_connection(conn.clone()));
        let recipe_repo = Arc::new(RecipeRepository::from_connection(conn.clone()));
        let settings_repo = Arc::new(CostSettingsRepository::from_connection(conn));

        // ==========================================
        // APIs
        // ==========================================
        let material_api = Arc::new(MaterialApi::new(material_repo.clone()));
        let recipe_api = Arc::new(RecipeApi::new(recipe_repo.clone(), material_repo.clone()));
        let cost_api = Arc::new(CostApi::new(CostRepositories::new(
            material_repo,
            recipe_repo,
            settings_repo,
        )));

        tracing::debug!("AppState ready");

        Self {
            db_path: String::new(),
            material_api,
            recipe_api,
            cost_api,
        }
    }
}
