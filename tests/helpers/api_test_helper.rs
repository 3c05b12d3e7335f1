// ==========================================
// API integration test helpers
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::NamedTempFile;

use bakery_cost::api::{ApiError, CostApi, MaterialApi, RecipeApi};
use bakery_cost::domain::material::{Material, MaterialDraft};
use bakery_cost::domain::recipe::{Recipe, RecipeDraft};
use bakery_cost::domain::settings::CostSettings;
use bakery_cost::engine::CostRepositories;
use bakery_cost::repository::{CostSettingsRepository, MaterialRepository, RecipeRepository};

// ==========================================
// ApiTestEnv
// ==========================================

/// Every API over one temporary database
pub struct ApiTestEnv {
    pub db_path: String,
    pub material_api: Arc<MaterialApi>,
    pub recipe_api: Arc<RecipeApi>,
    pub cost_api: Arc<CostApi>,

    // repositories, for preparing data directly
    pub material_repo: Arc<MaterialRepository>,
    pub recipe_repo: Arc<RecipeRepository>,
    pub settings_repo: Arc<CostSettingsRepository>,

    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, String> {
        let (temp_file, db_path) =
            test_helpers::create_test_db().map_err(|e| format!("failed to create test db: {}", e))?;

        let conn = bakery_cost::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("failed to open db: {}", e))?;
        let conn: Arc<Mutex<Connection>> = Arc::new(Mutex::new(conn));

        let material_repo = Arc::new(MaterialRepository::from_connection(conn.clone()));
        let recipe_repo = Arc::new(RecipeRepository::from_connection(conn.clone()));
        let settings_repo = Arc::new(CostSettingsRepository::from_connection(conn));

        let material_api = Arc::new(MaterialApi::new(material_repo.clone()));
        let recipe_api = Arc::new(RecipeApi::new(recipe_repo.clone(), material_repo.clone()));
        let cost_api = Arc::new(CostApi::new(CostRepositories::new(
            material_repo.clone(),
            recipe_repo.clone(),
            settings_repo.clone(),
        )));

        Ok(Self {
            db_path,
            material_api,
            recipe_api,
            cost_api,
            material_repo,
            recipe_repo,
            settings_repo,
            _temp_file: temp_file,
        })
    }

    pub fn add_material(&self, draft: MaterialDraft) -> Material {
        self.material_api
            .create_material(draft)
            .expect("failed to create material")
    }

    pub fn add_recipe(&self, draft: RecipeDraft) -> Recipe {
        self.recipe_api
            .create_recipe(draft)
            .expect("failed to create recipe")
    }

    pub fn set_settings(&self, labor: f64, overhead: f64, margin: f64) -> CostSettings {
        self.cost_api
            .update_settings(CostSettings::new(labor, overhead, margin))
            .expect("failed to update settings")
    }
}

/// Field names of a ValidationError, panicking on any other error.
pub fn violation_fields(err: ApiError) -> Vec<String> {
    match err {
        ApiError::ValidationError { violations, .. } => {
            violations.into_iter().map(|v| v.field).collect()
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}
