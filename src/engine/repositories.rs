// ==========================================
// Bakery Cost Calculator - data sources consumed by the cost engine
// ==========================================
// The engine never builds SQL. Callers load data through
// these traits and hand immutable values to the engine.
// ==========================================

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::material::Material;
use crate::domain::recipe::Recipe;
use crate::domain::settings::CostSettings;
use crate::repository::error::RepositoryResult;

/// Looks up catalog materials by id.
pub trait MaterialResolver: Send + Sync {
    /// Resolve every id in `ids`.
    ///
    /// Fails with `RepositoryError::NotFound` naming the first unresolved id.
    fn resolve(&self, ids: &BTreeSet<String>) -> RepositoryResult<HashMap<String, Material>>;
}

/// Read access to recipes with their lines embedded.
pub trait RecipeCatalog: Send + Sync {
    fn list_all(&self) -> RepositoryResult<Vec<Recipe>>;

    fn find(&self, recipe_id: &str) -> RepositoryResult<Option<Recipe>>;
}

/// Owner of the settings singleton.
pub trait SettingsStore: Send + Sync {
    /// Always returns exactly one record.
    fn current(&self) -> RepositoryResult<CostSettings>;

    /// Replace the singleton. Callers validate first.
    fn save(&self, settings: &CostSettings) -> RepositoryResult<()>;
}

/// Data sources needed by cost calculation, bundled for injection.
#[derive(Clone)]
pub struct CostRepositories {
    pub materials: Arc<dyn MaterialResolver>,
    pub recipes: Arc<dyn RecipeCatalog>,
    pub settings: Arc<dyn SettingsStore>,
}

impl CostRepositories {
    pub fn new(
        materials: Arc<dyn MaterialResolver>,
        recipes: Arc<dyn RecipeCatalog>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            materials,
            recipes,
            settings,
        }
    }
}
