// ==========================================
// Bakery Cost Calculator - cost API
// ==========================================
// Loads recipes, materials and settings through the
// repository traits, then hands resolved values to
// the pure engine.
// ==========================================

use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_settings;
use crate::domain::cost::{CostBreakdown, CostReport};
use crate::domain::recipe::{Recipe, ResolvedRecipe};
use crate::domain::settings::CostSettings;
use crate::engine::cost_engine::CostCalculationEngine;
use crate::engine::error::EngineError;
use crate::engine::report::ReportAggregator;
use crate::engine::repositories::CostRepositories;
use crate::engine::resolve::{referenced_material_ids, resolve_all, MaterialCatalog};
use crate::repository::error::RepositoryError;

// ==========================================
// CostApi
// ==========================================
pub struct CostApi {
    repos: CostRepositories,
    engine: CostCalculationEngine,
    aggregator: ReportAggregator,
}

impl CostApi {
    pub fn new(repos: CostRepositories) -> Self {
        let engine = CostCalculationEngine::new();
        Self {
            repos,
            engine,
            aggregator: ReportAggregator::new(engine),
        }
    }

    // ==========================================
    // Settings
    // ==========================================

    pub fn get_settings(&self) -> ApiResult<CostSettings> {
        Ok(self.repos.settings.current()?)
    }

    /// Validate and store new settings.
    ///
    /// # Errors
    /// - ValidationError: negative or non-finite cost, margin outside [0, 100)
    pub fn update_settings(&self, settings: CostSettings) -> ApiResult<CostSettings> {
        validate_settings(&settings)?;
        self.repos.settings.save(&settings)?;

        info!(
            labor_cost_per_hour = settings.labor_cost_per_hour,
            overhead_cost_per_unit = settings.overhead_cost_per_unit,
            target_profit_margin = settings.target_profit_margin,
            "cost settings updated"
        );
        Ok(settings)
    }

    // ==========================================
    // Calculation
    // ==========================================

    /// Cost breakdown of one recipe under the current settings.
    ///
    /// # Errors
    /// - NotFound: unknown recipe
    /// - Calculation(Resolution): a line references a missing material
    /// - Calculation(..): any other engine rejection
    #[instrument(skip(self))]
    pub fn calculate(&self, recipe_id: &str) -> ApiResult<CostBreakdown> {
        let recipe = self
            .repos
            .recipes
            .find(recipe_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Recipe (id={}) does not exist", recipe_id)))?;
        let settings = self.repos.settings.current()?;

        let mut resolved = self.resolve(std::slice::from_ref(&recipe))?;
        let resolved = resolved
            .pop()
            .ok_or_else(|| ApiError::InternalError("resolved recipe missing".to_string()))?;

        Ok(self.engine.compute_breakdown(&resolved, &settings)?)
    }

    /// Breakdowns of every recipe, ordered by product name.
    #[instrument(skip(self))]
    pub fn calculate_all(&self) -> ApiResult<Vec<CostBreakdown>> {
        let recipes = self.repos.recipes.list_all()?;
        let settings = self.repos.settings.current()?;
        let resolved = self.resolve(&recipes)?;

        resolved
            .iter()
            .map(|recipe| Ok(self.engine.compute_breakdown(recipe, &settings)?))
            .collect()
    }

    /// Report over every recipe: per-recipe breakdowns plus summary.
    #[instrument(skip(self))]
    pub fn report(&self) -> ApiResult<CostReport> {
        let recipes = self.repos.recipes.list_all()?;
        let settings = self.repos.settings.current()?;
        let resolved = self.resolve(&recipes)?;

        Ok(self.aggregator.compute_report(&resolved, &settings)?)
    }

    // ==========================================
    // Helpers
    // ==========================================

    /// Load every referenced material in one pass and join the lines.
    fn resolve(&self, recipes: &[Recipe]) -> ApiResult<Vec<ResolvedRecipe>> {
        let ids = referenced_material_ids(recipes);
        let catalog: MaterialCatalog = match self.repos.materials.resolve(&ids) {
            Ok(catalog) => catalog,
            Err(RepositoryError::NotFound { entity, id }) if entity == "Material" => {
                let recipe_id = recipes
                    .iter()
                    .find(|r| r.material_ids().any(|m| m == id))
                    .map(|r| r.id.clone())
                    .unwrap_or_default();
                warn!(recipe_id = %recipe_id, material_id = %id, "recipe references a missing material");
                return Err(EngineError::Resolution {
                    recipe_id,
                    material_id: id,
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(resolve_all(recipes, &catalog)?)
    }
}
