// ==========================================
// Bakery Cost Calculator - recipe API
// ==========================================
// Recipe maintenance. Lines may only reference
// materials that exist in the catalog.
// ==========================================

use std::sync::Arc;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::api::validator::validate_recipe_draft;
use crate::domain::recipe::{Recipe, RecipeDraft};
use crate::repository::material_repo::MaterialRepository;
use crate::repository::recipe_repo::RecipeRepository;

// ==========================================
// RecipeApi
// ==========================================
pub struct RecipeApi {
    recipe_repo: Arc<RecipeRepository>,
    material_repo: Arc<MaterialRepository>,
}

impl RecipeApi {
    pub fn new(recipe_repo: Arc<RecipeRepository>, material_repo: Arc<MaterialRepository>) -> Self {
        Self {
            recipe_repo,
            material_repo,
        }
    }

    // ==========================================
    // Queries
    // ==========================================

    /// All recipes ordered by product name, lines embedded.
    pub fn list_recipes(&self) -> ApiResult<Vec<Recipe>> {
        let recipes = self.recipe_repo.list_all()?;
        debug!(count = recipes.len(), "listed recipes");
        Ok(recipes)
    }

    pub fn get_recipe(&self, recipe_id: &str) -> ApiResult<Recipe> {
        if recipe_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("recipe id must not be empty".to_string()));
        }
        self.recipe_repo
            .find_by_id(recipe_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Recipe (id={}) does not exist", recipe_id)))
    }

    // ==========================================
    // Commands
    // ==========================================

    pub fn create_recipe(&self, mut draft: RecipeDraft) -> ApiResult<Recipe> {
        draft.product_name = draft.product_name.trim().to_string();
        self.validate(&draft)?;

        let recipe = Recipe::new(draft);
        self.recipe_repo.insert(&recipe)?;

        info!(
            recipe_id = %recipe.id,
            product_name = %recipe.product_name,
            lines = recipe.materials.len(),
            "recipe created"
        );
        Ok(recipe)
    }

    /// Replace the header and the whole line list of a recipe.
    pub fn update_recipe(&self, recipe_id: &str, mut draft: RecipeDraft) -> ApiResult<Recipe> {
        draft.product_name = draft.product_name.trim().to_string();
        self.validate(&draft)?;

        let mut recipe = self.get_recipe(recipe_id)?;
        recipe.apply(draft);
        self.recipe_repo.update(&recipe)?;

        info!(recipe_id = %recipe.id, lines = recipe.materials.len(), "recipe updated");
        Ok(recipe)
    }

    /// Delete a recipe together with its lines.
    pub fn delete_recipe(&self, recipe_id: &str) -> ApiResult<()> {
        let recipe = self.get_recipe(recipe_id)?;
        self.recipe_repo.delete(&recipe.id)?;
        info!(recipe_id = %recipe.id, "recipe deleted");
        Ok(())
    }

    /// Duplicate a recipe under a new id, name suffixed with " (copy)".
    pub fn copy_recipe(&self, recipe_id: &str) -> ApiResult<Recipe> {
        let source = self.get_recipe(recipe_id)?;
        let copy = source.duplicate();
        self.recipe_repo.insert(&copy)?;

        info!(source_id = %source.id, recipe_id = %copy.id, "recipe copied");
        Ok(copy)
    }

    // ==========================================
    // Helpers
    // ==========================================

    fn validate(&self, draft: &RecipeDraft) -> ApiResult<()> {
        validate_recipe_draft(draft)?;

        let mut violations = Vec::new();
        for (idx, line) in draft.materials.iter().enumerate() {
            if self.material_repo.find_by_id(&line.material_id)?.is_none() {
                violations.push(ValidationViolation::new(
                    format!("materials[{}]", idx),
                    format!("material {} does not exist", line.material_id),
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ValidationError {
                reason: format!("{} unknown material(s)", violations.len()),
                violations,
            })
        }
    }
}
