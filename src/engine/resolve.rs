// ==========================================
// Bakery Cost Calculator - recipe line resolution
// ==========================================
// Joins each recipe line to its catalog material.
// ==========================================

use crate::domain::material::Material;
use crate::domain::recipe::{Recipe, ResolvedLine, ResolvedRecipe};
use crate::engine::error::{EngineError, EngineResult};
use std::collections::{BTreeSet, HashMap};

/// Materials keyed by id.
pub type MaterialCatalog = HashMap<String, Material>;

/// Resolve every line of `recipe` against `catalog`.
///
/// Fails with `EngineError::Resolution` on the first dangling material id.
pub fn resolve_recipe(recipe: &Recipe, catalog: &MaterialCatalog) -> EngineResult<ResolvedRecipe> {
    let lines = recipe
        .materials
        .iter()
        .map(|line| {
            let material = catalog
                .get(&line.material_id)
                .ok_or_else(|| EngineError::Resolution {
                    recipe_id: recipe.id.clone(),
                    material_id: line.material_id.clone(),
                })?;
            Ok(ResolvedLine {
                material: material.clone(),
                quantity: line.quantity,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(ResolvedRecipe {
        id: recipe.id.clone(),
        product_name: recipe.product_name.clone(),
        yield_count: recipe.yield_count,
        labor_time_minutes: recipe.labor_time_minutes,
        lines,
    })
}

/// Resolve a batch of recipes, keeping input order.
pub fn resolve_all(recipes: &[Recipe], catalog: &MaterialCatalog) -> EngineResult<Vec<ResolvedRecipe>> {
    recipes.iter().map(|r| resolve_recipe(r, catalog)).collect()
}

/// Distinct material ids referenced by `recipes`.
pub fn referenced_material_ids<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> BTreeSet<String> {
    recipes
        .into_iter()
        .flat_map(|r| r.material_ids().map(str::to_string))
        .collect()
}
