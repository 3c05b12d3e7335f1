// ==========================================
// Bakery Cost Calculator - recipe domain model
// ==========================================
// Aligned with the recipes / recipe_materials tables
// ==========================================

use crate::domain::material::Material;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RecipeLine - (material, quantity) edge
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeLine {
    pub material_id: String,
    pub quantity: f64, // in the material's unit
}

impl RecipeLine {
    pub fn new(material_id: impl Into<String>, quantity: f64) -> Self {
        Self {
            material_id: material_id.into(),
            quantity,
        }
    }
}

// ==========================================
// Recipe - product definition
// ==========================================
// Invariant: yield_count > 0, labor_time_minutes >= 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub product_name: String,
    #[serde(rename = "yield")]
    pub yield_count: i64, // finished units per batch
    pub labor_time_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub materials: Vec<RecipeLine>, // ordered
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(draft: RecipeDraft) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_name: draft.product_name,
            yield_count: draft.yield_count,
            labor_time_minutes: draft.labor_time_minutes,
            notes: normalize_notes(draft.notes),
            materials: draft.materials,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: RecipeDraft) {
        self.product_name = draft.product_name;
        self.yield_count = draft.yield_count;
        self.labor_time_minutes = draft.labor_time_minutes;
        self.notes = normalize_notes(draft.notes);
        self.materials = draft.materials;
        self.updated_at = Utc::now();
    }

    /// Duplicate under a new id. The copy's name gets a " (copy)" suffix.
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_name: format!("{} (copy)", self.product_name),
            yield_count: self.yield_count,
            labor_time_minutes: self.labor_time_minutes,
            notes: self.notes.clone(),
            materials: self.materials.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn material_ids(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|line| line.material_id.as_str())
    }
}

/// Empty notes are stored as NULL.
fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

// ==========================================
// RecipeDraft - create/update payload
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub product_name: String,
    #[serde(rename = "yield")]
    pub yield_count: i64,
    pub labor_time_minutes: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub materials: Vec<RecipeLine>,
}

// ==========================================
// ResolvedRecipe - recipe joined to its materials
// ==========================================
// Input of the cost engine. Built by engine::resolve_recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecipe {
    pub id: String,
    pub product_name: String,
    pub yield_count: i64,
    pub labor_time_minutes: i64,
    pub lines: Vec<ResolvedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLine {
    pub material: Material,
    pub quantity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            product_name: "Croissant".to_string(),
            yield_count: 12,
            labor_time_minutes: 90,
            notes: Some("   ".to_string()),
            materials: vec![RecipeLine::new("m-1", 300.0), RecipeLine::new("m-2", 120.0)],
        }
    }

    #[test]
    fn test_blank_notes_become_none() {
        let recipe = Recipe::new(draft());
        assert!(recipe.notes.is_none());
    }

    #[test]
    fn test_duplicate_gets_new_id_and_suffix() {
        let recipe = Recipe::new(draft());
        let copy = recipe.duplicate();

        assert_ne!(copy.id, recipe.id);
        assert_eq!(copy.product_name, "Croissant (copy)");
        assert_eq!(copy.materials, recipe.materials);
        assert_eq!(copy.yield_count, 12);
    }

    #[test]
    fn test_yield_serializes_as_yield() {
        let recipe = Recipe::new(draft());
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["yield"], 12);
        assert_eq!(value["laborTimeMinutes"], 90);
        assert_eq!(value["materials"][0]["materialId"], "m-1");
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn test_material_ids_keep_order() {
        let recipe = Recipe::new(draft());
        let ids: Vec<&str> = recipe.material_ids().collect();
        assert_eq!(ids, vec!["m-1", "m-2"]);
    }
}
