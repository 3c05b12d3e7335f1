// ==========================================
// Bakery Cost Calculator - material domain model
// ==========================================
// Aligned with the materials table
// ==========================================

use crate::domain::types::{MaterialCategory, MaterialUnit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Material - purchasable ingredient
// ==========================================
// Invariant: package_size > 0 (divisor in per-unit price)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    pub category: MaterialCategory,
    pub unit: MaterialUnit,
    pub unit_price: f64,   // price paid for one package
    pub package_size: f64, // package content, in `unit`
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Material {
    /// Build a new material with a fresh id and both timestamps set to now.
    pub fn new(draft: MaterialDraft) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            category: draft.category,
            unit: draft.unit,
            unit_price: draft.unit_price,
            package_size: draft.package_size,
            created_at: now,
            updated_at: now,
        }
    }

    /// Price of one `unit` of this material (linear pricing).
    ///
    /// Callers must have checked `package_size > 0`.
    pub fn price_per_unit(&self) -> f64 {
        self.unit_price / self.package_size
    }

    /// Overwrite the editable fields, keeping id and created_at.
    pub fn apply(&mut self, draft: MaterialDraft) {
        self.name = draft.name;
        self.category = draft.category;
        self.unit = draft.unit;
        self.unit_price = draft.unit_price;
        self.package_size = draft.package_size;
        self.updated_at = Utc::now();
    }
}

// ==========================================
// MaterialDraft - create/update payload
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDraft {
    pub name: String,
    pub category: MaterialCategory,
    pub unit: MaterialUnit,
    pub unit_price: f64,
    pub package_size: f64,
}
