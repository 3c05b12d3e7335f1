// ==========================================
// Test data builders for integration tests
// ==========================================

use bakery_cost::domain::material::MaterialDraft;
use bakery_cost::domain::recipe::{RecipeDraft, RecipeLine};
use bakery_cost::domain::types::{MaterialCategory, MaterialUnit};

// ==========================================
// MaterialDraft builder
// ==========================================

pub struct MaterialBuilder {
    name: String,
    category: MaterialCategory,
    unit: MaterialUnit,
    unit_price: f64,
    package_size: f64,
}

impl MaterialBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: MaterialCategory::Other,
            unit: MaterialUnit::Gram,
            unit_price: 100.0,
            package_size: 1000.0,
        }
    }

    pub fn category(mut self, category: MaterialCategory) -> Self {
        self.category = category;
        self
    }

    pub fn unit(mut self, unit: MaterialUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Package price and package content
    pub fn price(mut self, unit_price: f64, package_size: f64) -> Self {
        self.unit_price = unit_price;
        self.package_size = package_size;
        self
    }

    pub fn build(self) -> MaterialDraft {
        MaterialDraft {
            name: self.name,
            category: self.category,
            unit: self.unit,
            unit_price: self.unit_price,
            package_size: self.package_size,
        }
    }
}

// ==========================================
// RecipeDraft builder
// ==========================================

pub struct RecipeBuilder {
    product_name: String,
    yield_count: i64,
    labor_time_minutes: i64,
    notes: Option<String>,
    materials: Vec<RecipeLine>,
}

impl RecipeBuilder {
    pub fn new(product_name: &str) -> Self {
        Self {
            product_name: product_name.to_string(),
            yield_count: 1,
            labor_time_minutes: 0,
            notes: None,
            materials: Vec::new(),
        }
    }

    pub fn yield_count(mut self, yield_count: i64) -> Self {
        self.yield_count = yield_count;
        self
    }

    pub fn labor_minutes(mut self, minutes: i64) -> Self {
        self.labor_time_minutes = minutes;
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn line(mut self, material_id: &str, quantity: f64) -> Self {
        self.materials.push(RecipeLine::new(material_id, quantity));
        self
    }

    pub fn build(self) -> RecipeDraft {
        RecipeDraft {
            product_name: self.product_name,
            yield_count: self.yield_count,
            labor_time_minutes: self.labor_time_minutes,
            notes: self.notes,
            materials: self.materials,
        }
    }
}
