// ==========================================
// Bakery Cost Calculator - engine error types
// ==========================================
// All variants are deterministic functions of the input.
// Retrying without changing the input cannot succeed.
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A recipe line references a material that is not in the catalog
    #[error("material not found: material_id={material_id} (recipe_id={recipe_id})")]
    Resolution {
        recipe_id: String,
        material_id: String,
    },

    #[error("invalid yield: recipe_id={recipe_id}, yield={yield_count} (must be > 0)")]
    InvalidYield { recipe_id: String, yield_count: i64 },

    #[error("invalid labor time: recipe_id={recipe_id}, minutes={minutes} (must be >= 0)")]
    InvalidLaborTime { recipe_id: String, minutes: i64 },

    #[error("invalid target profit margin: {margin}% (must be in [0, 100))")]
    InvalidMargin { margin: f64 },

    /// Target margin of exactly 100% makes the price denominator zero
    #[error("division by zero: target profit margin of 100% leaves no share for cost")]
    DivisionByZero,

    #[error("invalid package size: material_id={material_id}, package_size={package_size} (must be > 0)")]
    InvalidPackageSize {
        material_id: String,
        package_size: f64,
    },

    #[error("invalid quantity: recipe_id={recipe_id}, material_id={material_id}, quantity={quantity} (must be >= 0)")]
    InvalidQuantity {
        recipe_id: String,
        material_id: String,
        quantity: f64,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
