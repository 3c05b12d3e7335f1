// ==========================================
// Bakery Cost Calculator - domain layer
// ==========================================
// Entities and value types only.
// No data access, no engine logic.
// ==========================================

pub mod cost;
pub mod material;
pub mod recipe;
pub mod settings;
pub mod types;

pub use cost::{CostBreakdown, CostReport, MaterialLineCost, ReportSummary};
pub use material::{Material, MaterialDraft};
pub use recipe::{Recipe, RecipeDraft, RecipeLine, ResolvedLine, ResolvedRecipe};
pub use settings::CostSettings;
pub use types::{MaterialCategory, MaterialUnit};
