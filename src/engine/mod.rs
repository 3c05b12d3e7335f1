// ==========================================
// Bakery Cost Calculator - engine layer
// ==========================================
// Pure computation over in-memory values.
// No SQL, no I/O, no shared mutable state.
// ==========================================

pub mod cost_engine;
pub mod error;
pub mod report;
pub mod repositories;
pub mod resolve;
pub mod rounding;

pub use cost_engine::{validate_margin, CostCalculationEngine, CostComponents};
pub use error::{EngineError, EngineResult};
pub use report::{summarize, ReportAggregator};
pub use repositories::{CostRepositories, MaterialResolver, RecipeCatalog, SettingsStore};
pub use resolve::{referenced_material_ids, resolve_all, resolve_recipe, MaterialCatalog};
