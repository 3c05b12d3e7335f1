// ==========================================
// Bakery Cost Calculator - core library
// ==========================================
// Stack: Rust + SQLite, driven from the CLI
// Layers: domain -> repository -> engine -> api -> app
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Engine layer - cost calculation
pub mod engine;

// Configuration
pub mod config;

// Database infrastructure (schema, PRAGMAs)
pub mod db;

// Logging
pub mod logging;

// API layer - business entry points
pub mod api;

// Application layer - wiring
pub mod app;

// Command line interface
pub mod cli;

// ==========================================
// Re-exports
// ==========================================

pub use domain::types::{MaterialCategory, MaterialUnit};

pub use domain::{
    CostBreakdown, CostReport, CostSettings, Material, MaterialDraft, MaterialLineCost, Recipe,
    RecipeDraft, RecipeLine, ReportSummary,
};

pub use engine::{CostCalculationEngine, EngineError, ReportAggregator};

pub use api::{ApiError, ApiResult, CostApi, MaterialApi, RecipeApi};

pub use app::AppState;

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Bakery Cost Calculator";


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
