// ==========================================
// Bakery Cost Calculator - repository layer
// ==========================================
// Data access only. No business rules.
// All queries are parameterized.
// ==========================================

pub mod error;
pub mod material_repo;
pub mod recipe_repo;
pub mod settings_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use material_repo::MaterialRepository;
pub use recipe_repo::RecipeRepository;
pub use settings_repo::CostSettingsRepository;
