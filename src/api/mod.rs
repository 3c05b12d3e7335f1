// ==========================================
// Bakery Cost Calculator - API layer
// ==========================================
// Business entry points used by the CLI
// ==========================================

pub mod cost_api;
pub mod error;
pub mod material_api;
pub mod recipe_api;
pub mod validator;

pub use cost_api::CostApi;
pub use error::{ApiError, ApiResult, ErrorKind, ErrorResponse, ValidationViolation};
pub use material_api::MaterialApi;
pub use recipe_api::RecipeApi;
