// ==========================================
// Bakery Cost Calculator - application layer
// ==========================================

pub mod state;

pub use state::AppState;
