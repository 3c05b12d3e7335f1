// ==========================================
// Bakery Cost Calculator - input validation
// ==========================================
// Field checks for create/update payloads. Every
// violation is collected before the call is rejected.
// ==========================================

use std::collections::HashSet;

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::material::MaterialDraft;
use crate::domain::recipe::RecipeDraft;
use crate::domain::settings::CostSettings;
use crate::engine::cost_engine::validate_margin;

/// Reject the call if any violation was collected.
fn finish(violations: Vec<ValidationViolation>) -> ApiResult<()> {
    if violations.is_empty() {
        return Ok(());
    }
    tracing::debug!(count = violations.len(), "validation rejected input");
    Err(ApiError::ValidationError {
        reason: format!("{} invalid field(s)", violations.len()),
        violations,
    })
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Validate a material payload.
///
/// # Rules
/// - name not blank
/// - unitPrice finite and >= 0
/// - packageSize finite and > 0
pub fn validate_material_draft(draft: &MaterialDraft) -> ApiResult<()> {
    let mut violations = Vec::new();

    if draft.name.trim().is_empty() {
        violations.push(ValidationViolation::new("name", "must not be empty"));
    }
    if !is_non_negative(draft.unit_price) {
        violations.push(ValidationViolation::new(
            "unitPrice",
            format!("must be a non-negative number, got {}", draft.unit_price),
        ));
    }
    if !(draft.package_size.is_finite() && draft.package_size > 0.0) {
        violations.push(ValidationViolation::new(
            "packageSize",
            format!("must be greater than 0, got {}", draft.package_size),
        ));
    }

    finish(violations)
}

/// Validate a recipe payload.
///
/// Material existence is checked by the caller against the catalog.
pub fn validate_recipe_draft(draft: &RecipeDraft) -> ApiResult<()> {
    let mut violations = Vec::new();

    if draft.product_name.trim().is_empty() {
        violations.push(ValidationViolation::new("productName", "must not be empty"));
    }
    if draft.yield_count <= 0 {
        violations.push(ValidationViolation::new(
            "yield",
            format!("must be greater than 0, got {}", draft.yield_count),
        ));
    }
    if draft.labor_time_minutes < 0 {
        violations.push(ValidationViolation::new(
            "laborTimeMinutes",
            format!("must not be negative, got {}", draft.labor_time_minutes),
        ));
    }

    let mut seen = HashSet::new();
    for (idx, line) in draft.materials.iter().enumerate() {
        let field = format!("materials[{}]", idx);
        if line.material_id.trim().is_empty() {
            violations.push(ValidationViolation::new(&field, "materialId must not be empty"));
        } else if !seen.insert(line.material_id.as_str()) {
            violations.push(ValidationViolation::new(
                &field,
                format!("material {} is listed more than once", line.material_id),
            ));
        }
        if !is_non_negative(line.quantity) {
            violations.push(ValidationViolation::new(
                &field,
                format!("quantity must be a non-negative number, got {}", line.quantity),
            ));
        }
    }

    finish(violations)
}

/// Validate settings before they are stored.
///
/// The margin must lie in [0, 100); 100 would make the price divisor zero.
pub fn validate_settings(settings: &CostSettings) -> ApiResult<()> {
    let mut violations = Vec::new();

    if !is_non_negative(settings.labor_cost_per_hour) {
        violations.push(ValidationViolation::new(
            "laborCostPerHour",
            format!("must be a non-negative number, got {}", settings.labor_cost_per_hour),
        ));
    }
    if !is_non_negative(settings.overhead_cost_per_unit) {
        violations.push(ValidationViolation::new(
            "overheadCostPerUnit",
            format!("must be a non-negative number, got {}", settings.overhead_cost_per_unit),
        ));
    }
    if let Err(e) = validate_margin(settings.target_profit_margin) {
        violations.push(ValidationViolation::new("targetProfitMargin", e.to_string()));
    }

    finish(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::RecipeLine;
    use crate::domain::types::{MaterialCategory, MaterialUnit};

    fn violations_of(result: ApiResult<()>) -> Vec<ValidationViolation> {
        match result {
            Err(ApiError::ValidationError { violations, .. }) => violations,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    fn recipe_draft() -> RecipeDraft {
        RecipeDraft {
            product_name: "Baguette".to_string(),
            yield_count: 4,
            labor_time_minutes: 45,
            notes: None,
            materials: vec![RecipeLine::new("m-1", 500.0)],
        }
    }

    #[test]
    fn test_material_draft_collects_every_violation() {
        let draft = MaterialDraft {
            name: "  ".to_string(),
            category: MaterialCategory::Flour,
            unit: MaterialUnit::Gram,
            unit_price: -1.0,
            package_size: 0.0,
        };
        let fields: Vec<String> = violations_of(validate_material_draft(&draft))
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, vec!["name", "unitPrice", "packageSize"]);
    }

    #[test]
    fn test_valid_recipe_draft_passes() {
        assert!(validate_recipe_draft(&recipe_draft()).is_ok());
    }

    #[test]
    fn test_zero_labor_time_is_allowed() {
        let mut draft = recipe_draft();
        draft.labor_time_minutes = 0;
        draft.materials.clear();
        assert!(validate_recipe_draft(&draft).is_ok());
    }

    #[test]
    fn test_recipe_rejects_duplicate_material() {
        let mut draft = recipe_draft();
        draft.materials.push(RecipeLine::new("m-1", 20.0));
        let violations = violations_of(validate_recipe_draft(&draft));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "materials[1]");
    }

    #[test]
    fn test_recipe_rejects_zero_yield_and_nan_quantity() {
        let mut draft = recipe_draft();
        draft.yield_count = 0;
        draft.materials[0].quantity = f64::NAN;
        let fields: Vec<String> = violations_of(validate_recipe_draft(&draft))
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, vec!["yield", "materials[0]"]);
    }

    #[test]
    fn test_settings_margin_boundary() {
        assert!(validate_settings(&CostSettings::new(1000.0, 10.0, 0.0)).is_ok());
        assert!(validate_settings(&CostSettings::new(1000.0, 10.0, 99.9)).is_ok());

        let violations = violations_of(validate_settings(&CostSettings::new(1000.0, 10.0, 100.0)));
        assert_eq!(violations[0].field, "targetProfitMargin");
        assert!(validate_settings(&CostSettings::new(1000.0, 10.0, -5.0)).is_err());
    }

    #[test]
    fn test_settings_rejects_negative_costs() {
        let violations = violations_of(validate_settings(&CostSettings::new(-1.0, f64::INFINITY, 30.0)));
        assert_eq!(violations.len(), 2);
    }
}
