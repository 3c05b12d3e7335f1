// ==========================================
// Bakery Cost Calculator - cost calculation engine
// ==========================================
// Input: resolved recipe + cost settings
// Output: CostBreakdown
// ==========================================
// Stateless. Never touches storage.
// Full precision internally, rounding once at the end.
// ==========================================

use crate::domain::cost::{CostBreakdown, MaterialLineCost};
use crate::domain::recipe::{ResolvedLine, ResolvedRecipe};
use crate::domain::settings::CostSettings;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::rounding::{round_currency, round_whole};
use tracing::{debug, instrument};

const MINUTES_PER_HOUR: f64 = 60.0;

// ==========================================
// CostComponents - unrounded intermediate values
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostComponents {
    pub material_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub total_cost: f64,
    pub unit_cost: f64,
    pub suggested_price: f64,
}

// ==========================================
// CostCalculationEngine
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCalculationEngine;

impl CostCalculationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the rounded cost breakdown of one recipe.
    ///
    /// # Errors
    /// - `InvalidYield` / `InvalidLaborTime`: bad recipe header
    /// - `InvalidPackageSize` / `InvalidQuantity`: bad recipe line
    /// - `InvalidMargin` / `DivisionByZero`: bad settings
    #[instrument(skip(self, recipe, settings), fields(recipe_id = %recipe.id))]
    pub fn compute_breakdown(
        &self,
        recipe: &ResolvedRecipe,
        settings: &CostSettings,
    ) -> EngineResult<CostBreakdown> {
        let components = self.compute_components(recipe, settings)?;

        let material_lines = recipe
            .lines
            .iter()
            .map(|line| {
                Ok(MaterialLineCost {
                    material_id: line.material.id.clone(),
                    material_name: line.material.name.clone(),
                    quantity: line.quantity,
                    unit: line.material.unit,
                    cost: round_currency(line_cost(&recipe.id, line)?),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let breakdown = CostBreakdown {
            recipe_id: recipe.id.clone(),
            recipe_name: recipe.product_name.clone(),
            yield_count: recipe.yield_count,
            material_cost: round_currency(components.material_cost),
            labor_cost: round_currency(components.labor_cost),
            overhead_cost: round_currency(components.overhead_cost),
            total_cost: round_currency(components.total_cost),
            unit_cost: round_currency(components.unit_cost),
            suggested_price: round_whole(components.suggested_price),
            profit_margin: round_currency(settings.target_profit_margin),
            material_lines,
        };

        debug!(
            total_cost = breakdown.total_cost,
            unit_cost = breakdown.unit_cost,
            suggested_price = breakdown.suggested_price,
            "cost breakdown computed"
        );

        Ok(breakdown)
    }

    /// Compute the unrounded cost components of one recipe.
    pub fn compute_components(
        &self,
        recipe: &ResolvedRecipe,
        settings: &CostSettings,
    ) -> EngineResult<CostComponents> {
        validate_margin(settings.target_profit_margin)?;

        if recipe.yield_count <= 0 {
            return Err(EngineError::InvalidYield {
                recipe_id: recipe.id.clone(),
                yield_count: recipe.yield_count,
            });
        }
        if recipe.labor_time_minutes < 0 {
            return Err(EngineError::InvalidLaborTime {
                recipe_id: recipe.id.clone(),
                minutes: recipe.labor_time_minutes,
            });
        }

        let mut material_cost = 0.0;
        for line in &recipe.lines {
            material_cost += line_cost(&recipe.id, line)?;
        }

        let yield_count = recipe.yield_count as f64;
        let labor_cost =
            settings.labor_cost_per_hour * recipe.labor_time_minutes as f64 / MINUTES_PER_HOUR;
        let overhead_cost = settings.overhead_cost_per_unit * yield_count;
        let total_cost = material_cost + labor_cost + overhead_cost;
        let unit_cost = total_cost / yield_count;
        let suggested_price = unit_cost / settings.cost_share();

        Ok(CostComponents {
            material_cost,
            labor_cost,
            overhead_cost,
            total_cost,
            unit_cost,
            suggested_price,
        })
    }
}

/// Cost of one recipe line: (unit_price / package_size) * quantity.
fn line_cost(recipe_id: &str, line: &ResolvedLine) -> EngineResult<f64> {
    let material = &line.material;
    if !(material.package_size > 0.0) || !material.package_size.is_finite() {
        return Err(EngineError::InvalidPackageSize {
            material_id: material.id.clone(),
            package_size: material.package_size,
        });
    }
    if !(line.quantity >= 0.0) || !line.quantity.is_finite() {
        return Err(EngineError::InvalidQuantity {
            recipe_id: recipe_id.to_string(),
            material_id: material.id.clone(),
            quantity: line.quantity,
        });
    }
    Ok(material.price_per_unit() * line.quantity)
}

/// Check a target profit margin.
///
/// Exactly 100 is reported as `DivisionByZero`; anything else outside [0, 100)
/// (including NaN) as `InvalidMargin`.
pub fn validate_margin(margin: f64) -> EngineResult<()> {
    if margin == 100.0 {
        return Err(EngineError::DivisionByZero);
    }
    if !(0.0..100.0).contains(&margin) {
        return Err(EngineError::InvalidMargin { margin });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::material::{Material, MaterialDraft};
    use crate::domain::types::{MaterialCategory, MaterialUnit};

    // ==========================================
    // Test helpers
    // ==========================================

    fn material(id: &str, unit_price: f64, package_size: f64) -> Material {
        let mut m = Material::new(MaterialDraft {
            name: format!("material {}", id),
            category: MaterialCategory::Other,
            unit: MaterialUnit::Gram,
            unit_price,
            package_size,
        });
        m.id = id.to_string();
        m
    }

    fn recipe(yield_count: i64, labor_time_minutes: i64, lines: Vec<ResolvedLine>) -> ResolvedRecipe {
        ResolvedRecipe {
            id: "r-1".to_string(),
            product_name: "Test bread".to_string(),
            yield_count,
            labor_time_minutes,
            lines,
        }
    }

    fn line(material: Material, quantity: f64) -> ResolvedLine {
        ResolvedLine { material, quantity }
    }

    fn no_labor_no_overhead(margin: f64) -> CostSettings {
        CostSettings::new(0.0, 0.0, margin)
    }

    // ==========================================
    // Reference scenarios
    // ==========================================

    #[test]
    fn test_line_cost_scales_linearly() {
        let r = recipe(1, 0, vec![line(material("flour", 500.0, 1000.0), 300.0)]);
        let breakdown = CostCalculationEngine::new()
            .compute_breakdown(&r, &no_labor_no_overhead(0.0))
            .unwrap();

        assert_eq!(breakdown.material_lines.len(), 1);
        assert_eq!(breakdown.material_lines[0].cost, 150.0);
        assert_eq!(breakdown.material_cost, 150.0);
    }

    #[test]
    fn test_labor_cost_from_minutes() {
        let r = recipe(1, 180, vec![]);
        let breakdown = CostCalculationEngine::new()
            .compute_breakdown(&r, &CostSettings::new(1000.0, 0.0, 30.0))
            .unwrap();

        assert_eq!(breakdown.labor_cost, 3000.0);
    }

    #[test]
    fn test_overhead_cost_per_unit() {
        let r = recipe(8, 0, vec![]);
        let breakdown = CostCalculationEngine::new()
            .compute_breakdown(&r, &CostSettings::new(1000.0, 10.0, 30.0))
            .unwrap();

        assert_eq!(breakdown.overhead_cost, 80.0);
        assert_eq!(breakdown.unit_cost, 10.0);
    }

    #[test]
    fn test_suggested_price_rounds_to_whole_unit() {
        let r = recipe(
            1,
            0,
            vec![
                line(material("flour", 500.0, 1000.0), 300.0),
                line(material("butter", 630.0, 1000.0), 100.0),
            ],
        );
        let breakdown = CostCalculationEngine::new()
            .compute_breakdown(&r, &CostSettings::new(1000.0, 0.0, 30.0))
            .unwrap();

        assert_eq!(breakdown.total_cost, 213.0);
        assert_eq!(breakdown.unit_cost, 213.0);
        assert_eq!(breakdown.suggested_price, 304.0);
        assert_eq!(breakdown.profit_margin, 30.0);
    }

    // ==========================================
    // Properties
    // ==========================================

    #[test]
    fn test_total_is_sum_of_components() {
        let r = recipe(
            7,
            47,
            vec![
                line(material("a", 333.0, 700.0), 123.4),
                line(material("b", 199.0, 3.0), 2.0),
                line(material("c", 1.0, 3.0), 1.0),
            ],
        );
        let settings = CostSettings::new(1111.0, 3.33, 27.5);
        let breakdown = CostCalculationEngine::new()
            .compute_breakdown(&r, &settings)
            .unwrap();

        let summed = breakdown.material_cost + breakdown.labor_cost + breakdown.overhead_cost;
        assert!((breakdown.total_cost - summed).abs() <= 0.015 + 1e-9);
    }

    #[test]
    fn test_unit_cost_and_price_before_rounding() {
        let r = recipe(
            6,
            35,
            vec![line(material("a", 298.0, 1000.0), 250.0)],
        );
        let settings = CostSettings::new(950.0, 12.0, 35.0);
        let engine = CostCalculationEngine::new();
        let c = engine.compute_components(&r, &settings).unwrap();

        assert_eq!(c.total_cost, c.material_cost + c.labor_cost + c.overhead_cost);
        assert_eq!(c.unit_cost, c.total_cost / 6.0);
        assert_eq!(c.suggested_price, c.unit_cost / (1.0 - 35.0 / 100.0));

        let breakdown = engine.compute_breakdown(&r, &settings).unwrap();
        assert_eq!(breakdown.suggested_price, c.suggested_price.round());
    }

    #[test]
    fn test_empty_recipe_is_labor_plus_overhead() {
        let r = recipe(4, 30, vec![]);
        let breakdown = CostCalculationEngine::new()
            .compute_breakdown(&r, &CostSettings::default())
            .unwrap();

        assert_eq!(breakdown.material_cost, 0.0);
        assert_eq!(breakdown.labor_cost, 500.0);
        assert_eq!(breakdown.overhead_cost, 40.0);
        assert_eq!(breakdown.total_cost, 540.0);
        assert!(breakdown.material_lines.is_empty());
    }

    #[test]
    fn test_compute_is_idempotent() {
        let r = recipe(3, 20, vec![line(material("a", 480.0, 900.0), 210.0)]);
        let settings = CostSettings::default();
        let engine = CostCalculationEngine::new();

        let first = engine.compute_breakdown(&r, &settings).unwrap();
        let second = engine.compute_breakdown(&r, &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_margin_is_echoed_not_derived() {
        let r = recipe(3, 0, vec![line(material("a", 100.0, 3.0), 1.0)]);
        let breakdown = CostCalculationEngine::new()
            .compute_breakdown(&r, &no_labor_no_overhead(33.333))
            .unwrap();

        assert_eq!(breakdown.profit_margin, 33.33);
    }

    // ==========================================
    // Error cases
    // ==========================================

    #[test]
    fn test_zero_yield_rejected() {
        let r = recipe(0, 10, vec![]);
        let err = CostCalculationEngine::new()
            .compute_breakdown(&r, &CostSettings::default())
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidYield {
                recipe_id: "r-1".to_string(),
                yield_count: 0
            }
        );
    }

    #[test]
    fn test_negative_labor_time_rejected() {
        let r = recipe(1, -5, vec![]);
        let err = CostCalculationEngine::new()
            .compute_breakdown(&r, &CostSettings::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidLaborTime { minutes: -5, .. }));
    }

    #[test]
    fn test_margin_of_100_is_division_by_zero() {
        let r = recipe(1, 10, vec![]);
        let err = CostCalculationEngine::new()
            .compute_breakdown(&r, &no_labor_no_overhead(100.0))
            .unwrap_err();
        assert_eq!(err, EngineError::DivisionByZero);
    }

    #[test]
    fn test_margin_out_of_range_rejected() {
        assert!(matches!(validate_margin(120.0), Err(EngineError::InvalidMargin { .. })));
        assert!(matches!(validate_margin(-1.0), Err(EngineError::InvalidMargin { .. })));
        assert!(matches!(validate_margin(f64::NAN), Err(EngineError::InvalidMargin { .. })));
        assert!(validate_margin(0.0).is_ok());
        assert!(validate_margin(99.99).is_ok());
    }

    #[test]
    fn test_zero_package_size_rejected() {
        let r = recipe(1, 0, vec![line(material("broken", 100.0, 0.0), 10.0)]);
        let err = CostCalculationEngine::new()
            .compute_breakdown(&r, &CostSettings::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPackageSize { .. }));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let r = recipe(1, 0, vec![line(material("a", 100.0, 10.0), -1.0)]);
        let err = CostCalculationEngine::new()
            .compute_breakdown(&r, &CostSettings::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidQuantity { .. }));
    }
}
