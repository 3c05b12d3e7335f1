// ==========================================
// Bakery Cost Calculator - cost settings
// ==========================================
// Singleton row in cost_settings (id = 1)
// ==========================================

use serde::{Deserialize, Serialize};

pub const DEFAULT_LABOR_COST_PER_HOUR: f64 = 1000.0;
pub const DEFAULT_OVERHEAD_COST_PER_UNIT: f64 = 10.0;
pub const DEFAULT_TARGET_PROFIT_MARGIN: f64 = 30.0;

/// Global pricing parameters.
///
/// Passed by value into every engine call; nothing reads it from a global.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSettings {
    pub labor_cost_per_hour: f64,
    pub overhead_cost_per_unit: f64,
    /// Percent in [0, 100)
    pub target_profit_margin: f64,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            labor_cost_per_hour: DEFAULT_LABOR_COST_PER_HOUR,
            overhead_cost_per_unit: DEFAULT_OVERHEAD_COST_PER_UNIT,
            target_profit_margin: DEFAULT_TARGET_PROFIT_MARGIN,
        }
    }
}

impl CostSettings {
    pub fn new(labor_cost_per_hour: f64, overhead_cost_per_unit: f64, target_profit_margin: f64) -> Self {
        Self {
            labor_cost_per_hour,
            overhead_cost_per_unit,
            target_profit_margin,
        }
    }

    /// Fraction of the suggested price left after cost, `1 - margin/100`.
    pub fn cost_share(&self) -> f64 {
        1.0 - self.target_profit_margin / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CostSettings::default();
        assert_eq!(settings.labor_cost_per_hour, 1000.0);
        assert_eq!(settings.overhead_cost_per_unit, 10.0);
        assert_eq!(settings.target_profit_margin, 30.0);
        assert!((settings.cost_share() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"laborCostPerHour":1200,"overheadCostPerUnit":15,"targetProfitMargin":40}"#;
        let settings: CostSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings, CostSettings::new(1200.0, 15.0, 40.0));
    }
}
