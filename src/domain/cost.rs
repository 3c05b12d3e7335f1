// ==========================================
// Bakery Cost Calculator - cost results
// ==========================================
// Derived values, never persisted
// ==========================================

use crate::domain::types::MaterialUnit;
use serde::{Deserialize, Serialize};

// ==========================================
// MaterialLineCost - one line of a breakdown
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLineCost {
    pub material_id: String,
    pub material_name: String,
    pub quantity: f64,
    pub unit: MaterialUnit,
    pub cost: f64, // 2 decimals
}

// ==========================================
// CostBreakdown - full cost decomposition of one recipe
// ==========================================
// Currency fields are rounded to 2 decimals, suggested_price to 0.
// profit_margin echoes the configured target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub recipe_id: String,
    pub recipe_name: String,
    #[serde(rename = "yield")]
    pub yield_count: i64,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub total_cost: f64,
    pub unit_cost: f64,
    pub suggested_price: f64,
    pub profit_margin: f64,
    pub material_lines: Vec<MaterialLineCost>,
}

// ==========================================
// CostReport - breakdowns of all recipes plus summary
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReport {
    pub per_recipe: Vec<CostBreakdown>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub count: usize,
    pub average_unit_cost: f64,
    pub average_profit_margin: f64,
    pub highest: Option<CostBreakdown>, // max by profit_margin
    pub lowest: Option<CostBreakdown>,  // min by profit_margin
}

impl ReportSummary {
    pub fn empty() -> Self {
        Self {
            count: 0,
            average_unit_cost: 0.0,
            average_profit_margin: 0.0,
            highest: None,
            lowest: None,
        }
    }
}
