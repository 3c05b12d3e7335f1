// ==========================================
// Bakery Cost Calculator - reporting aggregator
// ==========================================
// Runs the cost engine over every recipe and folds the
// results into summary statistics.
// ==========================================

use crate::domain::cost::{CostBreakdown, CostReport, ReportSummary};
use crate::domain::recipe::ResolvedRecipe;
use crate::domain::settings::CostSettings;
use crate::engine::cost_engine::{validate_margin, CostCalculationEngine};
use crate::engine::error::EngineResult;
use crate::engine::rounding::round_currency;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAggregator {
    engine: CostCalculationEngine,
}

impl ReportAggregator {
    pub fn new(engine: CostCalculationEngine) -> Self {
        Self { engine }
    }

    /// Compute every breakdown plus the summary.
    ///
    /// The first failing recipe aborts the report.
    #[instrument(skip(self, recipes, settings), fields(count = recipes.len()))]
    pub fn compute_report(
        &self,
        recipes: &[ResolvedRecipe],
        settings: &CostSettings,
    ) -> EngineResult<CostReport> {
        validate_margin(settings.target_profit_margin)?;

        let per_recipe = recipes
            .iter()
            .map(|recipe| self.engine.compute_breakdown(recipe, settings))
            .collect::<EngineResult<Vec<_>>>()?;

        let summary = summarize(&per_recipe);
        info!(
            count = summary.count,
            average_unit_cost = summary.average_unit_cost,
            "cost report computed"
        );

        Ok(CostReport {
            per_recipe,
            summary,
        })
    }
}

/// Fold breakdowns into a summary.
///
/// Averages are means of the rounded per-recipe values, 0 when empty.
/// Highest/lowest keep the first breakdown on ties.
pub fn summarize(breakdowns: &[CostBreakdown]) -> ReportSummary {
    if breakdowns.is_empty() {
        return ReportSummary::empty();
    }

    let count = breakdowns.len();
    let n = count as f64;
    let average_unit_cost = breakdowns.iter().map(|b| b.unit_cost).sum::<f64>() / n;
    let average_profit_margin = breakdowns.iter().map(|b| b.profit_margin).sum::<f64>() / n;

    let mut highest = &breakdowns[0];
    let mut lowest = &breakdowns[0];
    for breakdown in &breakdowns[1..] {
        if breakdown.profit_margin > highest.profit_margin {
            highest = breakdown;
        }
        if breakdown.profit_margin < lowest.profit_margin {
            lowest = breakdown;
        }
    }

    ReportSummary {
        count,
        average_unit_cost: round_currency(average_unit_cost),
        average_profit_margin: round_currency(average_profit_margin),
        highest: Some(highest.clone()),
        lowest: Some(lowest.clone()),
    }
}
