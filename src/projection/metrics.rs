//! Reduce the yearly rows into summary investment metrics

use super::cashflows::{PaybackPeriod, ProjectionResult, ProjectionWarning, YearRecord};
use crate::error::{InputField, ProjectionError, ValidationError};
use crate::inputs::Scenario;
use log::warn;

/// Scenario-adjusted income and expenses of a normal operating year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteadyState {
    pub annual_rental_income: f64,
    pub annual_expenses: f64,
}

/// Aggregate unrounded yearly rows into a [`ProjectionResult`]
///
/// Metrics are computed from the unrounded values; only the reported monetary
/// totals and the `graph_data` rows are rounded to whole currency units.
pub fn aggregate(
    records: &[YearRecord],
    total_investment: f64,
    steady_state: SteadyState,
    scenario: Scenario,
) -> Result<ProjectionResult, ProjectionError> {
    let last = records.last().ok_or(ProjectionError::EmptyHorizon)?;
    // ROI and payback divide by it
    if total_investment <= 0.0 {
        return Err(ValidationError::NotPositive {
            field: InputField::TotalInvestment,
            value: total_investment,
        }
        .into());
    }

    let total_net_profit: f64 = records.iter().map(|r| r.net_profit).sum();
    let annual_net_profit = total_net_profit / records.len() as f64;
    let roi = annual_net_profit / total_investment * 100.0;

    let accumulated_profit = last.accumulated_profit;
    let final_property_value = last.property_value;
    let total_appreciation = final_property_value - total_investment;
    let total_return_with_appreciation = accumulated_profit + total_appreciation;
    let total_roi = total_return_with_appreciation / total_investment * 100.0;

    let mut warnings = Vec::new();
    let payback_period = if annual_net_profit > 0.0 {
        PaybackPeriod::Years(total_investment / annual_net_profit)
    } else {
        warn!(
            "average annual net profit is {:.2}; payback period is unreachable",
            annual_net_profit
        );
        warnings.push(ProjectionWarning::NonPositiveProfit {
            annual_net_profit: annual_net_profit.round(),
        });
        PaybackPeriod::Unreachable
    };

    Ok(ProjectionResult {
        scenario,
        total_investment: total_investment.round(),
        annual_rental_income: steady_state.annual_rental_income.round(),
        annual_expenses: steady_state.annual_expenses.round(),
        annual_net_profit: annual_net_profit.round(),
        roi,
        total_roi,
        payback_period,
        accumulated_profit: accumulated_profit.round(),
        final_property_value: final_property_value.round(),
        total_appreciation: total_appreciation.round(),
        total_return_with_appreciation: total_return_with_appreciation.round(),
        graph_data: records.iter().map(YearRecord::rounded).collect(),
        warnings,
    })
}
