//! Yearly cash-flow rows and the summary projection result

use crate::inputs::Scenario;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cash flows and running totals for one simulated year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    /// 1-based year index
    pub year: u32,

    pub rental_income: f64,
    pub operating_expenses: f64,
    pub profit_before_tax: f64,
    pub taxes: f64,
    pub net_profit: f64,

    /// Sum of `net_profit` from year 1 through this year
    pub accumulated_profit: f64,

    /// Asset value after this year's appreciation
    pub property_value: f64,
}

impl YearRecord {
    /// Copy with every monetary value rounded to whole currency units
    pub fn rounded(&self) -> Self {
        Self {
            year: self.year,
            rental_income: self.rental_income.round(),
            operating_expenses: self.operating_expenses.round(),
            profit_before_tax: self.profit_before_tax.round(),
            taxes: self.taxes.round(),
            net_profit: self.net_profit.round(),
            accumulated_profit: self.accumulated_profit.round(),
            property_value: self.property_value.round(),
        }
    }
}

/// Years needed for average net profit to recover the investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaybackPeriod {
    Years(f64),
    /// Average net profit is zero or negative; the investment is never recovered
    Unreachable,
}

impl PaybackPeriod {
    pub fn years(&self) -> Option<f64> {
        match self {
            PaybackPeriod::Years(years) => Some(*years),
            PaybackPeriod::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, PaybackPeriod::Years(_))
    }
}

impl fmt::Display for PaybackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaybackPeriod::Years(years) => write!(f, "{:.2} years", years),
            PaybackPeriod::Unreachable => f.write_str("never"),
        }
    }
}

/// Non-fatal conditions detected while aggregating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ProjectionWarning {
    /// Average annual net profit is not positive, so there is no payback period
    #[serde(rename_all = "camelCase")]
    NonPositiveProfit { annual_net_profit: f64 },
}

impl fmt::Display for ProjectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionWarning::NonPositiveProfit { annual_net_profit } => write!(
                f,
                "average annual net profit is {:.2}; the investment is never paid back",
                annual_net_profit
            ),
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub scenario: Scenario,

    /// Sum of acquisition costs
    pub total_investment: f64,

    /// Steady-state rental income of the first operating year, scenario-adjusted
    pub annual_rental_income: f64,

    /// Operating expenses on `annual_rental_income`
    pub annual_expenses: f64,

    /// Mean net profit over the horizon
    pub annual_net_profit: f64,

    /// Mean annual return on investment, in percent
    pub roi: f64,

    /// Cumulative return including appreciation, in percent
    pub total_roi: f64,

    pub payback_period: PaybackPeriod,

    /// Net profit summed over the horizon
    pub accumulated_profit: f64,

    pub final_property_value: f64,
    pub total_appreciation: f64,
    pub total_return_with_appreciation: f64,

    /// Yearly rows, rounded to whole currency units
    pub graph_data: Vec<YearRecord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ProjectionWarning>,
}

impl ProjectionResult {
    /// Number of simulated years
    pub fn years(&self) -> usize {
        self.graph_data.len()
    }

    /// True when the result carries a degenerate-profit warning
    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }
}
