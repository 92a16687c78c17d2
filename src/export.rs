//! CSV export of yearly rows and per-property summaries

use crate::inputs::Scenario;
use crate::projection::{ProjectionResult, YearRecord};
use serde::Serialize;
use std::io::Write;

/// One summary line per projected property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub property_id: String,
    pub scenario: Scenario,
    pub years: usize,
    pub total_investment: f64,
    pub annual_rental_income: f64,
    pub annual_expenses: f64,
    pub annual_net_profit: f64,
    pub roi: f64,
    pub total_roi: f64,
    /// Empty when the payback period is unreachable
    pub payback_years: Option<f64>,
    pub accumulated_profit: f64,
    pub final_property_value: f64,
    pub total_appreciation: f64,
    pub total_return_with_appreciation: f64,
}

impl SummaryRow {
    /// Flatten a result; percentages and payback are rounded to 2 decimals
    pub fn from_result(property_id: &str, result: &ProjectionResult) -> Self {
        Self {
            property_id: property_id.to_string(),
            scenario: result.scenario,
            years: result.years(),
            total_investment: result.total_investment,
            annual_rental_income: result.annual_rental_income,
            annual_expenses: result.annual_expenses,
            annual_net_profit: result.annual_net_profit,
            roi: round2(result.roi),
            total_roi: round2(result.total_roi),
            payback_years: result.payback_period.years().map(round2),
            accumulated_profit: result.accumulated_profit,
            final_property_value: result.final_property_value,
            total_appreciation: result.total_appreciation,
            total_return_with_appreciation: result.total_return_with_appreciation,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Write yearly rows with a camelCase header
pub fn write_year_records<W: Write>(writer: W, records: &[YearRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write one summary line per property
pub fn write_summaries<W: Write>(writer: W, rows: &[SummaryRow]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
