//! Load stored projection inputs from CSV, one property per row
//!
//! Column headers use the same camelCase names as the form payload, plus a
//! leading `propertyId`. Every value column is optional; blanks take the
//! normalizer's defaults.

use super::{ProjectionInputs, RawInputs, RawValue};
use crate::error::ValidationError;
use csv::Reader;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading stored inputs
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row} (property '{property_id}'): {source}")]
    Invalid {
        row: usize,
        property_id: String,
        #[source]
        source: ValidationError,
    },
}

/// Normalized inputs for one stored property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInputs {
    pub property_id: String,
    pub inputs: ProjectionInputs,
}

/// Raw CSV row, every value still text
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    property_id: String,
    purchase_price: Option<String>,
    renovation_costs: Option<String>,
    legal_fees: Option<String>,
    additional_expenses: Option<String>,
    investment_period_years: Option<String>,
    daily_rate: Option<String>,
    occupancy_rate_pct: Option<String>,
    ota_commission_pct: Option<String>,
    rent_growth_rate_pct: Option<String>,
    operation_start_year: Option<String>,
    maintenance_fees_pct: Option<String>,
    utility_bills_pct: Option<String>,
    property_management_fee_pct: Option<String>,
    annual_tax_pct: Option<String>,
    appreciation_year1_pct: Option<String>,
    appreciation_year2_pct: Option<String>,
    appreciation_year3_pct: Option<String>,
    scenario: Option<String>,
}

impl CsvRow {
    fn to_property(self, row: usize) -> Result<PropertyInputs, LoadError> {
        let raw = RawInputs {
            purchase_price: self.purchase_price.map(RawValue::Text),
            renovation_costs: self.renovation_costs.map(RawValue::Text),
            legal_fees: self.legal_fees.map(RawValue::Text),
            additional_expenses: self.additional_expenses.map(RawValue::Text),
            investment_period_years: self.investment_period_years.map(RawValue::Text),
            daily_rate: self.daily_rate.map(RawValue::Text),
            occupancy_rate_pct: self.occupancy_rate_pct.map(RawValue::Text),
            ota_commission_pct: self.ota_commission_pct.map(RawValue::Text),
            rent_growth_rate_pct: self.rent_growth_rate_pct.map(RawValue::Text),
            operation_start_year: self.operation_start_year.map(RawValue::Text),
            maintenance_fees_pct: self.maintenance_fees_pct.map(RawValue::Text),
            utility_bills_pct: self.utility_bills_pct.map(RawValue::Text),
            property_management_fee_pct: self.property_management_fee_pct.map(RawValue::Text),
            annual_tax_pct: self.annual_tax_pct.map(RawValue::Text),
            appreciation_year1_pct: self.appreciation_year1_pct.map(RawValue::Text),
            appreciation_year2_pct: self.appreciation_year2_pct.map(RawValue::Text),
            appreciation_year3_pct: self.appreciation_year3_pct.map(RawValue::Text),
            scenario: self.scenario,
        };

        let inputs = raw.normalize().map_err(|source| LoadError::Invalid {
            row,
            property_id: self.property_id.clone(),
            source,
        })?;

        Ok(PropertyInputs {
            property_id: self.property_id,
            inputs,
        })
    }
}

/// Load all properties from a CSV file
pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyInputs>, LoadError> {
    read_rows(Reader::from_path(path)?)
}

/// Load properties from any reader (e.g., string buffer, network stream)
pub fn load_properties_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PropertyInputs>, LoadError> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<PropertyInputs>, LoadError> {
    let mut properties = Vec::new();

    // Row numbers are 1-based and count the header line
    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        properties.push(row.to_property(index + 2)?);
    }

    Ok(properties)
}
