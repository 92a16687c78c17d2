//! Raw form parameters and their normalization into [`ProjectionInputs`]

use super::{
    check_finite, check_non_negative, check_percentage, check_signed_pct, ProjectionInputs,
    Scenario, DEFAULT_INVESTMENT_PERIOD_YEARS, MAX_INVESTMENT_PERIOD_YEARS,
};
use crate::error::{InputField, ValidationError};
use log::debug;
use serde::{Deserialize, Serialize};

/// A single user-entered value: either already numeric or still text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl RawValue {
    fn display(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

/// Parameter bag as submitted by a form; any field may be missing or blank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInputs {
    pub purchase_price: Option<RawValue>,
    pub renovation_costs: Option<RawValue>,
    pub legal_fees: Option<RawValue>,
    pub additional_expenses: Option<RawValue>,
    pub investment_period_years: Option<RawValue>,
    pub daily_rate: Option<RawValue>,
    pub occupancy_rate_pct: Option<RawValue>,
    pub ota_commission_pct: Option<RawValue>,
    pub rent_growth_rate_pct: Option<RawValue>,
    pub operation_start_year: Option<RawValue>,
    pub maintenance_fees_pct: Option<RawValue>,
    pub utility_bills_pct: Option<RawValue>,
    pub property_management_fee_pct: Option<RawValue>,
    pub annual_tax_pct: Option<RawValue>,
    pub appreciation_year1_pct: Option<RawValue>,
    pub appreciation_year2_pct: Option<RawValue>,
    pub appreciation_year3_pct: Option<RawValue>,
    pub scenario: Option<String>,
}

impl RawInputs {
    /// Coerce every field, apply defaults and range checks
    pub fn normalize(&self) -> Result<ProjectionInputs, ValidationError> {
        let inputs = ProjectionInputs {
            purchase_price: amount(InputField::PurchasePrice, &self.purchase_price)?,
            renovation_costs: amount(InputField::RenovationCosts, &self.renovation_costs)?,
            legal_fees: amount(InputField::LegalFees, &self.legal_fees)?,
            additional_expenses: amount(InputField::AdditionalExpenses, &self.additional_expenses)?,
            investment_period_years: investment_period(&self.investment_period_years)?,
            daily_rate: amount(InputField::DailyRate, &self.daily_rate)?,
            occupancy_rate_pct: percentage(InputField::OccupancyRatePct, &self.occupancy_rate_pct)?,
            ota_commission_pct: number(InputField::OtaCommissionPct, &self.ota_commission_pct)?
                .map(|pct| check_percentage(InputField::OtaCommissionPct, pct))
                .transpose()?,
            rent_growth_rate_pct: signed(InputField::RentGrowthRatePct, &self.rent_growth_rate_pct)?,
            operation_start_year: operation_start_year(&self.operation_start_year)?,
            maintenance_fees_pct: amount(InputField::MaintenanceFeesPct, &self.maintenance_fees_pct)?,
            utility_bills_pct: amount(InputField::UtilityBillsPct, &self.utility_bills_pct)?,
            property_management_fee_pct: amount(
                InputField::PropertyManagementFeePct,
                &self.property_management_fee_pct,
            )?,
            annual_tax_pct: amount(InputField::AnnualTaxPct, &self.annual_tax_pct)?,
            appreciation_year1_pct: signed(InputField::AppreciationYear1Pct, &self.appreciation_year1_pct)?,
            appreciation_year2_pct: signed(InputField::AppreciationYear2Pct, &self.appreciation_year2_pct)?,
            appreciation_year3_pct: signed(InputField::AppreciationYear3Pct, &self.appreciation_year3_pct)?,
            scenario: scenario(self.scenario.as_deref()),
        };

        inputs.validate()?;
        Ok(inputs)
    }
}

/// Parse a raw value; missing and blank both mean "not given"
fn number(field: InputField, value: &Option<RawValue>) -> Result<Option<f64>, ValidationError> {
    let parsed = match value {
        None => return Ok(None),
        Some(RawValue::Number(n)) => *n,
        Some(RawValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>().map_err(|_| ValidationError::NotNumeric {
                field,
                raw: text.to_string(),
            })?
        }
    };
    check_finite(field, parsed).map(Some)
}

fn amount(field: InputField, value: &Option<RawValue>) -> Result<f64, ValidationError> {
    check_non_negative(field, number(field, value)?.unwrap_or(0.0))
}

fn percentage(field: InputField, value: &Option<RawValue>) -> Result<f64, ValidationError> {
    check_percentage(field, number(field, value)?.unwrap_or(0.0))
}

fn signed(field: InputField, value: &Option<RawValue>) -> Result<f64, ValidationError> {
    check_signed_pct(field, number(field, value)?.unwrap_or(0.0))
}

fn whole(field: InputField, value: f64, raw: &Option<RawValue>) -> Result<u32, ValidationError> {
    if value.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger {
            field,
            raw: raw.as_ref().map(RawValue::display).unwrap_or_default(),
        });
    }
    if value > u32::MAX as f64 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: u32::MAX as f64,
        });
    }
    Ok(value as u32)
}

/// Missing or non-positive horizons fall back to the default
fn investment_period(raw: &Option<RawValue>) -> Result<u32, ValidationError> {
    let field = InputField::InvestmentPeriodYears;
    match number(field, raw)? {
        Some(years) if years > 0.0 => {
            let years = whole(field, years, raw)?;
            if years > MAX_INVESTMENT_PERIOD_YEARS {
                return Err(ValidationError::OutOfRange {
                    field,
                    value: years as f64,
                    min: 1.0,
                    max: f64::from(MAX_INVESTMENT_PERIOD_YEARS),
                });
            }
            Ok(years)
        }
        _ => {
            debug!("investment period missing or non-positive, using {} years", DEFAULT_INVESTMENT_PERIOD_YEARS);
            Ok(DEFAULT_INVESTMENT_PERIOD_YEARS)
        }
    }
}

fn operation_start_year(raw: &Option<RawValue>) -> Result<u32, ValidationError> {
    let field = InputField::OperationStartYear;
    match number(field, raw)? {
        Some(year) => whole(field, check_non_negative(field, year)?, raw),
        None => Ok(0),
    }
}

fn scenario(raw: Option<&str>) -> Scenario {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Scenario::Base,
        Some(name) => name.parse().unwrap_or_else(|_| {
            debug!("unrecognized scenario '{}', falling back to base", name);
            Scenario::Base
        }),
    }
}
