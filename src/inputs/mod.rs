//! Projection inputs: acquisition costs, rental assumptions, expense ratios and scenario

mod raw;
pub mod loader;

pub use raw::{RawInputs, RawValue};
pub use loader::{load_properties, load_properties_from_reader, LoadError, PropertyInputs};

use crate::error::{InputField, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizon used when the investment period is missing or non-positive
pub const DEFAULT_INVESTMENT_PERIOD_YEARS: u32 = 5;

/// Longest horizon accepted; growth is compounded with an `i32` exponent
pub const MAX_INVESTMENT_PERIOD_YEARS: u32 = i32::MAX as u32;

/// Slack allowed when the expense percentages add up to exactly 100
const EXPENSE_SUM_TOLERANCE: f64 = 1e-9;

/// Lowest signed percentage accepted for growth and appreciation (a total loss)
pub const MIN_SIGNED_PCT: f64 = -100.0;

/// Qualitative sensitivity case applied to projected rental income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Pessimistic,
    #[default]
    Base,
    Optimistic,
}

/// Income multiplier per scenario, indexed by `Scenario as usize`
const SCENARIO_MULTIPLIERS: [f64; 3] = [0.7, 1.0, 1.3];

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Pessimistic, Scenario::Base, Scenario::Optimistic];

    /// Factor applied to rental income
    pub fn multiplier(self) -> f64 {
        SCENARIO_MULTIPLIERS[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Pessimistic => "pessimistic",
            Scenario::Base => "base",
            Scenario::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pessimistic" => Ok(Scenario::Pessimistic),
            "base" => Ok(Scenario::Base),
            "optimistic" => Ok(Scenario::Optimistic),
            other => Err(format!("unknown scenario: {}", other)),
        }
    }
}

/// Validated, fully-populated projection parameters
///
/// Monetary values share one currency unit. Percentages are whole numbers (`8.0` = 8%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInputs {
    // Acquisition costs
    pub purchase_price: f64,
    pub renovation_costs: f64,
    pub legal_fees: f64,
    pub additional_expenses: f64,

    /// Number of simulated years
    pub investment_period_years: u32,

    // Rental income
    pub daily_rate: f64,
    pub occupancy_rate_pct: f64,
    /// Marketplace commission taken off gross rent; `None` means no deduction
    pub ota_commission_pct: Option<f64>,
    pub rent_growth_rate_pct: f64,
    /// Years up to and including this one earn no rent
    pub operation_start_year: u32,

    // Operating expenses, as a share of rental income
    pub maintenance_fees_pct: f64,
    pub utility_bills_pct: f64,
    pub property_management_fee_pct: f64,

    /// Applied to profit before tax
    pub annual_tax_pct: f64,

    // Appreciation, each applied only in its own year
    pub appreciation_year1_pct: f64,
    pub appreciation_year2_pct: f64,
    pub appreciation_year3_pct: f64,

    pub scenario: Scenario,
}

impl ProjectionInputs {
    pub fn builder() -> ProjectionInputsBuilder {
        ProjectionInputsBuilder::default()
    }

    /// Sum of the four acquisition cost fields
    pub fn total_investment(&self) -> f64 {
        self.purchase_price + self.renovation_costs + self.legal_fees + self.additional_expenses
    }

    /// Combined operating expense percentage (maintenance + utilities + management)
    pub fn operating_expense_pct(&self) -> f64 {
        self.maintenance_fees_pct + self.utility_bills_pct + self.property_management_fee_pct
    }

    /// Appreciation percentage for a 1-based year; zero outside the first three years
    pub fn appreciation_pct(&self, year: u32) -> f64 {
        match year {
            1 => self.appreciation_year1_pct,
            2 => self.appreciation_year2_pct,
            3 => self.appreciation_year3_pct,
            _ => 0.0,
        }
    }

    /// Copy of these inputs with a different scenario
    pub fn with_scenario(&self, scenario: Scenario) -> Self {
        Self {
            scenario,
            ..self.clone()
        }
    }

    /// Copy of these inputs with a different horizon
    pub fn with_investment_period(&self, years: u32) -> Self {
        Self {
            investment_period_years: years,
            ..self.clone()
        }
    }

    /// Check every amount and percentage against its allowed range
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.investment_period_years > MAX_INVESTMENT_PERIOD_YEARS {
            return Err(ValidationError::OutOfRange {
                field: InputField::InvestmentPeriodYears,
                value: self.investment_period_years as f64,
                min: 0.0,
                max: f64::from(MAX_INVESTMENT_PERIOD_YEARS),
            });
        }
        check_non_negative(InputField::PurchasePrice, self.purchase_price)?;
        check_non_negative(InputField::RenovationCosts, self.renovation_costs)?;
        check_non_negative(InputField::LegalFees, self.legal_fees)?;
        check_non_negative(InputField::AdditionalExpenses, self.additional_expenses)?;
        check_non_negative(InputField::DailyRate, self.daily_rate)?;
        check_percentage(InputField::OccupancyRatePct, self.occupancy_rate_pct)?;
        if let Some(pct) = self.ota_commission_pct {
            check_percentage(InputField::OtaCommissionPct, pct)?;
        }
        check_signed_pct(InputField::RentGrowthRatePct, self.rent_growth_rate_pct)?;
        check_percentage(InputField::MaintenanceFeesPct, self.maintenance_fees_pct)?;
        check_percentage(InputField::UtilityBillsPct, self.utility_bills_pct)?;
        check_percentage(
            InputField::PropertyManagementFeePct,
            self.property_management_fee_pct,
        )?;
        // Expenses can never exceed the income they are a share of
        if self.operating_expense_pct() > 100.0 + EXPENSE_SUM_TOLERANCE {
            let headroom = 100.0 - self.maintenance_fees_pct - self.utility_bills_pct;
            return Err(ValidationError::OutOfRange {
                field: InputField::PropertyManagementFeePct,
                value: self.property_management_fee_pct,
                min: 0.0,
                max: round_residue(headroom.max(0.0)),
            });
        }
        check_percentage(InputField::AnnualTaxPct, self.annual_tax_pct)?;
        check_signed_pct(InputField::AppreciationYear1Pct, self.appreciation_year1_pct)?;
        check_signed_pct(InputField::AppreciationYear2Pct, self.appreciation_year2_pct)?;
        check_signed_pct(InputField::AppreciationYear3Pct, self.appreciation_year3_pct)?;
        Ok(())
    }
}

/// Drops the float residue left by subtracting percentages (35.599999999999994 -> 35.6)
fn round_residue(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

pub(crate) fn check_finite(field: InputField, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotNumeric {
            field,
            raw: value.to_string(),
        })
    }
}

pub(crate) fn check_non_negative(field: InputField, value: f64) -> Result<f64, ValidationError> {
    let value = check_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field, value });
    }
    Ok(value)
}

/// 0..=100
pub(crate) fn check_percentage(field: InputField, value: f64) -> Result<f64, ValidationError> {
    let value = check_non_negative(field, value)?;
    if value > 100.0 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 100.0,
        });
    }
    Ok(value)
}

/// Signed rate; anything below -100% would flip the sign of the compounded value
pub(crate) fn check_signed_pct(field: InputField, value: f64) -> Result<f64, ValidationError> {
    let value = check_finite(field, value)?;
    if value < MIN_SIGNED_PCT {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: MIN_SIGNED_PCT,
            max: f64::INFINITY,
        });
    }
    Ok(value)
}

/// Typed construction of [`ProjectionInputs`]
///
/// Unset fields are zero, the horizon is [`DEFAULT_INVESTMENT_PERIOD_YEARS`] and the
/// scenario is `Base`. `build` runs the same range checks as the raw normalizer but
/// leaves a zero horizon alone; the engine rejects that case itself.
#[derive(Debug, Clone)]
pub struct ProjectionInputsBuilder {
    inputs: ProjectionInputs,
}

impl Default for ProjectionInputsBuilder {
    fn default() -> Self {
        Self {
            inputs: ProjectionInputs {
                purchase_price: 0.0,
                renovation_costs: 0.0,
                legal_fees: 0.0,
                additional_expenses: 0.0,
                investment_period_years: DEFAULT_INVESTMENT_PERIOD_YEARS,
                daily_rate: 0.0,
                occupancy_rate_pct: 0.0,
                ota_commission_pct: None,
                rent_growth_rate_pct: 0.0,
                operation_start_year: 0,
                maintenance_fees_pct: 0.0,
                utility_bills_pct: 0.0,
                property_management_fee_pct: 0.0,
                annual_tax_pct: 0.0,
                appreciation_year1_pct: 0.0,
                appreciation_year2_pct: 0.0,
                appreciation_year3_pct: 0.0,
                scenario: Scenario::Base,
            },
        }
    }
}

macro_rules! builder_setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, value: $ty) -> Self {
                self.inputs.$name = value;
                self
            }
        )*
    };
}

impl ProjectionInputsBuilder {
    builder_setters! {
        purchase_price: f64,
        renovation_costs: f64,
        legal_fees: f64,
        additional_expenses: f64,
        investment_period_years: u32,
        daily_rate: f64,
        occupancy_rate_pct: f64,
        rent_growth_rate_pct: f64,
        operation_start_year: u32,
        maintenance_fees_pct: f64,
        utility_bills_pct: f64,
        property_management_fee_pct: f64,
        annual_tax_pct: f64,
        appreciation_year1_pct: f64,
        appreciation_year2_pct: f64,
        appreciation_year3_pct: f64,
        scenario: Scenario,
    }

    pub fn ota_commission_pct(mut self, value: f64) -> Self {
        self.inputs.ota_commission_pct = Some(value);
        self
    }

    pub fn build(self) -> Result<ProjectionInputs, ValidationError> {
        self.inputs.validate()?;
        Ok(self.inputs)
    }
}
