//! Error types for input normalization and projection runs

use std::fmt;
use thiserror::Error;

/// Names every user-facing input so validation errors can point at the offending field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    PurchasePrice,
    RenovationCosts,
    LegalFees,
    AdditionalExpenses,
    InvestmentPeriodYears,
    DailyRate,
    OccupancyRatePct,
    OtaCommissionPct,
    RentGrowthRatePct,
    OperationStartYear,
    MaintenanceFeesPct,
    UtilityBillsPct,
    PropertyManagementFeePct,
    AnnualTaxPct,
    AppreciationYear1Pct,
    AppreciationYear2Pct,
    AppreciationYear3Pct,
    /// Sum of the four acquisition cost fields
    TotalInvestment,
}

impl InputField {
    /// Field name as it appears in form payloads and CSV headers
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::PurchasePrice => "purchasePrice",
            InputField::RenovationCosts => "renovationCosts",
            InputField::LegalFees => "legalFees",
            InputField::AdditionalExpenses => "additionalExpenses",
            InputField::InvestmentPeriodYears => "investmentPeriodYears",
            InputField::DailyRate => "dailyRate",
            InputField::OccupancyRatePct => "occupancyRatePct",
            InputField::OtaCommissionPct => "otaCommissionPct",
            InputField::RentGrowthRatePct => "rentGrowthRatePct",
            InputField::OperationStartYear => "operationStartYear",
            InputField::MaintenanceFeesPct => "maintenanceFeesPct",
            InputField::UtilityBillsPct => "utilityBillsPct",
            InputField::PropertyManagementFeePct => "propertyManagementFeePct",
            InputField::AnnualTaxPct => "annualTaxPct",
            InputField::AppreciationYear1Pct => "appreciationYear1Pct",
            InputField::AppreciationYear2Pct => "appreciationYear2Pct",
            InputField::AppreciationYear3Pct => "appreciationYear3Pct",
            InputField::TotalInvestment => "totalInvestment",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected input value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: negative values are not allowed (got {value})")]
    NegativeValue { field: InputField, value: f64 },

    #[error("{field}: must be greater than zero (got {value})")]
    NotPositive { field: InputField, value: f64 },

    #[error("{field}: '{raw}' is not a number")]
    NotNumeric { field: InputField, raw: String },

    #[error("{field}: expected a whole number, got '{raw}'")]
    NotAnInteger { field: InputField, raw: String },

    #[error("{field}: {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: InputField,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    /// The input that failed validation
    pub fn field(&self) -> InputField {
        match self {
            ValidationError::NegativeValue { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::NotNumeric { field, .. }
            | ValidationError::NotAnInteger { field, .. }
            | ValidationError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Hard failure of a projection run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("investment period is zero years; no yearly metrics can be aggregated")]
    EmptyHorizon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_field() {
        let err = ValidationError::NegativeValue {
            field: InputField::DailyRate,
            value: -5.0,
        };
        assert_eq!(err.field(), InputField::DailyRate);
        assert_eq!(
            err.to_string(),
            "dailyRate: negative values are not allowed (got -5)"
        );
    }

    #[test]
    fn test_validation_converts_into_projection_error() {
        let err: ProjectionError = ValidationError::NotNumeric {
            field: InputField::LegalFees,
            raw: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, ProjectionError::Validation(_)));
        assert!(err.to_string().contains("legalFees"));
    }
}
