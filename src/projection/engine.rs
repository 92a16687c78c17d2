//! Core projection engine: year-by-year rental cash flows and property value

use super::cashflows::{ProjectionResult, YearRecord};
use super::metrics::{aggregate, SteadyState};
use super::state::ProjectionState;
use crate::error::ProjectionError;
use crate::inputs::{ProjectionInputs, RawInputs};
use log::debug;
use serde::{Deserialize, Serialize};

/// Nights per year; no leap-year adjustment
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Configuration for a projection run
///
/// The two deductions are independent switches: some callers price income net of
/// marketplace commission, others apply scenario sensitivity, some both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionConfig {
    /// Deduct `ota_commission_pct` from gross rent when the inputs carry one
    pub apply_ota_commission: bool,

    /// Scale rental income by the scenario multiplier
    pub apply_scenario_multiplier: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            apply_ota_commission: true,
            apply_scenario_multiplier: true,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Normalize a raw parameter bag, then project it
    pub fn project_raw(&self, raw: &RawInputs) -> Result<ProjectionResult, ProjectionError> {
        let inputs = raw.normalize()?;
        self.project(&inputs)
    }

    /// Run the full projection: simulate every year, then aggregate the metrics
    pub fn project(&self, inputs: &ProjectionInputs) -> Result<ProjectionResult, ProjectionError> {
        inputs.validate()?;

        debug!(
            "projecting {} years, scenario {}, total investment {:.2}",
            inputs.investment_period_years,
            inputs.scenario,
            inputs.total_investment()
        );

        let records = self.simulate(inputs);
        aggregate(
            &records,
            inputs.total_investment(),
            self.steady_state(inputs),
            inputs.scenario,
        )
    }

    /// Unrounded yearly rows for years 1 through the investment period
    pub fn simulate(&self, inputs: &ProjectionInputs) -> Vec<YearRecord> {
        (1..=inputs.investment_period_years)
            .scan(
                ProjectionState::initial(inputs.total_investment()),
                |state, year| {
                    let record = self.project_year(inputs, year, state);
                    *state = ProjectionState::after(&record);
                    Some(record)
                },
            )
            .collect()
    }

    /// Compute a single year from the state at the end of the previous one
    pub fn project_year(
        &self,
        inputs: &ProjectionInputs,
        year: u32,
        prior: &ProjectionState,
    ) -> YearRecord {
        let rental_income = self.rental_income(inputs, year);
        let operating_expenses = rental_income * inputs.operating_expense_pct() / 100.0;
        let profit_before_tax = rental_income - operating_expenses;
        // Tax is levied on profit, never on gross rent
        let taxes = profit_before_tax * inputs.annual_tax_pct / 100.0;
        let net_profit = profit_before_tax - taxes;

        let property_value = prior.property_value * (1.0 + inputs.appreciation_pct(year) / 100.0);

        YearRecord {
            year,
            rental_income,
            operating_expenses,
            profit_before_tax,
            taxes,
            net_profit,
            accumulated_profit: prior.accumulated_profit + net_profit,
            property_value,
        }
    }

    /// Rent earned in `year`: zero until operation starts, then compounding growth
    ///
    /// The first operating year earns the base income; growth is applied from the
    /// second operating year on.
    pub fn rental_income(&self, inputs: &ProjectionInputs, year: u32) -> f64 {
        if year <= inputs.operation_start_year {
            return 0.0;
        }
        let growth_years = (year - 1 - inputs.operation_start_year) as i32;
        let growth = (1.0 + inputs.rent_growth_rate_pct / 100.0).powi(growth_years);
        self.base_income(inputs) * growth * self.scenario_multiplier(inputs)
    }

    /// Gross rent for a full year at the nightly rate and occupancy, net of commission
    pub fn base_income(&self, inputs: &ProjectionInputs) -> f64 {
        let gross = inputs.daily_rate * DAYS_PER_YEAR * (inputs.occupancy_rate_pct / 100.0);
        match inputs.ota_commission_pct {
            Some(pct) if self.config.apply_ota_commission => gross * (1.0 - pct / 100.0),
            _ => gross,
        }
    }

    pub fn scenario_multiplier(&self, inputs: &ProjectionInputs) -> f64 {
        if self.config.apply_scenario_multiplier {
            inputs.scenario.multiplier()
        } else {
            1.0
        }
    }

    /// Income and expenses of the first operating year, before any growth
    fn steady_state(&self, inputs: &ProjectionInputs) -> SteadyState {
        let annual_rental_income = self.base_income(inputs) * self.scenario_multiplier(inputs);
        SteadyState {
            annual_rental_income,
            annual_expenses: annual_rental_income * inputs.operating_expense_pct() / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::Scenario;
    use approx::assert_relative_eq;

    fn test_inputs() -> ProjectionInputs {
        ProjectionInputs::builder()
            .purchase_price(100_000.0)
            .investment_period_years(1)
            .daily_rate(100.0)
            .occupancy_rate_pct(50.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_base_income() {
        let engine = ProjectionEngine::default();
        assert_relative_eq!(engine.base_income(&test_inputs()), 18_250.0);
    }

    #[test]
    fn test_ota_commission_switch() {
        let inputs = ProjectionInputs {
            ota_commission_pct: Some(15.0),
            ..test_inputs()
        };

        let with_commission = ProjectionEngine::default();
        assert_relative_eq!(with_commission.base_income(&inputs), 15_512.5);

        let without = ProjectionEngine::new(ProjectionConfig {
            apply_ota_commission: false,
            ..Default::default()
        });
        assert_relative_eq!(without.base_income(&inputs), 18_250.0);
    }

    #[test]
    fn test_scenario_multiplier_switch() {
        let inputs = test_inputs().with_scenario(Scenario::Optimistic);

        let engine = ProjectionEngine::default();
        assert_relative_eq!(engine.rental_income(&inputs, 1), 23_725.0);

        let flat = ProjectionEngine::new(ProjectionConfig {
            apply_scenario_multiplier: false,
            ..Default::default()
        });
        assert_relative_eq!(flat.rental_income(&inputs, 1), 18_250.0);
    }

    #[test]
    fn test_income_starts_after_operation_year() {
        let inputs = ProjectionInputs {
            operation_start_year: 2,
            rent_growth_rate_pct: 10.0,
            investment_period_years: 5,
            ..test_inputs()
        };
        let engine = ProjectionEngine::default();

        assert_eq!(engine.rental_income(&inputs, 1), 0.0);
        assert_eq!(engine.rental_income(&inputs, 2), 0.0);
        // First operating year earns base income without growth
        assert_relative_eq!(engine.rental_income(&inputs, 3), 18_250.0);
        assert_relative_eq!(engine.rental_income(&inputs, 4), 20_075.0);
        assert_relative_eq!(engine.rental_income(&inputs, 5), 22_082.5, epsilon = 1e-6);
    }

    #[test]
    fn test_project_year_in_isolation() {
        let inputs = ProjectionInputs {
            maintenance_fees_pct: 5.0,
            utility_bills_pct: 3.0,
            property_management_fee_pct: 12.0,
            annual_tax_pct: 10.0,
            appreciation_year2_pct: 4.0,
            ..test_inputs()
        };
        let engine = ProjectionEngine::default();
        let prior = ProjectionState {
            year: 1,
            accumulated_profit: 1_000.0,
            property_value: 105_000.0,
        };

        let record = engine.project_year(&inputs, 2, &prior);
        assert_eq!(record.year, 2);
        assert_relative_eq!(record.rental_income, 18_250.0);
        assert_relative_eq!(record.operating_expenses, 3_650.0);
        assert_relative_eq!(record.profit_before_tax, 14_600.0);
        assert_relative_eq!(record.taxes, 1_460.0);
        assert_relative_eq!(record.net_profit, 13_140.0);
        assert_relative_eq!(record.accumulated_profit, 14_140.0);
        assert_relative_eq!(record.property_value, 109_200.0);
    }

    #[test]
    fn test_simulate_compounds_appreciation_then_stays_flat() {
        let inputs = ProjectionInputs {
            investment_period_years: 6,
            appreciation_year1_pct: 10.0,
            appreciation_year2_pct: 10.0,
            appreciation_year3_pct: -5.0,
            ..test_inputs()
        };
        let records = ProjectionEngine::default().simulate(&inputs);

        assert_eq!(records.len(), 6);
        assert_relative_eq!(records[0].property_value, 110_000.0, epsilon = 1e-6);
        assert_relative_eq!(records[1].property_value, 121_000.0, epsilon = 1e-6);
        assert_relative_eq!(records[2].property_value, 114_950.0, epsilon = 1e-6);
        for pair in records[2..].windows(2) {
            assert_eq!(pair[1].property_value, pair[0].property_value);
        }
    }

    #[test]
    fn test_simulate_accumulates_profit() {
        let inputs = ProjectionInputs {
            investment_period_years: 4,
            rent_growth_rate_pct: 5.0,
            ..test_inputs()
        };
        let records = ProjectionEngine::default().simulate(&inputs);

        let mut running = 0.0;
        for (index, record) in records.iter().enumerate() {
            running += record.net_profit;
            assert_eq!(record.year, index as u32 + 1);
            assert_relative_eq!(record.accumulated_profit, running);
        }
    }

    #[test]
    fn test_project_rejects_invalid_typed_inputs() {
        let inputs = ProjectionInputs {
            daily_rate: -10.0,
            ..test_inputs()
        };
        let err = ProjectionEngine::default().project(&inputs).unwrap_err();
        assert!(matches!(err, ProjectionError::Validation(_)));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ProjectionConfig =
            serde_json::from_str(r#"{"applyOtaCommission": false}"#).unwrap();
        assert!(!config.apply_ota_commission);
        assert!(config.apply_scenario_multiplier);
    }
}
