use approx::{assert_abs_diff_eq, assert_relative_eq};
use property_projection::{
    InputField, PaybackPeriod, ProjectionConfig, ProjectionEngine, ProjectionError,
    ProjectionInputs, RawInputs, Scenario, ScenarioRunner, ValidationError,
};

fn simple_inputs() -> ProjectionInputs {
    ProjectionInputs::builder()
        .purchase_price(100_000.0)
        .investment_period_years(1)
        .daily_rate(100.0)
        .occupancy_rate_pct(50.0)
        .build()
        .unwrap()
}

fn full_inputs() -> ProjectionInputs {
    ProjectionInputs::builder()
        .purchase_price(240_000.0)
        .renovation_costs(18_000.0)
        .legal_fees(4_500.0)
        .additional_expenses(2_500.0)
        .investment_period_years(12)
        .daily_rate(165.0)
        .occupancy_rate_pct(68.0)
        .ota_commission_pct(15.0)
        .rent_growth_rate_pct(4.0)
        .operation_start_year(1)
        .maintenance_fees_pct(6.0)
        .utility_bills_pct(5.0)
        .property_management_fee_pct(20.0)
        .annual_tax_pct(10.0)
        .appreciation_year1_pct(8.0)
        .appreciation_year2_pct(6.0)
        .appreciation_year3_pct(4.0)
        .build()
        .unwrap()
}

#[test]
fn test_single_year_example() {
    let result = ProjectionEngine::default().project(&simple_inputs()).unwrap();

    assert_eq!(result.total_investment, 100_000.0);
    assert_eq!(result.graph_data.len(), 1);
    assert_eq!(result.graph_data[0].rental_income, 18_250.0);
    assert_eq!(result.graph_data[0].net_profit, 18_250.0);
    assert_eq!(result.annual_rental_income, 18_250.0);
    assert_eq!(result.annual_net_profit, 18_250.0);
    assert_relative_eq!(result.roi, 18.25);
    assert_abs_diff_eq!(result.payback_period.years().unwrap(), 5.48, epsilon = 0.01);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_tax_applies_to_profit() {
    let inputs = ProjectionInputs {
        annual_tax_pct: 10.0,
        ..simple_inputs()
    };
    let result = ProjectionEngine::default().project(&inputs).unwrap();

    assert_eq!(result.graph_data[0].taxes, 1_825.0);
    assert_eq!(result.graph_data[0].net_profit, 16_425.0);
}

#[test]
fn test_tax_ordering_every_year() {
    let inputs = full_inputs();
    let records = ProjectionEngine::default().simulate(&inputs);

    for record in &records {
        assert_relative_eq!(
            record.profit_before_tax,
            record.rental_income - record.operating_expenses
        );
        assert_relative_eq!(
            record.taxes,
            record.profit_before_tax * inputs.annual_tax_pct / 100.0
        );
        assert_relative_eq!(record.net_profit, record.profit_before_tax - record.taxes);
    }
}

#[test]
fn test_deterministic() {
    let engine = ProjectionEngine::default();
    let first = engine.project(&full_inputs()).unwrap();
    let second = engine.project(&full_inputs()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_horizon_length_and_total_investment() {
    let engine = ProjectionEngine::default();
    for years in [1, 3, 12, 30] {
        let inputs = full_inputs().with_investment_period(years);
        let result = engine.project(&inputs).unwrap();
        assert_eq!(result.graph_data.len(), years as usize);
        assert_eq!(result.total_investment, 265_000.0);
    }
}

#[test]
fn test_pre_operation_years_earn_nothing() {
    let inputs = ProjectionInputs {
        operation_start_year: 3,
        ..full_inputs()
    };
    let result = ProjectionEngine::default().project(&inputs).unwrap();

    for row in &result.graph_data[..3] {
        assert_eq!(row.rental_income, 0.0);
        assert_eq!(row.net_profit, 0.0);
    }
    assert!(result.graph_data[3].rental_income > 0.0);
}

#[test]
fn test_no_appreciation_after_year_three() {
    let records = ProjectionEngine::default().simulate(&full_inputs());
    for pair in records[2..].windows(2) {
        assert_eq!(pair[1].property_value / pair[0].property_value, 1.0);
    }
    assert_relative_eq!(
        records[2].property_value,
        265_000.0 * 1.08 * 1.06 * 1.04,
        max_relative = 1e-12
    );
}

#[test]
fn test_scenario_monotonicity() {
    let comparison = ScenarioRunner::new().compare_scenarios(&full_inputs()).unwrap();
    assert!(comparison.pessimistic.roi <= comparison.base.roi);
    assert!(comparison.base.roi <= comparison.optimistic.roi);
    assert!(comparison.pessimistic.total_roi <= comparison.optimistic.total_roi);
}

#[test]
fn test_final_value_and_totals_are_consistent() {
    let result = ProjectionEngine::default().project(&full_inputs()).unwrap();
    let last = result.graph_data.last().unwrap();

    assert_eq!(result.final_property_value, last.property_value);
    assert_eq!(result.accumulated_profit, last.accumulated_profit);
    assert_abs_diff_eq!(
        result.total_appreciation,
        result.final_property_value - result.total_investment,
        epsilon = 1.0
    );
    assert_abs_diff_eq!(
        result.total_return_with_appreciation,
        result.accumulated_profit + result.total_appreciation,
        epsilon = 1.0
    );
}

#[test]
fn test_degenerate_result_marks_payback_unreachable() {
    let inputs = ProjectionInputs {
        daily_rate: 0.0,
        appreciation_year1_pct: 5.0,
        investment_period_years: 4,
        ..simple_inputs()
    };
    let result = ProjectionEngine::default().project(&inputs).unwrap();

    assert_eq!(result.payback_period, PaybackPeriod::Unreachable);
    assert!(result.is_degenerate());
    // The rest of the result is still populated
    assert_eq!(result.graph_data.len(), 4);
    assert_eq!(result.final_property_value, 105_000.0);
    assert_relative_eq!(result.total_roi, 5.0, max_relative = 1e-12);
}

#[test]
fn test_empty_horizon_fails() {
    let inputs = ProjectionInputs {
        investment_period_years: 0,
        ..simple_inputs()
    };
    let engine = ProjectionEngine::default();
    assert!(engine.simulate(&inputs).is_empty());
    assert_eq!(engine.project(&inputs), Err(ProjectionError::EmptyHorizon));
}

#[test]
fn test_raw_form_round_trip() {
    let raw: RawInputs = serde_json::from_str(
        r#"{
            "purchasePrice": "100000",
            "renovationCosts": "",
            "investmentPeriodYears": "1",
            "dailyRate": 100,
            "occupancyRatePct": "50",
            "annualTaxPct": "10",
            "scenario": "base"
        }"#,
    )
    .unwrap();

    let result = ProjectionEngine::default().project_raw(&raw).unwrap();
    assert_eq!(result.annual_net_profit, 16_425.0);
}

#[test]
fn test_raw_validation_error_propagates() {
    let raw: RawInputs = serde_json::from_str(r#"{"legalFees": "-1"}"#).unwrap();
    let err = ProjectionEngine::default().project_raw(&raw).unwrap_err();
    assert!(matches!(err, ProjectionError::Validation(_)));
}

#[test]
fn test_long_raw_horizon_projects_every_year() {
    let raw: RawInputs = serde_json::from_str(
        r#"{
            "purchasePrice": "100000",
            "investmentPeriodYears": "150",
            "dailyRate": "100",
            "occupancyRatePct": "50",
            "rentGrowthRatePct": "1"
        }"#,
    )
    .unwrap();

    let result = ProjectionEngine::default().project_raw(&raw).unwrap();
    assert_eq!(result.graph_data.len(), 150);
    assert_eq!(result.graph_data[149].year, 150);
    assert!(result.graph_data[149].rental_income > result.graph_data[0].rental_income);
}

#[test]
fn test_empty_raw_inputs_fail_validation_on_total_investment() {
    let err = ProjectionEngine::default()
        .project_raw(&RawInputs::default())
        .unwrap_err();
    assert_eq!(
        err,
        ProjectionError::Validation(ValidationError::NotPositive {
            field: InputField::TotalInvestment,
            value: 0.0,
        })
    );
}

#[test]
fn test_deduction_switches_are_independent() {
    let inputs = ProjectionInputs {
        ota_commission_pct: Some(20.0),
        scenario: Scenario::Pessimistic,
        ..simple_inputs()
    };
    let income = |apply_ota_commission, apply_scenario_multiplier| {
        let engine = ProjectionEngine::new(ProjectionConfig {
            apply_ota_commission,
            apply_scenario_multiplier,
        });
        engine.project(&inputs).unwrap().annual_rental_income
    };

    assert_eq!(income(true, true), 10_220.0);
    assert_eq!(income(true, false), 14_600.0);
    assert_eq!(income(false, true), 12_775.0);
    assert_eq!(income(false, false), 18_250.0);
}

#[test]
fn test_result_serializes_camel_case() {
    let result = ProjectionEngine::default().project(&simple_inputs()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["totalInvestment"], 100_000.0);
    assert_eq!(json["scenario"], "base");
    assert_eq!(json["graphData"][0]["rentalIncome"], 18_250.0);
    assert!(json["paybackPeriod"]["years"].is_number());
    assert!(json.get("warnings").is_none());
}
