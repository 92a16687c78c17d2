//! Property Projection CLI
//!
//! Projects a single property from a JSON file of form parameters

use anyhow::{Context, Result};
use clap::Parser;
use property_projection::{
    export::write_year_records,
    scenario::ScenarioRunner,
    ProjectionConfig, ProjectionResult, RawInputs, Scenario,
};
use std::fs::{self, File};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "property_projection", version, about = "Project rental cash flows and returns for a property")]
struct Args {
    /// JSON file with the property's parameters (camelCase keys, numbers or strings)
    input: PathBuf,

    /// JSON file with engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the scenario given in the input file
    #[arg(long)]
    scenario: Option<Scenario>,

    /// Ignore the marketplace commission even if the input sets one
    #[arg(long)]
    no_ota_commission: bool,

    /// Do not scale income by the scenario multiplier
    #[arg(long)]
    no_scenario_multiplier: bool,

    /// Project all three scenarios side by side
    #[arg(long)]
    compare: bool,

    /// Write the yearly rows to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let raw: RawInputs = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<ProjectionConfig>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => ProjectionConfig::default(),
    };
    if args.no_ota_commission {
        config.apply_ota_commission = false;
    }
    if args.no_scenario_multiplier {
        config.apply_scenario_multiplier = false;
    }

    let mut inputs = raw.normalize()?;
    if let Some(scenario) = args.scenario {
        inputs.scenario = scenario;
    }

    let runner = ScenarioRunner::with_config(config);

    if args.compare {
        let comparison = runner.compare_scenarios(&inputs)?;
        if args.json {
            let results: Vec<&ProjectionResult> = comparison.iter().collect();
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            print_comparison(comparison.iter());
        }
        return Ok(());
    }

    let result = runner.run(&inputs)?;

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_year_records(file, &result.graph_data)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
        if let Some(path) = &args.csv {
            println!("\nYearly rows written to: {}", path.display());
        }
    }

    Ok(())
}

fn print_result(result: &ProjectionResult) {
    println!("Projection ({} scenario, {} years)", result.scenario, result.years());
    println!("{}", "=".repeat(40));
    println!("{:>4} {:>12} {:>12} {:>10} {:>12} {:>14} {:>14}",
        "Year", "Income", "Expenses", "Taxes", "NetProfit", "Accumulated", "Value");
    println!("{}", "-".repeat(84));
    for row in &result.graph_data {
        println!("{:>4} {:>12.0} {:>12.0} {:>10.0} {:>12.0} {:>14.0} {:>14.0}",
            row.year,
            row.rental_income,
            row.operating_expenses,
            row.taxes,
            row.net_profit,
            row.accumulated_profit,
            row.property_value,
        );
    }

    println!("\nSummary:");
    println!("  Total Investment:      {:.0}", result.total_investment);
    println!("  Annual Rental Income:  {:.0}", result.annual_rental_income);
    println!("  Annual Expenses:       {:.0}", result.annual_expenses);
    println!("  Annual Net Profit:     {:.0}", result.annual_net_profit);
    println!("  ROI:                   {:.2}%", result.roi);
    println!("  Total ROI:             {:.2}%", result.total_roi);
    println!("  Payback Period:        {}", result.payback_period);
    println!("  Final Property Value:  {:.0}", result.final_property_value);
    println!("  Total Appreciation:    {:.0}", result.total_appreciation);
    println!("  Total Return:          {:.0}", result.total_return_with_appreciation);

    for warning in &result.warnings {
        println!("\nWarning: {}", warning);
    }
}

fn print_comparison<'a>(results: impl Iterator<Item = &'a ProjectionResult>) {
    println!("{:>12} {:>12} {:>10} {:>10} {:>14} {:>14}",
        "Scenario", "NetProfit", "ROI %", "TotalROI %", "Payback", "Accumulated");
    println!("{}", "-".repeat(78));
    for result in results {
        println!("{:>12} {:>12.0} {:>10.2} {:>10.2} {:>14} {:>14.0}",
            result.scenario.as_str(),
            result.annual_net_profit,
            result.roi,
            result.total_roi,
            result.payback_period.to_string(),
            result.accumulated_profit,
        );
    }
}
