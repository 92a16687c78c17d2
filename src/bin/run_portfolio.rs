//! Project every property in a stored inputs CSV
//!
//! Outputs one summary line per property; properties that fail to project are
//! reported on stderr and left out of the summary.

use anyhow::{Context, Result};
use clap::Parser;
use property_projection::{
    export::{write_summaries, SummaryRow},
    inputs::load_properties,
    scenario::ScenarioRunner,
    ProjectionConfig, Scenario,
};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_portfolio", about = "Project every property in a CSV of stored inputs")]
struct Args {
    /// CSV of stored inputs, one property per row
    input: PathBuf,

    /// Summary CSV to write
    #[arg(long, default_value = "portfolio_summary.csv")]
    output: PathBuf,

    /// Project every property under this scenario instead of its own
    #[arg(long)]
    scenario: Option<Scenario>,

    /// Ignore marketplace commissions
    #[arg(long)]
    no_ota_commission: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    println!("Loading properties from {}...", args.input.display());
    let mut properties = load_properties(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    println!("Loaded {} properties in {:?}", properties.len(), start.elapsed());

    if let Some(scenario) = args.scenario {
        for property in &mut properties {
            property.inputs.scenario = scenario;
        }
    }

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        apply_ota_commission: !args.no_ota_commission,
        ..Default::default()
    });

    let proj_start = Instant::now();
    let outcomes = runner.run_batch(&properties);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut rows = Vec::with_capacity(outcomes.len());
    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => rows.push(SummaryRow::from_result(&outcome.property_id, result)),
            Err(err) => {
                failed += 1;
                eprintln!("  {}: {}", outcome.property_id, err);
            }
        }
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_summaries(file, &rows)?;
    println!("Output written to {}", args.output.display());

    let unreachable = rows.iter().filter(|r| r.payback_years.is_none()).count();
    let total_investment: f64 = rows.iter().map(|r| r.total_investment).sum();
    let total_profit: f64 = rows.iter().map(|r| r.annual_net_profit).sum();

    println!("\nPortfolio Summary:");
    println!("  Projected:          {}", rows.len());
    println!("  Failed:             {}", failed);
    println!("  Never paid back:    {}", unreachable);
    println!("  Total Investment:   {:.0}", total_investment);
    println!("  Annual Net Profit:  {:.0}", total_profit);
    if total_investment > 0.0 {
        println!("  Portfolio ROI:      {:.2}%", total_profit / total_investment * 100.0);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
