//! Scenario runner for what-if comparisons and batch projections
//!
//! Every projection is independent, so batches fan out across threads with no
//! coordination beyond collecting the results.

use crate::error::ProjectionError;
use crate::inputs::{ProjectionInputs, PropertyInputs, Scenario};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use log::info;
use rayon::prelude::*;

/// One property's inputs projected under all three scenarios
#[derive(Debug, Clone)]
pub struct ScenarioComparison {
    pub pessimistic: ProjectionResult,
    pub base: ProjectionResult,
    pub optimistic: ProjectionResult,
}

impl ScenarioComparison {
    pub fn get(&self, scenario: Scenario) -> &ProjectionResult {
        match scenario {
            Scenario::Pessimistic => &self.pessimistic,
            Scenario::Base => &self.base,
            Scenario::Optimistic => &self.optimistic,
        }
    }

    /// Results ordered pessimistic, base, optimistic
    pub fn iter(&self) -> impl Iterator<Item = &ProjectionResult> {
        [&self.pessimistic, &self.base, &self.optimistic].into_iter()
    }
}

/// Outcome of one property in a batch run
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub property_id: String,
    pub result: Result<ProjectionResult, ProjectionError>,
}

/// Runs many projections sharing one engine configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let comparison = runner.compare_scenarios(&inputs)?;
/// println!("{:.2}% .. {:.2}%", comparison.pessimistic.roi, comparison.optimistic.roi);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner with the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Run a single projection
    pub fn run(&self, inputs: &ProjectionInputs) -> Result<ProjectionResult, ProjectionError> {
        self.engine.project(inputs)
    }

    /// Project the same inputs under every scenario, ignoring the inputs' own scenario
    pub fn compare_scenarios(
        &self,
        inputs: &ProjectionInputs,
    ) -> Result<ScenarioComparison, ProjectionError> {
        let [pessimistic, base, optimistic] =
            Scenario::ALL.map(|scenario| self.engine.project(&inputs.with_scenario(scenario)));

        Ok(ScenarioComparison {
            pessimistic: pessimistic?,
            base: base?,
            optimistic: optimistic?,
        })
    }

    /// Project the same inputs over several horizons, in the order given
    pub fn run_horizons(
        &self,
        inputs: &ProjectionInputs,
        horizons: &[u32],
    ) -> Result<Vec<ProjectionResult>, ProjectionError> {
        horizons
            .par_iter()
            .map(|&years| self.engine.project(&inputs.with_investment_period(years)))
            .collect()
    }

    /// Project many properties in parallel; one failure does not stop the rest
    pub fn run_batch(&self, properties: &[PropertyInputs]) -> Vec<BatchOutcome> {
        info!("projecting {} properties", properties.len());
        properties
            .par_iter()
            .map(|property| BatchOutcome {
                property_id: property.property_id.clone(),
                result: self.engine.project(&property.inputs),
            })
            .collect()
    }
}
