//! Property Projection - Multi-year cash-flow engine for short-term-rental investments
//!
//! This library provides:
//! - Normalization of raw form parameters into validated projection inputs
//! - Year-by-year simulation of rental income, expenses, tax and appreciation
//! - Summary metrics (ROI, total ROI, payback period, final asset value)
//! - Scenario comparisons and parallel batch projections
//! - CSV loading of stored inputs and CSV export of results

pub mod error;
pub mod inputs;
pub mod projection;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{InputField, ProjectionError, ValidationError};
pub use inputs::{ProjectionInputs, RawInputs, Scenario};
pub use projection::{PaybackPeriod, ProjectionConfig, ProjectionEngine, ProjectionResult, YearRecord};
pub use scenario::ScenarioRunner;
