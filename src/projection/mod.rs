//! Projection engine for year-by-year rental cash flows and investment metrics

mod state;
mod engine;
mod cashflows;
mod metrics;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, ProjectionConfig, DAYS_PER_YEAR};
pub use cashflows::{YearRecord, ProjectionResult, PaybackPeriod, ProjectionWarning};
pub use metrics::{aggregate, SteadyState};
