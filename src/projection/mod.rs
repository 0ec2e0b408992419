//! Yearly projection engine, recurrence state, and output table

mod engine;
mod snapshot;
mod state;

pub use engine::{ProjectionConfig, ProjectionEngine};
pub use snapshot::{ProjectionSummary, ProjectionTable, TaxExpenseFigures, YearlySnapshot};
pub use state::ProjectionState;
