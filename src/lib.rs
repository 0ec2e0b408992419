//! Retirement System - Year-by-year retirement savings projection engine
//!
//! This library provides:
//! - Yearly projections across six account types (cash savings, Roth
//!   and Traditional IRA, HSA, Roth and Traditional 401k)
//! - Progressive federal + state tax bracket modeling
//! - Contribution-limit inflation indexing and proportional clamping
//! - Post-retirement decumulation with a strict withdrawal ordering
//! - Multi-scenario what-if framework

pub mod assumptions;
pub mod error;
pub mod profile;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{Assumptions, ContributionLimits, FilingStatus, TaxTables};
pub use error::ProjectionError;
pub use profile::HouseholdProfile;
pub use projection::{
    ProjectionConfig, ProjectionEngine, ProjectionSummary, ProjectionTable, YearlySnapshot,
};
pub use scenario::ScenarioRunner;
