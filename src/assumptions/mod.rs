//! Economic assumptions: tax schedules, contribution limits, return policy

pub mod limits;
pub mod loader;
mod returns;
mod tax;

pub use limits::ContributionLimits;
pub use returns::{age_adjusted_return, glide_path_tier, RETIREMENT_RETURN_MULTIPLIER};
pub use tax::{BracketSchedule, FilingStatus, TaxBracket, TaxTables};

use std::error::Error;
use std::path::Path;

/// Container for all projection assumptions
///
/// Built once and passed to the engine at construction; nothing here is
/// ambient global state, so scenario runs with different assumptions
/// never touch shared mutables.
#[derive(Debug, Clone)]
pub struct Assumptions {
    /// Federal + state bracket schedules per filing status
    pub taxes: TaxTables,

    /// Statutory limit seed; each run copies and inflates its own
    pub limit_seed: ContributionLimits,
}

impl Assumptions {
    /// Assumptions with the built-in simplified 2025 tables
    pub fn default_planning() -> Self {
        Self {
            taxes: TaxTables::default_2025(),
            limit_seed: ContributionLimits::statutory_2025(),
        }
    }

    /// Load tax tables from CSV files in the default location
    pub fn from_csv() -> Result<Self, Box<dyn Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TAX_TABLE_PATH))
    }

    /// Load tax tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            taxes: loader::load_tax_tables(path)?,
            limit_seed: ContributionLimits::statutory_2025(),
        })
    }
}
