//! Statutory contribution limits with annual inflation indexing

use serde::{Deserialize, Serialize};

/// 2025 statutory limits
pub const LIMIT_401K_2025: f64 = 23_500.0;
pub const LIMIT_HSA_2025: f64 = 3_300.0;
pub const LIMIT_IRA_2025: f64 = 7_000.0;

/// Current-year dollar ceilings per account class
///
/// Seeded fresh from the statutory constants for every projection run
/// and inflated once per projected year. Limits never decrease and are
/// never reset mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionLimits {
    pub limit_401k: f64,
    pub limit_hsa: f64,
    pub limit_ira: f64,
}

impl ContributionLimits {
    pub fn statutory_2025() -> Self {
        Self {
            limit_401k: LIMIT_401K_2025,
            limit_hsa: LIMIT_HSA_2025,
            limit_ira: LIMIT_IRA_2025,
        }
    }

    /// Index all three ceilings by one year of inflation
    pub fn inflate(&mut self, rate: f64) {
        self.limit_401k *= 1.0 + rate;
        self.limit_hsa *= 1.0 + rate;
        self.limit_ira *= 1.0 + rate;
    }
}
