//! Recurrence state threaded between projected years

use crate::assumptions::{Assumptions, ContributionLimits};

/// Mutable state carried from one projected year to the next
///
/// Everything else a year needs comes from the previous snapshot and
/// the immutable profile, so independent runs share nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Projection year about to be produced (0 = today)
    pub year_index: u32,

    /// Contribution limit state, inflated once per advance
    pub limits: ContributionLimits,
}

impl ProjectionState {
    /// Fresh state seeded from the statutory limit constants
    pub fn initial(assumptions: &Assumptions) -> Self {
        Self {
            year_index: 0,
            limits: assumptions.limit_seed,
        }
    }

    /// Step to the next year: bump the index, inflate the limits
    pub fn advance(mut self, inflation_rate: f64) -> Self {
        self.year_index += 1;
        self.limits.inflate(inflation_rate);
        self
    }
}
