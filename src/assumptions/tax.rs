//! Progressive tax bracket schedules and the marginal tax calculator
//!
//! Two independent schedules (federal and a state-style schedule) are
//! evaluated per filing status and summed. Brackets are simplified:
//! no deductions, no credits.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Tax filing status (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingStatus {
    Single,
    Married,
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilingStatus::Single => write!(f, "single"),
            FilingStatus::Married => write!(f, "married"),
        }
    }
}

impl FromStr for FilingStatus {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(FilingStatus::Single),
            "married" => Ok(FilingStatus::Married),
            other => Err(ProjectionError::UnknownFilingStatus(other.to_string())),
        }
    }
}

/// A single (threshold, marginal rate) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: f64,
    pub rate: f64,
}

/// Ordered marginal bracket schedule
///
/// Thresholds are strictly increasing and the first is always 0. A
/// bracket's rate applies to income in `(previous_threshold, threshold]`;
/// income above the last threshold is taxed at the last bracket's rate
/// (open-ended top bracket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Build a schedule from (threshold, rate) pairs, sorted by threshold
    pub fn new(pairs: &[(f64, f64)]) -> Self {
        let mut brackets: Vec<TaxBracket> = pairs
            .iter()
            .map(|&(threshold, rate)| TaxBracket { threshold, rate })
            .collect();
        brackets.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { brackets }
    }

    /// Build a schedule from untrusted (threshold, rate) pairs
    ///
    /// Rejects empty schedules, a non-zero first threshold, and
    /// duplicate thresholds; used for file-sourced tables.
    pub fn validated(pairs: &[(f64, f64)]) -> Result<Self, ProjectionError> {
        let schedule = Self::new(pairs);

        match schedule.brackets.first() {
            Some(first) if first.threshold == 0.0 => {}
            Some(first) => {
                return Err(ProjectionError::InvalidBracketSchedule(format!(
                    "first threshold must be 0, got {}",
                    first.threshold
                )))
            }
            None => {
                return Err(ProjectionError::InvalidBracketSchedule(
                    "schedule has no brackets".to_string(),
                ))
            }
        }
        for pair in schedule.brackets.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(ProjectionError::InvalidBracketSchedule(format!(
                    "thresholds must be strictly increasing, got {} after {}",
                    pair[1].threshold, pair[0].threshold
                )));
            }
        }

        Ok(schedule)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Walk the schedule and accumulate tax on the given income
    ///
    /// Income exactly on a threshold boundary terminates in the lower
    /// bracket. No rounding happens inside the walk.
    pub fn tax(&self, income: f64) -> f64 {
        let mut tax = 0.0;
        let mut prev_threshold = 0.0;

        for bracket in &self.brackets {
            if income <= prev_threshold {
                return tax;
            }

            let taxable = income.min(bracket.threshold) - prev_threshold;
            if taxable > 0.0 {
                tax += taxable * bracket.rate;
            }

            if income <= bracket.threshold {
                return tax;
            }

            prev_threshold = bracket.threshold;
        }

        // Open-ended top bracket: income above the last threshold is
        // taxed at the last bracket's rate
        if let Some(last) = self.brackets.last() {
            if income > last.threshold {
                tax += (income - last.threshold) * last.rate;
            }
        }

        tax
    }
}

/// Federal and state bracket schedules keyed by filing status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxTables {
    pub federal: HashMap<FilingStatus, BracketSchedule>,
    pub state: HashMap<FilingStatus, BracketSchedule>,
}

impl TaxTables {
    /// Simplified 2025 federal and NY-style state schedules
    pub fn default_2025() -> Self {
        let mut federal = HashMap::new();
        federal.insert(
            FilingStatus::Single,
            BracketSchedule::new(&[
                (0.0, 0.10),
                (11_000.0, 0.12),
                (44_725.0, 0.22),
                (95_375.0, 0.24),
                (182_100.0, 0.32),
                (231_250.0, 0.35),
                (578_125.0, 0.37),
            ]),
        );
        federal.insert(
            FilingStatus::Married,
            BracketSchedule::new(&[
                (0.0, 0.10),
                (22_000.0, 0.12),
                (89_450.0, 0.22),
                (190_750.0, 0.24),
                (364_200.0, 0.32),
                (462_500.0, 0.35),
                (693_750.0, 0.37),
            ]),
        );

        let mut state = HashMap::new();
        state.insert(
            FilingStatus::Single,
            BracketSchedule::new(&[
                (0.0, 0.04),
                (13_900.0, 0.045),
                (21_400.0, 0.0525),
                (80_650.0, 0.0585),
                (215_400.0, 0.0625),
                (1_077_550.0, 0.0685),
                (5_000_000.0, 0.103),
                (25_000_000.0, 0.109),
            ]),
        );
        state.insert(
            FilingStatus::Married,
            BracketSchedule::new(&[
                (0.0, 0.04),
                (27_900.0, 0.045),
                (42_800.0, 0.0525),
                (161_550.0, 0.0585),
                (323_200.0, 0.0625),
                (2_155_350.0, 0.0685),
                (5_000_000.0, 0.103),
                (25_000_000.0, 0.109),
            ]),
        );

        Self { federal, state }
    }

    /// Look up both schedules for a filing status
    ///
    /// Called once at run entry so an unknown status never surfaces
    /// mid-loop.
    pub fn schedules_for(
        &self,
        status: FilingStatus,
    ) -> Result<(&BracketSchedule, &BracketSchedule), ProjectionError> {
        let federal = self
            .federal
            .get(&status)
            .ok_or_else(|| ProjectionError::UnknownFilingStatus(status.to_string()))?;
        let state = self
            .state
            .get(&status)
            .ok_or_else(|| ProjectionError::UnknownFilingStatus(status.to_string()))?;
        Ok((federal, state))
    }

    /// Combined federal + state tax on the given income
    pub fn compute_tax(&self, income: f64, status: FilingStatus) -> Result<f64, ProjectionError> {
        let (federal, state) = self.schedules_for(status)?;
        Ok(federal.tax(income) + state.tax(income))
    }
}
