//! Scenario runner for efficient batch projections
//!
//! Pre-builds assumptions once, then allows running many projections
//! with different configurations or households. Each run seeds its own
//! contribution-limit state, so runs share no mutable state and can be
//! executed in parallel.

use crate::assumptions::Assumptions;
use crate::error::ProjectionError;
use crate::profile::HouseholdProfile;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionTable};

/// Pre-loaded scenario runner for batch and what-if projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for rate in [0.04, 0.06, 0.08] {
///     let profile = HouseholdProfile { investment_return: rate, ..base.clone() };
///     let table = runner.run(&profile, ProjectionConfig::default())?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-built base assumptions
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the built-in 2025 assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_planning(),
        }
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run a single projection with the given config
    pub fn run(
        &self,
        profile: &HouseholdProfile,
        config: ProjectionConfig,
    ) -> Result<ProjectionTable, ProjectionError> {
        let engine = ProjectionEngine::new(self.base_assumptions.clone(), config);
        engine.project(profile)
    }

    /// Run projections for multiple households with the same config
    pub fn run_batch(
        &self,
        profiles: &[HouseholdProfile],
        config: ProjectionConfig,
    ) -> Result<Vec<ProjectionTable>, ProjectionError> {
        let engine = ProjectionEngine::new(self.base_assumptions.clone(), config);
        profiles.iter().map(|p| engine.project(p)).collect()
    }

    /// Run multiple scenarios (different configs) for one household
    pub fn run_scenarios(
        &self,
        profile: &HouseholdProfile,
        configs: &[ProjectionConfig],
    ) -> Result<Vec<ProjectionTable>, ProjectionError> {
        configs
            .iter()
            .map(|config| {
                let engine =
                    ProjectionEngine::new(self.base_assumptions.clone(), config.clone());
                engine.project(profile)
            })
            .collect()
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::FilingStatus;

    fn test_profile() -> HouseholdProfile {
        HouseholdProfile {
            current_age: 40,
            retirement_age: 65,
            savings: 100_000.0,
            roth_ira: 20_000.0,
            traditional_ira: 30_000.0,
            hsa: 5_000.0,
            roth_401k: 40_000.0,
            traditional_401k: 60_000.0,
            annual_salary: 140_000.0,
            annual_bonus: 10_000.0,
            annual_rsu: 0.0,
            annual_merit_increase: 0.03,
            investment_return: 0.06,
            savings_apy: 0.03,
            roth_401k_percent: 0.05,
            traditional_401k_percent: 0.05,
            employer_401k_match: 0.04,
            employer_hsa_contribution: 500.0,
            annual_ira_contribution: 0.0,
            monthly_expenses: 5_000.0,
            filing_status: FilingStatus::Single,
        }
    }

    #[test]
    fn test_batch_run() {
        let runner = ScenarioRunner::new();
        let profiles = vec![test_profile(), test_profile()];
        let config = ProjectionConfig {
            start_year: Some(2025),
            ..Default::default()
        };

        let tables = runner.run_batch(&profiles, config).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].snapshots, tables[1].snapshots);
    }

    #[test]
    fn test_what_if_return_scenarios() {
        let runner = ScenarioRunner::new();
        let low = HouseholdProfile {
            investment_return: 0.03,
            ..test_profile()
        };
        let high = HouseholdProfile {
            investment_return: 0.08,
            ..test_profile()
        };
        let config = ProjectionConfig {
            start_year: Some(2025),
            ..Default::default()
        };

        let low_table = runner.run(&low, config.clone()).unwrap();
        let high_table = runner.run(&high, config).unwrap();

        assert!(
            high_table.summary().balance_at_retirement
                > low_table.summary().balance_at_retirement
        );
    }
}
