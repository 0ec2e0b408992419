//! Household profile: the immutable input set for one projection run

use serde::{Deserialize, Serialize};

use crate::assumptions::FilingStatus;
use crate::error::ProjectionError;

/// Everything the engine needs to know about one household
///
/// All rates are fractions (6% = 0.06) and all balances are dollars;
/// the input layer is responsible for converting display percentages
/// before anything reaches the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    // Ages
    pub current_age: u8,
    pub retirement_age: u8,

    // Starting balances
    pub savings: f64,
    pub roth_ira: f64,
    pub traditional_ira: f64,
    pub hsa: f64,
    pub roth_401k: f64,
    pub traditional_401k: f64,

    // Income profile
    pub annual_salary: f64,
    pub annual_bonus: f64,
    pub annual_rsu: f64,
    pub annual_merit_increase: f64,

    // Return assumptions
    pub investment_return: f64,
    pub savings_apy: f64,

    // Contribution policy
    pub roth_401k_percent: f64,
    pub traditional_401k_percent: f64,
    pub employer_401k_match: f64,
    pub employer_hsa_contribution: f64,
    pub annual_ira_contribution: f64,

    // Expense and tax inputs (used by the decumulation-capable variant)
    pub monthly_expenses: f64,
    pub filing_status: FilingStatus,
}

impl HouseholdProfile {
    /// Validate the profile before any snapshot is emitted
    ///
    /// The engine performs no bounds-checking mid-loop; every rejection
    /// happens here.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.retirement_age <= self.current_age {
            return Err(ProjectionError::InvalidAgeRange {
                current_age: self.current_age,
                retirement_age: self.retirement_age,
            });
        }

        let non_negative = [
            ("savings", self.savings),
            ("roth_ira", self.roth_ira),
            ("traditional_ira", self.traditional_ira),
            ("hsa", self.hsa),
            ("roth_401k", self.roth_401k),
            ("traditional_401k", self.traditional_401k),
            ("annual_salary", self.annual_salary),
            ("annual_bonus", self.annual_bonus),
            ("annual_rsu", self.annual_rsu),
            ("annual_merit_increase", self.annual_merit_increase),
            ("investment_return", self.investment_return),
            ("savings_apy", self.savings_apy),
            ("roth_401k_percent", self.roth_401k_percent),
            ("traditional_401k_percent", self.traditional_401k_percent),
            ("employer_401k_match", self.employer_401k_match),
            ("employer_hsa_contribution", self.employer_hsa_contribution),
            ("annual_ira_contribution", self.annual_ira_contribution),
            ("monthly_expenses", self.monthly_expenses),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ProjectionError::NegativeInput { field, value });
            }
        }

        Ok(())
    }

    /// Sum of the six account balances today
    pub fn total_current_savings(&self) -> f64 {
        self.savings
            + self.roth_ira
            + self.traditional_ira
            + self.hsa
            + self.roth_401k
            + self.traditional_401k
    }

    pub fn years_to_retirement(&self) -> u32 {
        u32::from(self.retirement_age) - u32::from(self.current_age)
    }

    /// Gross income in the starting year
    pub fn total_income(&self) -> f64 {
        self.annual_salary + self.annual_bonus + self.annual_rsu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> HouseholdProfile {
        HouseholdProfile {
            current_age: 35,
            retirement_age: 65,
            savings: 50_000.0,
            roth_ira: 10_000.0,
            traditional_ira: 20_000.0,
            hsa: 5_000.0,
            roth_401k: 15_000.0,
            traditional_401k: 30_000.0,
            annual_salary: 120_000.0,
            annual_bonus: 10_000.0,
            annual_rsu: 5_000.0,
            annual_merit_increase: 0.03,
            investment_return: 0.06,
            savings_apy: 0.038,
            roth_401k_percent: 0.06,
            traditional_401k_percent: 0.08,
            employer_401k_match: 0.06,
            employer_hsa_contribution: 1_000.0,
            annual_ira_contribution: 0.0,
            monthly_expenses: 6_100.0,
            filing_status: FilingStatus::Single,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(valid_profile().validate().is_ok());
    }

    #[test]
    fn test_retirement_must_follow_current_age() {
        let mut profile = valid_profile();
        profile.retirement_age = 35;
        assert_eq!(
            profile.validate(),
            Err(ProjectionError::InvalidAgeRange {
                current_age: 35,
                retirement_age: 35,
            })
        );
    }

    #[test]
    fn test_negative_balance_rejected() {
        let mut profile = valid_profile();
        profile.traditional_401k = -1.0;
        assert!(matches!(
            profile.validate(),
            Err(ProjectionError::NegativeInput {
                field: "traditional_401k",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut profile = valid_profile();
        profile.savings_apy = -0.01;
        assert!(matches!(
            profile.validate(),
            Err(ProjectionError::NegativeInput {
                field: "savings_apy",
                ..
            })
        ));
    }

    #[test]
    fn test_total_current_savings() {
        let profile = valid_profile();
        assert_eq!(profile.total_current_savings(), 130_000.0);
        assert_eq!(profile.years_to_retirement(), 30);
    }
}
