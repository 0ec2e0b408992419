//! Yearly snapshot and projection table output structures

use serde::{Deserialize, Serialize};

/// Tax, expense, and withdrawal figures tracked when decumulation
/// modeling is enabled
///
/// Absent from the basic accumulation-only variant; presentation code
/// treats these columns as optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxExpenseFigures {
    pub monthly_expenses: f64,
    pub annual_expenses: f64,
    pub taxes_paid: f64,
    pub after_tax_income: f64,
    pub disposable_income: f64,
    /// Unmet withdrawal need this year after all four sources
    pub shortfall: f64,
}

/// One row of projection output for one year
///
/// A snapshot is derived purely from the previous snapshot, the
/// household profile, and the threaded limit state; balances are
/// end-of-year values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySnapshot {
    // Timing
    pub year_index: u32,
    /// Wider than the profile's age fields; long extended horizons
    /// run well past a u8
    pub age: u32,
    pub calendar_year: i32,

    // Gross income components
    pub salary: f64,
    pub bonus: f64,
    pub rsu: f64,

    // Account balances
    pub savings: f64,
    pub roth_ira: f64,
    pub traditional_ira: f64,
    pub hsa: f64,
    pub roth_401k: f64,
    pub traditional_401k: f64,

    /// Sum of the six account balances (informational fields excluded)
    pub total_balance: f64,

    // Contribution amounts credited this year
    pub contribution_401k: f64,
    pub roth_401k_contribution: f64,
    pub traditional_401k_contribution: f64,
    pub employer_401k_match: f64,
    pub hsa_contribution: f64,
    pub ira_contribution: f64,
    pub extra_savings: f64,

    // Flattened so the extended columns sit beside the basic ones;
    // a None adds no keys at all.
    #[serde(flatten)]
    pub tax_expense: Option<TaxExpenseFigures>,
}

impl YearlySnapshot {
    /// Sum of the six account balances
    pub fn account_sum(&self) -> f64 {
        self.savings
            + self.roth_ira
            + self.traditional_ira
            + self.hsa
            + self.roth_401k
            + self.traditional_401k
    }
}

/// Complete ordered projection output for one household
///
/// Immutable once returned; consumed read-only by presentation code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionTable {
    /// One snapshot per projection year, year 0 first
    pub snapshots: Vec<YearlySnapshot>,

    /// Retirement age the run was configured with
    pub retirement_age: u8,

    /// Inflation assumption used for present-value conversion
    pub inflation_rate: f64,

    /// Drawdown rate used for the income estimate in the summary
    pub safe_withdrawal_rate: f64,
}

impl ProjectionTable {
    /// Snapshot of the first retirement-age year, if projected
    pub fn at_retirement(&self) -> Option<&YearlySnapshot> {
        self.snapshots
            .iter()
            .find(|s| s.age >= u32::from(self.retirement_age))
    }

    /// Summary statistics for the run
    pub fn summary(&self) -> ProjectionSummary {
        let final_snapshot = self.snapshots.last();
        let final_balance = final_snapshot.map(|s| s.total_balance).unwrap_or(0.0);
        let years_projected = self.snapshots.len().saturating_sub(1) as u32;

        let present_value_factor = (1.0 + self.inflation_rate).powi(years_projected as i32);
        let lifetime_taxes: f64 = self
            .snapshots
            .iter()
            .filter_map(|s| s.tax_expense.map(|t| t.taxes_paid))
            .sum();
        let total_shortfall: f64 = self
            .snapshots
            .iter()
            .filter_map(|s| s.tax_expense.map(|t| t.shortfall))
            .sum();

        let balance_at_retirement = self
            .at_retirement()
            .map(|s| s.total_balance)
            .unwrap_or(final_balance);

        ProjectionSummary {
            years_projected,
            retirement_calendar_year: self
                .at_retirement()
                .or(final_snapshot)
                .map(|s| s.calendar_year)
                .unwrap_or(0),
            balance_at_retirement,
            final_balance,
            final_balance_present_value: final_balance / present_value_factor,
            estimated_monthly_income: balance_at_retirement * self.safe_withdrawal_rate / 12.0,
            lifetime_taxes,
            total_shortfall,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years_projected: u32,
    pub retirement_calendar_year: i32,
    pub balance_at_retirement: f64,
    pub final_balance: f64,
    pub final_balance_present_value: f64,
    /// Monthly income at the safe withdrawal rate on the balance held
    /// at retirement
    pub estimated_monthly_income: f64,
    pub lifetime_taxes: f64,
    pub total_shortfall: f64,
}
