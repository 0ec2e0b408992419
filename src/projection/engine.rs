//! Core projection engine for yearly retirement savings projections
//!
//! Each projected year is a pure recurrence step: the previous snapshot
//! plus the immutable household profile and the threaded limit state
//! produce the next snapshot. The table is just the ordered collection
//! of steps.

use chrono::Datelike;

use super::snapshot::{ProjectionTable, TaxExpenseFigures, YearlySnapshot};
use super::state::ProjectionState;
use crate::assumptions::{age_adjusted_return, Assumptions};
use crate::error::ProjectionError;
use crate::profile::HouseholdProfile;

/// Configuration for a projection run
///
/// Everything that used to be a process-wide constant lives here so
/// scenario runs can stress different assumptions without touching
/// shared state.
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Model taxes, expenses, and post-retirement withdrawals
    ///
    /// When false the run is accumulation-only and stops exactly at
    /// retirement.
    pub include_decumulation: bool,

    /// Annual inflation applied to contribution limits and expenses
    pub inflation_rate: f64,

    /// Pay periods per year for percentage-of-paycheck contributions
    pub paychecks_per_year: u32,

    /// Merit increases halve after this many years
    pub merit_decay_years: u32,

    /// Retirement years generated past the retirement age
    pub retirement_window_generated: u32,

    /// Retirement years kept in the returned table
    pub retirement_window_kept: u32,

    /// Gross-up factor approximating the tax bite on traditional
    /// account withdrawals
    pub traditional_withdrawal_gross_up: f64,

    /// Employee HSA contributions cap out at this share of the limit
    pub hsa_employee_cap_fraction: f64,

    /// Extra cash savings cap as a share of after-tax income
    pub extra_savings_cap_fraction: f64,

    /// IRA allowance phases out linearly across this income window
    pub ira_phase_out_start: f64,
    pub ira_phase_out_end: f64,

    /// Sustainable drawdown rate used for summary income estimates
    pub safe_withdrawal_rate: f64,

    /// Calendar year of projection year 0; None uses the wall clock
    pub start_year: Option<i32>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            include_decumulation: true,
            inflation_rate: 0.02,
            paychecks_per_year: 26,
            merit_decay_years: 15,
            retirement_window_generated: 40,
            retirement_window_kept: 30,
            traditional_withdrawal_gross_up: 1.25,
            hsa_employee_cap_fraction: 0.80,
            extra_savings_cap_fraction: 0.70,
            ira_phase_out_start: 150_000.0,
            ira_phase_out_end: 165_000.0,
            safe_withdrawal_rate: 0.04,
            start_year: None,
        }
    }
}

impl ProjectionConfig {
    /// Accumulation-only configuration (no tax/expense/withdrawal
    /// modeling, projection ends at retirement)
    pub fn basic() -> Self {
        Self {
            include_decumulation: false,
            ..Default::default()
        }
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self {
            assumptions,
            config,
        }
    }

    /// Run the full projection for a single household
    ///
    /// Fails fast on invalid input before any snapshot is emitted;
    /// there are no partial tables.
    pub fn project(&self, profile: &HouseholdProfile) -> Result<ProjectionTable, ProjectionError> {
        profile.validate()?;
        // Surface an unknown filing status at entry, not inside the loop
        self.assumptions.taxes.schedules_for(profile.filing_status)?;

        let start_year = self
            .config
            .start_year
            .unwrap_or_else(|| chrono::Utc::now().year());

        let accumulation_years = profile.years_to_retirement();
        let total_years = if self.config.include_decumulation {
            accumulation_years + self.config.retirement_window_generated
        } else {
            accumulation_years
        };

        log::debug!(
            "projecting {} years ({} accumulation) starting {}",
            total_years,
            accumulation_years,
            start_year
        );

        let mut snapshots = Vec::with_capacity(total_years as usize + 1);
        let mut current = self.initial_snapshot(profile, start_year);
        let mut state = ProjectionState::initial(&self.assumptions);

        for _ in 0..total_years {
            let (next, next_state) = self.advance_year(&current, profile, state)?;
            snapshots.push(current);
            current = next;
            state = next_state;
        }
        snapshots.push(current);

        if self.config.include_decumulation {
            let kept = (accumulation_years + self.config.retirement_window_kept) as usize + 1;
            snapshots.truncate(kept);
        }

        Ok(ProjectionTable {
            snapshots,
            retirement_age: profile.retirement_age,
            inflation_rate: self.config.inflation_rate,
            safe_withdrawal_rate: self.config.safe_withdrawal_rate,
        })
    }

    /// Advance the projection by one year
    ///
    /// Pure step: `(previous snapshot, profile, state)` to
    /// `(new snapshot, updated state)`. Exposed so a single transition
    /// can be tested in isolation.
    pub fn advance_year(
        &self,
        prev: &YearlySnapshot,
        profile: &HouseholdProfile,
        state: ProjectionState,
    ) -> Result<(YearlySnapshot, ProjectionState), ProjectionError> {
        let state = state.advance(self.config.inflation_rate);
        let age = u32::from(profile.current_age) + state.year_index;

        let in_retirement =
            age >= u32::from(profile.retirement_age) && self.config.include_decumulation;
        let snapshot = if in_retirement {
            self.decumulation_year(prev, profile, &state, age)?
        } else {
            self.accumulation_year(prev, profile, &state, age)?
        };

        Ok((snapshot, state))
    }

    /// Snapshot for year 0: starting balances, no contributions yet
    fn initial_snapshot(&self, profile: &HouseholdProfile, start_year: i32) -> YearlySnapshot {
        let tax_expense = self.config.include_decumulation.then(|| TaxExpenseFigures {
            monthly_expenses: profile.monthly_expenses,
            annual_expenses: profile.monthly_expenses * 12.0,
            ..Default::default()
        });

        YearlySnapshot {
            year_index: 0,
            age: u32::from(profile.current_age),
            calendar_year: start_year,
            salary: profile.annual_salary,
            bonus: profile.annual_bonus,
            rsu: profile.annual_rsu,
            savings: profile.savings,
            roth_ira: profile.roth_ira,
            traditional_ira: profile.traditional_ira,
            hsa: profile.hsa,
            roth_401k: profile.roth_401k,
            traditional_401k: profile.traditional_401k,
            total_balance: profile.total_current_savings(),
            contribution_401k: 0.0,
            roth_401k_contribution: 0.0,
            traditional_401k_contribution: 0.0,
            employer_401k_match: 0.0,
            hsa_contribution: 0.0,
            ira_contribution: 0.0,
            extra_savings: 0.0,
            tax_expense,
        }
    }

    /// One working year: income grows, contributions are clamped and
    /// credited, balances grow
    fn accumulation_year(
        &self,
        prev: &YearlySnapshot,
        profile: &HouseholdProfile,
        state: &ProjectionState,
        age: u32,
    ) -> Result<YearlySnapshot, ProjectionError> {
        let cfg = &self.config;
        let extended = cfg.include_decumulation;

        // Merit growth; raises flatten out after the decay horizon
        let merit = if extended && state.year_index > cfg.merit_decay_years {
            profile.annual_merit_increase * 0.5
        } else {
            profile.annual_merit_increase
        };
        let salary = prev.salary * (1.0 + merit);
        let bonus = prev.bonus * (1.0 + merit);
        let rsu = prev.rsu * (1.0 + merit);
        let total_income = salary + bonus + rsu;

        // Employee 401k from percentage-of-paycheck policy, clamped
        // proportionally so Roth:Traditional keeps its requested ratio
        let paychecks = f64::from(cfg.paychecks_per_year);
        let paycheck = salary / paychecks;
        let mut roth_per_paycheck = paycheck * profile.roth_401k_percent;
        let mut trad_per_paycheck = paycheck * profile.traditional_401k_percent;
        let mut employee_401k = (roth_per_paycheck + trad_per_paycheck) * paychecks;
        if employee_401k > state.limits.limit_401k {
            let scale = state.limits.limit_401k / employee_401k;
            roth_per_paycheck *= scale;
            trad_per_paycheck *= scale;
            employee_401k = state.limits.limit_401k;
        }
        let roth_401k_contribution = roth_per_paycheck * paychecks;
        let traditional_401k_contribution = trad_per_paycheck * paychecks;

        // Employer match, capped so employee + employer never exceeds
        // the limit; credited entirely to the Traditional 401k
        let match_eligible = (salary * profile.employer_401k_match).min(employee_401k);
        let employer_401k_match = match_eligible.min(state.limits.limit_401k - employee_401k);

        // HSA: employee fills the room left under the limit
        let mut employee_hsa =
            (state.limits.limit_hsa - profile.employer_hsa_contribution).max(0.0);
        if extended {
            employee_hsa = employee_hsa.min(cfg.hsa_employee_cap_fraction * state.limits.limit_hsa);
        }
        let hsa_contribution = employee_hsa + profile.employer_hsa_contribution;

        // IRA: requested amount clamped to the limit, phased out
        // linearly at high income
        let mut ira_contribution = profile
            .annual_ira_contribution
            .min(state.limits.limit_ira);
        if extended {
            ira_contribution *= self.ira_phase_out_factor(total_income);
        }

        // Taxes, disposable income, and realistic extra savings
        let mut extra_savings = 0.0;
        let tax_expense = if extended {
            let monthly_expenses = prev_monthly_expenses(prev, profile) * (1.0 + cfg.inflation_rate);
            let annual_expenses = monthly_expenses * 12.0;

            let taxable_income = total_income - traditional_401k_contribution;
            let taxes_paid = self
                .assumptions
                .taxes
                .compute_tax(taxable_income, profile.filing_status)?;
            let after_tax_income = total_income - taxes_paid;
            let disposable_income =
                after_tax_income - annual_expenses - roth_401k_contribution;

            // Imperfect saving behavior: only part of what is left
            // over actually reaches the savings account
            let cap = cfg.extra_savings_cap_fraction * after_tax_income.max(0.0);
            extra_savings = disposable_income.max(0.0).min(cap);

            Some(TaxExpenseFigures {
                monthly_expenses,
                annual_expenses,
                taxes_paid,
                after_tax_income,
                disposable_income,
                shortfall: 0.0,
            })
        } else {
            None
        };

        // Grow balances, then credit the year's contributions
        let years_out = i32::from(profile.retirement_age) - age as i32;
        let market_return = if extended {
            age_adjusted_return(profile.investment_return, years_out, false)
        } else {
            profile.investment_return
        };

        let savings = prev.savings * (1.0 + profile.savings_apy) + extra_savings;
        let roth_ira = prev.roth_ira * (1.0 + market_return) + ira_contribution;
        let traditional_ira = prev.traditional_ira * (1.0 + market_return);
        let hsa = prev.hsa * (1.0 + market_return) + hsa_contribution;
        let roth_401k = prev.roth_401k * (1.0 + market_return) + roth_401k_contribution;
        let traditional_401k = prev.traditional_401k * (1.0 + market_return)
            + traditional_401k_contribution
            + employer_401k_match;

        let total_balance =
            savings + roth_ira + traditional_ira + hsa + roth_401k + traditional_401k;

        Ok(YearlySnapshot {
            year_index: state.year_index,
            age,
            calendar_year: prev.calendar_year + 1,
            salary,
            bonus,
            rsu,
            savings,
            roth_ira,
            traditional_ira,
            hsa,
            roth_401k,
            traditional_401k,
            total_balance,
            contribution_401k: employee_401k,
            roth_401k_contribution,
            traditional_401k_contribution,
            employer_401k_match,
            hsa_contribution,
            ira_contribution,
            extra_savings,
            tax_expense,
        })
    }

    /// One retirement year: balances grow conservatively, then the
    /// year's expenses are drawn in strict priority order
    fn decumulation_year(
        &self,
        prev: &YearlySnapshot,
        profile: &HouseholdProfile,
        state: &ProjectionState,
        age: u32,
    ) -> Result<YearlySnapshot, ProjectionError> {
        let cfg = &self.config;

        let monthly_expenses = prev_monthly_expenses(prev, profile) * (1.0 + cfg.inflation_rate);
        let annual_expenses = monthly_expenses * 12.0;

        // Growth happens before withdrawals
        let years_out = i32::from(profile.retirement_age) - age as i32;
        let market_return = age_adjusted_return(profile.investment_return, years_out, true);

        let mut savings = prev.savings * (1.0 + profile.savings_apy);
        let mut roth_ira = prev.roth_ira * (1.0 + market_return);
        let mut traditional_ira = prev.traditional_ira * (1.0 + market_return);
        let mut hsa = prev.hsa * (1.0 + market_return);
        let mut roth_401k = prev.roth_401k * (1.0 + market_return);
        let mut traditional_401k = prev.traditional_401k * (1.0 + market_return);

        let mut need = annual_expenses;
        let mut taxes_paid = 0.0;

        // 1. Cash savings, no tax
        let from_savings = need.min(savings);
        savings -= from_savings;
        need -= from_savings;

        // 2. Traditional accounts: withdrawals grossed up for the tax
        // bite, apportioned by balance, taxed as income
        if need > 0.0 {
            let combined = traditional_401k + traditional_ira;
            if combined > 0.0 {
                let gross_up = cfg.traditional_withdrawal_gross_up;
                let net = need.min(combined / gross_up);
                let gross = (net * gross_up).min(combined);
                let from_401k = gross * traditional_401k / combined;
                traditional_401k -= from_401k;
                traditional_ira -= gross - from_401k;
                taxes_paid = self
                    .assumptions
                    .taxes
                    .compute_tax(gross, profile.filing_status)?;
                need -= net;
            }
        }

        // 3. Roth accounts, apportioned by balance, no tax
        if need > 0.0 {
            let combined = roth_401k + roth_ira;
            if combined > 0.0 {
                let take = need.min(combined);
                let from_401k = take * roth_401k / combined;
                roth_401k -= from_401k;
                roth_ira -= take - from_401k;
                need -= take;
            }
        }

        // 4. HSA, tax-free under the qualified-expense assumption
        if need > 0.0 {
            let take = need.min(hsa);
            hsa -= take;
            need -= take;
        }

        // Whatever remains is this year's shortfall; it never borrows
        // from future years
        let shortfall = need.max(0.0);

        let total_balance =
            savings + roth_ira + traditional_ira + hsa + roth_401k + traditional_401k;

        Ok(YearlySnapshot {
            year_index: state.year_index,
            age,
            calendar_year: prev.calendar_year + 1,
            salary: 0.0,
            bonus: 0.0,
            rsu: 0.0,
            savings,
            roth_ira,
            traditional_ira,
            hsa,
            roth_401k,
            traditional_401k,
            total_balance,
            contribution_401k: 0.0,
            roth_401k_contribution: 0.0,
            traditional_401k_contribution: 0.0,
            employer_401k_match: 0.0,
            hsa_contribution: 0.0,
            ira_contribution: 0.0,
            extra_savings: 0.0,
            tax_expense: Some(TaxExpenseFigures {
                monthly_expenses,
                annual_expenses,
                taxes_paid,
                after_tax_income: 0.0,
                disposable_income: 0.0,
                shortfall,
            }),
        })
    }

    /// Linear IRA allowance factor: 1 below the phase-out window, 0
    /// above it
    fn ira_phase_out_factor(&self, pre_tax_income: f64) -> f64 {
        let start = self.config.ira_phase_out_start;
        let end = self.config.ira_phase_out_end;
        if pre_tax_income <= start {
            1.0
        } else if pre_tax_income >= end {
            0.0
        } else {
            (end - pre_tax_income) / (end - start)
        }
    }
}

/// Monthly expenses carried on the previous snapshot, falling back to
/// the profile for a basic-variant previous row
fn prev_monthly_expenses(prev: &YearlySnapshot, profile: &HouseholdProfile) -> f64 {
    prev.tax_expense
        .map(|t| t.monthly_expenses)
        .unwrap_or(profile.monthly_expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::FilingStatus;
    use approx::assert_relative_eq;

    fn test_profile() -> HouseholdProfile {
        HouseholdProfile {
            current_age: 35,
            retirement_age: 65,
            savings: 243_543.0,
            roth_ira: 63_181.0,
            traditional_ira: 93_974.0,
            hsa: 9_869.0,
            roth_401k: 81_988.0,
            traditional_401k: 40_140.0,
            annual_salary: 182_753.0,
            annual_bonus: 36_551.0,
            annual_rsu: 10_000.0,
            annual_merit_increase: 0.0325,
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

    fn test_config() -> ProjectionConfig {
        ProjectionConfig {
            start_year: Some(2025),
            ..Default::default()
        }
    }

    fn engine(config: ProjectionConfig) -> ProjectionEngine {
        ProjectionEngine::new(Assumptions::default_planning(), config)
    }

    #[test]
    fn test_basic_variant_stops_at_retirement() {
        let engine = engine(ProjectionConfig {
            start_year: Some(2025),
            ..ProjectionConfig::basic()
        });
        let table = engine.project(&test_profile()).unwrap();

        // Year 0 plus one row per accumulation year
        assert_eq!(table.snapshots.len(), 31);
        assert_eq!(table.snapshots.last().unwrap().age, 65);
        assert!(table.snapshots.iter().all(|s| s.tax_expense.is_none()));
    }

    #[test]
    fn test_extended_horizon_truncated_to_thirty_retirement_years() {
        let engine = engine(test_config());
        let table = engine.project(&test_profile()).unwrap();

        // 30 accumulation + 30 kept retirement years + year 0
        assert_eq!(table.snapshots.len(), 61);
        assert_eq!(table.snapshots.last().unwrap().age, 95);
        assert!(table.snapshots.iter().all(|s| s.tax_expense.is_some()));
    }

    #[test]
    fn test_total_balance_is_sum_of_accounts_every_year() {
        let engine = engine(test_config());
        let table = engine.project(&test_profile()).unwrap();

        for snapshot in &table.snapshots {
            assert_relative_eq!(
                snapshot.total_balance,
                snapshot.account_sum(),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_zero_contributions_zero_balances_stay_zero() {
        let profile = HouseholdProfile {
            savings: 0.0,
            roth_ira: 0.0,
            traditional_ira: 0.0,
            hsa: 0.0,
            roth_401k: 0.0,
            traditional_401k: 0.0,
            annual_salary: 100_000.0,
            annual_bonus: 0.0,
            annual_rsu: 0.0,
            annual_merit_increase: 0.0,
            roth_401k_percent: 0.0,
            traditional_401k_percent: 0.0,
            employer_401k_match: 0.0,
            employer_hsa_contribution: 0.0,
            annual_ira_contribution: 0.0,
            investment_return: 0.06,
            savings_apy: 0.02,
            monthly_expenses: 0.0,
            ..test_profile()
        };

        // HSA room would still be filled by the employee in the
        // default policy, so zero out the limit seed too
        let mut assumptions = Assumptions::default_planning();
        assumptions.limit_seed.limit_hsa = 0.0;

        let engine = ProjectionEngine::new(
            assumptions,
            ProjectionConfig {
                start_year: Some(2025),
                extra_savings_cap_fraction: 0.0,
                ..ProjectionConfig::basic()
            },
        );
        let table = engine.project(&profile).unwrap();

        assert_eq!(table.snapshots.len(), 31);
        for snapshot in &table.snapshots {
            assert_relative_eq!(snapshot.total_balance, 0.0);
        }
    }

    #[test]
    fn test_employee_401k_clamped_proportionally() {
        // 30% + 10% of a 200k salary wants 80k, far over the limit
        let profile = HouseholdProfile {
            annual_salary: 200_000.0,
            roth_401k_percent: 0.30,
            traditional_401k_percent: 0.10,
            annual_merit_increase: 0.0,
            ..test_profile()
        };
        let engine = engine(test_config());
        let state = ProjectionState::initial(&engine.assumptions);
        let year0 = engine.initial_snapshot(&profile, 2025);

        let (year1, state1) = engine.advance_year(&year0, &profile, state).unwrap();

        assert_relative_eq!(
            year1.contribution_401k,
            state1.limits.limit_401k,
            epsilon = 1e-9
        );
        // Clamping preserves the requested Roth:Traditional ratio
        assert_relative_eq!(
            year1.roth_401k_contribution / year1.traditional_401k_contribution,
            0.30 / 0.10,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_employer_match_respects_combined_limit() {
        // 12% of 150k leaves less room under the limit than the 10%
        // match wants, so the match is cut down to the remaining room
        let profile = HouseholdProfile {
            annual_salary: 150_000.0,
            roth_401k_percent: 0.06,
            traditional_401k_percent: 0.06,
            employer_401k_match: 0.10,
            annual_merit_increase: 0.0,
            ..test_profile()
        };
        let engine = engine(test_config());
        let state = ProjectionState::initial(&engine.assumptions);
        let year0 = engine.initial_snapshot(&profile, 2025);

        let (year1, state1) = engine.advance_year(&year0, &profile, state).unwrap();

        assert!(
            year1.contribution_401k + year1.employer_401k_match
                <= state1.limits.limit_401k + 1e-9
        );
        assert!(year1.employer_401k_match > 0.0);
    }

    #[test]
    fn test_merit_decay_halves_raises() {
        let profile = HouseholdProfile {
            annual_merit_increase: 0.04,
            ..test_profile()
        };
        let engine = engine(test_config());
        let table = engine.project(&profile).unwrap();

        let growth_early = table.snapshots[5].salary / table.snapshots[4].salary;
        let growth_late = table.snapshots[20].salary / table.snapshots[19].salary;
        assert_relative_eq!(growth_early, 1.04, epsilon = 1e-9);
        assert_relative_eq!(growth_late, 1.02, epsilon = 1e-9);
    }

    #[test]
    fn test_ira_phase_out() {
        let engine = engine(test_config());
        assert_eq!(engine.ira_phase_out_factor(100_000.0), 1.0);
        assert_eq!(engine.ira_phase_out_factor(165_000.0), 0.0);
        assert_relative_eq!(engine.ira_phase_out_factor(157_500.0), 0.5);
    }

    #[test]
    fn test_decumulation_cash_covers_need() {
        // One retirement year, flat prices, zero APY: the grown cash
        // balance minus expenses comes out exactly
        let profile = HouseholdProfile {
            current_age: 64,
            retirement_age: 65,
            savings: 50_000.0,
            roth_ira: 0.0,
            traditional_ira: 0.0,
            hsa: 0.0,
            roth_401k: 0.0,
            traditional_401k: 0.0,
            annual_salary: 0.0,
            annual_bonus: 0.0,
            annual_rsu: 0.0,
            annual_merit_increase: 0.0,
            savings_apy: 0.0,
            roth_401k_percent: 0.0,
            traditional_401k_percent: 0.0,
            employer_401k_match: 0.0,
            employer_hsa_contribution: 0.0,
            annual_ira_contribution: 0.0,
            monthly_expenses: 40_000.0 / 12.0,
            ..test_profile()
        };
        let engine = engine(ProjectionConfig {
            inflation_rate: 0.0,
            ..test_config()
        });
        let table = engine.project(&profile).unwrap();

        let year1 = &table.snapshots[1];
        assert_eq!(year1.age, 65);
        let figures = year1.tax_expense.unwrap();
        assert_relative_eq!(year1.savings, 10_000.0, epsilon = 1e-6);
        assert_relative_eq!(figures.shortfall, 0.0);
        assert_relative_eq!(figures.taxes_paid, 0.0);
    }

    #[test]
    fn test_withdrawal_priority_order() {
        // Cash falls short, traditional accounts cover the rest with a
        // grossed-up, taxed withdrawal; Roth and HSA stay untouched
        let profile = HouseholdProfile {
            current_age: 64,
            retirement_age: 65,
            savings: 10_000.0,
            roth_ira: 100_000.0,
            traditional_ira: 50_000.0,
            hsa: 20_000.0,
            roth_401k: 100_000.0,
            traditional_401k: 150_000.0,
            annual_salary: 0.0,
            annual_bonus: 0.0,
            annual_rsu: 0.0,
            annual_merit_increase: 0.0,
            investment_return: 0.0,
            savings_apy: 0.0,
            roth_401k_percent: 0.0,
            traditional_401k_percent: 0.0,
            employer_401k_match: 0.0,
            employer_hsa_contribution: 0.0,
            annual_ira_contribution: 0.0,
            monthly_expenses: 40_000.0 / 12.0,
            ..test_profile()
        };
        let engine = engine(ProjectionConfig {
            inflation_rate: 0.0,
            ..test_config()
        });
        let table = engine.project(&profile).unwrap();

        let year1 = &table.snapshots[1];
        let figures = year1.tax_expense.unwrap();

        // Cash fully drained first
        assert_relative_eq!(year1.savings, 0.0);
        // 30_000 net remains, grossed up to 37_500 from traditional,
        // split 150k:50k between the 401k and the IRA
        let gross = 30_000.0 * 1.25;
        assert_relative_eq!(
            year1.traditional_401k,
            150_000.0 - gross * 0.75,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            year1.traditional_ira,
            50_000.0 - gross * 0.25,
            epsilon = 1e-6
        );
        assert!(figures.taxes_paid > 0.0);
        // Roth and HSA untouched, no shortfall
        assert_relative_eq!(year1.roth_ira, 100_000.0);
        assert_relative_eq!(year1.roth_401k, 100_000.0);
        assert_relative_eq!(year1.hsa, 20_000.0);
        assert_relative_eq!(figures.shortfall, 0.0);
    }

    #[test]
    fn test_shortfall_only_after_everything_is_exhausted() {
        let profile = HouseholdProfile {
            current_age: 64,
            retirement_age: 65,
            savings: 5_000.0,
            roth_ira: 2_000.0,
            traditional_ira: 1_000.0,
            hsa: 500.0,
            roth_401k: 0.0,
            traditional_401k: 0.0,
            annual_salary: 0.0,
            annual_bonus: 0.0,
            annual_rsu: 0.0,
            annual_merit_increase: 0.0,
            investment_return: 0.0,
            savings_apy: 0.0,
            roth_401k_percent: 0.0,
            traditional_401k_percent: 0.0,
            employer_401k_match: 0.0,
            employer_hsa_contribution: 0.0,
            annual_ira_contribution: 0.0,
            monthly_expenses: 40_000.0 / 12.0,
            ..test_profile()
        };
        let engine = engine(ProjectionConfig {
            inflation_rate: 0.0,
            ..test_config()
        });
        let table = engine.project(&profile).unwrap();

        let year1 = &table.snapshots[1];
        let figures = year1.tax_expense.unwrap();

        assert_relative_eq!(year1.savings, 0.0);
        assert_relative_eq!(year1.traditional_ira, 0.0);
        assert_relative_eq!(year1.roth_ira, 0.0);
        assert_relative_eq!(year1.hsa, 0.0);
        // Traditional dollars only deliver 1/1.25 net
        let net_from_traditional = 1_000.0 / 1.25;
        let expected_shortfall = 40_000.0 - 5_000.0 - net_from_traditional - 2_000.0 - 500.0;
        assert_relative_eq!(figures.shortfall, expected_shortfall, epsilon = 1e-6);
        assert!(figures.shortfall >= 0.0);
    }

    #[test]
    fn test_ages_keep_counting_past_u8_range() {
        // A late-life extended run walks 40 years past retirement, so
        // projected ages can exceed what the profile's age type holds
        let profile = HouseholdProfile {
            current_age: 230,
            retirement_age: 240,
            ..test_profile()
        };
        let engine = engine(test_config());
        let table = engine.project(&profile).unwrap();

        for pair in table.snapshots.windows(2) {
            assert_eq!(pair[1].age, pair[0].age + 1);
        }
        // 10 accumulation + 30 kept retirement years
        assert_eq!(table.snapshots.last().unwrap().age, 270);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let engine = engine(test_config());
        let profile = test_profile();
        let first = engine.project(&profile).unwrap();
        let second = engine.project(&profile).unwrap();
        assert_eq!(first.snapshots, second.snapshots);
    }

    #[test]
    fn test_unknown_status_rejected_at_entry() {
        let mut assumptions = Assumptions::default_planning();
        assumptions.taxes.federal.remove(&FilingStatus::Married);
        let engine = ProjectionEngine::new(assumptions, test_config());
        let profile = HouseholdProfile {
            filing_status: FilingStatus::Married,
            ..test_profile()
        };

        assert!(matches!(
            engine.project(&profile),
            Err(ProjectionError::UnknownFilingStatus(_))
        ));
    }

    #[test]
    fn test_invalid_age_range_rejected() {
        let engine = engine(test_config());
        let profile = HouseholdProfile {
            current_age: 65,
            retirement_age: 65,
            ..test_profile()
        };
        assert!(matches!(
            engine.project(&profile),
            Err(ProjectionError::InvalidAgeRange { .. })
        ));
    }
}
