//! What-if scenario comparison across households
//!
//! Loads household profiles from a CSV (path as first argument, or a
//! built-in sample household) and projects each against a grid of
//! return and retirement-age scenarios in parallel. Outputs one
//! comparison row per (household, scenario).

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use anyhow::Context;
use rayon::prelude::*;

use retirement_system::{
    profile::load_households, Assumptions, FilingStatus, HouseholdProfile, ProjectionConfig,
    ScenarioRunner,
};

static RETURN_SCENARIOS: [f64; 4] = [0.04, 0.05, 0.06, 0.07];
static RETIREMENT_AGE_SCENARIOS: [u8; 3] = [62, 65, 67];

fn sample_household() -> HouseholdProfile {
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

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let start = Instant::now();

    let households = match std::env::args().nth(1) {
        Some(path) => load_households(std::path::Path::new(&path))
            .map_err(|e| anyhow::anyhow!("failed to load households from {}: {}", path, e))?,
        None => vec![sample_household()],
    };
    println!("Comparing scenarios for {} household(s)", households.len());

    let runner = ScenarioRunner::with_assumptions(Assumptions::default_planning());

    // Build the (household, return, retirement age) grid
    let grid: Vec<(usize, &HouseholdProfile, f64, u8)> = households
        .iter()
        .enumerate()
        .flat_map(|(id, profile)| {
            RETURN_SCENARIOS.iter().flat_map(move |&rate| {
                RETIREMENT_AGE_SCENARIOS
                    .iter()
                    .filter(move |&&age| age > profile.current_age)
                    .map(move |&age| (id, profile, rate, age))
            })
        })
        .collect();

    // Runs are independent: projection is pure per (profile, config)
    let results: Vec<_> = grid
        .par_iter()
        .map(|&(id, profile, rate, retirement_age)| {
            let scenario = HouseholdProfile {
                investment_return: rate,
                retirement_age,
                ..profile.clone()
            };
            let table = runner.run(&scenario, ProjectionConfig::default())?;
            Ok((id, rate, retirement_age, table.summary()))
        })
        .collect::<Result<_, retirement_system::ProjectionError>>()?;

    let output_path = "what_if_output.csv";
    let mut file = File::create(output_path).context("unable to create output file")?;
    writeln!(
        file,
        "Household,InvestmentReturn,RetirementAge,BalanceAtRetirement,FinalBalance,\
         FinalBalancePresentValue,EstimatedMonthlyIncome,LifetimeTaxes,TotalShortfall"
    )?;
    for (id, rate, retirement_age, summary) in &results {
        writeln!(
            file,
            "{},{:.4},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            id,
            rate,
            retirement_age,
            summary.balance_at_retirement,
            summary.final_balance,
            summary.final_balance_present_value,
            summary.estimated_monthly_income,
            summary.lifetime_taxes,
            summary.total_shortfall,
        )?;
    }

    println!("{} scenario rows written to {}", results.len(), output_path);

    // Console digest: best and worst funded scenarios per household
    for (id, _) in households.iter().enumerate() {
        let mut rows: Vec<_> = results.iter().filter(|r| r.0 == id).collect();
        rows.sort_by(|a, b| a.3.final_balance.total_cmp(&b.3.final_balance));
        if let (Some(worst), Some(best)) = (rows.first(), rows.last()) {
            println!(
                "Household {}: final balance ${:.0} (r={:.0}%, retire {}) to ${:.0} (r={:.0}%, retire {})",
                id,
                worst.3.final_balance,
                worst.1 * 100.0,
                worst.2,
                best.3.final_balance,
                best.1 * 100.0,
                best.2,
            );
        }
    }

    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
