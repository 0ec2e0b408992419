//! Retirement System CLI
//!
//! Runs a single-household projection and prints the yearly ledger,
//! writes the full table to CSV, and optionally emits JSON for
//! downstream charting.

use std::fs::File;
use std::io::Write;

use anyhow::Context;
use clap::Parser;

use retirement_system::{
    Assumptions, FilingStatus, HouseholdProfile, ProjectionConfig, ProjectionEngine,
    ProjectionTable,
};

/// Project retirement savings year by year
///
/// Rates are given as display percentages (6 = 6%) and converted to
/// fractions before they reach the engine.
#[derive(Debug, Parser)]
#[command(name = "retirement_system", version, about)]
struct Cli {
    #[arg(long, default_value_t = 35)]
    current_age: u8,
    #[arg(long, default_value_t = 65)]
    retirement_age: u8,

    #[arg(long, default_value_t = 243_543.0)]
    savings: f64,
    #[arg(long, default_value_t = 63_181.0)]
    roth_ira: f64,
    #[arg(long, default_value_t = 93_974.0)]
    traditional_ira: f64,
    #[arg(long, default_value_t = 9_869.0)]
    hsa: f64,
    #[arg(long, default_value_t = 81_988.0)]
    roth_401k: f64,
    #[arg(long, default_value_t = 40_140.0)]
    traditional_401k: f64,

    #[arg(long, default_value_t = 182_753.0)]
    annual_salary: f64,
    #[arg(long, default_value_t = 36_551.0)]
    annual_bonus: f64,
    #[arg(long, default_value_t = 10_000.0)]
    annual_rsu: f64,
    #[arg(long, default_value_t = 3.25)]
    merit_increase_pct: f64,
    #[arg(long, default_value_t = 6.0)]
    investment_return_pct: f64,
    #[arg(long, default_value_t = 3.8)]
    savings_apy_pct: f64,

    #[arg(long, default_value_t = 6.0)]
    roth_401k_pct: f64,
    #[arg(long, default_value_t = 8.0)]
    traditional_401k_pct: f64,
    #[arg(long, default_value_t = 6.0)]
    employer_match_pct: f64,
    #[arg(long, default_value_t = 1_000.0)]
    employer_hsa_contribution: f64,
    #[arg(long, default_value_t = 0.0)]
    annual_ira_contribution: f64,

    #[arg(long, default_value_t = 6_100.0)]
    monthly_expenses: f64,
    #[arg(long, default_value = "single")]
    filing_status: FilingStatus,

    /// Accumulation-only projection (no taxes, expenses, withdrawals)
    #[arg(long)]
    basic: bool,

    /// Output CSV path
    #[arg(long, default_value = "projection_output.csv")]
    output: String,

    /// Print the full table as JSON instead of the console ledger
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn profile(&self) -> HouseholdProfile {
        HouseholdProfile {
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            savings: self.savings,
            roth_ira: self.roth_ira,
            traditional_ira: self.traditional_ira,
            hsa: self.hsa,
            roth_401k: self.roth_401k,
            traditional_401k: self.traditional_401k,
            annual_salary: self.annual_salary,
            annual_bonus: self.annual_bonus,
            annual_rsu: self.annual_rsu,
            annual_merit_increase: self.merit_increase_pct / 100.0,
            investment_return: self.investment_return_pct / 100.0,
            savings_apy: self.savings_apy_pct / 100.0,
            roth_401k_percent: self.roth_401k_pct / 100.0,
            traditional_401k_percent: self.traditional_401k_pct / 100.0,
            employer_401k_match: self.employer_match_pct / 100.0,
            employer_hsa_contribution: self.employer_hsa_contribution,
            annual_ira_contribution: self.annual_ira_contribution,
            monthly_expenses: self.monthly_expenses,
            filing_status: self.filing_status,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let profile = cli.profile();
    let config = if cli.basic {
        ProjectionConfig::basic()
    } else {
        ProjectionConfig::default()
    };

    let engine = ProjectionEngine::new(Assumptions::default_planning(), config);
    let table = engine.project(&profile).context("projection failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("Retirement System v0.1.0");
    println!("========================\n");
    println!("Household:");
    println!("  Ages: {} -> {}", profile.current_age, profile.retirement_age);
    println!("  Total Current Savings: ${:.2}", profile.total_current_savings());
    println!("  Annual Income: ${:.2}", profile.total_income());
    println!();

    print_ledger(&table);
    write_csv(&table, &cli.output)
        .with_context(|| format!("unable to write {}", cli.output))?;
    println!("\nFull results written to: {}", cli.output);

    print_summary(&table);

    Ok(())
}

fn print_ledger(table: &ProjectionTable) {
    println!("Projection Results ({} years):", table.snapshots.len());
    println!(
        "{:>4} {:>4} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12} {:>14}",
        "Yr", "Age", "Year", "Salary", "Savings", "401k(R)", "401k(T)", "Taxes", "Total"
    );
    println!("{}", "-".repeat(96));

    for snapshot in table.snapshots.iter().take(20) {
        let taxes = snapshot
            .tax_expense
            .map(|t| format!("{:.0}", t.taxes_paid))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4} {:>4} {:>6} {:>12.0} {:>12.0} {:>12.0} {:>12.0} {:>12} {:>14.0}",
            snapshot.year_index,
            snapshot.age,
            snapshot.calendar_year,
            snapshot.salary,
            snapshot.savings,
            snapshot.roth_401k,
            snapshot.traditional_401k,
            taxes,
            snapshot.total_balance,
        );
    }
    if table.snapshots.len() > 20 {
        println!("... ({} more years)", table.snapshots.len() - 20);
    }
}

fn write_csv(table: &ProjectionTable, path: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(
        file,
        "Year,Age,CalendarYear,Salary,Bonus,RSU,Savings,RothIRA,TraditionalIRA,HSA,\
         Roth401k,Traditional401k,TotalBalance,Contribution401k,Roth401kContribution,\
         Traditional401kContribution,EmployerMatch,HSAContribution,IRAContribution,\
         ExtraSavings,MonthlyExpenses,AnnualExpenses,TaxesPaid,AfterTaxIncome,\
         DisposableIncome,Shortfall"
    )?;

    for row in &table.snapshots {
        let extended = row
            .tax_expense
            .map(|t| {
                format!(
                    "{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
                    t.monthly_expenses,
                    t.annual_expenses,
                    t.taxes_paid,
                    t.after_tax_income,
                    t.disposable_income,
                    t.shortfall
                )
            })
            .unwrap_or_else(|| ",,,,,".to_string());

        writeln!(
            file,
            "{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},\
             {:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
            row.year_index,
            row.age,
            row.calendar_year,
            row.salary,
            row.bonus,
            row.rsu,
            row.savings,
            row.roth_ira,
            row.traditional_ira,
            row.hsa,
            row.roth_401k,
            row.traditional_401k,
            row.total_balance,
            row.contribution_401k,
            row.roth_401k_contribution,
            row.traditional_401k_contribution,
            row.employer_401k_match,
            row.hsa_contribution,
            row.ira_contribution,
            row.extra_savings,
            extended,
        )?;
    }

    Ok(())
}

fn print_summary(table: &ProjectionTable) {
    let summary = table.summary();
    println!("\nSummary:");
    println!("  Years Projected: {}", summary.years_projected);
    println!("  Retirement Year: {}", summary.retirement_calendar_year);
    println!("  Balance at Retirement: ${:.2}", summary.balance_at_retirement);
    println!("  Final Balance (Future Value): ${:.2}", summary.final_balance);
    println!(
        "  Final Balance (Present Value): ${:.2}",
        summary.final_balance_present_value
    );
    println!(
        "  Estimated Monthly Income: ${:.2}",
        summary.estimated_monthly_income
    );
    println!("  Lifetime Taxes: ${:.2}", summary.lifetime_taxes);
    if summary.total_shortfall > 0.0 {
        println!("  Unfunded Retirement Need: ${:.2}", summary.total_shortfall);
    }

    // Key milestone years for quick validation
    println!("\nKey Milestones:");
    for &index in &[1usize, 5, 10, 20, 30] {
        if let Some(row) = table.snapshots.get(index) {
            println!(
                "  Year {:>2}: Age={} Salary=${:.0} Total=${:.2}",
                row.year_index, row.age, row.salary, row.total_balance
            );
        }
    }
}
