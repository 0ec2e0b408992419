//! CSV-based tax schedule loader
//!
//! Loads bracket schedules from CSV files so alternative tax tables can
//! be swapped in without recompiling. Files hold one bracket per row:
//! `filing_status,threshold,rate`.

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::tax::{BracketSchedule, FilingStatus, TaxTables};

/// Default path to the tax table directory
pub const DEFAULT_TAX_TABLE_PATH: &str = "data/tax_tables";

/// Load one bracket file into per-status schedules
pub fn load_bracket_schedules(
    path: &Path,
    file_name: &str,
) -> Result<HashMap<FilingStatus, BracketSchedule>, Box<dyn Error>> {
    let file = File::open(path.join(file_name))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut pairs: HashMap<FilingStatus, Vec<(f64, f64)>> = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let status: FilingStatus = record[0].parse()?;
        let threshold: f64 = record[1].parse()?;
        let rate: f64 = record[2].parse()?;
        pairs.entry(status).or_default().push((threshold, rate));
    }

    // File-sourced schedules go through the validating constructor
    let mut schedules = HashMap::new();
    for (status, brackets) in pairs {
        schedules.insert(status, BracketSchedule::validated(&brackets)?);
    }

    Ok(schedules)
}

/// Load federal and state schedules from a tax table directory
pub fn load_tax_tables(path: &Path) -> Result<TaxTables, Box<dyn Error>> {
    let federal = load_bracket_schedules(path, "federal_brackets.csv")?;
    let state = load_bracket_schedules(path, "state_brackets.csv")?;

    log::info!(
        "loaded tax tables from {} ({} federal schedules, {} state schedules)",
        path.display(),
        federal.len(),
        state.len()
    );

    Ok(TaxTables { federal, state })
}
