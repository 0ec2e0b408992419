//! CSV-based household profile loader
//!
//! Loads a batch of household profiles (one per row) for what-if
//! comparison runs. Every profile is validated on load; the first
//! invalid row aborts the whole load since a half-loaded batch is
//! never useful.

use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::data::HouseholdProfile;

/// Load and validate household profiles from a CSV file
///
/// Column headers must match the `HouseholdProfile` field names, with
/// `filing_status` given as `single` or `married`.
pub fn load_households(path: &Path) -> Result<Vec<HouseholdProfile>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut households = Vec::new();
    for result in reader.deserialize() {
        let profile: HouseholdProfile = result?;
        profile.validate()?;
        households.push(profile);
    }

    log::info!(
        "loaded {} household profiles from {}",
        households.len(),
        path.display()
    );

    Ok(households)
}
