//! Household profile inputs and batch loading

mod data;
pub mod loader;

pub use data::HouseholdProfile;
pub use loader::load_households;
