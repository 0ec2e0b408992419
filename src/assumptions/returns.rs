//! Age-adjusted market return policy
//!
//! The nominal investment return is dialed down as the household
//! approaches retirement, and again during decumulation. The cash
//! savings APY is never adjusted.

/// Multiplier applied on top of the glide-path tier during decumulation
pub const RETIREMENT_RETURN_MULTIPLIER: f64 = 0.8;

/// Glide-path tier for the given number of years before retirement
///
/// Full rate more than 20 years out, then 0.9 / 0.8 / 0.7 as
/// retirement approaches.
pub fn glide_path_tier(years_to_retirement: i32) -> f64 {
    if years_to_retirement > 20 {
        1.0
    } else if years_to_retirement > 10 {
        0.9
    } else if years_to_retirement > 5 {
        0.8
    } else {
        0.7
    }
}

/// Effective market return for one projected year
pub fn age_adjusted_return(nominal: f64, years_to_retirement: i32, in_retirement: bool) -> f64 {
    let tier = glide_path_tier(years_to_retirement);
    if in_retirement {
        nominal * tier * RETIREMENT_RETURN_MULTIPLIER
    } else {
        nominal * tier
    }
}
