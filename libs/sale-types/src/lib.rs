#![no_std]

mod error;
mod exchange;
mod liquidity;
mod sale;
mod vesting;

pub use error::*;
pub use exchange::*;
pub use liquidity::*;
pub use sale::*;
pub use vesting::*;

/// Percentages are expressed out of 100
pub const PERCENT_DENOMINATOR: i128 = 100;

/// Exchange fee numerator (0.3% fee => 997 / 1000 of the input is priced)
pub const EXCHANGE_FEE_NUMERATOR: i128 = 997;

/// Exchange fee denominator
pub const EXCHANGE_FEE_DENOMINATOR: i128 = 1000;

/// Check that a percentage fits in 0..=100
pub fn is_valid_percent(percent: u32) -> bool {
    percent <= 100
}
