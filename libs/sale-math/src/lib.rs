#![no_std]

pub mod exchange_math;
pub mod full_math;
pub mod sale_math;
pub mod vesting_math;

pub use exchange_math::*;
pub use full_math::*;
pub use sale_math::*;
pub use vesting_math::*;
