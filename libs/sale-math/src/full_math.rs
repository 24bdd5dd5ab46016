use sale_types::SaleError;
use soroban_sdk::{Env, U256};

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator for non-negative operands
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, SaleError> {
    if a < 0 || b < 0 || denominator < 0 {
        return Err(SaleError::InvalidAmount);
    }
    if denominator == 0 {
        return Err(SaleError::InsufficientLiquidity);
    }

    let a_256 = U256::from_u128(env, a as u128);
    let b_256 = U256::from_u128(env, b as u128);
    let denom_256 = U256::from_u128(env, denominator as u128);

    let result = a_256.mul(&b_256).div(&denom_256);
    i128_from_u256(env, &result)
}

/// Multiply and divide with 256-bit intermediate precision (rounds up)
pub fn mul_div_rounding_up(
    env: &Env,
    a: i128,
    b: i128,
    denominator: i128,
) -> Result<i128, SaleError> {
    let result = mul_div(env, a, b, denominator)?;

    let product = U256::from_u128(env, a as u128).mul(&U256::from_u128(env, b as u128));
    let remainder = product.rem_euclid(&U256::from_u128(env, denominator as u128));

    if remainder > U256::from_u32(env, 0) {
        result.checked_add(1).ok_or(SaleError::Overflow)
    } else {
        Ok(result)
    }
}

/// Narrow a U256 back to a non-negative i128
fn i128_from_u256(env: &Env, value: &U256) -> Result<i128, SaleError> {
    let max = U256::from_u128(env, i128::MAX as u128);
    if *value > max {
        return Err(SaleError::Overflow);
    }
    value
        .to_u128()
        .map(|v| v as i128)
        .ok_or(SaleError::Overflow)
}
