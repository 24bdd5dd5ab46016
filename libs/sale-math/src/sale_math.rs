use sale_types::{SaleError, PERCENT_DENOMINATOR};
use soroban_fixed_point_math::FixedPoint;

/// Tokens minted for a contribution at `buy_rate` tokens per payment unit
pub fn tokens_for_contribution(amount: i128, buy_rate: i128) -> Result<i128, SaleError> {
    if amount <= 0 || buy_rate <= 0 {
        return Err(SaleError::InvalidAmount);
    }
    amount.checked_mul(buy_rate).ok_or(SaleError::Overflow)
}

/// floor(amount * percent / 100)
pub fn percent_of(amount: i128, percent: u32) -> Result<i128, SaleError> {
    if amount < 0 {
        return Err(SaleError::InvalidAmount);
    }
    amount
        .fixed_mul_floor(percent as i128, PERCENT_DENOMINATOR)
        .ok_or(SaleError::Overflow)
}

/// Split raised funds into (liquidity share, remainder)
///
/// The liquidity share rounds down so the remainder never underflows.
pub fn liquidity_split(raised: i128, liquidity_percent: u32) -> Result<(i128, i128), SaleError> {
    let liquidity = percent_of(raised, liquidity_percent)?;
    Ok((liquidity, raised - liquidity))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: i128 = 10_000_000; // 7 decimals

    #[test]
    fn test_tokens_for_contribution() {
        assert_eq!(tokens_for_contribution(50 * ONE, 1), Ok(50 * ONE));
        // 0.08 at rate 25 buys exactly 2 tokens
        assert_eq!(tokens_for_contribution(ONE * 8 / 100, 25), Ok(2 * ONE));
    }

    #[test]
    fn test_tokens_for_contribution_rejects_bad_input() {
        assert_eq!(tokens_for_contribution(0, 1), Err(SaleError::InvalidAmount));
        assert_eq!(tokens_for_contribution(1, 0), Err(SaleError::InvalidAmount));
        assert_eq!(tokens_for_contribution(i128::MAX, 2), Err(SaleError::Overflow));
    }

    #[test]
    fn test_percent_of_rounds_down() {
        assert_eq!(percent_of(150 * ONE, 20), Ok(30 * ONE));
        assert_eq!(percent_of(99, 50), Ok(49));
        assert_eq!(percent_of(1_000, 0), Ok(0));
        assert_eq!(percent_of(1_000, 100), Ok(1_000));
    }

    #[test]
    fn test_liquidity_split_conserves_funds() {
        for raised in [0i128, 1, 99, 150 * ONE, 7_777_777] {
            for pct in [0u32, 1, 20, 33, 100] {
                let (liquidity, rest) = liquidity_split(raised, pct).unwrap();
                assert_eq!(liquidity + rest, raised);
                assert!(liquidity >= 0 && rest >= 0);
            }
        }
    }
}
