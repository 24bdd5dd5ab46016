use crate::full_math::{mul_div, mul_div_rounding_up};
use sale_types::{ExchangeReserves, SaleError, EXCHANGE_FEE_DENOMINATOR, EXCHANGE_FEE_NUMERATOR};
use soroban_sdk::Env;

/// Output of a constant-product trade for an exact input, after the 0.3% fee
///
/// out = (in * 997 * out_reserve) / (in_reserve * 1000 + in * 997)
pub fn get_input_price(
    env: &Env,
    input_amount: i128,
    input_reserve: i128,
    output_reserve: i128,
) -> Result<i128, SaleError> {
    if input_amount <= 0 {
        return Err(SaleError::InvalidAmount);
    }
    if input_reserve <= 0 || output_reserve <= 0 {
        return Err(SaleError::InsufficientLiquidity);
    }

    let input_with_fee = input_amount
        .checked_mul(EXCHANGE_FEE_NUMERATOR)
        .ok_or(SaleError::Overflow)?;
    let denominator = input_reserve
        .checked_mul(EXCHANGE_FEE_DENOMINATOR)
        .and_then(|scaled| scaled.checked_add(input_with_fee))
        .ok_or(SaleError::Overflow)?;

    mul_div(env, input_with_fee, output_reserve, denominator)
}

/// Tokens consumed and liquidity minted for a deposit of `eth_in` / `token_in`
///
/// The first deposit sets the price and mints liquidity equal to `eth_in`.
/// Later deposits take `floor(eth_in * T / E) + 1` tokens and mint
/// `floor(eth_in * L / E)` liquidity; the caller refunds unused tokens.
pub fn quote_deposit(
    env: &Env,
    eth_in: i128,
    token_in: i128,
    reserves: &ExchangeReserves,
    total_liquidity: i128,
) -> Result<(i128, i128), SaleError> {
    if eth_in <= 0 || token_in <= 0 {
        return Err(SaleError::InvalidAmount);
    }

    if total_liquidity == 0 {
        return Ok((token_in, eth_in));
    }

    if reserves.eth_reserve <= 0 {
        return Err(SaleError::InsufficientLiquidity);
    }

    let token_required = mul_div(env, eth_in, reserves.token_reserve, reserves.eth_reserve)?
        .checked_add(1)
        .ok_or(SaleError::Overflow)?;
    if token_in < token_required {
        return Err(SaleError::SlippageExceeded);
    }

    let minted = mul_div(env, eth_in, total_liquidity, reserves.eth_reserve)?;
    Ok((token_required, minted))
}

/// Largest deposit of at most `eth_max` / `token_max` the pool accepts at its
/// current price
///
/// Returns (eth_in, tokens_used, minted). All zero when the price leaves no
/// room for a deposit that mints liquidity.
pub fn fit_deposit(
    env: &Env,
    eth_max: i128,
    token_max: i128,
    reserves: &ExchangeReserves,
    total_liquidity: i128,
) -> Result<(i128, i128, i128), SaleError> {
    if eth_max <= 0 || token_max <= 0 {
        return Err(SaleError::InvalidAmount);
    }
    if total_liquidity == 0 {
        return Ok((eth_max, token_max, eth_max));
    }
    if reserves.eth_reserve <= 0 {
        return Err(SaleError::InsufficientLiquidity);
    }

    // Largest e with floor(e * T / E) + 1 <= token_max, i.e. e * T < token_max * E
    let eth_in = if reserves.token_reserve > 0 {
        let eth_cap =
            mul_div_rounding_up(env, token_max, reserves.eth_reserve, reserves.token_reserve)? - 1;
        eth_max.min(eth_cap)
    } else {
        eth_max
    };
    if eth_in <= 0 {
        return Ok((0, 0, 0));
    }

    let (tokens_used, minted) = quote_deposit(env, eth_in, token_max, reserves, total_liquidity)?;
    if minted <= 0 {
        return Ok((0, 0, 0));
    }
    Ok((eth_in, tokens_used, minted))
}

/// (eth, tokens) owed for burning `amount` of `total_liquidity`
pub fn amounts_for_liquidity(
    env: &Env,
    amount: i128,
    reserves: &ExchangeReserves,
    total_liquidity: i128,
) -> Result<(i128, i128), SaleError> {
    if amount <= 0 {
        return Err(SaleError::InvalidAmount);
    }
    if amount > total_liquidity {
        return Err(SaleError::InsufficientLiquidity);
    }

    let eth = mul_div(env, amount, reserves.eth_reserve, total_liquidity)?;
    let tokens = mul_div(env, amount, reserves.token_reserve, total_liquidity)?;
    Ok((eth, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserves(eth: i128, tokens: i128) -> ExchangeReserves {
        ExchangeReserves {
            eth_reserve: eth,
            token_reserve: tokens,
        }
    }

    #[test]
    fn test_input_price_applies_fee() {
        let env = Env::default();
        // Without a fee 1000 into 1_000_000/1_000_000 would return 999
        let out = get_input_price(&env, 1_000, 1_000_000, 1_000_000).unwrap();
        assert_eq!(out, 996);
    }

    #[test]
    fn test_input_price_never_drains_reserve() {
        let env = Env::default();
        let out = get_input_price(&env, i128::MAX / 2_000, 10, 500).unwrap();
        assert!(out < 500);
    }

    #[test]
    fn test_input_price_empty_pool() {
        let env = Env::default();
        assert_eq!(
            get_input_price(&env, 10, 0, 10),
            Err(SaleError::InsufficientLiquidity)
        );
    }

    #[test]
    fn test_first_deposit_sets_price() {
        let env = Env::default();
        let (tokens, minted) = quote_deposit(&env, 300, 7_500, &reserves(0, 0), 0).unwrap();
        assert_eq!(tokens, 7_500);
        assert_eq!(minted, 300);
    }

    #[test]
    fn test_later_deposit_keeps_ratio() {
        let env = Env::default();
        let (tokens, minted) = quote_deposit(&env, 100, 1_000, &reserves(300, 900), 300).unwrap();
        assert_eq!(tokens, 301);
        assert_eq!(minted, 100);

        assert_eq!(
            quote_deposit(&env, 100, 300, &reserves(300, 900), 300),
            Err(SaleError::SlippageExceeded)
        );
    }

    #[test]
    fn test_fit_deposit_empty_pool_takes_everything() {
        let env = Env::default();
        assert_eq!(
            fit_deposit(&env, 30, 750, &reserves(0, 0), 0),
            Ok((30, 750, 30))
        );
    }

    #[test]
    fn test_fit_deposit_token_bound() {
        let env = Env::default();
        // At 1:1 the +1 token slack leaves room for one unit less of eth
        assert_eq!(
            fit_deposit(&env, 30, 30, &reserves(1, 1), 1),
            Ok((29, 30, 29))
        );
    }

    #[test]
    fn test_fit_deposit_eth_bound() {
        let env = Env::default();
        // Pool holds fewer tokens per eth than offered; unused tokens stay out
        assert_eq!(
            fit_deposit(&env, 30, 30, &reserves(10, 1), 10),
            Ok((30, 4, 30))
        );
    }

    #[test]
    fn test_fit_deposit_no_room() {
        let env = Env::default();
        assert_eq!(
            fit_deposit(&env, 30, 30, &reserves(1, 1_000), 1),
            Ok((0, 0, 0))
        );
        assert_eq!(
            fit_deposit(&env, 0, 30, &reserves(1, 1), 1),
            Err(SaleError::InvalidAmount)
        );
    }

    #[test]
    fn test_full_withdrawal_returns_reserves() {
        let env = Env::default();
        let pool = reserves(30, 30);
        assert_eq!(amounts_for_liquidity(&env, 30, &pool, 30), Ok((30, 30)));
        assert_eq!(amounts_for_liquidity(&env, 15, &pool, 30), Ok((15, 15)));
        assert_eq!(
            amounts_for_liquidity(&env, 31, &pool, 30),
            Err(SaleError::InsufficientLiquidity)
        );
    }
}
