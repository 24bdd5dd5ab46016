// ============================================================================
// MATH INVARIANT SPECIFICATIONS
// ============================================================================
//
// KEY INVARIANTS:
// 1. A trade never pays out the whole output reserve
// 2. Pricing is monotonic in the input amount
// 3. Burning all shares returns the full reserves
//
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_assume, cvlr_satisfy};
use cvlr_soroban_derive::rule;
use sale_math::{amounts_for_liquidity, get_input_price};
use sale_types::ExchangeReserves;
use soroban_sdk::Env;

/// RULE: Sanity check - pricing is reachable
#[rule]
pub fn sanity_input_price(env: Env, input: i128, input_reserve: i128, output_reserve: i128) {
    cvlr_assume!(input > 0 && input_reserve > 0 && output_reserve > 0);
    let _out = get_input_price(&env, input, input_reserve, output_reserve);
    cvlr_satisfy!(true);
}

/// RULE: Output stays strictly below the output reserve
#[rule]
pub fn input_price_below_reserve(env: Env, input: i128, input_reserve: i128, output_reserve: i128) {
    cvlr_assume!(input > 0 && input_reserve > 0 && output_reserve > 0);
    if let Ok(out) = get_input_price(&env, input, input_reserve, output_reserve) {
        cvlr_assert!(out >= 0 && out < output_reserve);
    }
}

/// RULE: Selling more never buys less
#[rule]
pub fn input_price_monotonic(
    env: Env,
    small: i128,
    large: i128,
    input_reserve: i128,
    output_reserve: i128,
) {
    cvlr_assume!(small > 0 && small <= large);
    cvlr_assume!(input_reserve > 0 && output_reserve > 0);
    if let (Ok(out_small), Ok(out_large)) = (
        get_input_price(&env, small, input_reserve, output_reserve),
        get_input_price(&env, large, input_reserve, output_reserve),
    ) {
        cvlr_assert!(out_small <= out_large);
    }
}

/// RULE: Burning the full supply returns the full reserves
#[rule]
pub fn full_burn_returns_reserves(env: Env, eth: i128, tokens: i128, total: i128) {
    cvlr_assume!(eth > 0 && tokens > 0 && total > 0);
    let reserves = ExchangeReserves {
        eth_reserve: eth,
        token_reserve: tokens,
    };
    if let Ok((eth_out, tokens_out)) = amounts_for_liquidity(&env, total, &reserves, total) {
        cvlr_assert!(eth_out == eth && tokens_out == tokens);
    }
}
