// ============================================================================
// LIQUIDITY INVARIANT SPECIFICATIONS
// ============================================================================
//
// These specifications call the exchange entry points and compare the
// stored share accounting before and after.
//
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_assume};
use cvlr_soroban_derive::rule;
use soroban_sdk::{Address, Env};

use crate::invariants::liquidity_matches_reserves;
use crate::TokenExchange;

/// RULE: Removing liquidity lowers the provider share and the total by the same amount
#[rule]
pub fn remove_decreases_share_and_total(
    env: Env,
    token: Address,
    payment_token: Address,
    provider: Address,
    amount: i128,
) {
    cvlr_assume!(token != payment_token);
    cvlr_assume!(amount > 0);

    if TokenExchange::setup(env.clone(), token, payment_token).is_err() {
        return;
    }

    let share_before = TokenExchange::liquidity_of(env.clone(), provider.clone());
    let total_before = TokenExchange::total_liquidity(env.clone());
    cvlr_assume!(amount <= share_before);

    let result =
        TokenExchange::remove_liquidity(env.clone(), provider.clone(), amount, 0, 0, u64::MAX);

    if result.is_ok() {
        let share_after = TokenExchange::liquidity_of(env.clone(), provider);
        let total_after = TokenExchange::total_liquidity(env.clone());
        cvlr_assert!(share_after == share_before - amount);
        cvlr_assert!(total_after == total_before - amount);
    }
}

/// RULE: Adding liquidity keeps shares and reserves in step
#[rule]
pub fn add_keeps_reserves_backed(
    env: Env,
    token: Address,
    payment_token: Address,
    provider: Address,
    eth_amount: i128,
    max_tokens: i128,
) {
    cvlr_assume!(token != payment_token);

    if TokenExchange::setup(env.clone(), token, payment_token).is_err() {
        return;
    }

    let result =
        TokenExchange::add_liquidity(env.clone(), provider, eth_amount, max_tokens, 0, u64::MAX);
    if result.is_ok() {
        let total = TokenExchange::total_liquidity(env.clone());
        let reserves = TokenExchange::get_reserves(env.clone());
        cvlr_assert!(liquidity_matches_reserves(total, &reserves));
    }
}
