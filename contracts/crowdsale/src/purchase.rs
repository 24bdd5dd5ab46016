use crate::invariants::{tokens_match_rate, within_early_cap};
use crate::storage::{
    add_to_counter, get_address, get_config, get_contribution, get_phase, set_contribution,
    DataKey,
};
use crate::{is_whitelisted, mint};
use sale_math::tokens_for_contribution;
use sale_types::{SaleError, SalePhase};
use soroban_sdk::{token, Address, Env, Symbol};

/// Take `amount` of the payment token from `buyer` and mint tokens at the buy rate
///
/// # Returns
/// Tokens minted to the buyer
pub fn buy_tokens(env: &Env, buyer: Address, amount: i128) -> Result<i128, SaleError> {
    let config = get_config(env)?;
    if get_phase(env)? != SalePhase::Active {
        return Err(SaleError::WrongPhase);
    }

    let now = env.ledger().timestamp();
    if !config.window.contains(now) {
        return Err(SaleError::OutsideTimeWindow);
    }
    if !is_whitelisted(env, &config.whitelist, &buyer) {
        return Err(SaleError::Unauthorized);
    }
    if amount <= 0 {
        return Err(SaleError::InvalidAmount);
    }
    if !within_early_cap(&config, now, amount) {
        return Err(SaleError::CapExceeded);
    }

    let token = get_address(env, &DataKey::Token).ok_or(SaleError::NotConfigured)?;
    let tokens = tokens_for_contribution(amount, config.buy_rate)?;
    debug_assert!(tokens_match_rate(amount, tokens, config.buy_rate));

    let contribution = get_contribution(env, &buyer)
        .checked_add(amount)
        .ok_or(SaleError::Overflow)?;
    set_contribution(env, &buyer, contribution);
    add_to_counter(env, &DataKey::WeiRaised, amount)?;
    add_to_counter(env, &DataKey::TokensSold, tokens)?;

    token::Client::new(env, &config.payment_token).transfer(
        &buyer,
        &env.current_contract_address(),
        &amount,
    );
    mint(env, &token, &buyer, tokens);

    env.events().publish(
        (Symbol::new(env, "token_purchase"), buyer),
        (amount, tokens),
    );

    Ok(tokens)
}
