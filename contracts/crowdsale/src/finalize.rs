use crate::invariants::{phase_transition_valid, split_conserves_funds};
use crate::mint;
use crate::storage::{get_address, get_config, get_counter, get_phase, set_phase, DataKey};
use sale_math::{liquidity_split, percent_of};
use sale_types::{SaleError, SalePhase};
use soroban_sdk::{log, token, Address, Env, IntoVal, Symbol};

/// Close the sale and distribute funds and allocations
///
/// Seeds the exchange through the swapper with `liquidity_percent` of the
/// raised funds, forwards the remainder to the multisig and mints the
/// reward, team and non-vested allocations.
pub fn finalize(env: &Env) -> Result<(), SaleError> {
    let config = get_config(env)?;
    let phase = get_phase(env)?;
    if phase == SalePhase::Finalized {
        return Err(SaleError::AlreadyFinalized);
    }
    if !config.window.has_ended(env.ledger().timestamp()) {
        return Err(SaleError::OutsideTimeWindow);
    }

    let token = get_address(env, &DataKey::Token).ok_or(SaleError::NotConfigured)?;
    let uniswapper = get_address(env, &DataKey::Uniswapper).ok_or(SaleError::NotConfigured)?;

    debug_assert!(phase_transition_valid(phase, SalePhase::Finalized));
    set_phase(env, SalePhase::Finalized);

    let raised = get_counter(env, &DataKey::WeiRaised);
    let (liquidity_eth, rest) = liquidity_split(raised, config.liquidity_percent)?;
    debug_assert!(split_conserves_funds(raised, liquidity_eth, rest));

    let this = env.current_contract_address();
    let payment = token::Client::new(env, &config.payment_token);

    let mut liquidity_tokens = 0;
    if liquidity_eth > 0 {
        liquidity_tokens = liquidity_eth
            .checked_mul(config.buy_rate)
            .ok_or(SaleError::Overflow)?;
        payment.transfer(&this, &uniswapper, &liquidity_eth);
        mint(env, &token, &uniswapper, liquidity_tokens);
        let liquidity = seed(env, &uniswapper, liquidity_eth, liquidity_tokens);
        log!(env, "exchange seeded", liquidity_eth, liquidity_tokens, liquidity);
    }

    if rest > 0 {
        payment.transfer(&this, &config.multisig, &rest);
    }

    // Allocations are a share of everything the sale handed out
    let distributed = get_counter(env, &DataKey::TokensSold)
        .checked_add(get_counter(env, &DataKey::PreSaleMinted))
        .ok_or(SaleError::Overflow)?;

    let reward = percent_of(distributed, config.allocation.reward_percent)?;
    mint_allocation(env, &token, Some(config.reward_wallet), reward);

    let team = percent_of(distributed, config.allocation.team_percent)?;
    mint_allocation(env, &token, get_address(env, &DataKey::TeamWallet), team);

    let non_vested = percent_of(distributed, config.allocation.non_vested_percent)?;
    mint_allocation(env, &token, config.non_vested_wallet, non_vested);

    log!(env, "crowdsale finalized", raised, liquidity_eth, rest);
    env.events().publish(
        (Symbol::new(env, "crowdsale_finalized"),),
        (raised, liquidity_eth, liquidity_tokens, rest),
    );

    Ok(())
}

fn mint_allocation(env: &Env, token: &Address, wallet: Option<Address>, amount: i128) {
    if let Some(wallet) = wallet {
        if amount > 0 {
            mint(env, token, &wallet, amount);
        }
    }
}

// Swapper seeding via invoke
fn seed(env: &Env, uniswapper: &Address, eth_amount: i128, token_amount: i128) -> i128 {
    env.invoke_contract::<i128>(
        uniswapper,
        &Symbol::new(env, "seed"),
        (eth_amount, token_amount).into_val(env),
    )
}
