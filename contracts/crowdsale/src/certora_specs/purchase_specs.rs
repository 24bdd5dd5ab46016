// ============================================================================
// PURCHASE INVARIANT SPECIFICATIONS
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_assume};
use cvlr_soroban_derive::rule;
use sale_types::SalePhase;
use soroban_sdk::{Address, Env};

use crate::Crowdsale;

/// RULE: Purchases only succeed while Active and inside the window
#[rule]
pub fn purchase_requires_open_sale(env: Env, buyer: Address, amount: i128) {
    cvlr_assume!(amount > 0);
    let phase = Crowdsale::get_phase(env.clone());
    let config = Crowdsale::get_config(env.clone());

    if Crowdsale::buy_tokens(env.clone(), buyer, amount).is_ok() {
        cvlr_assert!(phase == Ok(SalePhase::Active));
        if let Ok(config) = config {
            cvlr_assert!(config.window.contains(env.ledger().timestamp()));
        }
    }
}

/// RULE: A purchase raises wei_raised by the amount and tokens_sold by amount * rate
#[rule]
pub fn purchase_updates_counters(env: Env, buyer: Address, amount: i128) {
    cvlr_assume!(amount > 0);
    let raised_before = Crowdsale::wei_raised(env.clone());
    let sold_before = Crowdsale::tokens_sold(env.clone());

    if let Ok(tokens) = Crowdsale::buy_tokens(env.clone(), buyer, amount) {
        cvlr_assert!(Crowdsale::wei_raised(env.clone()) == raised_before + amount);
        cvlr_assert!(Crowdsale::tokens_sold(env.clone()) == sold_before + tokens);
    }
}
