// ============================================================================
// PHASE INVARIANT SPECIFICATIONS
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_satisfy};
use cvlr_soroban_derive::rule;
use sale_types::{SaleError, SalePhase};
use soroban_sdk::Env;

use crate::invariants::phase_transition_valid;
use crate::Crowdsale;

/// RULE: Sanity check - finalize is reachable
#[rule]
pub fn sanity_finalize(env: Env) {
    let _ = Crowdsale::finalize(env);
    cvlr_satisfy!(true);
}

/// RULE: A second finalize always fails with AlreadyFinalized
#[rule]
pub fn finalize_is_one_shot(env: Env) {
    if Crowdsale::finalize(env.clone()).is_ok() {
        cvlr_assert!(Crowdsale::finalize(env.clone()) == Err(SaleError::AlreadyFinalized));
    }
}

/// RULE: unpause succeeds only from Paused and lands in Active
#[rule]
pub fn unpause_moves_paused_to_active(env: Env) {
    let before = Crowdsale::get_phase(env.clone());
    if Crowdsale::unpause(env.clone()).is_ok() {
        cvlr_assert!(before == Ok(SalePhase::Paused));
        cvlr_assert!(Crowdsale::get_phase(env.clone()) == Ok(SalePhase::Active));
    }
}

/// RULE: finalize never moves the phase backwards
#[rule]
pub fn finalize_transition_valid(env: Env) {
    if let Ok(before) = Crowdsale::get_phase(env.clone()) {
        if Crowdsale::finalize(env.clone()).is_ok() {
            cvlr_assert!(phase_transition_valid(before, SalePhase::Finalized));
        }
    }
}
