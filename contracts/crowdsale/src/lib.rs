#![no_std]

mod finalize;
mod invariants;
mod purchase;
mod storage;

#[cfg(feature = "certora")]
mod certora_specs;


use invariants::phase_transition_valid;
use sale_types::{CrowdsaleConfig, SaleError, SalePhase, SaleStatus};
use soroban_sdk::{contract, contractimpl, Address, Env, IntoVal, Symbol};
use storage::{
    add_to_counter, extend_instance_ttl, get_address, get_config, get_contribution, get_counter,
    get_owner, get_phase, is_initialized, set_address, set_config, set_owner, set_phase, DataKey,
};

/// Whitelisted token sale with a timed window, an optional early-buyer cap
/// and a one-shot finalize that seeds exchange liquidity.
#[contract]
pub struct Crowdsale;

#[contractimpl]
impl Crowdsale {
    /// Initialize the sale. The phase starts as Paused.
    pub fn initialize(env: Env, owner: Address, config: CrowdsaleConfig) -> Result<(), SaleError> {
        if is_initialized(&env) {
            return Err(SaleError::AlreadyInitialized);
        }
        config.validate()?;

        owner.require_auth();

        set_owner(&env, &owner);
        set_config(&env, &config);
        set_phase(&env, SalePhase::Paused);

        env.events().publish(
            (Symbol::new(&env, "crowdsale_created"), owner),
            (config.window.start_time, config.window.end_time, config.buy_rate),
        );
        Ok(())
    }

    /// Mint tokens for pre-sale buyers. Owner only, before `start_time`.
    pub fn mint_token_for_pre_crowdsale(
        env: Env,
        to: Address,
        amount: i128,
    ) -> Result<(), SaleError> {
        get_owner(&env)?.require_auth();

        let config = get_config(&env)?;
        if get_phase(&env)? == SalePhase::Finalized {
            return Err(SaleError::AlreadyFinalized);
        }
        if config.window.has_started(env.ledger().timestamp()) {
            return Err(SaleError::OutsideTimeWindow);
        }
        if amount <= 0 {
            return Err(SaleError::InvalidAmount);
        }
        let token = get_address(&env, &DataKey::Token).ok_or(SaleError::NotConfigured)?;

        add_to_counter(&env, &DataKey::PreSaleMinted, amount)?;
        mint(&env, &token, &to, amount);

        env.events()
            .publish((Symbol::new(&env, "pre_sale_mint"), to), amount);
        Ok(())
    }

    /// Pay `amount` of the payment token for tokens at the buy rate
    ///
    /// # Returns
    /// Tokens minted to `buyer`
    pub fn buy_tokens(env: Env, buyer: Address, amount: i128) -> Result<i128, SaleError> {
        buyer.require_auth();
        purchase::buy_tokens(&env, buyer, amount)
    }

    /// Open the sale for purchases. Owner only, once.
    pub fn unpause(env: Env) -> Result<(), SaleError> {
        get_owner(&env)?.require_auth();

        let phase = get_phase(&env)?;
        if phase != SalePhase::Paused {
            return Err(SaleError::WrongPhase);
        }
        debug_assert!(phase_transition_valid(phase, SalePhase::Active));
        set_phase(&env, SalePhase::Active);

        env.events().publish((Symbol::new(&env, "unpaused"),), ());
        Ok(())
    }

    /// Close the sale after `end_time`. Owner only, once.
    pub fn finalize(env: Env) -> Result<(), SaleError> {
        get_owner(&env)?.require_auth();
        finalize::finalize(&env)
    }

    // === Wiring (owner only, once each, while paused) ===

    pub fn set_token_contract_address(env: Env, token: Address) -> Result<(), SaleError> {
        set_once(&env, DataKey::Token, &token, "token_set")
    }

    pub fn set_uniswapper_address(env: Env, uniswapper: Address) -> Result<(), SaleError> {
        set_once(&env, DataKey::Uniswapper, &uniswapper, "uniswapper_set")
    }

    pub fn set_team_wallet_address(env: Env, team_wallet: Address) -> Result<(), SaleError> {
        set_once(&env, DataKey::TeamWallet, &team_wallet, "team_wallet_set")
    }

    // === View Functions ===

    pub fn get_config(env: Env) -> Result<CrowdsaleConfig, SaleError> {
        get_config(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, SaleError> {
        get_owner(&env)
    }

    pub fn get_phase(env: Env) -> Result<SalePhase, SaleError> {
        get_phase(&env)
    }

    /// Phase combined with the current ledger time
    pub fn get_status(env: Env) -> Result<SaleStatus, SaleError> {
        let config = get_config(&env)?;
        let phase = get_phase(&env)?;
        Ok(SaleStatus::derive(
            phase,
            &config.window,
            env.ledger().timestamp(),
        ))
    }

    pub fn wei_raised(env: Env) -> i128 {
        extend_instance_ttl(&env);
        get_counter(&env, &DataKey::WeiRaised)
    }

    pub fn tokens_sold(env: Env) -> i128 {
        extend_instance_ttl(&env);
        get_counter(&env, &DataKey::TokensSold)
    }

    pub fn pre_sale_minted(env: Env) -> i128 {
        extend_instance_ttl(&env);
        get_counter(&env, &DataKey::PreSaleMinted)
    }

    pub fn contribution_of(env: Env, buyer: Address) -> i128 {
        get_contribution(&env, &buyer)
    }

    pub fn token_address(env: Env) -> Option<Address> {
        get_address(&env, &DataKey::Token)
    }

    pub fn uniswapper_address(env: Env) -> Option<Address> {
        get_address(&env, &DataKey::Uniswapper)
    }

    pub fn team_wallet_address(env: Env) -> Option<Address> {
        get_address(&env, &DataKey::TeamWallet)
    }

    /// True while the per-purchase early cap applies
    pub fn is_early_period(env: Env) -> Result<bool, SaleError> {
        Ok(get_config(&env)?.in_early_period(env.ledger().timestamp()))
    }

    pub fn has_ended(env: Env) -> Result<bool, SaleError> {
        Ok(get_config(&env)?
            .window
            .has_ended(env.ledger().timestamp()))
    }

    pub fn is_finalized(env: Env) -> Result<bool, SaleError> {
        Ok(get_phase(&env)? == SalePhase::Finalized)
    }
}

fn set_once(env: &Env, key: DataKey, address: &Address, topic: &str) -> Result<(), SaleError> {
    get_owner(env)?.require_auth();

    if get_phase(env)? != SalePhase::Paused {
        return Err(SaleError::WrongPhase);
    }
    if get_address(env, &key).is_some() {
        return Err(SaleError::AlreadySet);
    }

    set_address(env, &key, address);
    env.events()
        .publish((Symbol::new(env, topic),), address.clone());
    Ok(())
}

// Token and whitelist calls via invoke
pub(crate) fn mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.invoke_contract::<()>(
        token,
        &Symbol::new(env, "mint"),
        (to, amount).into_val(env),
    );
}

pub(crate) fn is_whitelisted(env: &Env, whitelist: &Address, buyer: &Address) -> bool {
    env.invoke_contract::<bool>(
        whitelist,
        &Symbol::new(env, "is_whitelisted"),
        (buyer,).into_val(env),
    )
}
