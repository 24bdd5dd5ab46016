#![no_std]

use sale_math::vested_amount;
use sale_types::{Allocation, SaleError, VestingConfig};
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, Symbol};

/// Vests the team and advisors share minted at finalize
#[contract]
pub struct TeamAndAdvisorsAllocation;

/// Storage keys for the allocation contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Vesting parameters (Instance storage)
    Config,
    /// Sum of all grants (Instance storage)
    TotalAllocated,
    /// Beneficiary -> grant (Persistent storage)
    Allocation(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl TeamAndAdvisorsAllocation {
    pub fn initialize(env: Env, config: VestingConfig) -> Result<(), SaleError> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(SaleError::AlreadyInitialized);
        }
        if config.cliff > config.duration {
            return Err(SaleError::InvalidConfig);
        }

        config.owner.require_auth();

        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::TotalAllocated, &0i128);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Grant `amount` tokens to `beneficiary`. Owner only, once per beneficiary.
    pub fn add_allocation(env: Env, beneficiary: Address, amount: i128) -> Result<(), SaleError> {
        let config = get_config(&env)?;
        config.owner.require_auth();

        if amount <= 0 {
            return Err(SaleError::InvalidAmount);
        }
        let key = DataKey::Allocation(beneficiary.clone());
        if env.storage().persistent().has(&key) {
            return Err(SaleError::AlreadySet);
        }

        let total = get_total_allocated(&env)
            .checked_add(amount)
            .ok_or(SaleError::Overflow)?;

        set_allocation(
            &env,
            &beneficiary,
            &Allocation {
                total: amount,
                released: 0,
            },
        );
        env.storage().instance().set(&DataKey::TotalAllocated, &total);
        extend_instance_ttl(&env);

        env.events()
            .publish((Symbol::new(&env, "allocation_added"), beneficiary), amount);
        Ok(())
    }

    /// Pay out everything vested and not yet released
    ///
    /// # Returns
    /// Amount released
    pub fn release(env: Env, beneficiary: Address) -> Result<i128, SaleError> {
        beneficiary.require_auth();

        let config = get_config(&env)?;
        let mut allocation =
            get_allocation(&env, &beneficiary).ok_or(SaleError::NothingToRelease)?;

        let amount = releasable_amount(&env, &config, &allocation)?;
        if amount <= 0 {
            return Err(SaleError::NothingToRelease);
        }

        let this = env.current_contract_address();
        let token_client = token::Client::new(&env, &config.token);
        if token_client.balance(&this) < amount {
            return Err(SaleError::InsufficientBalance);
        }

        allocation.released += amount;
        set_allocation(&env, &beneficiary, &allocation);

        token_client.transfer(&this, &beneficiary, &amount);

        env.events()
            .publish((Symbol::new(&env, "tokens_released"), beneficiary), amount);
        Ok(amount)
    }

    // === View Functions ===

    pub fn get_allocation(env: Env, beneficiary: Address) -> Option<Allocation> {
        get_allocation(&env, &beneficiary)
    }

    /// Vested and unreleased amount for `beneficiary` right now
    pub fn releasable(env: Env, beneficiary: Address) -> Result<i128, SaleError> {
        let config = get_config(&env)?;
        match get_allocation(&env, &beneficiary) {
            Some(allocation) => releasable_amount(&env, &config, &allocation),
            None => Ok(0),
        }
    }

    pub fn total_allocated(env: Env) -> i128 {
        extend_instance_ttl(&env);
        get_total_allocated(&env)
    }

    pub fn get_config(env: Env) -> Result<VestingConfig, SaleError> {
        get_config(&env)
    }
}

fn releasable_amount(
    env: &Env,
    config: &VestingConfig,
    allocation: &Allocation,
) -> Result<i128, SaleError> {
    let vested = vested_amount(
        allocation.total,
        config.start_time,
        config.cliff,
        config.duration,
        env.ledger().timestamp(),
    )?;
    Ok(vested - allocation.released)
}

fn get_config(env: &Env) -> Result<VestingConfig, SaleError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SaleError::NotInitialized)
}

fn get_total_allocated(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalAllocated)
        .unwrap_or(0)
}

fn get_allocation(env: &Env, beneficiary: &Address) -> Option<Allocation> {
    let key = DataKey::Allocation(beneficiary.clone());
    let allocation = env.storage().persistent().get(&key);
    if allocation.is_some() {
        extend_persistent_ttl(env, &key);
    }
    allocation
}

fn set_allocation(env: &Env, beneficiary: &Address, allocation: &Allocation) {
    let key = DataKey::Allocation(beneficiary.clone());
    env.storage().persistent().set(&key, allocation);
    extend_persistent_ttl(env, &key);
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
