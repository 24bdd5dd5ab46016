use sale_types::{CrowdsaleConfig, SaleError, SalePhase};
use soroban_sdk::{contracttype, Address, Env};

/// Storage keys for the crowdsale contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Sale owner (Instance storage)
    Owner,
    /// Immutable sale configuration (Instance storage)
    Config,
    /// Lifecycle phase (Instance storage)
    Phase,
    /// Sale token, set once (Instance storage)
    Token,
    /// Liquidity swapper, set once (Instance storage)
    Uniswapper,
    /// Team allocation contract, set once (Instance storage)
    TeamWallet,
    /// Payment units received from buyers (Instance storage)
    WeiRaised,
    /// Tokens minted to buyers (Instance storage)
    TokensSold,
    /// Tokens minted before the sale window (Instance storage)
    PreSaleMinted,
    /// Buyer -> total contribution (Persistent storage)
    Contribution(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Owner / Config ===

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_owner(env: &Env) -> Result<Address, SaleError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_config(env: &Env) -> Result<CrowdsaleConfig, SaleError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_config(env: &Env, config: &CrowdsaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Phase ===

pub fn get_phase(env: &Env) -> Result<SalePhase, SaleError> {
    env.storage()
        .instance()
        .get(&DataKey::Phase)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_phase(env: &Env, phase: SalePhase) {
    env.storage().instance().set(&DataKey::Phase, &phase);
    extend_instance_ttl(env);
}

// === Wired contracts ===

pub fn get_address(env: &Env, key: &DataKey) -> Option<Address> {
    env.storage().instance().get(key)
}

pub fn set_address(env: &Env, key: &DataKey, address: &Address) {
    env.storage().instance().set(key, address);
    extend_instance_ttl(env);
}

// === Counters ===

pub fn get_counter(env: &Env, key: &DataKey) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

pub fn add_to_counter(env: &Env, key: &DataKey, amount: i128) -> Result<i128, SaleError> {
    let value = get_counter(env, key)
        .checked_add(amount)
        .ok_or(SaleError::Overflow)?;
    env.storage().instance().set(key, &value);
    extend_instance_ttl(env);
    Ok(value)
}

// === Contributions ===

pub fn get_contribution(env: &Env, buyer: &Address) -> i128 {
    let key = DataKey::Contribution(buyer.clone());
    match env.storage().persistent().get::<DataKey, i128>(&key) {
        Some(amount) => {
            extend_persistent_ttl(env, &key);
            amount
        }
        None => 0,
    }
}

pub fn set_contribution(env: &Env, buyer: &Address, amount: i128) {
    let key = DataKey::Contribution(buyer.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent_ttl(env, &key);
}
