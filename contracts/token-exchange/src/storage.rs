use sale_types::{ExchangeConfig, ExchangeReserves, SaleError};
use soroban_sdk::{contracttype, Address, Env};

/// Storage keys for the exchange contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Token pair binding (Instance storage)
    Config,
    /// Accounted reserves (Instance storage)
    Reserves,
    /// Outstanding liquidity shares (Instance storage)
    TotalLiquidity,
    /// Provider -> liquidity shares (Persistent storage)
    Liquidity(Address),
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

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<ExchangeConfig, SaleError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_config(env: &Env, config: &ExchangeConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Reserves ===

pub fn get_reserves(env: &Env) -> ExchangeReserves {
    env.storage()
        .instance()
        .get(&DataKey::Reserves)
        .unwrap_or_default()
}

pub fn set_reserves(env: &Env, reserves: &ExchangeReserves) {
    env.storage().instance().set(&DataKey::Reserves, reserves);
    extend_instance_ttl(env);
}

// === Liquidity ===

pub fn get_total_liquidity(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalLiquidity)
        .unwrap_or(0)
}

pub fn set_total_liquidity(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalLiquidity, &total);
    extend_instance_ttl(env);
}

pub fn get_liquidity(env: &Env, provider: &Address) -> i128 {
    let key = DataKey::Liquidity(provider.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_liquidity(env: &Env, provider: &Address, amount: i128) {
    let key = DataKey::Liquidity(provider.clone());
    if amount == 0 {
        // Remove empty share
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        extend_persistent_ttl(env, &key);
    }
}
