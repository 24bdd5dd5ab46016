use sale_types::{LiquidityDeposit, SaleError, SwapperConfig};
use soroban_sdk::{contracttype, Env};

/// Storage keys for the liquidity swapper
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Swapper configuration (Instance storage)
    Config,
    /// Seeded position, absent until `seed` (Instance storage)
    Deposit,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SwapperConfig, SaleError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_config(env: &Env, config: &SwapperConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Deposit ===

pub fn get_deposit(env: &Env) -> Option<LiquidityDeposit> {
    env.storage().instance().get(&DataKey::Deposit)
}

pub fn set_deposit(env: &Env, deposit: &LiquidityDeposit) {
    env.storage().instance().set(&DataKey::Deposit, deposit);
    extend_instance_ttl(env);
}
