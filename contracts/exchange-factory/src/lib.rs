#![no_std]

use sale_types::SaleError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, IntoVal, Symbol, Vec};

#[contract]
pub struct ExchangeFactory;

/// Storage keys for the factory contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Admin address
    Admin,
    /// Exchange WASM hash for deployment
    ExchangeWasmHash,
    /// Payment token every exchange is paired with
    PaymentToken,
    /// token -> exchange address
    Exchange(Address),
    /// exchange address -> token
    Token(Address),
    /// Number of exchanges created; ids start at 1
    TokenCount,
    /// id -> token
    TokenWithId(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Largest page returned by `get_tokens_paginated`
const MAX_PAGE_SIZE: u32 = 50;

#[contractimpl]
impl ExchangeFactory {
    /// Initialize factory with admin, exchange WASM hash and the shared payment token
    pub fn initialize(
        env: Env,
        admin: Address,
        exchange_wasm_hash: BytesN<32>,
        payment_token: Address,
    ) -> Result<(), SaleError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(SaleError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::ExchangeWasmHash, &exchange_wasm_hash);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);
        env.storage().instance().set(&DataKey::TokenCount, &0u32);

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Deploy and set up the exchange for `token`
    /// Returns the exchange contract address
    pub fn create_exchange(env: Env, token: Address) -> Result<Address, SaleError> {
        let payment_token = Self::get_payment_token(env.clone())?;
        if token == payment_token {
            return Err(SaleError::InvalidConfig);
        }

        let exchange_key = DataKey::Exchange(token.clone());
        if env.storage().persistent().has(&exchange_key) {
            return Err(SaleError::ExchangeExists);
        }

        let wasm_hash = Self::get_exchange_wasm_hash(env.clone())?;
        let token_id = Self::token_count(env.clone()) + 1;

        // Deterministic salt from the token id
        let mut salt_bytes = [0u8; 32];
        salt_bytes[0..4].copy_from_slice(&token_id.to_be_bytes());
        let salt = BytesN::from_array(&env, &salt_bytes);

        let exchange = env
            .deployer()
            .with_current_contract(salt)
            .deploy_v2(wasm_hash, ());

        setup_exchange(&env, &exchange, &token, &payment_token);

        env.storage().persistent().set(&exchange_key, &exchange);
        extend_persistent_ttl(&env, &exchange_key);

        let token_key = DataKey::Token(exchange.clone());
        env.storage().persistent().set(&token_key, &token);
        extend_persistent_ttl(&env, &token_key);

        let id_key = DataKey::TokenWithId(token_id);
        env.storage().persistent().set(&id_key, &token);
        extend_persistent_ttl(&env, &id_key);

        env.storage().instance().set(&DataKey::TokenCount, &token_id);

        env.events().publish(
            (Symbol::new(&env, "exchange_created"),),
            (token, exchange.clone(), token_id),
        );

        extend_instance_ttl(&env);
        Ok(exchange)
    }

    /// Get exchange address for a token
    pub fn get_exchange(env: Env, token: Address) -> Option<Address> {
        env.storage().persistent().get(&DataKey::Exchange(token))
    }

    /// Get the token an exchange trades
    pub fn get_token(env: Env, exchange: Address) -> Option<Address> {
        env.storage().persistent().get(&DataKey::Token(exchange))
    }

    pub fn get_token_with_id(env: Env, token_id: u32) -> Option<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::TokenWithId(token_id))
    }

    /// Get total number of exchanges created
    pub fn token_count(env: Env) -> u32 {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::TokenCount)
            .unwrap_or(0)
    }

    /// Tokens with ids in `[start_id, start_id + limit)`, at most 50
    pub fn get_tokens_paginated(env: Env, start_id: u32, limit: u32) -> Vec<Address> {
        let safe_limit = limit.min(MAX_PAGE_SIZE);
        let count = Self::token_count(env.clone());

        let mut tokens: Vec<Address> = Vec::new(&env);
        let first = start_id.max(1);
        let end = first.saturating_add(safe_limit).min(count.saturating_add(1));

        for id in first..end {
            if let Some(token) = env.storage().persistent().get(&DataKey::TokenWithId(id)) {
                tokens.push_back(token);
            }
        }
        tokens
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, SaleError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(SaleError::NotInitialized)
    }

    /// Get exchange WASM hash
    pub fn get_exchange_wasm_hash(env: Env) -> Result<BytesN<32>, SaleError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::ExchangeWasmHash)
            .ok_or(SaleError::NotInitialized)
    }

    pub fn get_payment_token(env: Env) -> Result<Address, SaleError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(SaleError::NotInitialized)
    }
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

// Exchange setup via invoke
fn setup_exchange(env: &Env, exchange: &Address, token: &Address, payment_token: &Address) {
    env.invoke_contract::<()>(
        exchange,
        &Symbol::new(env, "setup"),
        (token, payment_token).into_val(env),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{Address, BytesN, Env};

    fn setup_factory(env: &Env) -> (Address, Address, ExchangeFactoryClient<'_>) {
        let admin = Address::generate(env);
        let payment_token = Address::generate(env);
        let contract_id = env.register(ExchangeFactory, ());
        let client = ExchangeFactoryClient::new(env, &contract_id);

        let wasm_hash = BytesN::from_array(env, &[1u8; 32]);
        client.initialize(&admin, &wasm_hash, &payment_token);
        (admin, payment_token, client)
    }

    // === Initialization Tests ===

    #[test]
    fn test_initialize_factory() {
        let env = Env::default();
        env.mock_all_auths();

        let (admin, payment_token, client) = setup_factory(&env);

        assert_eq!(client.get_admin(), admin);
        assert_eq!(client.get_payment_token(), payment_token);
        assert_eq!(
            client.get_exchange_wasm_hash(),
            BytesN::from_array(&env, &[1u8; 32])
        );
        assert_eq!(client.token_count(), 0);
    }

    #[test]
    fn test_initialize_twice_fails() {
        let env = Env::default();
        env.mock_all_auths();

        let (admin, payment_token, client) = setup_factory(&env);
        let wasm_hash = BytesN::from_array(&env, &[2u8; 32]);

        assert_eq!(
            client.try_initialize(&admin, &wasm_hash, &payment_token),
            Err(Ok(SaleError::AlreadyInitialized))
        );
    }

    #[test]
    fn test_uninitialized_views_fail() {
        let env = Env::default();
        let contract_id = env.register(ExchangeFactory, ());
        let client = ExchangeFactoryClient::new(&env, &contract_id);

        assert_eq!(client.try_get_admin(), Err(Ok(SaleError::NotInitialized)));
        assert_eq!(
            client.try_create_exchange(&Address::generate(&env)),
            Err(Ok(SaleError::NotInitialized))
        );
    }

    // === Exchange Lookup Tests ===

    #[test]
    fn test_get_exchange_not_exists() {
        let env = Env::default();
        env.mock_all_auths();

        let (_, _, client) = setup_factory(&env);
        let token = Address::generate(&env);

        assert!(client.get_exchange(&token).is_none());
        assert!(client.get_token(&token).is_none());
        assert!(client.get_token_with_id(&1).is_none());
    }

    #[test]
    fn test_create_exchange_for_payment_token_fails() {
        let env = Env::default();
        env.mock_all_auths();

        let (_, payment_token, client) = setup_factory(&env);
        assert_eq!(
            client.try_create_exchange(&payment_token),
            Err(Ok(SaleError::InvalidConfig))
        );
    }

    #[test]
    fn test_pagination_empty() {
        let env = Env::default();
        env.mock_all_auths();

        let (_, _, client) = setup_factory(&env);
        assert_eq!(client.get_tokens_paginated(&0, &10).len(), 0);
        assert_eq!(client.get_tokens_paginated(&1, &100).len(), 0);
    }
}
