#![no_std]

//! Fund sink for the crowdsale. Exposes its owner set and confirmation
//! threshold; proposal execution happens off this interface.

use sale_types::SaleError;
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, Symbol, Vec};

#[contract]
pub struct MultiSig;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owners,
    Required,
}

const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl MultiSig {
    pub fn initialize(env: Env, owners: Vec<Address>, required: u32) -> Result<(), SaleError> {
        if env.storage().instance().has(&DataKey::Owners) {
            return Err(SaleError::AlreadyInitialized);
        }
        if required == 0 || required > owners.len() {
            return Err(SaleError::InvalidConfig);
        }
        for (i, owner) in owners.iter().enumerate() {
            if owners.first_index_of(&owner) != Some(i as u32) {
                return Err(SaleError::InvalidConfig);
            }
        }

        env.storage().instance().set(&DataKey::Owners, &owners);
        env.storage().instance().set(&DataKey::Required, &required);
        env.events()
            .publish((Symbol::new(&env, "multisig_created"),), (owners, required));

        extend_instance_ttl(&env);
        Ok(())
    }

    pub fn get_owners(env: Env) -> Result<Vec<Address>, SaleError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::Owners)
            .ok_or(SaleError::NotInitialized)
    }

    pub fn get_required(env: Env) -> Result<u32, SaleError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::Required)
            .ok_or(SaleError::NotInitialized)
    }

    pub fn is_owner(env: Env, address: Address) -> Result<bool, SaleError> {
        Ok(Self::get_owners(env)?.contains(&address))
    }

    /// Funds of `token` held by the wallet
    pub fn balance(env: Env, token: Address) -> i128 {
        token::Client::new(&env, &token).balance(&env.current_contract_address())
    }
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{token, vec, Address, Env};

    #[test]
    fn test_initialize() {
        let env = Env::default();
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        let contract_id = env.register(MultiSig, ());
        let client = MultiSigClient::new(&env, &contract_id);
        client.initialize(&vec![&env, a.clone(), b.clone()], &2);

        assert_eq!(client.get_required(), 2);
        assert_eq!(client.get_owners().len(), 2);
        assert!(client.is_owner(&a));
        assert!(!client.is_owner(&Address::generate(&env)));
    }

    #[test]
    fn test_invalid_threshold() {
        let env = Env::default();
        let a = Address::generate(&env);

        let contract_id = env.register(MultiSig, ());
        let client = MultiSigClient::new(&env, &contract_id);

        assert_eq!(
            client.try_initialize(&vec![&env, a.clone()], &0),
            Err(Ok(SaleError::InvalidConfig))
        );
        assert_eq!(
            client.try_initialize(&vec![&env, a.clone()], &2),
            Err(Ok(SaleError::InvalidConfig))
        );
        assert_eq!(
            client.try_initialize(&vec![&env, a.clone(), a], &2),
            Err(Ok(SaleError::InvalidConfig))
        );
    }

    #[test]
    fn test_initialize_twice_fails() {
        let env = Env::default();
        let a = Address::generate(&env);

        let contract_id = env.register(MultiSig, ());
        let client = MultiSigClient::new(&env, &contract_id);
        client.initialize(&vec![&env, a.clone()], &1);

        assert_eq!(
            client.try_initialize(&vec![&env, a], &1),
            Err(Ok(SaleError::AlreadyInitialized))
        );
    }

    #[test]
    fn test_balance_reports_received_funds() {
        let env = Env::default();
        env.mock_all_auths();

        let a = Address::generate(&env);
        let contract_id = env.register(MultiSig, ());
        let client = MultiSigClient::new(&env, &contract_id);
        client.initialize(&vec![&env, a], &1);

        let asset_admin = Address::generate(&env);
        let asset = env.register_stellar_asset_contract_v2(asset_admin).address();
        token::StellarAssetClient::new(&env, &asset).mint(&contract_id, &1_000);

        assert_eq!(client.balance(&asset), 1_000);
    }
}
