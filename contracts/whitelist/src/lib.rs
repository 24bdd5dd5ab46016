#![no_std]

use sale_types::SaleError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol, Vec};

#[contract]
pub struct Whitelist;

/// Storage keys for the whitelist contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Owner allowed to edit the list
    Owner,
    /// Address -> membership flag (Persistent storage)
    Member(Address),
    /// Number of members
    MemberCount,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl Whitelist {
    /// Initialize the whitelist with its owner
    pub fn initialize(env: Env, owner: Address) -> Result<(), SaleError> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(SaleError::AlreadyInitialized);
        }

        owner.require_auth();

        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::MemberCount, &0u32);

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Add addresses to the list. Addresses already present are skipped.
    ///
    /// Returns the number of newly added addresses
    pub fn add_to_whitelist(env: Env, addresses: Vec<Address>) -> Result<u32, SaleError> {
        let owner = get_owner(&env)?;
        owner.require_auth();

        let mut added = 0u32;
        for address in addresses.iter() {
            let key = DataKey::Member(address.clone());
            if env.storage().persistent().has(&key) {
                continue;
            }
            env.storage().persistent().set(&key, &true);
            extend_persistent_ttl(&env, &key);
            added += 1;

            env.events()
                .publish((Symbol::new(&env, "whitelist_added"),), address);
        }

        set_member_count(&env, get_member_count(&env) + added);
        Ok(added)
    }

    /// Remove addresses from the list. Unknown addresses are skipped.
    ///
    /// Returns the number of removed addresses
    pub fn remove_from_whitelist(env: Env, addresses: Vec<Address>) -> Result<u32, SaleError> {
        let owner = get_owner(&env)?;
        owner.require_auth();

        let mut removed = 0u32;
        for address in addresses.iter() {
            let key = DataKey::Member(address.clone());
            if !env.storage().persistent().has(&key) {
                continue;
            }
            env.storage().persistent().remove(&key);
            removed += 1;

            env.events()
                .publish((Symbol::new(&env, "whitelist_removed"),), address);
        }

        set_member_count(&env, get_member_count(&env) - removed);
        Ok(removed)
    }

    /// Check membership
    pub fn is_whitelisted(env: Env, address: Address) -> bool {
        let key = DataKey::Member(address);
        let member = env.storage().persistent().has(&key);
        if member {
            extend_persistent_ttl(&env, &key);
        }
        member
    }

    /// Number of whitelisted addresses
    pub fn member_count(env: Env) -> u32 {
        extend_instance_ttl(&env);
        get_member_count(&env)
    }

    /// Get owner address
    pub fn get_owner(env: Env) -> Result<Address, SaleError> {
        get_owner(&env)
    }

    /// Hand the list over to a new owner
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), SaleError> {
        let owner = get_owner(&env)?;
        owner.require_auth();

        env.storage().instance().set(&DataKey::Owner, &new_owner);
        env.events().publish(
            (Symbol::new(&env, "ownership_transferred"),),
            (owner, new_owner),
        );

        extend_instance_ttl(&env);
        Ok(())
    }
}

fn get_owner(env: &Env) -> Result<Address, SaleError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(SaleError::NotInitialized)
}

fn get_member_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::MemberCount)
        .unwrap_or(0)
}

fn set_member_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::MemberCount, &count);
    extend_instance_ttl(env);
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

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{vec, Address, Env};

    fn setup_whitelist(env: &Env) -> (Address, WhitelistClient<'_>) {
        let owner = Address::generate(env);
        let contract_id = env.register(Whitelist, ());
        let client = WhitelistClient::new(env, &contract_id);
        client.initialize(&owner);
        (owner, client)
    }

    #[test]
    fn test_initialize() {
        let env = Env::default();
        env.mock_all_auths();

        let (owner, client) = setup_whitelist(&env);

        assert_eq!(client.get_owner(), owner);
        assert_eq!(client.member_count(), 0);
    }

    #[test]
    fn test_initialize_twice_fails() {
        let env = Env::default();
        env.mock_all_auths();

        let (owner, client) = setup_whitelist(&env);
        assert_eq!(
            client.try_initialize(&owner),
            Err(Ok(SaleError::AlreadyInitialized))
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let env = Env::default();
        env.mock_all_auths();

        let (_owner, client) = setup_whitelist(&env);
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        assert_eq!(client.add_to_whitelist(&vec![&env, alice.clone(), bob.clone()]), 2);
        // Re-adding plus a duplicate inside the batch adds nothing
        assert_eq!(
            client.add_to_whitelist(&vec![&env, alice.clone(), alice.clone(), bob.clone()]),
            0
        );

        assert!(client.is_whitelisted(&alice));
        assert!(client.is_whitelisted(&bob));
        assert_eq!(client.member_count(), 2);
    }

    #[test]
    fn test_unknown_address_not_whitelisted() {
        let env = Env::default();
        env.mock_all_auths();

        let (_owner, client) = setup_whitelist(&env);
        assert!(!client.is_whitelisted(&Address::generate(&env)));
    }

    #[test]
    fn test_remove_from_whitelist() {
        let env = Env::default();
        env.mock_all_auths();

        let (_owner, client) = setup_whitelist(&env);
        let alice = Address::generate(&env);
        let stranger = Address::generate(&env);

        client.add_to_whitelist(&vec![&env, alice.clone()]);
        assert_eq!(
            client.remove_from_whitelist(&vec![&env, alice.clone(), stranger]),
            1
        );

        assert!(!client.is_whitelisted(&alice));
        assert_eq!(client.member_count(), 0);
    }

    #[test]
    fn test_add_requires_owner_auth() {
        let env = Env::default();
        env.mock_all_auths();

        let (owner, client) = setup_whitelist(&env);
        let alice = Address::generate(&env);
        client.add_to_whitelist(&vec![&env, alice]);

        let auths = env.auths();
        assert_eq!(auths.len(), 1);
        assert_eq!(auths[0].0, owner);
    }

    #[test]
    fn test_transfer_ownership() {
        let env = Env::default();
        env.mock_all_auths();

        let (_owner, client) = setup_whitelist(&env);
        let new_owner = Address::generate(&env);
        client.transfer_ownership(&new_owner);

        assert_eq!(client.get_owner(), new_owner);
    }

    #[test]
    fn test_uninitialized_add_fails() {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register(Whitelist, ());
        let client = WhitelistClient::new(&env, &contract_id);
        assert_eq!(
            client.try_add_to_whitelist(&vec![&env, Address::generate(&env)]),
            Err(Ok(SaleError::NotInitialized))
        );
    }
}
