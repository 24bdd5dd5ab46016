#![no_std]

mod storage;

use sale_types::SaleError;
use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};
use storage::{
    extend_instance_ttl, get_metadata, get_minter, get_total_supply, has_minter, read_allowance,
    read_balance, set_metadata, set_minter, set_total_supply, write_allowance, write_balance,
};

pub use storage::TokenMetadata;

/// Mintable sale token. The crowdsale is the only minter; the rest of the
/// surface follows the standard token interface so exchanges and wallets can
/// move it with `token::Client`.
#[contract]
pub struct SaleToken;

#[contractimpl]
impl SaleToken {
    /// Initialize the token with the crowdsale as minter
    pub fn initialize(
        env: Env,
        minter: Address,
        decimal: u32,
        name: String,
        symbol: String,
    ) -> Result<(), SaleError> {
        if has_minter(&env) {
            return Err(SaleError::AlreadyInitialized);
        }
        if decimal > 18 {
            return Err(SaleError::InvalidConfig);
        }

        set_minter(&env, &minter);
        set_metadata(
            &env,
            &TokenMetadata {
                decimal,
                name,
                symbol,
            },
        );
        set_total_supply(&env, 0);
        Ok(())
    }

    /// Mint new tokens. Minter only.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), SaleError> {
        let minter = get_minter(&env).ok_or(SaleError::NotInitialized)?;
        minter.require_auth();
        check_positive(amount)?;

        let balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(SaleError::Overflow)?;
        let supply = get_total_supply(&env)
            .checked_add(amount)
            .ok_or(SaleError::Overflow)?;

        write_balance(&env, &to, balance);
        set_total_supply(&env, supply);

        env.events()
            .publish((Symbol::new(&env, "mint"), minter, to), amount);
        Ok(())
    }

    /// Total minted minus total burned
    pub fn get_total_supply(env: Env) -> i128 {
        extend_instance_ttl(&env);
        get_total_supply(&env)
    }

    pub fn minter(env: Env) -> Result<Address, SaleError> {
        get_minter(&env).ok_or(SaleError::NotInitialized)
    }

    // === Token interface ===

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        extend_instance_ttl(&env);
        read_allowance(&env, &from, &spender).amount
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), SaleError> {
        from.require_auth();
        if amount < 0 {
            return Err(SaleError::InvalidAmount);
        }
        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            return Err(SaleError::Expired);
        }

        extend_instance_ttl(&env);
        write_allowance(&env, &from, &spender, amount, expiration_ledger);

        env.events().publish(
            (Symbol::new(&env, "approve"), from, spender),
            (amount, expiration_ledger),
        );
        Ok(())
    }

    /// Balance of `id` (balanceOf)
    pub fn balance(env: Env, id: Address) -> i128 {
        extend_instance_ttl(&env);
        read_balance(&env, &id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), SaleError> {
        from.require_auth();
        check_non_negative(amount)?;

        extend_instance_ttl(&env);
        move_balance(&env, &from, &to, amount)?;

        env.events()
            .publish((Symbol::new(&env, "transfer"), from, to), amount);
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), SaleError> {
        spender.require_auth();
        check_non_negative(amount)?;

        extend_instance_ttl(&env);
        spend_allowance(&env, &from, &spender, amount)?;
        move_balance(&env, &from, &to, amount)?;

        env.events()
            .publish((Symbol::new(&env, "transfer"), from, to), amount);
        Ok(())
    }

    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), SaleError> {
        from.require_auth();
        check_non_negative(amount)?;

        extend_instance_ttl(&env);
        burn_balance(&env, &from, amount)?;

        env.events().publish((Symbol::new(&env, "burn"), from), amount);
        Ok(())
    }

    pub fn burn_from(
        env: Env,
        spender: Address,
        from: Address,
        amount: i128,
    ) -> Result<(), SaleError> {
        spender.require_auth();
        check_non_negative(amount)?;

        extend_instance_ttl(&env);
        spend_allowance(&env, &from, &spender, amount)?;
        burn_balance(&env, &from, amount)?;

        env.events().publish((Symbol::new(&env, "burn"), from), amount);
        Ok(())
    }

    pub fn decimals(env: Env) -> Result<u32, SaleError> {
        Ok(metadata(&env)?.decimal)
    }

    pub fn name(env: Env) -> Result<String, SaleError> {
        Ok(metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, SaleError> {
        Ok(metadata(&env)?.symbol)
    }
}

fn metadata(env: &Env) -> Result<TokenMetadata, SaleError> {
    get_metadata(env).ok_or(SaleError::NotInitialized)
}

fn check_positive(amount: i128) -> Result<(), SaleError> {
    if amount <= 0 {
        return Err(SaleError::InvalidAmount);
    }
    Ok(())
}

fn check_non_negative(amount: i128) -> Result<(), SaleError> {
    if amount < 0 {
        return Err(SaleError::InvalidAmount);
    }
    Ok(())
}

fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), SaleError> {
    let from_balance = read_balance(env, from);
    if from_balance < amount {
        return Err(SaleError::InsufficientBalance);
    }
    write_balance(env, from, from_balance - amount);

    let to_balance = read_balance(env, to)
        .checked_add(amount)
        .ok_or(SaleError::Overflow)?;
    write_balance(env, to, to_balance);
    Ok(())
}

fn burn_balance(env: &Env, from: &Address, amount: i128) -> Result<(), SaleError> {
    let balance = read_balance(env, from);
    if balance < amount {
        return Err(SaleError::InsufficientBalance);
    }
    write_balance(env, from, balance - amount);
    set_total_supply(env, get_total_supply(env) - amount);
    Ok(())
}

fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), SaleError> {
    let allowance = read_allowance(env, from, spender);
    if allowance.amount < amount {
        return Err(SaleError::InsufficientAllowance);
    }
    write_allowance(
        env,
        from,
        spender,
        allowance.amount - amount,
        allowance.expiration_ledger,
    );
    Ok(())
}
