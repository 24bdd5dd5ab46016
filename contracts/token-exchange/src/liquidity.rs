use crate::invariants::{liquidity_matches_reserves, payout_within_reserves, share_within_total};
use crate::storage::{
    get_config, get_liquidity, get_reserves, get_total_liquidity, set_liquidity, set_reserves,
    set_total_liquidity,
};
use sale_math::{amounts_for_liquidity, quote_deposit};
use sale_types::{ExchangeReserves, SaleError};
use soroban_sdk::{token, Address, Env, Symbol};

/// Fail once the ledger clock has passed `deadline`
pub fn check_deadline(env: &Env, deadline: u64) -> Result<(), SaleError> {
    if env.ledger().timestamp() > deadline {
        return Err(SaleError::Expired);
    }
    Ok(())
}

/// Credit `provider` with a deposit of `eth_amount` and at most `max_tokens`
///
/// Both assets must already sit in the exchange beyond its reserves. Tokens
/// beyond the amount the current price requires are sent back to the
/// provider; any other unaccounted balance is left for `skim`.
///
/// # Returns
/// Liquidity shares minted
pub fn add_liquidity(
    env: &Env,
    provider: Address,
    eth_amount: i128,
    max_tokens: i128,
    min_liquidity: i128,
) -> Result<i128, SaleError> {
    if eth_amount <= 0 || max_tokens <= 0 {
        return Err(SaleError::InvalidAmount);
    }

    let config = get_config(env)?;
    let reserves = get_reserves(env);
    let total_liquidity = get_total_liquidity(env);
    let contract_address = env.current_contract_address();

    let eth_client = token::Client::new(env, &config.payment_token);
    let token_client = token::Client::new(env, &config.token);

    let unaccounted_eth = eth_client.balance(&contract_address) - reserves.eth_reserve;
    let unaccounted_tokens = token_client.balance(&contract_address) - reserves.token_reserve;
    if unaccounted_eth < eth_amount || unaccounted_tokens < max_tokens {
        return Err(SaleError::InsufficientBalance);
    }

    let eth_in = eth_amount;
    let (tokens_used, minted) =
        quote_deposit(env, eth_in, max_tokens, &reserves, total_liquidity)?;
    if minted <= 0 {
        return Err(SaleError::InvalidAmount);
    }
    if minted < min_liquidity {
        return Err(SaleError::SlippageExceeded);
    }

    let refund = max_tokens - tokens_used;
    if refund > 0 {
        token_client.transfer(&contract_address, &provider, &refund);
    }

    let new_reserves = ExchangeReserves {
        eth_reserve: reserves
            .eth_reserve
            .checked_add(eth_in)
            .ok_or(SaleError::Overflow)?,
        token_reserve: reserves
            .token_reserve
            .checked_add(tokens_used)
            .ok_or(SaleError::Overflow)?,
    };
    let new_total = total_liquidity
        .checked_add(minted)
        .ok_or(SaleError::Overflow)?;

    let share = get_liquidity(env, &provider) + minted;

    set_reserves(env, &new_reserves);
    set_total_liquidity(env, new_total);
    set_liquidity(env, &provider, share);

    debug_assert!(liquidity_matches_reserves(new_total, &new_reserves));
    debug_assert!(share_within_total(share, new_total));

    env.events().publish(
        (Symbol::new(env, "add_liquidity"), provider),
        (eth_in, tokens_used, minted),
    );

    Ok(minted)
}

/// Burn `amount` of the provider's shares and pay out the matching reserves
///
/// # Returns
/// (eth_amount, token_amount) - Amounts paid to the provider
pub fn remove_liquidity(
    env: &Env,
    provider: Address,
    amount: i128,
    min_eth: i128,
    min_tokens: i128,
) -> Result<(i128, i128), SaleError> {
    if amount <= 0 {
        return Err(SaleError::InvalidAmount);
    }

    let held = get_liquidity(env, &provider);
    if held < amount {
        return Err(SaleError::InsufficientLiquidity);
    }

    let config = get_config(env)?;
    let reserves = get_reserves(env);
    let total_liquidity = get_total_liquidity(env);

    let (eth_amount, token_amount) = amounts_for_liquidity(env, amount, &reserves, total_liquidity)?;
    if eth_amount < min_eth || token_amount < min_tokens {
        return Err(SaleError::SlippageExceeded);
    }
    debug_assert!(payout_within_reserves(eth_amount, token_amount, &reserves));

    let new_reserves = ExchangeReserves {
        eth_reserve: reserves.eth_reserve - eth_amount,
        token_reserve: reserves.token_reserve - token_amount,
    };
    let new_total = total_liquidity - amount;

    set_liquidity(env, &provider, held - amount);
    set_total_liquidity(env, new_total);
    set_reserves(env, &new_reserves);

    debug_assert!(liquidity_matches_reserves(new_total, &new_reserves));

    let contract_address = env.current_contract_address();
    if eth_amount > 0 {
        token::Client::new(env, &config.payment_token).transfer(
            &contract_address,
            &provider,
            &eth_amount,
        );
    }
    if token_amount > 0 {
        token::Client::new(env, &config.token).transfer(
            &contract_address,
            &provider,
            &token_amount,
        );
    }

    env.events().publish(
        (Symbol::new(env, "remove_liquidity"), provider),
        (eth_amount, token_amount, amount),
    );

    Ok((eth_amount, token_amount))
}

/// Send whatever the exchange holds beyond its reserves to `to`
///
/// # Returns
/// (eth_amount, token_amount) - Amounts sent
pub fn skim(env: &Env, to: Address) -> Result<(i128, i128), SaleError> {
    let config = get_config(env)?;
    let reserves = get_reserves(env);
    let contract_address = env.current_contract_address();

    let eth_client = token::Client::new(env, &config.payment_token);
    let token_client = token::Client::new(env, &config.token);

    let eth_amount = eth_client.balance(&contract_address) - reserves.eth_reserve;
    let token_amount = token_client.balance(&contract_address) - reserves.token_reserve;

    if eth_amount > 0 {
        eth_client.transfer(&contract_address, &to, &eth_amount);
    }
    if token_amount > 0 {
        token_client.transfer(&contract_address, &to, &token_amount);
    }

    env.events()
        .publish((Symbol::new(env, "skim"), to), (eth_amount, token_amount));

    Ok((eth_amount, token_amount))
}
