#![no_std]

//! Liquidity swapper. Receives the crowdsale's liquidity share, seeds the
//! exchange with it and holds the position until the lock period is over.

mod storage;

use sale_math::fit_deposit;
use sale_types::{ExchangeReserves, LiquidityDeposit, SaleError, SwapperConfig};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, IntoVal, Symbol, Vec};
use storage::{extend_instance_ttl, get_config, get_deposit, has_config, set_config, set_deposit};

#[contract]
pub struct Uniswapper;

#[contractimpl]
impl Uniswapper {
    /// Initialize the swapper
    pub fn initialize(env: Env, config: SwapperConfig) -> Result<(), SaleError> {
        if has_config(&env) {
            return Err(SaleError::AlreadyInitialized);
        }
        if config.buy_rate <= 0 || config.token == config.payment_token {
            return Err(SaleError::InvalidConfig);
        }

        config.owner.require_auth();
        set_config(&env, &config);
        Ok(())
    }

    /// Deposit `eth_amount` and `token_amount` held by the swapper into the
    /// exchange and start the lock timer. Depositor only, once.
    ///
    /// The deposit is sized to the exchange's current price; whatever does
    /// not fit goes straight to the beneficiary. If the price leaves no room
    /// for a deposit, everything goes to the beneficiary and nothing is locked.
    ///
    /// # Returns
    /// Liquidity shares received
    pub fn seed(env: Env, eth_amount: i128, token_amount: i128) -> Result<i128, SaleError> {
        let config = get_config(&env)?;
        config.depositor.require_auth();

        if get_deposit(&env).is_some() {
            return Err(SaleError::WrongPhase);
        }
        if eth_amount <= 0 || token_amount <= 0 {
            return Err(SaleError::InvalidAmount);
        }
        let expected_tokens = eth_amount
            .checked_mul(config.buy_rate)
            .ok_or(SaleError::Overflow)?;
        if token_amount != expected_tokens {
            return Err(SaleError::PriceMismatch);
        }

        let this = env.current_contract_address();
        let eth_client = token::Client::new(&env, &config.payment_token);
        let token_client = token::Client::new(&env, &config.token);

        if eth_client.balance(&this) < eth_amount || token_client.balance(&this) < token_amount {
            return Err(SaleError::InsufficientBalance);
        }

        let reserves = get_reserves(&env, &config.exchange);
        let total_liquidity = get_total_liquidity(&env, &config.exchange);
        let (eth_sent, token_sent, expected_liquidity) =
            fit_deposit(&env, eth_amount, token_amount, &reserves, total_liquidity)?;

        let now = env.ledger().timestamp();
        let mut liquidity = 0;
        if expected_liquidity > 0 {
            eth_client.transfer(&this, &config.exchange, &eth_sent);
            token_client.transfer(&this, &config.exchange, &token_sent);
            liquidity = add_liquidity(
                &env,
                &config.exchange,
                &this,
                eth_sent,
                token_sent,
                expected_liquidity,
                now,
            );
        }

        let eth_left = eth_amount - eth_sent;
        let tokens_left = token_amount - token_sent;
        if eth_left > 0 {
            eth_client.transfer(&this, &config.beneficiary, &eth_left);
        }
        if tokens_left > 0 {
            token_client.transfer(&this, &config.beneficiary, &tokens_left);
        }

        let deposit = LiquidityDeposit {
            eth_sent,
            token_sent,
            liquidity,
            seeded_at: now,
            unlock_time: now.saturating_add(config.lock_period),
            eth_removed: 0,
            tokens_removed: 0,
        };
        set_deposit(&env, &deposit);

        log!(&env, "liquidity seeded", eth_sent, token_sent, liquidity, eth_left, tokens_left);
        env.events().publish(
            (Symbol::new(&env, "liquidity_seeded"), config.exchange),
            (eth_sent, token_sent, liquidity, deposit.unlock_time),
        );

        Ok(liquidity)
    }

    /// Withdraw the whole position and send it to the beneficiary
    ///
    /// # Returns
    /// (eth_removed, tokens_removed)
    pub fn unlock(env: Env) -> Result<(i128, i128), SaleError> {
        let config = get_config(&env)?;
        let mut deposit = get_deposit(&env).ok_or(SaleError::NothingToUnlock)?;
        if deposit.is_unlocked() {
            return Err(SaleError::NothingToUnlock);
        }

        let now = env.ledger().timestamp();
        if now < deposit.unlock_time {
            return Err(SaleError::Locked);
        }

        let this = env.current_contract_address();
        let (eth_removed, tokens_removed) =
            remove_liquidity(&env, &config.exchange, &this, deposit.liquidity, now);

        deposit.liquidity = 0;
        deposit.eth_removed = eth_removed;
        deposit.tokens_removed = tokens_removed;
        set_deposit(&env, &deposit);

        if eth_removed > 0 {
            token::Client::new(&env, &config.payment_token).transfer(
                &this,
                &config.beneficiary,
                &eth_removed,
            );
        }
        if tokens_removed > 0 {
            token::Client::new(&env, &config.token).transfer(
                &this,
                &config.beneficiary,
                &tokens_removed,
            );
        }

        log!(&env, "liquidity unlocked", eth_removed, tokens_removed);
        env.events().publish(
            (Symbol::new(&env, "liquidity_unlocked"), config.beneficiary),
            (eth_removed, tokens_removed),
        );

        Ok((eth_removed, tokens_removed))
    }

    // === View Functions ===

    pub fn eth_sent(env: Env) -> i128 {
        deposit_or_default(&env).eth_sent
    }

    pub fn token_sent(env: Env) -> i128 {
        deposit_or_default(&env).token_sent
    }

    pub fn eth_removed(env: Env) -> i128 {
        deposit_or_default(&env).eth_removed
    }

    pub fn tokens_removed(env: Env) -> i128 {
        deposit_or_default(&env).tokens_removed
    }

    /// Zero until seeded
    pub fn unlock_time(env: Env) -> u64 {
        deposit_or_default(&env).unlock_time
    }

    pub fn get_deposit(env: Env) -> Option<LiquidityDeposit> {
        extend_instance_ttl(&env);
        get_deposit(&env)
    }

    pub fn get_config(env: Env) -> Result<SwapperConfig, SaleError> {
        get_config(&env)
    }

    /// True when `unlock` would succeed now
    pub fn is_unlockable(env: Env) -> bool {
        match get_deposit(&env) {
            Some(deposit) => {
                !deposit.is_unlocked() && env.ledger().timestamp() >= deposit.unlock_time
            }
            None => false,
        }
    }
}

fn deposit_or_default(env: &Env) -> LiquidityDeposit {
    extend_instance_ttl(env);
    get_deposit(env).unwrap_or_default()
}

// Exchange calls via invoke
fn get_reserves(env: &Env, exchange: &Address) -> ExchangeReserves {
    env.invoke_contract::<ExchangeReserves>(
        exchange,
        &Symbol::new(env, "get_reserves"),
        Vec::new(env),
    )
}

fn get_total_liquidity(env: &Env, exchange: &Address) -> i128 {
    env.invoke_contract::<i128>(
        exchange,
        &Symbol::new(env, "total_liquidity"),
        Vec::new(env),
    )
}

fn add_liquidity(
    env: &Env,
    exchange: &Address,
    provider: &Address,
    eth_amount: i128,
    max_tokens: i128,
    min_liquidity: i128,
    deadline: u64,
) -> i128 {
    env.invoke_contract::<i128>(
        exchange,
        &Symbol::new(env, "add_liquidity"),
        (provider, eth_amount, max_tokens, min_liquidity, deadline).into_val(env),
    )
}

fn remove_liquidity(
    env: &Env,
    exchange: &Address,
    provider: &Address,
    amount: i128,
    deadline: u64,
) -> (i128, i128) {
    env.invoke_contract::<(i128, i128)>(
        exchange,
        &Symbol::new(env, "remove_liquidity"),
        (provider, amount, 0i128, 0i128, deadline).into_val(env),
    )
}
