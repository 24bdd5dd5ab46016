#![no_std]

mod invariants;
mod liquidity;
mod storage;
mod swap;

#[cfg(feature = "certora")]
mod certora_specs;

use liquidity::check_deadline;
use sale_types::{ExchangeConfig, ExchangeReserves, SaleError};
use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};
use storage::{
    extend_instance_ttl, get_config, get_liquidity, get_reserves, get_total_liquidity,
    has_config, set_config,
};
use swap::SwapDirection;

/// Constant-product exchange between one token and the payment token
#[contract]
pub struct TokenExchange;

#[contractimpl]
impl TokenExchange {
    /// Bind the exchange to its token pair
    pub fn setup(env: Env, token: Address, payment_token: Address) -> Result<(), SaleError> {
        if has_config(&env) {
            return Err(SaleError::AlreadyInitialized);
        }
        if token == payment_token {
            return Err(SaleError::InvalidConfig);
        }

        set_config(
            &env,
            &ExchangeConfig {
                token: token.clone(),
                payment_token,
            },
        );
        env.events()
            .publish((Symbol::new(&env, "exchange_setup"),), token);
        Ok(())
    }

    /// Add liquidity from assets already transferred to the exchange
    ///
    /// # Arguments
    /// * `provider` - Receives the liquidity shares and any token refund
    /// * `eth_amount` - Payment token deposited
    /// * `max_tokens` - Tokens transferred in; the unused part is refunded
    /// * `min_liquidity` - Smallest acceptable number of minted shares
    /// * `deadline` - Ledger timestamp after which the call fails
    ///
    /// # Returns
    /// Liquidity shares minted
    pub fn add_liquidity(
        env: Env,
        provider: Address,
        eth_amount: i128,
        max_tokens: i128,
        min_liquidity: i128,
        deadline: u64,
    ) -> Result<i128, SaleError> {
        provider.require_auth();
        check_deadline(&env, deadline)?;
        liquidity::add_liquidity(&env, provider, eth_amount, max_tokens, min_liquidity)
    }

    /// Burn liquidity shares for the matching share of both reserves
    ///
    /// # Returns
    /// (eth_amount, token_amount) - Amounts paid out
    pub fn remove_liquidity(
        env: Env,
        provider: Address,
        amount: i128,
        min_eth: i128,
        min_tokens: i128,
        deadline: u64,
    ) -> Result<(i128, i128), SaleError> {
        provider.require_auth();
        check_deadline(&env, deadline)?;
        liquidity::remove_liquidity(&env, provider, amount, min_eth, min_tokens)
    }

    /// Send balances held beyond the reserves to `to`
    ///
    /// # Returns
    /// (eth_amount, token_amount) - Amounts sent
    pub fn skim(env: Env, to: Address) -> Result<(i128, i128), SaleError> {
        liquidity::skim(&env, to)
    }

    /// Sell exactly `eth_sold` for tokens
    pub fn eth_to_token_swap_input(
        env: Env,
        buyer: Address,
        eth_sold: i128,
        min_tokens: i128,
        deadline: u64,
    ) -> Result<i128, SaleError> {
        buyer.require_auth();
        check_deadline(&env, deadline)?;
        swap::execute_swap(&env, buyer, SwapDirection::EthToToken, eth_sold, min_tokens)
    }

    /// Sell exactly `tokens_sold` for the payment token
    pub fn token_to_eth_swap_input(
        env: Env,
        seller: Address,
        tokens_sold: i128,
        min_eth: i128,
        deadline: u64,
    ) -> Result<i128, SaleError> {
        seller.require_auth();
        check_deadline(&env, deadline)?;
        swap::execute_swap(&env, seller, SwapDirection::TokenToEth, tokens_sold, min_eth)
    }

    // === View Functions ===

    pub fn get_eth_to_token_input_price(env: Env, eth_sold: i128) -> Result<i128, SaleError> {
        swap::quote(&env, SwapDirection::EthToToken, eth_sold)
    }

    pub fn get_token_to_eth_input_price(env: Env, tokens_sold: i128) -> Result<i128, SaleError> {
        swap::quote(&env, SwapDirection::TokenToEth, tokens_sold)
    }

    /// Get accounted reserves
    pub fn get_reserves(env: Env) -> ExchangeReserves {
        extend_instance_ttl(&env);
        get_reserves(&env)
    }

    /// Get outstanding liquidity shares
    pub fn total_liquidity(env: Env) -> i128 {
        extend_instance_ttl(&env);
        get_total_liquidity(&env)
    }

    /// Get liquidity shares held by `provider`
    pub fn liquidity_of(env: Env, provider: Address) -> i128 {
        get_liquidity(&env, &provider)
    }

    pub fn token_address(env: Env) -> Result<Address, SaleError> {
        Ok(get_config(&env)?.token)
    }

    pub fn payment_token_address(env: Env) -> Result<Address, SaleError> {
        Ok(get_config(&env)?.payment_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::{Address as _, Ledger};
    use soroban_sdk::{token, Address, Env};

    struct Fixture<'a> {
        env: Env,
        exchange: TokenExchangeClient<'a>,
        exchange_id: Address,
        eth: Address,
        token: Address,
    }

    fn setup_exchange<'a>() -> Fixture<'a> {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let eth = env.register_stellar_asset_contract_v2(admin.clone()).address();
        let token = env.register_stellar_asset_contract_v2(admin).address();

        let exchange_id = env.register(TokenExchange, ());
        let exchange = TokenExchangeClient::new(&env, &exchange_id);
        exchange.setup(&token, &eth);

        Fixture {
            env,
            exchange,
            exchange_id,
            eth,
            token,
        }
    }

    fn fund(f: &Fixture, to: &Address, eth: i128, tokens: i128) {
        if eth > 0 {
            token::StellarAssetClient::new(&f.env, &f.eth).mint(to, &eth);
        }
        if tokens > 0 {
            token::StellarAssetClient::new(&f.env, &f.token).mint(to, &tokens);
        }
    }

    /// Move assets into the exchange and claim them as liquidity
    fn deposit(f: &Fixture, provider: &Address, eth: i128, tokens: i128) -> i128 {
        fund(f, provider, eth, tokens);
        token::Client::new(&f.env, &f.eth).transfer(provider, &f.exchange_id, &eth);
        token::Client::new(&f.env, &f.token).transfer(provider, &f.exchange_id, &tokens);
        f.exchange.add_liquidity(provider, &eth, &tokens, &0, &u64::MAX)
    }

    #[test]
    fn test_setup() {
        let f = setup_exchange();
        assert_eq!(f.exchange.token_address(), f.token);
        assert_eq!(f.exchange.payment_token_address(), f.eth);
        assert_eq!(f.exchange.total_liquidity(), 0);
        assert!(f.exchange.get_reserves().is_empty());
    }

    #[test]
    fn test_setup_twice_fails() {
        let f = setup_exchange();
        assert_eq!(
            f.exchange.try_setup(&f.token, &f.eth),
            Err(Ok(SaleError::AlreadyInitialized))
        );
    }

    #[test]
    fn test_first_deposit_mints_eth_amount() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);

        let minted = deposit(&f, &provider, 30, 750);

        assert_eq!(minted, 30);
        assert_eq!(f.exchange.liquidity_of(&provider), 30);
        assert_eq!(f.exchange.total_liquidity(), 30);
        let reserves = f.exchange.get_reserves();
        assert_eq!(reserves.eth_reserve, 30);
        assert_eq!(reserves.token_reserve, 750);
    }

    #[test]
    fn test_second_deposit_refunds_excess_tokens() {
        let f = setup_exchange();
        let first = Address::generate(&f.env);
        let second = Address::generate(&f.env);
        deposit(&f, &first, 300, 900);

        let minted = deposit(&f, &second, 100, 1_000);

        assert_eq!(minted, 100);
        // 100 * 900 / 300 + 1 tokens are kept, the rest comes back
        assert_eq!(token::Client::new(&f.env, &f.token).balance(&second), 699);
        assert_eq!(f.exchange.get_reserves().token_reserve, 1_201);
        assert_eq!(f.exchange.total_liquidity(), 400);
    }

    #[test]
    fn test_add_liquidity_without_deposit_fails() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        assert_eq!(
            f.exchange.try_add_liquidity(&provider, &30, &30, &0, &u64::MAX),
            Err(Ok(SaleError::InsufficientBalance))
        );
        assert_eq!(
            f.exchange.try_add_liquidity(&provider, &0, &30, &0, &u64::MAX),
            Err(Ok(SaleError::InvalidAmount))
        );
    }

    #[test]
    fn test_stray_balance_not_credited() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        // Sent straight to the exchange, outside any deposit
        fund(&f, &f.exchange_id, 5, 7);

        let minted = deposit(&f, &provider, 30, 30);

        assert_eq!(minted, 30);
        let reserves = f.exchange.get_reserves();
        assert_eq!(reserves.eth_reserve, 30);
        assert_eq!(reserves.token_reserve, 30);

        let (eth, tokens) = f.exchange.remove_liquidity(&provider, &30, &0, &0, &u64::MAX);
        assert_eq!((eth, tokens), (30, 30));
    }

    #[test]
    fn test_skim_returns_unaccounted_balances() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        deposit(&f, &provider, 30, 30);
        fund(&f, &f.exchange_id, 5, 7);

        let collector = Address::generate(&f.env);
        assert_eq!(f.exchange.skim(&collector), (5, 7));
        assert_eq!(token::Client::new(&f.env, &f.eth).balance(&collector), 5);
        assert_eq!(token::Client::new(&f.env, &f.token).balance(&collector), 7);

        // Reserves are untouched and nothing is left to skim
        assert_eq!(f.exchange.get_reserves().eth_reserve, 30);
        assert_eq!(f.exchange.skim(&collector), (0, 0));
    }

    #[test]
    fn test_add_liquidity_min_liquidity() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        fund(&f, &provider, 30, 30);
        token::Client::new(&f.env, &f.eth).transfer(&provider, &f.exchange_id, &30);
        token::Client::new(&f.env, &f.token).transfer(&provider, &f.exchange_id, &30);

        assert_eq!(
            f.exchange.try_add_liquidity(&provider, &30, &30, &31, &u64::MAX),
            Err(Ok(SaleError::SlippageExceeded))
        );
    }

    #[test]
    fn test_deadline_expired() {
        let f = setup_exchange();
        f.env.ledger().set_timestamp(1_000);
        let provider = Address::generate(&f.env);

        assert_eq!(
            f.exchange.try_add_liquidity(&provider, &1, &1, &0, &999),
            Err(Ok(SaleError::Expired))
        );
        assert_eq!(
            f.exchange.try_eth_to_token_swap_input(&provider, &1, &0, &999),
            Err(Ok(SaleError::Expired))
        );
    }

    #[test]
    fn test_remove_all_liquidity_returns_deposit() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        deposit(&f, &provider, 30, 30);

        let (eth, tokens) = f.exchange.remove_liquidity(&provider, &30, &0, &0, &u64::MAX);

        assert_eq!((eth, tokens), (30, 30));
        assert_eq!(f.exchange.total_liquidity(), 0);
        assert_eq!(f.exchange.liquidity_of(&provider), 0);
        assert!(f.exchange.get_reserves().is_empty());
        assert_eq!(token::Client::new(&f.env, &f.eth).balance(&provider), 30);
        assert_eq!(token::Client::new(&f.env, &f.token).balance(&provider), 30);
    }

    #[test]
    fn test_remove_more_than_held_fails() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        deposit(&f, &provider, 30, 30);

        assert_eq!(
            f.exchange.try_remove_liquidity(&provider, &31, &0, &0, &u64::MAX),
            Err(Ok(SaleError::InsufficientLiquidity))
        );
        assert_eq!(
            f.exchange
                .try_remove_liquidity(&Address::generate(&f.env), &1, &0, &0, &u64::MAX),
            Err(Ok(SaleError::InsufficientLiquidity))
        );
    }

    #[test]
    fn test_remove_respects_minimums() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        deposit(&f, &provider, 30, 30);

        assert_eq!(
            f.exchange.try_remove_liquidity(&provider, &30, &31, &0, &u64::MAX),
            Err(Ok(SaleError::SlippageExceeded))
        );
    }

    #[test]
    fn test_eth_to_token_swap() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        deposit(&f, &provider, 1_000_000, 1_000_000);

        let trader = Address::generate(&f.env);
        fund(&f, &trader, 1_000, 0);

        let quoted = f.exchange.get_eth_to_token_input_price(&1_000);
        let bought = f
            .exchange
            .eth_to_token_swap_input(&trader, &1_000, &1, &u64::MAX);

        assert_eq!(bought, quoted);
        assert_eq!(bought, 996);
        assert_eq!(token::Client::new(&f.env, &f.token).balance(&trader), 996);
        let reserves = f.exchange.get_reserves();
        assert_eq!(reserves.eth_reserve, 1_001_000);
        assert_eq!(reserves.token_reserve, 999_004);
    }

    #[test]
    fn test_token_to_eth_swap() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        deposit(&f, &provider, 1_000_000, 1_000_000);

        let trader = Address::generate(&f.env);
        fund(&f, &trader, 0, 1_000);

        let bought = f
            .exchange
            .token_to_eth_swap_input(&trader, &1_000, &1, &u64::MAX);

        assert_eq!(bought, 996);
        assert_eq!(token::Client::new(&f.env, &f.eth).balance(&trader), 996);
        assert_eq!(token::Client::new(&f.env, &f.token).balance(&trader), 0);
    }

    #[test]
    fn test_swap_slippage() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        deposit(&f, &provider, 1_000_000, 1_000_000);

        let trader = Address::generate(&f.env);
        fund(&f, &trader, 1_000, 0);

        assert_eq!(
            f.exchange
                .try_eth_to_token_swap_input(&trader, &1_000, &997, &u64::MAX),
            Err(Ok(SaleError::SlippageExceeded))
        );
    }

    #[test]
    fn test_swap_on_empty_pool_fails() {
        let f = setup_exchange();
        let trader = Address::generate(&f.env);
        assert_eq!(
            f.exchange
                .try_eth_to_token_swap_input(&trader, &1_000, &0, &u64::MAX),
            Err(Ok(SaleError::InsufficientLiquidity))
        );
    }

    #[test]
    fn test_trade_shifts_withdrawal() {
        let f = setup_exchange();
        let provider = Address::generate(&f.env);
        deposit(&f, &provider, 30_000, 30_000);

        let trader = Address::generate(&f.env);
        fund(&f, &trader, 3_000, 0);
        f.exchange
            .eth_to_token_swap_input(&trader, &3_000, &1, &u64::MAX);

        let (eth, tokens) = f
            .exchange
            .remove_liquidity(&provider, &30_000, &0, &0, &u64::MAX);
        assert_eq!(eth, 33_000);
        assert!(tokens < 30_000);
    }
}
