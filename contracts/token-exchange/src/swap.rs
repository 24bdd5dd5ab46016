use crate::invariants::product_non_decreasing;
use crate::storage::{get_config, get_reserves, set_reserves};
use sale_math::get_input_price;
use sale_types::{ExchangeReserves, SaleError};
use soroban_sdk::{token, Address, Env, Symbol};

/// Direction of an exact-input trade
#[derive(Clone, Copy)]
pub enum SwapDirection {
    EthToToken,
    TokenToEth,
}

/// Sell exactly `amount_in` of one side for at least `min_out` of the other
///
/// # Returns
/// Amount paid out to `trader`
pub fn execute_swap(
    env: &Env,
    trader: Address,
    direction: SwapDirection,
    amount_in: i128,
    min_out: i128,
) -> Result<i128, SaleError> {
    let config = get_config(env)?;
    let reserves = get_reserves(env);

    let (input_asset, output_asset, input_reserve, output_reserve) = match direction {
        SwapDirection::EthToToken => (
            config.payment_token,
            config.token,
            reserves.eth_reserve,
            reserves.token_reserve,
        ),
        SwapDirection::TokenToEth => (
            config.token,
            config.payment_token,
            reserves.token_reserve,
            reserves.eth_reserve,
        ),
    };

    let amount_out = get_input_price(env, amount_in, input_reserve, output_reserve)?;
    if amount_out <= 0 {
        return Err(SaleError::InsufficientLiquidity);
    }
    if amount_out < min_out {
        return Err(SaleError::SlippageExceeded);
    }

    let input_after = input_reserve
        .checked_add(amount_in)
        .ok_or(SaleError::Overflow)?;
    let output_after = output_reserve - amount_out;
    let new_reserves = match direction {
        SwapDirection::EthToToken => ExchangeReserves {
            eth_reserve: input_after,
            token_reserve: output_after,
        },
        SwapDirection::TokenToEth => ExchangeReserves {
            eth_reserve: output_after,
            token_reserve: input_after,
        },
    };
    debug_assert!(product_non_decreasing(&reserves, &new_reserves));
    set_reserves(env, &new_reserves);

    let contract_address = env.current_contract_address();
    token::Client::new(env, &input_asset).transfer(&trader, &contract_address, &amount_in);
    token::Client::new(env, &output_asset).transfer(&contract_address, &trader, &amount_out);

    let topic = match direction {
        SwapDirection::EthToToken => "token_purchase",
        SwapDirection::TokenToEth => "eth_purchase",
    };
    env.events()
        .publish((Symbol::new(env, topic), trader), (amount_in, amount_out));

    Ok(amount_out)
}

/// Price of selling `amount_in` in the given direction, without trading
pub fn quote(env: &Env, direction: SwapDirection, amount_in: i128) -> Result<i128, SaleError> {
    let reserves = get_reserves(env);
    match direction {
        SwapDirection::EthToToken => {
            get_input_price(env, amount_in, reserves.eth_reserve, reserves.token_reserve)
        }
        SwapDirection::TokenToEth => {
            get_input_price(env, amount_in, reserves.token_reserve, reserves.eth_reserve)
        }
    }
}
