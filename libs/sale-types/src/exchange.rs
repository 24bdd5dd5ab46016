use soroban_sdk::{contracttype, Address};

/// Exchange binding - set once by `setup`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExchangeConfig {
    /// Token traded against the payment token
    pub token: Address,
    /// Payment ("eth") side of the pool
    pub payment_token: Address,
}

/// Reserves the exchange has accounted for
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExchangeReserves {
    pub eth_reserve: i128,
    pub token_reserve: i128,
}

impl ExchangeReserves {
    pub fn is_empty(&self) -> bool {
        self.eth_reserve == 0 && self.token_reserve == 0
    }
}
