use soroban_sdk::{contracttype, Address};

/// Liquidity swapper configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapperConfig {
    pub owner: Address,
    /// Only address allowed to seed (the crowdsale)
    pub depositor: Address,
    /// Sale token
    pub token: Address,
    /// Exchange holding the seeded position
    pub exchange: Address,
    /// Token paired with the sale token in the exchange
    pub payment_token: Address,
    /// Tokens per payment unit; seeded amounts must match it
    pub buy_rate: i128,
    /// Seconds between seeding and the earliest unlock
    pub lock_period: u64,
    /// Receives the withdrawn position
    pub beneficiary: Address,
}

/// Record of the seeded position and what was withdrawn from it
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LiquidityDeposit {
    pub eth_sent: i128,
    pub token_sent: i128,
    /// Liquidity shares still held in the exchange
    pub liquidity: i128,
    pub seeded_at: u64,
    pub unlock_time: u64,
    pub eth_removed: i128,
    pub tokens_removed: i128,
}

impl LiquidityDeposit {
    pub fn is_unlocked(&self) -> bool {
        self.liquidity == 0
    }
}
