use crate::{is_valid_percent, SaleError};
use soroban_sdk::{contracttype, Address};

/// Purchase window, inclusive on both ends
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleWindow {
    pub start_time: u64,
    pub end_time: u64,
}

impl SaleWindow {
    pub fn contains(&self, now: u64) -> bool {
        now >= self.start_time && now <= self.end_time
    }

    pub fn has_started(&self, now: u64) -> bool {
        now >= self.start_time
    }

    pub fn has_ended(&self, now: u64) -> bool {
        now > self.end_time
    }
}

/// Per-transaction contribution cap for the first `duration` seconds of the sale
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarlyPurchaseCap {
    /// Length of the early window, counted from `start_time`
    pub duration: u64,
    /// Largest single contribution accepted inside the early window
    pub max_contribution: i128,
}

/// Tokens minted at finalize, as percentages of the tokens the sale distributed
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenAllocation {
    /// Minted to `reward_wallet`
    pub reward_percent: u32,
    /// Minted to the team allocation contract, if one is wired
    pub team_percent: u32,
    /// Minted to `non_vested_wallet`, if one is configured
    pub non_vested_percent: u32,
}

impl TokenAllocation {
    pub fn total_percent(&self) -> u32 {
        self.reward_percent
            .saturating_add(self.team_percent)
            .saturating_add(self.non_vested_percent)
    }
}

/// Crowdsale configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CrowdsaleConfig {
    pub window: SaleWindow,
    /// Whitelist contract gating purchases
    pub whitelist: Address,
    /// Tokens minted per payment unit
    pub buy_rate: i128,
    /// Receives the raised funds not routed to liquidity
    pub multisig: Address,
    pub reward_wallet: Address,
    pub non_vested_wallet: Option<Address>,
    /// Share of raised funds (0..=100) seeded into the exchange at finalize
    pub liquidity_percent: u32,
    /// Token buyers pay with
    pub payment_token: Address,
    pub early_cap: Option<EarlyPurchaseCap>,
    pub allocation: TokenAllocation,
}

impl CrowdsaleConfig {
    pub fn validate(&self) -> Result<(), SaleError> {
        if self.window.start_time >= self.window.end_time {
            return Err(SaleError::InvalidConfig);
        }
        if self.buy_rate <= 0 {
            return Err(SaleError::InvalidConfig);
        }
        if !is_valid_percent(self.liquidity_percent) {
            return Err(SaleError::InvalidConfig);
        }
        if !is_valid_percent(self.allocation.total_percent()) {
            return Err(SaleError::InvalidConfig);
        }
        if let Some(cap) = &self.early_cap {
            let sale_length = self.window.end_time - self.window.start_time;
            if cap.max_contribution <= 0 || cap.duration == 0 || cap.duration > sale_length {
                return Err(SaleError::InvalidConfig);
            }
        }
        Ok(())
    }

    /// True while `now` falls inside the capped early window
    pub fn in_early_period(&self, now: u64) -> bool {
        match &self.early_cap {
            Some(cap) => {
                self.window.has_started(now)
                    && now < self.window.start_time.saturating_add(cap.duration)
            }
            None => false,
        }
    }
}

/// Stored lifecycle phase
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SalePhase {
    /// Initial phase; purchases rejected until the owner unpauses
    Paused,
    /// Purchases accepted inside the sale window
    Active,
    /// Terminal; funds distributed
    Finalized,
}

/// Phase combined with the clock, for callers
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaleStatus {
    /// Before `start_time`; pre-sale minting allowed
    PreSale,
    /// Window started but the owner has not unpaused
    Paused,
    /// Purchases accepted
    Open,
    /// Window over, waiting for finalize
    Closed,
    Finalized,
}

impl SaleStatus {
    pub fn derive(phase: SalePhase, window: &SaleWindow, now: u64) -> Self {
        match phase {
            SalePhase::Finalized => SaleStatus::Finalized,
            _ if window.has_ended(now) => SaleStatus::Closed,
            _ if !window.has_started(now) => SaleStatus::PreSale,
            SalePhase::Paused => SaleStatus::Paused,
            SalePhase::Active => SaleStatus::Open,
        }
    }
}
