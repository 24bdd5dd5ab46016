use soroban_sdk::{contracttype, Address};

/// Team allocation vesting parameters
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingConfig {
    pub owner: Address,
    /// Token being vested
    pub token: Address,
    pub start_time: u64,
    /// Nothing is releasable before `start_time + cliff`
    pub cliff: u64,
    /// Everything is releasable from `start_time + duration`
    pub duration: u64,
}

/// Per-beneficiary grant
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Allocation {
    pub total: i128,
    pub released: i128,
}
