use soroban_sdk::contracterror;

/// Errors returned by every contract in the sale system.
///
/// Any `Err` returned from an entry point aborts the invocation and the host
/// rolls back all storage writes of the call tree, nested calls included.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SaleError {
    /// `initialize` / `setup` called on a contract that is already configured.
    AlreadyInitialized = 1,
    /// Contract storage has not been initialized.
    NotInitialized = 2,
    /// Caller is not the owner, depositor or a whitelisted buyer.
    Unauthorized = 3,
    /// Sale (or swapper) is in the wrong lifecycle phase for the operation.
    WrongPhase = 4,
    /// Current ledger time is outside the interval the operation allows.
    OutsideTimeWindow = 5,
    /// Contribution above the early-period per-transaction cap.
    CapExceeded = 6,
    /// Sale has already been finalized.
    AlreadyFinalized = 7,
    /// Liquidity withdrawal attempted before the lock period elapsed.
    Locked = 8,
    /// No liquidity position to withdraw.
    NothingToUnlock = 9,
    /// Amount must be strictly positive.
    InvalidAmount = 10,
    /// Configuration rejected at initialization.
    InvalidConfig = 11,
    /// One-time setter called twice.
    AlreadySet = 12,
    /// A collaborator address required by the operation is not configured.
    NotConfigured = 13,
    InsufficientBalance = 14,
    InsufficientAllowance = 15,
    InsufficientLiquidity = 16,
    /// Output below the caller's minimum, or deposit below the required ratio.
    SlippageExceeded = 17,
    /// Deadline already passed.
    Expired = 18,
    /// Seeded token amount does not match the sale price.
    PriceMismatch = 19,
    /// Nothing has vested beyond what was already released.
    NothingToRelease = 20,
    /// Factory already holds an exchange for the token.
    ExchangeExists = 21,
    Overflow = 22,
}
