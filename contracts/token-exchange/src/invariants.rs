// ============================================================================
// INVARIANTS MODULE - For Formal Verification
// ============================================================================
//
// Pure predicates over exchange state. Checked with debug assertions after
// every state change and reused by the Certora rules.
//
// 1. RESERVE INVARIANTS
//    - Reserves never go negative
//    - Outstanding liquidity exists iff reserves exist
//
// 2. TRADE INVARIANTS
//    - The reserve product never shrinks across a trade
//    - Payouts never exceed the reserve they come from
//
// ============================================================================

use sale_types::ExchangeReserves;

// ============================================================================
// RESERVE INVARIANTS
// ============================================================================

/// Invariant: both reserves are non-negative
pub fn reserves_non_negative(reserves: &ExchangeReserves) -> bool {
    reserves.eth_reserve >= 0 && reserves.token_reserve >= 0
}

/// Invariant: shares are outstanding exactly when the pool holds reserves
///
/// Property:
///   total_liquidity == 0 <=> eth_reserve == 0 && token_reserve == 0
pub fn liquidity_matches_reserves(total_liquidity: i128, reserves: &ExchangeReserves) -> bool {
    reserves_non_negative(reserves) && (total_liquidity == 0) == reserves.is_empty()
}

/// Invariant: a provider never holds more than the total
pub fn share_within_total(share: i128, total_liquidity: i128) -> bool {
    share >= 0 && share <= total_liquidity
}

// ============================================================================
// TRADE INVARIANTS
// ============================================================================

/// Invariant: the constant product does not decrease across a trade
///
/// Property:
///   eth_after * token_after >= eth_before * token_before
///
/// Only decidable when both products fit in i128.
pub fn product_non_decreasing(before: &ExchangeReserves, after: &ExchangeReserves) -> bool {
    match (
        before.eth_reserve.checked_mul(before.token_reserve),
        after.eth_reserve.checked_mul(after.token_reserve),
    ) {
        (Some(k_before), Some(k_after)) => k_after >= k_before,
        _ => true,
    }
}

/// Invariant: a withdrawal pays out no more than the reserves hold
pub fn payout_within_reserves(eth_out: i128, token_out: i128, reserves: &ExchangeReserves) -> bool {
    eth_out >= 0
        && token_out >= 0
        && eth_out <= reserves.eth_reserve
        && token_out <= reserves.token_reserve
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserves(eth: i128, tokens: i128) -> ExchangeReserves {
        ExchangeReserves {
            eth_reserve: eth,
            token_reserve: tokens,
        }
    }

    #[test]
    fn test_liquidity_matches_reserves() {
        assert!(liquidity_matches_reserves(0, &reserves(0, 0)));
        assert!(liquidity_matches_reserves(30, &reserves(30, 30)));
        assert!(!liquidity_matches_reserves(0, &reserves(1, 0)));
        assert!(!liquidity_matches_reserves(5, &reserves(0, 0)));
        assert!(!liquidity_matches_reserves(5, &reserves(-1, 3)));
    }

    #[test]
    fn test_share_within_total() {
        assert!(share_within_total(0, 0));
        assert!(share_within_total(10, 10));
        assert!(!share_within_total(11, 10));
    }

    #[test]
    fn test_product_non_decreasing() {
        assert!(product_non_decreasing(&reserves(100, 100), &reserves(110, 91)));
        assert!(!product_non_decreasing(&reserves(100, 100), &reserves(110, 90)));
    }

    #[test]
    fn test_payout_within_reserves() {
        assert!(payout_within_reserves(30, 30, &reserves(30, 30)));
        assert!(!payout_within_reserves(31, 30, &reserves(30, 30)));
        assert!(!payout_within_reserves(-1, 0, &reserves(30, 30)));
    }
}
