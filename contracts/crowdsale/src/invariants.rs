// ============================================================================
// INVARIANTS MODULE - For Formal Verification
// ============================================================================
//
// Pure predicates over crowdsale state, checked with debug assertions on
// every transition and reused by the Certora rules.
//
// 1. PHASE INVARIANTS
//    - The phase only moves forward, Finalized is terminal
//
// 2. PURCHASE INVARIANTS
//    - Minted tokens equal contribution times rate
//    - Early contributions respect the cap
//
// 3. FINALIZE INVARIANTS
//    - Liquidity share plus remainder equals the amount raised
//
// ============================================================================

use sale_types::{CrowdsaleConfig, SalePhase};

// ============================================================================
// PHASE INVARIANTS
// ============================================================================

/// Invariant: phase transitions move forward only
///
/// Property:
///   Paused -> Active -> Finalized, Paused -> Finalized, or no change
pub fn phase_transition_valid(from: SalePhase, to: SalePhase) -> bool {
    matches!(
        (from, to),
        (SalePhase::Paused, SalePhase::Active)
            | (SalePhase::Paused, SalePhase::Finalized)
            | (SalePhase::Active, SalePhase::Finalized)
    ) || from == to
}

// ============================================================================
// PURCHASE INVARIANTS
// ============================================================================

/// Invariant: a purchase mints exactly amount * buy_rate
pub fn tokens_match_rate(amount: i128, tokens: i128, buy_rate: i128) -> bool {
    amount.checked_mul(buy_rate) == Some(tokens)
}

/// Invariant: inside the early window no contribution exceeds the cap
pub fn within_early_cap(config: &CrowdsaleConfig, now: u64, amount: i128) -> bool {
    match &config.early_cap {
        Some(cap) if config.in_early_period(now) => amount <= cap.max_contribution,
        _ => true,
    }
}

// ============================================================================
// FINALIZE INVARIANTS
// ============================================================================

/// Invariant: splitting the raised funds loses nothing
///
/// Property:
///   liquidity + rest == raised && 0 <= liquidity <= raised
pub fn split_conserves_funds(raised: i128, liquidity: i128, rest: i128) -> bool {
    liquidity >= 0 && liquidity <= raised && liquidity.checked_add(rest) == Some(raised)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transition_valid() {
        assert!(phase_transition_valid(SalePhase::Paused, SalePhase::Active));
        assert!(phase_transition_valid(SalePhase::Active, SalePhase::Finalized));
        assert!(phase_transition_valid(SalePhase::Paused, SalePhase::Finalized));
        assert!(phase_transition_valid(SalePhase::Active, SalePhase::Active));
        assert!(!phase_transition_valid(SalePhase::Active, SalePhase::Paused));
        assert!(!phase_transition_valid(SalePhase::Finalized, SalePhase::Active));
    }

    #[test]
    fn test_tokens_match_rate() {
        assert!(tokens_match_rate(800_000, 20_000_000, 25));
        assert!(!tokens_match_rate(800_000, 20_000_001, 25));
        assert!(!tokens_match_rate(i128::MAX, 0, 2));
    }

    #[test]
    fn test_split_conserves_funds() {
        assert!(split_conserves_funds(150, 30, 120));
        assert!(split_conserves_funds(0, 0, 0));
        assert!(!split_conserves_funds(150, 30, 119));
        assert!(!split_conserves_funds(150, 151, -1));
    }
}
