// ============================================================================
// CERTORA SUNBEAM FORMAL VERIFICATION SPECIFICATIONS
// ============================================================================
//
// Rules for the crowdsale lifecycle.
//
// - phase_specs.rs    : unpause / finalize transitions
// - purchase_specs.rs : purchase gating
//
// USAGE:
// - Unit tests: cargo test -p crowdsale
// - Certora build: cargo build --features certora -p crowdsale
// - Verification: certoraSorobanProver crowdsale.conf
//
// ============================================================================

pub mod phase_specs;
pub mod purchase_specs;
