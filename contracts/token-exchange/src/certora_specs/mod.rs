// ============================================================================
// CERTORA SUNBEAM FORMAL VERIFICATION SPECIFICATIONS
// ============================================================================
//
// Rules for the constant-product exchange.
//
// - math_specs.rs      : pricing and deposit quotes
// - liquidity_specs.rs : add/remove liquidity state changes
// - token.rs           : token interface mock
//
// USAGE:
// - Unit tests: cargo test -p token-exchange
// - Certora build: cargo build --features certora -p token-exchange
// - Verification: certoraSorobanProver token_exchange.conf
//
// ============================================================================

pub mod liquidity_specs;
pub mod math_specs;
pub mod token;
