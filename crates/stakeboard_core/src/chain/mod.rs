//! Static chain catalogue.
//!
//! # Responsibility
//! - Own the closed set of supported chains and their network constants.
//! - Answer lookups by key or path without any I/O.
//!
//! # Invariants
//! - Exactly one `ChainConfig` exists per `ChainKey`, in `ChainKey::ALL` order.
//! - Fee strings in the table always parse as non-negative decimals.

pub mod address;
mod config;
pub mod key;
mod registry;

pub use address::{validate_account_address, validate_validator_address, AddressError};
pub use config::{
    ChainConfig, FeeTable, GasTable, TxKind, WalletConfig, WalletSupport,
    FALLBACK_VALIDATOR_ICON_URL,
};
pub use key::{parse_chain_key, ChainKey, ChainKeyError};

use registry::CHAINS;

/// Returns the constants for one chain.
pub fn chain_config(key: ChainKey) -> &'static ChainConfig {
    // CHAINS is declared in ChainKey::ALL order, so the discriminant indexes it.
    &CHAINS[key as usize]
}

/// Looks up a chain by its path key, e.g. `crypto-org`.
pub fn chain_by_path(path: &str) -> Result<&'static ChainConfig, ChainKeyError> {
    parse_chain_key(path).map(chain_config)
}

/// Returns all chain configurations in display order.
pub fn all_chains() -> &'static [ChainConfig] {
    &CHAINS
}

pub fn chain_names() -> Vec<&'static str> {
    CHAINS.iter().map(|chain| chain.name).collect()
}

pub fn chain_gecko_ids() -> Vec<&'static str> {
    CHAINS.iter().map(|chain| chain.coingecko_id).collect()
}
