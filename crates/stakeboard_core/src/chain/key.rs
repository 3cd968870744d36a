//! Supported chain identifiers.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Closed set of chains the dashboard knows how to talk to.
///
/// The string form doubles as the URL path segment and the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainKey {
    Cosmos,
    Iris,
    Kava,
    Band,
    Akash,
    Certik,
    Sentinel,
    Persistence,
    FetchAi,
    Sifchain,
    CryptoOrg,
    Kichain,
    Starname,
    Medibloc,
    Emoney,
    Rizon,
    Juno,
    Bitcanna,
    Regen,
    Comdex,
}

impl ChainKey {
    /// Every supported chain in display order.
    pub const ALL: [ChainKey; 20] = [
        ChainKey::Cosmos,
        ChainKey::Iris,
        ChainKey::Kava,
        ChainKey::Band,
        ChainKey::Akash,
        ChainKey::Certik,
        ChainKey::Sentinel,
        ChainKey::Persistence,
        ChainKey::FetchAi,
        ChainKey::Sifchain,
        ChainKey::CryptoOrg,
        ChainKey::Kichain,
        ChainKey::Starname,
        ChainKey::Medibloc,
        ChainKey::Emoney,
        ChainKey::Rizon,
        ChainKey::Juno,
        ChainKey::Bitcanna,
        ChainKey::Regen,
        ChainKey::Comdex,
    ];

    /// Stable path key, e.g. `fetch-ai`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cosmos => CHAIN_COSMOS,
            Self::Iris => CHAIN_IRIS,
            Self::Kava => CHAIN_KAVA,
            Self::Band => CHAIN_BAND,
            Self::Akash => CHAIN_AKASH,
            Self::Certik => CHAIN_CERTIK,
            Self::Sentinel => CHAIN_SENTINEL,
            Self::Persistence => CHAIN_PERSISTENCE,
            Self::FetchAi => CHAIN_FETCH_AI,
            Self::Sifchain => CHAIN_SIFCHAIN,
            Self::CryptoOrg => CHAIN_CRYPTO_ORG,
            Self::Kichain => CHAIN_KICHAIN,
            Self::Starname => CHAIN_STARNAME,
            Self::Medibloc => CHAIN_MEDIBLOC,
            Self::Emoney => CHAIN_EMONEY,
            Self::Rizon => CHAIN_RIZON,
            Self::Juno => CHAIN_JUNO,
            Self::Bitcanna => CHAIN_BITCANNA,
            Self::Regen => CHAIN_REGEN,
            Self::Comdex => CHAIN_COMDEX,
        }
    }

    /// Environment-variable friendly form, e.g. `FETCH_AI`.
    pub fn env_suffix(self) -> String {
        self.as_str().to_ascii_uppercase().replace('-', "_")
    }
}

impl Display for ChainKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const CHAIN_COSMOS: &str = "cosmos";
pub const CHAIN_IRIS: &str = "iris";
pub const CHAIN_KAVA: &str = "kava";
pub const CHAIN_BAND: &str = "band";
pub const CHAIN_AKASH: &str = "akash";
pub const CHAIN_CERTIK: &str = "certik";
pub const CHAIN_SENTINEL: &str = "sentinel";
pub const CHAIN_PERSISTENCE: &str = "persistence";
pub const CHAIN_FETCH_AI: &str = "fetch-ai";
pub const CHAIN_SIFCHAIN: &str = "sifchain";
pub const CHAIN_CRYPTO_ORG: &str = "crypto-org";
pub const CHAIN_KICHAIN: &str = "kichain";
pub const CHAIN_STARNAME: &str = "starname";
pub const CHAIN_MEDIBLOC: &str = "medibloc";
pub const CHAIN_EMONEY: &str = "emoney";
pub const CHAIN_RIZON: &str = "rizon";
pub const CHAIN_JUNO: &str = "juno";
pub const CHAIN_BITCANNA: &str = "bitcanna";
pub const CHAIN_REGEN: &str = "regen";
pub const CHAIN_COMDEX: &str = "comdex";

/// Parses one chain key from its path form.
///
/// Only the exact lowercase path is accepted; surrounding whitespace is
/// ignored.
pub fn parse_chain_key(value: &str) -> Result<ChainKey, ChainKeyError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ChainKeyError::Empty);
    }

    ChainKey::ALL
        .into_iter()
        .find(|key| key.as_str() == normalized)
        .ok_or_else(|| ChainKeyError::Unsupported(normalized.to_string()))
}

/// Chain key parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainKeyError {
    Empty,
    Unsupported(String),
}

impl Display for ChainKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "chain key must not be empty"),
            Self::Unsupported(value) => write!(f, "chain is unsupported: {value}"),
        }
    }
}

impl Error for ChainKeyError {}
