//! Bech32 address shape checks per chain.
//!
//! Only the human-readable part and the data charset/length are checked; the
//! checksum is left to the node, which rejects bad addresses on broadcast.

use super::config::ChainConfig;
use super::key::ChainKey;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// 20-byte accounts encode to 38 data chars, 32-byte module/ICA accounts to 58.
static BECH32_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z]+)1([02-9ac-hj-np-z]{38,58})$").expect("valid bech32 regex")
});

/// Address validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    Empty,
    Malformed(String),
    WrongPrefix {
        address: String,
        expected: String,
        actual: String,
    },
}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "address must not be empty"),
            Self::Malformed(value) => write!(f, "address is not bech32: `{value}`"),
            Self::WrongPrefix {
                address,
                expected,
                actual,
            } => write!(
                f,
                "address `{address}` has prefix `{actual}`, expected `{expected}`"
            ),
        }
    }
}

impl Error for AddressError {}

/// Returns the bech32 prefix of validator operator addresses.
pub fn validator_prefix(chain: &ChainConfig) -> String {
    match chain.key {
        ChainKey::Iris => "iva".to_string(),
        ChainKey::CryptoOrg => "crocncl".to_string(),
        _ => format!("{}valoper", chain.wallet.prefix),
    }
}

/// Validates a delegator/account address for `chain`.
pub fn validate_account_address(chain: &ChainConfig, address: &str) -> Result<String, AddressError> {
    validate_with_prefix(address, chain.wallet.prefix)
}

/// Validates a validator operator address for `chain`.
pub fn validate_validator_address(
    chain: &ChainConfig,
    address: &str,
) -> Result<String, AddressError> {
    validate_with_prefix(address, &validator_prefix(chain))
}

fn validate_with_prefix(address: &str, expected: &str) -> Result<String, AddressError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(AddressError::Empty);
    }

    let caps = BECH32_RE
        .captures(trimmed)
        .ok_or_else(|| AddressError::Malformed(trimmed.to_string()))?;
    let actual = caps.get(1).map_or("", |m| m.as_str());
    if actual != expected {
        return Err(AddressError::WrongPrefix {
            address: trimmed.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{validate_account_address, validate_validator_address, AddressError};
    use crate::chain::{chain_config, ChainKey};

    const COSMOS_ACCOUNT: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
    const COSMOS_VALOPER: &str = "cosmosvaloper1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5hdmv4a";

    #[test]
    fn accepts_matching_prefixes() {
        let cosmos = chain_config(ChainKey::Cosmos);
        assert_eq!(
            validate_account_address(cosmos, &format!(" {COSMOS_ACCOUNT} ")).unwrap(),
            COSMOS_ACCOUNT
        );
        assert_eq!(
            validate_validator_address(cosmos, COSMOS_VALOPER).unwrap(),
            COSMOS_VALOPER
        );
    }

    #[test]
    fn rejects_address_from_another_chain() {
        let juno = chain_config(ChainKey::Juno);
        let err = validate_account_address(juno, COSMOS_ACCOUNT).unwrap_err();
        assert!(matches!(err, AddressError::WrongPrefix { ref expected, .. } if expected == "juno"));
    }

    #[test]
    fn rejects_account_address_where_operator_expected() {
        let cosmos = chain_config(ChainKey::Cosmos);
        assert!(validate_validator_address(cosmos, COSMOS_ACCOUNT).is_err());
    }

    #[test]
    fn rejects_non_bech32_input() {
        let cosmos = chain_config(ChainKey::Cosmos);
        assert_eq!(
            validate_account_address(cosmos, "").unwrap_err(),
            AddressError::Empty
        );
        assert!(matches!(
            validate_account_address(cosmos, "cosmos1BIO").unwrap_err(),
            AddressError::Malformed(_)
        ));
    }

    #[test]
    fn uses_irregular_operator_prefixes() {
        let iris = chain_config(ChainKey::Iris);
        let cro = chain_config(ChainKey::CryptoOrg);
        assert!(validate_validator_address(iris, "iva1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu").is_ok());
        assert!(
            validate_validator_address(cro, "crocncl1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu").is_ok()
        );
    }
}
