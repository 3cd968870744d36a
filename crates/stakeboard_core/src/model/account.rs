//! Watched delegator account.
//!
//! # Responsibility
//! - Identify one (chain, address) pair the user follows on the dashboard.
//!
//! # Invariants
//! - `uuid` is stable and never nil.
//! - `address` is a valid account address for `chain`.
//! - `label`, when set, is non-blank and at most `MAX_LABEL_CHARS` long.

use crate::chain::{chain_config, validate_account_address, AddressError, ChainKey};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type AccountId = Uuid;

pub const MAX_LABEL_CHARS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    NilUuid,
    Address(AddressError),
    BlankLabel,
    LabelTooLong(usize),
}

impl Display for AccountValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "account uuid must not be nil"),
            Self::Address(err) => write!(f, "{err}"),
            Self::BlankLabel => write!(f, "account label must not be blank"),
            Self::LabelTooLong(len) => write!(
                f,
                "account label has {len} characters, limit is {MAX_LABEL_CHARS}"
            ),
        }
    }
}

impl Error for AccountValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Address(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AddressError> for AccountValidationError {
    fn from(value: AddressError) -> Self {
        Self::Address(value)
    }
}

/// A delegator address followed on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedAccount {
    pub uuid: AccountId,
    pub chain: ChainKey,
    pub address: String,
    pub label: Option<String>,
    /// Unix epoch milliseconds; assigned by storage.
    pub created_at: Option<i64>,
}

impl WatchedAccount {
    /// Creates a validated account with a fresh id.
    ///
    /// Address and label are trimmed; a blank label is treated as absent.
    pub fn new(
        chain: ChainKey,
        address: &str,
        label: Option<&str>,
    ) -> Result<Self, AccountValidationError> {
        let account = Self {
            uuid: Uuid::new_v4(),
            chain,
            address: address.trim().to_string(),
            label: label
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            created_at: None,
        };
        account.validate()?;
        Ok(account)
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.uuid.is_nil() {
            return Err(AccountValidationError::NilUuid);
        }
        validate_account_address(chain_config(self.chain), &self.address)?;
        if let Some(label) = &self.label {
            if label.trim().is_empty() {
                return Err(AccountValidationError::BlankLabel);
            }
            let len = label.chars().count();
            if len > MAX_LABEL_CHARS {
                return Err(AccountValidationError::LabelTooLong(len));
            }
        }
        Ok(())
    }

    /// Label if present, otherwise the address.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountValidationError, WatchedAccount, MAX_LABEL_CHARS};
    use crate::chain::ChainKey;
    use uuid::Uuid;

    const ADDRESS: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";

    #[test]
    fn new_trims_and_drops_blank_label() {
        let account = WatchedAccount::new(ChainKey::Cosmos, &format!(" {ADDRESS} "), Some("  ")).unwrap();
        assert_eq!(account.address, ADDRESS);
        assert_eq!(account.label, None);
        assert_eq!(account.display_name(), ADDRESS);
    }

    #[test]
    fn rejects_wrong_chain_and_long_label() {
        assert!(matches!(
            WatchedAccount::new(ChainKey::Akash, ADDRESS, None).unwrap_err(),
            AccountValidationError::Address(_)
        ));
        let long = "x".repeat(MAX_LABEL_CHARS + 1);
        assert_eq!(
            WatchedAccount::new(ChainKey::Cosmos, ADDRESS, Some(&long)).unwrap_err(),
            AccountValidationError::LabelTooLong(MAX_LABEL_CHARS + 1)
        );
    }

    #[test]
    fn validate_rejects_nil_uuid() {
        let mut account = WatchedAccount::new(ChainKey::Cosmos, ADDRESS, Some("main")).unwrap();
        account.uuid = Uuid::nil();
        assert_eq!(account.validate().unwrap_err(), AccountValidationError::NilUuid);
    }
}
