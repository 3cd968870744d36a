//! Wire shapes of the Cosmos SDK `v1beta1` REST gateway.
//!
//! Amounts stay strings here; arithmetic happens in `amount`/`staking` where
//! the chain's decimal precision is known.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BOND_STATUS_BONDED: &str = "BOND_STATUS_BONDED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub next_key: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator_address: String,
    pub validator_address: String,
    #[serde(default)]
    pub shares: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationResponse {
    pub delegation: Delegation,
    pub balance: Coin,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationsPage {
    #[serde(default)]
    pub delegation_responses: Vec<DelegationResponse>,
    #[serde(default)]
    pub pagination: Option<PageResponse>,
}

/// Outstanding rewards owed by one validator to the delegator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorReward {
    pub validator_address: String,
    /// DecCoins; amounts carry 18 fractional digits.
    #[serde(default)]
    pub reward: Vec<Coin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsResponse {
    #[serde(default)]
    pub rewards: Vec<DelegatorReward>,
    #[serde(default)]
    pub total: Vec<Coin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorDescription {
    #[serde(default)]
    pub moniker: String,
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub rate: String,
    #[serde(default)]
    pub max_rate: String,
    #[serde(default)]
    pub max_change_rate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub commission_rates: CommissionRates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub operator_address: String,
    #[serde(default)]
    pub jailed: bool,
    #[serde(default)]
    pub status: String,
    pub tokens: String,
    #[serde(default)]
    pub delegator_shares: String,
    #[serde(default)]
    pub description: ValidatorDescription,
    #[serde(default)]
    pub commission: Commission,
}

impl Validator {
    /// Bonded and not jailed: counts toward voting power.
    pub fn is_active(&self) -> bool {
        self.status == BOND_STATUS_BONDED && !self.jailed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorsPage {
    #[serde(default)]
    pub validators: Vec<Validator>,
    #[serde(default)]
    pub pagination: Option<PageResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancesPage {
    #[serde(default)]
    pub balances: Vec<Coin>,
    #[serde(default)]
    pub pagination: Option<PageResponse>,
}

/// Signing metadata of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub address: String,
    pub account_number: String,
    pub sequence: String,
}

impl AccountInfo {
    /// Extracts signing metadata from an `/cosmos/auth/v1beta1/accounts`
    /// payload.
    ///
    /// Vesting and module accounts nest the base account one or two levels
    /// deep, so the first object carrying `account_number` wins.
    pub fn from_account_value(value: &Value) -> Option<Self> {
        let account = value.get("account").unwrap_or(value);
        find_base_account(account, 0)
    }
}

fn find_base_account(value: &Value, depth: usize) -> Option<AccountInfo> {
    if depth > 3 {
        return None;
    }
    let object = value.as_object()?;
    if let Some(number) = object.get("account_number") {
        return Some(AccountInfo {
            address: object
                .get("address")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            account_number: json_number_text(number),
            sequence: object
                .get("sequence")
                .map(json_number_text)
                .unwrap_or_else(|| "0".to_string()),
        });
    }
    object
        .values()
        .filter(|child| child.is_object())
        .find_map(|child| find_base_account(child, depth + 1))
}

fn json_number_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => "0".to_string(),
    }
}

/// Result of a legacy `/txs` broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastResult {
    #[serde(default)]
    pub txhash: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub raw_log: Option<String>,
}

impl BroadcastResult {
    /// Zero or missing `code` means the node accepted the transaction.
    pub fn is_accepted(&self) -> bool {
        self.code.unwrap_or(0) == 0
    }
}

/// Pages whose items are collected by following `pagination.next_key`.
pub trait Paged {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

fn next_key(pagination: Option<PageResponse>) -> Option<String> {
    pagination
        .and_then(|page| page.next_key)
        .filter(|key| !key.is_empty())
}

impl Paged for DelegationsPage {
    type Item = DelegationResponse;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>) {
        (self.delegation_responses, next_key(self.pagination))
    }
}

impl Paged for ValidatorsPage {
    type Item = Validator;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>) {
        (self.validators, next_key(self.pagination))
    }
}

impl Paged for BalancesPage {
    type Item = Coin;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>) {
        (self.balances, next_key(self.pagination))
    }
}
