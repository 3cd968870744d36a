#![allow(dead_code)]

use serde_json::{json, Value};
use stakeboard_core::chain::ChainConfig;
use stakeboard_core::lcd::types::BOND_STATUS_BONDED;
use stakeboard_core::lcd::{
    AccountInfo, BroadcastResult, Coin, DelegationResponse, LcdError, LcdResult, LcdSource,
    RewardsResponse, Validator,
};
use std::cell::RefCell;

pub const DELEGATOR: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";

const BECH32_CHARS: &[u8] = b"023456789acdefghjklmnpqrstuvwxyz";

/// Deterministic, well-formed cosmos operator address for index `i`.
pub fn valoper(i: usize) -> String {
    let hi = BECH32_CHARS[(i / BECH32_CHARS.len()) % BECH32_CHARS.len()] as char;
    let lo = BECH32_CHARS[i % BECH32_CHARS.len()] as char;
    format!("cosmosvaloper1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5hdmv{hi}{lo}")
}

/// In-memory LCD serving canned payloads.
pub struct FakeLcd {
    pub delegations: Vec<DelegationResponse>,
    pub rewards: RewardsResponse,
    pub validators: Vec<Validator>,
    pub balances: Vec<Coin>,
    pub account: Option<AccountInfo>,
    pub broadcast_result: BroadcastResult,
    pub offline: bool,
    pub broadcasts: RefCell<Vec<Value>>,
}

impl FakeLcd {
    /// One bonded validator per reward entry, each with a 1 ATOM delegation.
    ///
    /// `rewards_uatom` are decimal base-unit amounts as the LCD reports them.
    pub fn with_rewards(rewards_uatom: &[&str]) -> Self {
        let validators: Vec<Value> = (0..rewards_uatom.len())
            .map(|i| {
                json!({
                    "operator_address": valoper(i),
                    "jailed": false,
                    "status": BOND_STATUS_BONDED,
                    "tokens": "1000000000000",
                    "delegator_shares": "1000000000000.000000000000000000",
                    "description": { "moniker": format!("validator-{i}") },
                    "commission": { "commission_rates": { "rate": "0.050000000000000000" } }
                })
            })
            .collect();
        let delegations: Vec<Value> = (0..rewards_uatom.len())
            .map(|i| {
                json!({
                    "delegation": {
                        "delegator_address": DELEGATOR,
                        "validator_address": valoper(i),
                        "shares": "1000000.000000000000000000"
                    },
                    "balance": { "denom": "uatom", "amount": "1000000" }
                })
            })
            .collect();
        let rewards: Vec<Value> = rewards_uatom
            .iter()
            .enumerate()
            .map(|(i, amount)| {
                json!({
                    "validator_address": valoper(i),
                    "reward": [
                        { "denom": "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2", "amount": "999999.0" },
                        { "denom": "uatom", "amount": amount }
                    ]
                })
            })
            .collect();

        Self {
            delegations: serde_json::from_value(Value::Array(delegations)).unwrap(),
            rewards: serde_json::from_value(json!({ "rewards": rewards, "total": [] })).unwrap(),
            validators: serde_json::from_value(Value::Array(validators)).unwrap(),
            balances: serde_json::from_value(json!([
                { "denom": "uatom", "amount": "2500000" },
                { "denom": "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2", "amount": "7" }
            ]))
            .unwrap(),
            account: Some(AccountInfo {
                address: DELEGATOR.to_string(),
                account_number: "4242".to_string(),
                sequence: "17".to_string(),
            }),
            broadcast_result: BroadcastResult {
                txhash: "A1B2C3".to_string(),
                height: "0".to_string(),
                code: None,
                raw_log: None,
            },
            offline: false,
            broadcasts: RefCell::new(Vec::new()),
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::with_rewards(&[])
        }
    }

    fn guard(&self, chain: &ChainConfig) -> LcdResult<()> {
        if self.offline {
            return Err(LcdError::Status {
                url: chain.lcd_url.to_string(),
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl LcdSource for FakeLcd {
    fn fetch_delegations(
        &self,
        chain: &ChainConfig,
        _delegator: &str,
    ) -> LcdResult<Vec<DelegationResponse>> {
        self.guard(chain)?;
        Ok(self.delegations.clone())
    }

    fn fetch_rewards(&self, chain: &ChainConfig, _delegator: &str) -> LcdResult<RewardsResponse> {
        self.guard(chain)?;
        Ok(self.rewards.clone())
    }

    fn fetch_validators(&self, chain: &ChainConfig) -> LcdResult<Vec<Validator>> {
        self.guard(chain)?;
        Ok(self.validators.clone())
    }

    fn fetch_account(&self, chain: &ChainConfig, address: &str) -> LcdResult<AccountInfo> {
        self.guard(chain)?;
        self.account
            .clone()
            .ok_or_else(|| LcdError::MissingAccount(address.to_string()))
    }

    fn fetch_balances(&self, chain: &ChainConfig, _address: &str) -> LcdResult<Vec<Coin>> {
        self.guard(chain)?;
        Ok(self.balances.clone())
    }

    fn broadcast_tx(&self, chain: &ChainConfig, body: &Value) -> LcdResult<BroadcastResult> {
        self.guard(chain)?;
        self.broadcasts.borrow_mut().push(body.clone());
        Ok(self.broadcast_result.clone())
    }
}
