//! LCD data-source contract and blocking HTTP implementation.

use super::types::{
    AccountInfo, BalancesPage, BroadcastResult, Coin, DelegationResponse, DelegationsPage, Paged,
    RewardsResponse, Validator, ValidatorsPage,
};
use crate::chain::{ChainConfig, ChainKey};
use log::{debug, error, info};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Default per-request timeout.
pub const DEFAULT_LCD_TIMEOUT: Duration = Duration::from_secs(15);
const PAGE_LIMIT: &str = "200";
// Guards against gateways that keep returning the same next_key.
const MAX_PAGES: usize = 50;
const MAX_ERROR_BODY_CHARS: usize = 200;

pub type LcdResult<T> = Result<T, LcdError>;

/// LCD transport and decoding errors.
#[derive(Debug)]
pub enum LcdError {
    Http(reqwest::Error),
    Status {
        url: String,
        status: u16,
        body: String,
    },
    Decode {
        url: String,
        message: String,
    },
    MissingAccount(String),
    Unsupported(String),
}

impl Display for LcdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "lcd request failed: {err}"),
            Self::Status { url, status, body } => {
                write!(f, "lcd returned HTTP {status} for {url}: {body}")
            }
            Self::Decode { url, message } => {
                write!(f, "lcd response from {url} could not be decoded: {message}")
            }
            Self::MissingAccount(address) => write!(f, "account not found on chain: {address}"),
            Self::Unsupported(message) => write!(f, "unsupported lcd operation: {message}"),
        }
    }
}

impl Error for LcdError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LcdError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Read/broadcast surface the dashboard needs from a chain node.
pub trait LcdSource {
    fn fetch_delegations(
        &self,
        chain: &ChainConfig,
        delegator: &str,
    ) -> LcdResult<Vec<DelegationResponse>>;
    fn fetch_rewards(&self, chain: &ChainConfig, delegator: &str) -> LcdResult<RewardsResponse>;
    /// Returns every validator regardless of bond status.
    fn fetch_validators(&self, chain: &ChainConfig) -> LcdResult<Vec<Validator>>;
    fn fetch_account(&self, chain: &ChainConfig, address: &str) -> LcdResult<AccountInfo>;
    fn fetch_balances(&self, chain: &ChainConfig, address: &str) -> LcdResult<Vec<Coin>>;
    /// Posts a signed legacy amino `StdTx` broadcast body.
    fn broadcast_tx(&self, chain: &ChainConfig, body: &Value) -> LcdResult<BroadcastResult>;
}

impl<T: LcdSource + ?Sized> LcdSource for &T {
    fn fetch_delegations(
        &self,
        chain: &ChainConfig,
        delegator: &str,
    ) -> LcdResult<Vec<DelegationResponse>> {
        (**self).fetch_delegations(chain, delegator)
    }

    fn fetch_rewards(&self, chain: &ChainConfig, delegator: &str) -> LcdResult<RewardsResponse> {
        (**self).fetch_rewards(chain, delegator)
    }

    fn fetch_validators(&self, chain: &ChainConfig) -> LcdResult<Vec<Validator>> {
        (**self).fetch_validators(chain)
    }

    fn fetch_account(&self, chain: &ChainConfig, address: &str) -> LcdResult<AccountInfo> {
        (**self).fetch_account(chain, address)
    }

    fn fetch_balances(&self, chain: &ChainConfig, address: &str) -> LcdResult<Vec<Coin>> {
        (**self).fetch_balances(chain, address)
    }

    fn broadcast_tx(&self, chain: &ChainConfig, body: &Value) -> LcdResult<BroadcastResult> {
        (**self).broadcast_tx(chain, body)
    }
}

/// Blocking `reqwest` LCD client.
pub struct HttpLcdClient {
    client: Client,
    overrides: BTreeMap<ChainKey, String>,
}

impl HttpLcdClient {
    pub fn new(timeout: Duration) -> LcdResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;
        Ok(Self {
            client,
            overrides: BTreeMap::new(),
        })
    }

    /// Replaces the table endpoint for selected chains.
    pub fn with_overrides(mut self, overrides: BTreeMap<ChainKey, String>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Effective base URL for `chain`, without a trailing slash.
    pub fn base_url(&self, chain: &ChainConfig) -> String {
        self.overrides
            .get(&chain.key)
            .map(String::as_str)
            .unwrap_or(chain.lcd_url)
            .trim_end_matches('/')
            .to_string()
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> LcdResult<T> {
        let started_at = Instant::now();
        debug!("event=lcd_request module=lcd status=start method=GET url={url}");

        let response = self.client.get(url).query(query).send().map_err(|err| {
            error!(
                "event=lcd_request module=lcd status=error method=GET url={url} duration_ms={} error_code=transport",
                started_at.elapsed().as_millis()
            );
            LcdError::from(err)
        })?;
        let decoded = decode_response(url, response);
        log_outcome("GET", url, started_at, decoded.as_ref().err());
        decoded
    }

    fn get_all_pages<P>(&self, url: &str) -> LcdResult<Vec<P::Item>>
    where
        P: Paged + DeserializeOwned,
    {
        collect_pages(url, |key: Option<&str>| {
            let mut query = vec![("pagination.limit", PAGE_LIMIT)];
            if let Some(next) = key {
                query.push(("pagination.key", next));
            }
            self.get_json::<P>(url, &query)
        })
    }
}

/// Follows `next_key` until it is absent, empty or repeats the last key.
fn collect_pages<P, F>(url: &str, mut fetch_page: F) -> LcdResult<Vec<P::Item>>
where
    P: Paged,
    F: FnMut(Option<&str>) -> LcdResult<P>,
{
    let mut items = Vec::new();
    let mut key: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let page = fetch_page(key.as_deref())?;
        let (mut page_items, next_key) = page.into_parts();
        items.append(&mut page_items);

        match next_key {
            Some(next) if !next.is_empty() && key.as_deref() != Some(next.as_str()) => {
                key = Some(next)
            }
            _ => return Ok(items),
        }
    }

    info!("event=lcd_paginate module=lcd status=truncated url={url} pages={MAX_PAGES}");
    Ok(items)
}

impl LcdSource for HttpLcdClient {
    fn fetch_delegations(
        &self,
        chain: &ChainConfig,
        delegator: &str,
    ) -> LcdResult<Vec<DelegationResponse>> {
        let url = format!(
            "{}/cosmos/staking/v1beta1/delegations/{delegator}",
            self.base_url(chain)
        );
        self.get_all_pages::<DelegationsPage>(&url)
    }

    fn fetch_rewards(&self, chain: &ChainConfig, delegator: &str) -> LcdResult<RewardsResponse> {
        let url = format!(
            "{}/cosmos/distribution/v1beta1/delegators/{delegator}/rewards",
            self.base_url(chain)
        );
        self.get_json(&url, &[])
    }

    fn fetch_validators(&self, chain: &ChainConfig) -> LcdResult<Vec<Validator>> {
        let url = format!("{}/cosmos/staking/v1beta1/validators", self.base_url(chain));
        self.get_all_pages::<ValidatorsPage>(&url)
    }

    fn fetch_account(&self, chain: &ChainConfig, address: &str) -> LcdResult<AccountInfo> {
        let url = format!(
            "{}/cosmos/auth/v1beta1/accounts/{address}",
            self.base_url(chain)
        );
        let value: Value = self.get_json(&url, &[])?;
        AccountInfo::from_account_value(&value)
            .ok_or_else(|| LcdError::MissingAccount(address.to_string()))
    }

    fn fetch_balances(&self, chain: &ChainConfig, address: &str) -> LcdResult<Vec<Coin>> {
        let url = format!(
            "{}/cosmos/bank/v1beta1/balances/{address}",
            self.base_url(chain)
        );
        self.get_all_pages::<BalancesPage>(&url)
    }

    fn broadcast_tx(&self, chain: &ChainConfig, body: &Value) -> LcdResult<BroadcastResult> {
        if chain.wallet.is_proto {
            return Err(LcdError::Unsupported(format!(
                "{} only accepts protobuf transactions",
                chain.chain_id
            )));
        }

        let url = format!("{}/txs", self.base_url(chain));
        let started_at = Instant::now();
        info!(
            "event=lcd_broadcast module=lcd status=start chain={}",
            chain.path()
        );
        let response = self.client.post(&url).json(body).send()?;
        let decoded = decode_response(&url, response);
        log_outcome("POST", &url, started_at, decoded.as_ref().err());
        decoded
    }
}

fn decode_response<T: DeserializeOwned>(
    url: &str,
    response: reqwest::blocking::Response,
) -> LcdResult<T> {
    let status = response.status().as_u16();
    let body = response.text()?;
    decode_body(url, status, &body)
}

/// Maps a non-2xx status to `Status` and a malformed body to `Decode`.
fn decode_body<T: DeserializeOwned>(url: &str, status: u16, body: &str) -> LcdResult<T> {
    if !(200..300).contains(&status) {
        return Err(LcdError::Status {
            url: url.to_string(),
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }
    serde_json::from_str(body).map_err(|err| LcdError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })
}

fn log_outcome(method: &str, url: &str, started_at: Instant, err: Option<&LcdError>) {
    match err {
        None => debug!(
            "event=lcd_request module=lcd status=ok method={method} url={url} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Some(err) => error!(
            "event=lcd_request module=lcd status=error method={method} url={url} duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        collect_pages, decode_body, HttpLcdClient, LcdError, LcdResult, LcdSource,
        DEFAULT_LCD_TIMEOUT, MAX_ERROR_BODY_CHARS,
    };
    use crate::chain::{chain_config, ChainKey};
    use crate::lcd::types::{Coin, RewardsResponse, ValidatorsPage};
    use std::collections::BTreeMap;

    const URL: &str = "http://lcd.test/cosmos/staking/v1beta1/validators";

    fn validators_page(operators: &[&str], next_key: Option<&str>) -> ValidatorsPage {
        let validators: Vec<serde_json::Value> = operators
            .iter()
            .map(|operator| {
                serde_json::json!({
                    "operator_address": operator,
                    "jailed": false,
                    "status": "BOND_STATUS_BONDED",
                    "tokens": "1",
                    "description": { "moniker": operator },
                    "commission": { "commission_rates": { "rate": "0.1" } }
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "validators": validators,
            "pagination": { "next_key": next_key, "total": "0" }
        }))
        .unwrap()
    }

    fn operators(page: Vec<crate::lcd::Validator>) -> Vec<String> {
        page.into_iter()
            .map(|validator| validator.operator_address)
            .collect()
    }

    #[test]
    fn pagination_follows_next_key_until_absent() {
        let mut requested: Vec<Option<String>> = Vec::new();
        let items = collect_pages(URL, |key: Option<&str>| -> LcdResult<ValidatorsPage> {
            requested.push(key.map(str::to_string));
            Ok(match key {
                None => validators_page(&["a", "b"], Some("cGFnZTI=")),
                Some(_) => validators_page(&["c"], None),
            })
        })
        .unwrap();

        assert_eq!(operators(items), vec!["a", "b", "c"]);
        assert_eq!(requested, vec![None, Some("cGFnZTI=".to_string())]);
    }

    #[test]
    fn pagination_stops_when_next_key_repeats_or_is_empty() {
        let mut calls = 0;
        let items = collect_pages(URL, |_key: Option<&str>| -> LcdResult<ValidatorsPage> {
            calls += 1;
            Ok(validators_page(&["x"], Some("c3R1Y2s=")))
        })
        .unwrap();
        assert_eq!(calls, 2);
        assert_eq!(operators(items), vec!["x", "x"]);

        let mut calls = 0;
        collect_pages(URL, |_key: Option<&str>| -> LcdResult<ValidatorsPage> {
            calls += 1;
            Ok(validators_page(&["y"], Some("")))
        })
        .unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn pagination_propagates_page_errors() {
        let err = collect_pages(URL, |key: Option<&str>| -> LcdResult<ValidatorsPage> {
            match key {
                None => Ok(validators_page(&["a"], Some("bmV4dA=="))),
                Some(_) => decode_body(URL, 502, "bad gateway"),
            }
        })
        .unwrap_err();
        assert!(matches!(err, LcdError::Status { status: 502, .. }));
    }

    #[test]
    fn error_status_keeps_a_truncated_body() {
        let body = "e".repeat(MAX_ERROR_BODY_CHARS + 50);
        let err = decode_body::<RewardsResponse>(URL, 500, &body).unwrap_err();
        match err {
            LcdError::Status { url, status, body } => {
                assert_eq!(url, URL);
                assert_eq!(status, 500);
                assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_body::<Vec<Coin>>(URL, 200, "{\"balances\": [").unwrap_err();
        assert!(matches!(err, LcdError::Decode { ref url, .. } if url == URL));

        let coins: Vec<Coin> =
            decode_body(URL, 200, r#"[{"denom":"uatom","amount":"5"}]"#).unwrap();
        assert_eq!(coins[0].amount, "5");
    }

    #[test]
    fn base_url_prefers_override_and_trims_slash() {
        let mut overrides = BTreeMap::new();
        overrides.insert(ChainKey::Juno, "http://localhost:1317/".to_string());
        let client = HttpLcdClient::new(DEFAULT_LCD_TIMEOUT)
            .unwrap()
            .with_overrides(overrides);

        assert_eq!(
            client.base_url(chain_config(ChainKey::Juno)),
            "http://localhost:1317"
        );
        assert_eq!(
            client.base_url(chain_config(ChainKey::Cosmos)),
            "https://lcd-cosmos.cosmostation.io"
        );
    }

    #[test]
    fn broadcast_is_refused_for_proto_chains() {
        let client = HttpLcdClient::new(DEFAULT_LCD_TIMEOUT).unwrap();
        let err = client
            .broadcast_tx(chain_config(ChainKey::Iris), &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, LcdError::Unsupported(_)));
    }
}
