//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose chain catalogue, watched accounts, dashboard loading, the
//!   validator picker and transaction preparation to Dart via FRB.
//! - Flatten core types into plain envelopes the UI can render directly.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every fallible call returns an envelope with `ok` and a message.
//! - Network-bound calls are not `sync`; FRB runs them off the UI thread.

use rusqlite::Connection;
use stakeboard_core::chain::{parse_chain_key, validate_account_address};
use stakeboard_core::config::DEFAULT_DB_FILE;
use stakeboard_core::tx::build_std_tx;
use stakeboard_core::{
    all_chains, chain_config, core_version as core_version_inner,
    init_logging as init_logging_inner, open_db, ping as ping_inner, AccountService, AminoSignDoc,
    ChainKey, ClaimAllOutcome, DashboardService, DashboardView, FetchMode, HttpLcdClient,
    MsgBuilder, SqliteAccountRepository, SqliteSnapshotRepository, StakeboardConfig, StakingMsg,
    TxService, TxSignature, WatchedAccount, WithdrawPlan,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

static FFI_CONFIG: OnceLock<StakeboardConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Static description of one supported chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainItem {
    /// Path key, e.g. `crypto-org`.
    pub key: String,
    pub name: String,
    pub chain_id: String,
    pub symbol: String,
    pub denom: String,
    pub decimal: u32,
    pub img_url: String,
    pub coingecko_id: String,
    /// Chain only accepts protobuf transactions; legacy broadcast is refused.
    pub is_proto: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountItem {
    pub account_id: String,
    pub chain: String,
    pub address: String,
    pub label: Option<String>,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountResponse {
    pub ok: bool,
    pub account: Option<AccountItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountListResponse {
    pub ok: bool,
    pub items: Vec<AccountItem>,
    pub message: String,
}

/// One row of the "my delegations" table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationRowItem {
    pub operator_address: String,
    pub moniker: String,
    pub icon_url: String,
    pub explorer_url: String,
    pub total_tokens: String,
    pub voting_power_percent: String,
    pub commission_percent: String,
    pub delegated: String,
    pub reward: String,
    pub jailed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub message: String,
    pub symbol: String,
    pub rows: Vec<DelegationRowItem>,
    pub available_balance: String,
    pub total_delegated: String,
    pub total_reward: String,
    /// `ready|no_rewards|reward_below_fee`; empty on failure.
    pub claim_all_status: String,
    /// Validators a claim-all would withdraw from, largest reward first.
    pub claim_all_validators: Vec<String>,
    pub claim_all_amount: Option<String>,
    pub cached: bool,
    /// Epoch milliseconds of the data shown; 0 on failure.
    pub fetched_at: i64,
}

impl DashboardResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            symbol: String::new(),
            rows: Vec::new(),
            available_balance: String::new(),
            total_delegated: String::new(),
            total_reward: String::new(),
            claim_all_status: String::new(),
            claim_all_validators: Vec::new(),
            claim_all_amount: None,
            cached: false,
            fetched_at: 0,
        }
    }
}

/// Sign document ready to hand to a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignDocResponse {
    pub ok: bool,
    /// Canonical amino JSON (sorted keys); empty on failure.
    pub sign_doc_json: String,
    /// Display-unit reward amount for withdrawals.
    pub amount: Option<String>,
    pub message: String,
}

impl SignDocResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            sign_doc_json: String::new(),
            amount: None,
            message: message.into(),
        }
    }
}

/// One redelegation target candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorItem {
    pub operator_address: String,
    pub moniker: String,
    pub icon_url: String,
    pub explorer_url: String,
    pub total_tokens: String,
    pub voting_power_percent: String,
    pub commission_percent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorListResponse {
    pub ok: bool,
    /// Largest voting power first.
    pub items: Vec<ValidatorItem>,
    pub cached: bool,
    /// Epoch milliseconds of the validator set shown; 0 on failure.
    pub fetched_at: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastResponse {
    pub ok: bool,
    pub txhash: Option<String>,
    pub message: String,
}

/// Lists all supported chains in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn chain_list() -> Vec<ChainItem> {
    all_chains()
        .iter()
        .map(|chain| ChainItem {
            key: chain.path().to_string(),
            name: chain.name.to_string(),
            chain_id: chain.chain_id.to_string(),
            symbol: chain.symbol_name.to_string(),
            denom: chain.denom.to_string(),
            decimal: chain.decimal,
            img_url: chain.img_url.to_string(),
            coingecko_id: chain.coingecko_id.to_string(),
            is_proto: chain.wallet.is_proto,
        })
        .collect()
}

/// Checks an account address against a chain's prefix.
///
/// Returns an empty string when valid, the reason otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn validate_address(chain: String, address: String) -> String {
    match parse_chain_key(&chain) {
        Ok(key) => match validate_account_address(chain_config(key), &address) {
            Ok(_) => String::new(),
            Err(err) => err.to_string(),
        },
        Err(err) => err.to_string(),
    }
}

/// Starts watching an address.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn account_add(chain: String, address: String, label: Option<String>) -> AccountResponse {
    let result = parse_chain_key(&chain)
        .map_err(|err| err.to_string())
        .and_then(|key| {
            with_account_service(|service| {
                service
                    .add_account(key, &address, label.as_deref())
                    .map_err(|err| err.to_string())
            })
        });
    match result {
        Ok(account) => AccountResponse {
            ok: true,
            account: Some(to_account_item(account)),
            message: "Account added.".to_string(),
        },
        Err(err) => AccountResponse {
            ok: false,
            account: None,
            message: format!("account_add failed: {err}"),
        },
    }
}

/// Lists watched accounts, optionally for one chain.
#[flutter_rust_bridge::frb(sync)]
pub fn account_list(chain: Option<String>) -> AccountListResponse {
    let filter = match chain.as_deref().map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => match parse_chain_key(value) {
            Ok(key) => Some(key),
            Err(err) => {
                return AccountListResponse {
                    ok: false,
                    items: Vec::new(),
                    message: format!("account_list failed: {err}"),
                }
            }
        },
        None => None,
    };

    match with_account_service(|service| {
        service.list_accounts(filter).map_err(|err| err.to_string())
    }) {
        Ok(accounts) => AccountListResponse {
            ok: true,
            message: format!("{} account(s).", accounts.len()),
            items: accounts.into_iter().map(to_account_item).collect(),
        },
        Err(err) => AccountListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("account_list failed: {err}"),
        },
    }
}

/// Reads one watched account by id.
#[flutter_rust_bridge::frb(sync)]
pub fn account_get(account_id: String) -> AccountResponse {
    let result = parse_account_id(&account_id).and_then(|id| {
        with_account_service(|service| service.get_account(id).map_err(|err| err.to_string()))
    });
    match result {
        Ok(Some(account)) => AccountResponse {
            ok: true,
            account: Some(to_account_item(account)),
            message: "Account loaded.".to_string(),
        },
        Ok(None) => AccountResponse {
            ok: false,
            account: None,
            message: format!("account_get failed: account not found: {}", account_id.trim()),
        },
        Err(err) => AccountResponse {
            ok: false,
            account: None,
            message: format!("account_get failed: {err}"),
        },
    }
}

/// Sets or clears the label of a watched account.
///
/// `None` or a blank label clears it. Returns the updated account.
#[flutter_rust_bridge::frb(sync)]
pub fn account_rename(account_id: String, label: Option<String>) -> AccountResponse {
    let result = parse_account_id(&account_id).and_then(|id| {
        with_account_service(|service| {
            service
                .rename_account(id, label.as_deref())
                .and_then(|()| service.get_account(id))
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("account not found: {id}"))
        })
    });
    match result {
        Ok(account) => AccountResponse {
            ok: true,
            account: Some(to_account_item(account)),
            message: "Account renamed.".to_string(),
        },
        Err(err) => AccountResponse {
            ok: false,
            account: None,
            message: format!("account_rename failed: {err}"),
        },
    }
}

/// Stops watching an account and drops its cached data.
#[flutter_rust_bridge::frb(sync)]
pub fn account_remove(account_id: String) -> AccountResponse {
    let result = parse_account_id(&account_id).and_then(|id| {
        with_account_service(|service| service.remove_account(id).map_err(|err| err.to_string()))
    });
    match result {
        Ok(account) => AccountResponse {
            ok: true,
            account: Some(to_account_item(account)),
            message: "Account removed.".to_string(),
        },
        Err(err) => AccountResponse {
            ok: false,
            account: None,
            message: format!("account_remove failed: {err}"),
        },
    }
}

/// Loads the dashboard of one account.
///
/// `offline = true` reads cached data only; otherwise the LCD is queried
/// and cached data is used when it fails.
pub fn dashboard_load(chain: String, address: String, offline: bool) -> DashboardResponse {
    let mode = if offline {
        FetchMode::CacheOnly
    } else {
        FetchMode::NetworkWithCacheFallback
    };
    match load_view(&chain, &address, mode) {
        Ok(view) => to_dashboard_response(view),
        Err(err) => DashboardResponse::failure(format!("dashboard_load failed: {err}")),
    }
}

/// Lists active validators of `chain` for the redelegation picker.
///
/// `exclude` drops the source validator. `offline = true` reads the cached
/// validator set only.
pub fn validator_list(
    chain: String,
    exclude: Option<String>,
    offline: bool,
) -> ValidatorListResponse {
    let mode = if offline {
        FetchMode::CacheOnly
    } else {
        FetchMode::NetworkWithCacheFallback
    };
    let exclude = exclude
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let result = parse_chain_key(&chain)
        .map_err(|err| err.to_string())
        .and_then(|key| {
            let conn = open_store()?;
            let service =
                DashboardService::new(lcd_client()?, SqliteSnapshotRepository::new(&conn));
            service
                .validator_list(key, exclude, mode)
                .map_err(|err| err.to_string())
        });

    match result {
        Ok(list) => ValidatorListResponse {
            ok: true,
            message: format!("{} validator(s).", list.validators.len()),
            cached: list.source.is_cached(),
            fetched_at: list.source.fetched_at(),
            items: list
                .validators
                .into_iter()
                .map(|validator| ValidatorItem {
                    operator_address: validator.operator_address,
                    moniker: validator.moniker,
                    icon_url: validator.icon_url,
                    explorer_url: validator.explorer_url,
                    total_tokens: validator.total_tokens,
                    voting_power_percent: validator.voting_power_percent,
                    commission_percent: validator.commission_percent,
                })
                .collect(),
        },
        Err(err) => ValidatorListResponse {
            ok: false,
            items: Vec::new(),
            cached: false,
            fetched_at: 0,
            message: format!("validator_list failed: {err}"),
        },
    }
}

/// Prepares a claim-all withdrawal over the largest rewards.
pub fn tx_prepare_claim_all(chain: String, address: String, memo: String) -> SignDocResponse {
    let result = load_view(&chain, &address, FetchMode::Network).and_then(|view| {
        match view.claim_all {
            ClaimAllOutcome::Ready { plan } => prepare_withdraw(view.chain, &view.address, &plan, &memo),
            ClaimAllOutcome::NoRewards => Err("there are no rewards to claim".to_string()),
            ClaimAllOutcome::RewardBelowFee { reward, fee } => Err(format!(
                "reward to claim ({reward}) is lower than the transaction fee ({fee})"
            )),
        }
    });
    result.unwrap_or_else(|err| SignDocResponse::failure(format!("tx_prepare_claim_all failed: {err}")))
}

/// Prepares a withdrawal from a single validator.
pub fn tx_prepare_claim_one(
    chain: String,
    address: String,
    validator: String,
    memo: String,
) -> SignDocResponse {
    let result = load_view(&chain, &address, FetchMode::Network).and_then(|view| {
        let plan = view
            .claim_one_plan(&validator)
            .map_err(|err| err.to_string())?;
        prepare_withdraw(view.chain, &view.address, &plan, &memo)
    });
    result.unwrap_or_else(|err| SignDocResponse::failure(format!("tx_prepare_claim_one failed: {err}")))
}

pub fn tx_prepare_delegate(
    chain: String,
    address: String,
    validator: String,
    amount: String,
    memo: String,
) -> SignDocResponse {
    prepare_single(&chain, &address, &memo, |builder| {
        builder.delegate(&validator, &amount)
    })
    .unwrap_or_else(|err| SignDocResponse::failure(format!("tx_prepare_delegate failed: {err}")))
}

pub fn tx_prepare_undelegate(
    chain: String,
    address: String,
    validator: String,
    amount: String,
    memo: String,
) -> SignDocResponse {
    prepare_single(&chain, &address, &memo, |builder| {
        builder.undelegate(&validator, &amount)
    })
    .unwrap_or_else(|err| SignDocResponse::failure(format!("tx_prepare_undelegate failed: {err}")))
}

pub fn tx_prepare_redelegate(
    chain: String,
    address: String,
    src_validator: String,
    dst_validator: String,
    amount: String,
    memo: String,
) -> SignDocResponse {
    prepare_single(&chain, &address, &memo, |builder| {
        builder.redelegate(&src_validator, &dst_validator, &amount)
    })
    .unwrap_or_else(|err| SignDocResponse::failure(format!("tx_prepare_redelegate failed: {err}")))
}

pub fn tx_prepare_modify_withdraw_address(
    chain: String,
    address: String,
    withdraw_address: String,
    memo: String,
) -> SignDocResponse {
    prepare_single(&chain, &address, &memo, |builder| {
        builder.modify_withdraw_address(&withdraw_address)
    })
    .unwrap_or_else(|err| {
        SignDocResponse::failure(format!("tx_prepare_modify_withdraw_address failed: {err}"))
    })
}

/// Broadcasts a sign document signed by the wallet.
///
/// `pub_key` and `signature` are base64 strings as produced by amino
/// signers.
pub fn tx_broadcast(
    chain: String,
    sign_doc_json: String,
    pub_key: String,
    signature: String,
) -> BroadcastResponse {
    let result = parse_chain_key(&chain)
        .map_err(|err| err.to_string())
        .and_then(|key| {
            let sign_doc: AminoSignDoc = serde_json::from_str(&sign_doc_json)
                .map_err(|err| format!("sign document is not valid JSON: {err}"))?;
            let signature = TxSignature { pub_key, signature };
            let service = TxService::new(lcd_client()?);
            service
                .broadcast(key, &sign_doc, &signature)
                .map_err(|err| err.to_string())
        });
    match result {
        Ok(result) => BroadcastResponse {
            ok: true,
            txhash: Some(result.txhash),
            message: "Transaction submitted.".to_string(),
        },
        Err(err) => BroadcastResponse {
            ok: false,
            txhash: None,
            message: format!("tx_broadcast failed: {err}"),
        },
    }
}

/// Builds the broadcast body without sending it, for wallets that submit
/// transactions themselves.
#[flutter_rust_bridge::frb(sync)]
pub fn tx_std_tx_json(sign_doc_json: String, pub_key: String, signature: String) -> String {
    serde_json::from_str::<AminoSignDoc>(&sign_doc_json)
        .map_err(|err| err.to_string())
        .and_then(|doc| {
            build_std_tx(&doc, &TxSignature { pub_key, signature }).map_err(|err| err.to_string())
        })
        .map(|body| body.to_string())
        .unwrap_or_default()
}

fn config() -> &'static StakeboardConfig {
    FFI_CONFIG.get_or_init(|| {
        StakeboardConfig::from_env().unwrap_or_else(|err| {
            log::warn!("event=ffi_config module=ffi status=fallback error={err}");
            StakeboardConfig::default()
        })
    })
}

fn resolve_db_path() -> PathBuf {
    let path = &config().db_path;
    if path.is_absolute() {
        return path.clone();
    }
    if path.as_os_str().is_empty() {
        return std::env::temp_dir().join(DEFAULT_DB_FILE);
    }
    std::env::temp_dir().join(path)
}

fn open_store() -> Result<Connection, String> {
    open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))
}

fn lcd_client() -> Result<HttpLcdClient, String> {
    let config = config();
    HttpLcdClient::new(config.lcd_timeout)
        .map(|client| client.with_overrides(config.lcd_overrides.clone()))
        .map_err(|err| format!("LCD client init failed: {err}"))
}

fn parse_account_id(account_id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(account_id.trim())
        .map_err(|_| format!("invalid account id `{}`", account_id.trim()))
}

fn with_account_service<T>(
    f: impl FnOnce(
        &AccountService<SqliteAccountRepository<'_>>,
    ) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_store()?;
    let service = AccountService::new(SqliteAccountRepository::new(&conn));
    f(&service)
}

fn load_view(chain: &str, address: &str, mode: FetchMode) -> Result<DashboardView, String> {
    let key = parse_chain_key(chain).map_err(|err| err.to_string())?;
    let conn = open_store()?;
    let lcd = lcd_client()?;
    let service = DashboardService::new(lcd, SqliteSnapshotRepository::new(&conn));
    service.load(key, address, mode).map_err(|err| err.to_string())
}

fn prepare_withdraw(
    chain: ChainKey,
    address: &str,
    plan: &WithdrawPlan,
    memo: &str,
) -> Result<SignDocResponse, String> {
    let builder = MsgBuilder::new(chain_config(chain), address).map_err(|err| err.to_string())?;
    let msgs = builder.withdraw_rewards(plan).map_err(|err| err.to_string())?;
    let mut response = prepare_msgs(chain, address, &msgs, memo)?;
    response.amount = Some(plan.amount_text());
    Ok(response)
}

fn prepare_single(
    chain: &str,
    address: &str,
    memo: &str,
    build: impl FnOnce(&MsgBuilder<'_>) -> stakeboard_core::tx::TxResult<StakingMsg>,
) -> Result<SignDocResponse, String> {
    let key = parse_chain_key(chain).map_err(|err| err.to_string())?;
    let builder = MsgBuilder::new(chain_config(key), address).map_err(|err| err.to_string())?;
    let msg = build(&builder).map_err(|err| err.to_string())?;
    prepare_msgs(key, address, &[msg], memo)
}

fn prepare_msgs(
    chain: ChainKey,
    address: &str,
    msgs: &[StakingMsg],
    memo: &str,
) -> Result<SignDocResponse, String> {
    let service = TxService::new(lcd_client()?);
    let doc = service
        .prepare_sign_doc(chain, address, msgs, memo)
        .map_err(|err| err.to_string())?;
    let bytes = doc.to_sign_bytes().map_err(|err| err.to_string())?;
    let sign_doc_json = String::from_utf8(bytes).map_err(|err| err.to_string())?;
    Ok(SignDocResponse {
        ok: true,
        sign_doc_json,
        amount: None,
        message: format!("Sign document with {} message(s).", msgs.len()),
    })
}

fn to_account_item(account: WatchedAccount) -> AccountItem {
    AccountItem {
        account_id: account.uuid.to_string(),
        chain: account.chain.as_str().to_string(),
        address: account.address,
        label: account.label,
        created_at: account.created_at,
    }
}

fn to_dashboard_response(view: DashboardView) -> DashboardResponse {
    let (claim_all_status, claim_all_validators, claim_all_amount) = match &view.claim_all {
        ClaimAllOutcome::Ready { plan } => (
            "ready",
            plan.validator_addresses.clone(),
            Some(plan.amount_text()),
        ),
        ClaimAllOutcome::NoRewards => ("no_rewards", Vec::new(), None),
        ClaimAllOutcome::RewardBelowFee { reward, .. } => {
            ("reward_below_fee", Vec::new(), Some(reward.clone()))
        }
    };

    DashboardResponse {
        ok: true,
        message: if view.source.is_cached() {
            "Showing cached data.".to_string()
        } else {
            "Up to date.".to_string()
        },
        symbol: view.symbol,
        rows: view
            .rows
            .into_iter()
            .map(|row| DelegationRowItem {
                operator_address: row.operator_address,
                moniker: row.moniker,
                icon_url: row.icon_url,
                explorer_url: row.explorer_url,
                total_tokens: row.total_tokens,
                voting_power_percent: row.voting_power_percent,
                commission_percent: row.commission_percent,
                delegated: row.delegated,
                reward: row.reward,
                jailed: row.jailed,
            })
            .collect(),
        available_balance: view.available_balance,
        total_delegated: view.total_delegated,
        total_reward: view.total_reward,
        claim_all_status: claim_all_status.to_string(),
        claim_all_validators,
        claim_all_amount,
        cached: view.source.is_cached(),
        fetched_at: view.source.fetched_at(),
    }
}
