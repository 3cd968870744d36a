//! Dashboard use-case service.
//!
//! # Responsibility
//! - Load delegations, rewards, validators and balances for one account.
//! - Keep the last successful payloads as snapshots and serve them when the
//!   network is unavailable.
//! - Project everything into a `DashboardView` with the claim-all outcome.
//! - List redelegation targets from the chain's validator set.
//!
//! # Invariants
//! - A view is built from one consistent set of payloads: all live or all
//!   cached, never mixed.
//! - Cache write failures never fail a live load, and a failed write leaves
//!   the previous snapshot set untouched.
//! - Validator sets are cached per chain, not per account.

use crate::amount::{self, AmountError};
use crate::chain::{
    chain_config, validate_account_address, validate_validator_address, AddressError, ChainConfig,
    ChainKey,
};
use crate::lcd::{Coin, DelegationResponse, LcdError, LcdSource, RewardsResponse, Validator};
use crate::repo::account_repo::RepoError;
use crate::repo::snapshot_repo::{
    SnapshotRepository, SnapshotResource, SnapshotWrite, CHAIN_SCOPE,
};
use crate::staking::{
    active_validator_summaries, aggregate_all_denoms, aggregate_rewards, build_delegation_rows,
    claim_all_plan, claim_one_plan, DelegationRow, ValidatorReward, ValidatorSummary,
    WithdrawError, WithdrawPlan,
};
use log::{error, info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Where `DashboardService` loads may read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// LCD only; network failures are returned.
    Network,
    /// Snapshots only; no network traffic.
    CacheOnly,
    /// LCD first, snapshots when the LCD fails.
    NetworkWithCacheFallback,
}

/// Provenance of the payloads behind a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Live { fetched_at: i64 },
    /// `fetched_at` is the oldest of the cached payloads.
    Cached { fetched_at: i64 },
}

impl DataSource {
    pub fn fetched_at(self) -> i64 {
        match self {
            Self::Live { fetched_at } | Self::Cached { fetched_at } => fetched_at,
        }
    }

    pub fn is_cached(self) -> bool {
        matches!(self, Self::Cached { .. })
    }
}

/// Whether the "claim all" action is offered, and why not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimAllOutcome {
    Ready { plan: WithdrawPlan },
    NoRewards,
    RewardBelowFee { reward: String, fee: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub chain: ChainKey,
    pub address: String,
    pub symbol: String,
    pub rows: Vec<DelegationRow>,
    /// Per-validator rewards of the staking denom in base units, in LCD order.
    pub rewards: Vec<ValidatorReward>,
    /// Spendable balance of the staking denom, display units.
    pub available_balance: String,
    pub total_delegated: String,
    pub total_reward: String,
    pub claim_all: ClaimAllOutcome,
    pub source: DataSource,
}

/// Redelegation targets of one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatorListView {
    pub chain: ChainKey,
    pub validators: Vec<ValidatorSummary>,
    pub source: DataSource,
}

impl DashboardView {
    /// Plans a single-validator withdrawal from the rewards in this view.
    pub fn claim_one_plan(&self, validator_address: &str) -> Result<WithdrawPlan, WithdrawError> {
        claim_one_plan(chain_config(self.chain), &self.rewards, validator_address)
    }
}

#[derive(Debug)]
pub enum DashboardError {
    Address(AddressError),
    Lcd(LcdError),
    Repo(RepoError),
    Amount(AmountError),
    Withdraw(WithdrawError),
    /// `CacheOnly` (or a failed fallback) found no complete snapshot set.
    NoCachedData { chain: ChainKey, address: String },
    /// No validator set has been cached for the chain yet.
    NoCachedValidators { chain: ChainKey },
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address(err) => write!(f, "{err}"),
            Self::Lcd(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Amount(err) => write!(f, "{err}"),
            Self::Withdraw(err) => write!(f, "{err}"),
            Self::NoCachedData { chain, address } => {
                write!(f, "no cached dashboard data for {address} on {chain}")
            }
            Self::NoCachedValidators { chain } => {
                write!(f, "no cached validator set for {chain}")
            }
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Address(err) => Some(err),
            Self::Lcd(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Amount(err) => Some(err),
            Self::Withdraw(err) => Some(err),
            Self::NoCachedData { .. } | Self::NoCachedValidators { .. } => None,
        }
    }
}

impl From<AddressError> for DashboardError {
    fn from(value: AddressError) -> Self {
        Self::Address(value)
    }
}

impl From<LcdError> for DashboardError {
    fn from(value: LcdError) -> Self {
        Self::Lcd(value)
    }
}

impl From<RepoError> for DashboardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<AmountError> for DashboardError {
    fn from(value: AmountError) -> Self {
        Self::Amount(value)
    }
}

impl From<WithdrawError> for DashboardError {
    fn from(value: WithdrawError) -> Self {
        Self::Withdraw(value)
    }
}

struct DashboardData {
    delegations: Vec<DelegationResponse>,
    rewards: RewardsResponse,
    validators: Vec<Validator>,
    balances: Vec<Coin>,
}

pub struct DashboardService<L: LcdSource, S: SnapshotRepository> {
    lcd: L,
    snapshots: S,
    clock: fn() -> i64,
}

impl<L: LcdSource, S: SnapshotRepository> DashboardService<L, S> {
    pub fn new(lcd: L, snapshots: S) -> Self {
        Self {
            lcd,
            snapshots,
            clock: now_epoch_ms,
        }
    }

    /// Replaces the wall clock used to stamp live fetches.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn lcd(&self) -> &L {
        &self.lcd
    }

    /// Loads the dashboard of `address` on `chain`.
    ///
    /// # Errors
    /// - `Address` when `address` does not belong to `chain`.
    /// - `Lcd` for network failures in `Network` mode, or in fallback mode
    ///   when no snapshot set exists either.
    /// - `NoCachedData` in `CacheOnly` mode without a complete snapshot set.
    pub fn load(
        &self,
        chain: ChainKey,
        address: &str,
        mode: FetchMode,
    ) -> Result<DashboardView, DashboardError> {
        let config = chain_config(chain);
        let address = validate_account_address(config, address)?;
        let started_at = Instant::now();
        info!(
            "event=dashboard_load module=service status=start chain={chain} mode={mode:?}"
        );

        let result = self.load_data(config, &address, mode).and_then(|(data, source)| {
            build_view(config, &address, &data, source)
        });

        match &result {
            Ok(view) => info!(
                "event=dashboard_load module=service status=ok chain={chain} cached={} rows={} duration_ms={}",
                view.source.is_cached(),
                view.rows.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=dashboard_load module=service status=error chain={chain} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    /// Lists bonded, non-jailed validators of `chain`, largest first.
    ///
    /// `exclude` removes one operator address, usually the validator a
    /// redelegation moves away from. The validator set shares its snapshot
    /// with `load`.
    ///
    /// # Errors
    /// - `Address` when `exclude` is not an operator address of `chain`.
    /// - `NoCachedValidators` in `CacheOnly` mode before any fetch succeeded.
    pub fn validator_list(
        &self,
        chain: ChainKey,
        exclude: Option<&str>,
        mode: FetchMode,
    ) -> Result<ValidatorListView, DashboardError> {
        let config = chain_config(chain);
        let exclude = exclude
            .map(|address| validate_validator_address(config, address))
            .transpose()?;
        let (validators, source) = self.load_validators(config, mode)?;
        let validators = active_validator_summaries(config, &validators, exclude.as_deref())?;

        info!(
            "event=validator_list module=service status=ok chain={chain} cached={} count={}",
            source.is_cached(),
            validators.len()
        );
        Ok(ValidatorListView {
            chain,
            validators,
            source,
        })
    }

    fn load_validators(
        &self,
        config: &ChainConfig,
        mode: FetchMode,
    ) -> Result<(Vec<Validator>, DataSource), DashboardError> {
        match mode {
            FetchMode::Network => self.fetch_live_validators(config),
            FetchMode::CacheOnly => self
                .load_cached_validators(config.key)?
                .ok_or(DashboardError::NoCachedValidators { chain: config.key }),
            FetchMode::NetworkWithCacheFallback => match self.fetch_live_validators(config) {
                Ok(loaded) => Ok(loaded),
                Err(DashboardError::Lcd(lcd_err)) => {
                    warn!(
                        "event=validator_list module=service status=fallback chain={} error={lcd_err}",
                        config.path()
                    );
                    match self.load_cached_validators(config.key)? {
                        Some(loaded) => Ok(loaded),
                        None => Err(DashboardError::Lcd(lcd_err)),
                    }
                }
                Err(other) => Err(other),
            },
        }
    }

    fn fetch_live_validators(
        &self,
        config: &ChainConfig,
    ) -> Result<(Vec<Validator>, DataSource), DashboardError> {
        let validators = self.lcd.fetch_validators(config)?;
        let fetched_at = (self.clock)();
        if let Err(err) = self.snapshots.put_json(
            config.key,
            CHAIN_SCOPE,
            SnapshotResource::Validators,
            &validators,
            fetched_at,
        ) {
            warn!(
                "event=snapshot_store module=service status=error chain={} error={err}",
                config.path()
            );
        }
        Ok((validators, DataSource::Live { fetched_at }))
    }

    fn load_cached_validators(
        &self,
        chain: ChainKey,
    ) -> Result<Option<(Vec<Validator>, DataSource)>, RepoError> {
        let Some(snapshot) =
            self.snapshots
                .get_snapshot(chain, CHAIN_SCOPE, SnapshotResource::Validators)?
        else {
            return Ok(None);
        };
        let validators = snapshot.decode()?;
        Ok(Some((
            validators,
            DataSource::Cached {
                fetched_at: snapshot.fetched_at,
            },
        )))
    }

    fn load_data(
        &self,
        config: &ChainConfig,
        address: &str,
        mode: FetchMode,
    ) -> Result<(DashboardData, DataSource), DashboardError> {
        match mode {
            FetchMode::Network => self.fetch_live(config, address),
            FetchMode::CacheOnly => self.cached_or_missing(config, address),
            FetchMode::NetworkWithCacheFallback => match self.fetch_live(config, address) {
                Ok(loaded) => Ok(loaded),
                Err(DashboardError::Lcd(lcd_err)) => {
                    warn!(
                        "event=dashboard_load module=service status=fallback chain={} error={lcd_err}",
                        config.path()
                    );
                    match self.load_cached(config.key, address)? {
                        Some(loaded) => Ok(loaded),
                        None => Err(DashboardError::Lcd(lcd_err)),
                    }
                }
                Err(other) => Err(other),
            },
        }
    }

    fn cached_or_missing(
        &self,
        config: &ChainConfig,
        address: &str,
    ) -> Result<(DashboardData, DataSource), DashboardError> {
        self.load_cached(config.key, address)?
            .ok_or_else(|| DashboardError::NoCachedData {
                chain: config.key,
                address: address.to_string(),
            })
    }

    fn fetch_live(
        &self,
        config: &ChainConfig,
        address: &str,
    ) -> Result<(DashboardData, DataSource), DashboardError> {
        let data = DashboardData {
            delegations: self.lcd.fetch_delegations(config, address)?,
            rewards: self.lcd.fetch_rewards(config, address)?,
            validators: self.lcd.fetch_validators(config)?,
            balances: self.lcd.fetch_balances(config, address)?,
        };
        let fetched_at = (self.clock)();

        if let Err(err) = self.store_snapshots(config.key, address, &data, fetched_at) {
            warn!(
                "event=snapshot_store module=service status=error chain={} error={err}",
                config.path()
            );
        }
        Ok((data, DataSource::Live { fetched_at }))
    }

    fn store_snapshots(
        &self,
        chain: ChainKey,
        address: &str,
        data: &DashboardData,
        fetched_at: i64,
    ) -> Result<(), RepoError> {
        let writes = [
            SnapshotWrite::json(address, SnapshotResource::Delegations, &data.delegations)?,
            SnapshotWrite::json(address, SnapshotResource::Rewards, &data.rewards)?,
            SnapshotWrite::json(CHAIN_SCOPE, SnapshotResource::Validators, &data.validators)?,
            SnapshotWrite::json(address, SnapshotResource::Balances, &data.balances)?,
        ];
        self.snapshots.put_snapshots(chain, &writes, fetched_at)
    }

    fn load_cached(
        &self,
        chain: ChainKey,
        address: &str,
    ) -> Result<Option<(DashboardData, DataSource)>, RepoError> {
        let keys = [
            (address, SnapshotResource::Delegations),
            (address, SnapshotResource::Rewards),
            (CHAIN_SCOPE, SnapshotResource::Validators),
            (address, SnapshotResource::Balances),
        ];
        let mut found = Vec::with_capacity(keys.len());
        for (owner, resource) in keys {
            match self.snapshots.get_snapshot(chain, owner, resource)? {
                Some(snapshot) => found.push(snapshot),
                None => return Ok(None),
            }
        }

        let oldest = found
            .iter()
            .map(|snapshot| snapshot.fetched_at)
            .min()
            .unwrap_or_default();
        let data = DashboardData {
            delegations: found[0].decode()?,
            rewards: found[1].decode()?,
            validators: found[2].decode()?,
            balances: found[3].decode()?,
        };
        Ok(Some((data, DataSource::Cached { fetched_at: oldest })))
    }
}

fn build_view(
    config: &ChainConfig,
    address: &str,
    data: &DashboardData,
    source: DataSource,
) -> Result<DashboardView, DashboardError> {
    let rewards = aggregate_rewards(&data.rewards.rewards, config.denom)?;
    let row_rewards = aggregate_all_denoms(&data.rewards.rewards)?;
    let rows = build_delegation_rows(config, &data.delegations, &row_rewards, &data.validators)?;

    let total_reward = rewards
        .iter()
        .try_fold(Decimal::ZERO, |acc, entry| amount::plus(acc, entry.amount))?;
    let total_delegated = data
        .delegations
        .iter()
        .filter(|item| item.balance.denom == config.denom)
        .try_fold(Decimal::ZERO, |acc, item| {
            amount::plus(acc, amount::parse_decimal(&item.balance.amount)?)
        })?;
    let available = data
        .balances
        .iter()
        .filter(|coin| coin.denom == config.denom)
        .try_fold(Decimal::ZERO, |acc, coin| {
            amount::plus(acc, amount::parse_decimal(&coin.amount)?)
        })?;

    let claim_all = match claim_all_plan(config, &rewards) {
        Ok(plan) => ClaimAllOutcome::Ready { plan },
        Err(WithdrawError::NoRewards) => ClaimAllOutcome::NoRewards,
        Err(WithdrawError::RewardBelowFee { reward, fee }) => ClaimAllOutcome::RewardBelowFee {
            reward: reward.to_string(),
            fee: fee.to_string(),
        },
        Err(other) => return Err(other.into()),
    };

    Ok(DashboardView {
        chain: config.key,
        address: address.to_string(),
        symbol: config.symbol_name.to_string(),
        rows,
        available_balance: amount::to_display_amount(available, config.decimal)?.to_string(),
        total_delegated: amount::to_display_amount(total_delegated, config.decimal)?.to_string(),
        total_reward: amount::to_display_amount(total_reward, config.decimal)?.to_string(),
        rewards,
        claim_all,
        source,
    })
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
