//! Core domain logic for Stakeboard, a multi-chain Cosmos staking dashboard.
//! This crate is the single source of truth for amounts, chain constants,
//! reward eligibility and transaction shapes.

pub mod amount;
pub mod chain;
pub mod config;
pub mod db;
pub mod lcd;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod staking;
pub mod tx;

pub use amount::{AmountError, AmountResult};
pub use chain::{all_chains, chain_by_path, chain_config, ChainConfig, ChainKey, TxKind};
pub use config::{ConfigError, StakeboardConfig};
pub use db::{open_db, open_db_in_memory, DbError};
pub use lcd::{HttpLcdClient, LcdError, LcdSource};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::account::{AccountId, WatchedAccount};
pub use repo::account_repo::{
    AccountRepository, RepoError, RepoResult, SqliteAccountRepository,
};
pub use repo::snapshot_repo::{SnapshotRepository, SqliteSnapshotRepository};
pub use service::account_service::AccountService;
pub use service::dashboard_service::{
    ClaimAllOutcome, DashboardError, DashboardService, DashboardView, DataSource, FetchMode,
    ValidatorListView,
};
pub use service::tx_service::{TxService, TxServiceError};
pub use staking::{WithdrawError, WithdrawPlan};
pub use tx::{AminoSignDoc, MsgBuilder, StakingMsg, TxError, TxSignature};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
