//! Chain REST (LCD) access.
//!
//! # Responsibility
//! - Describe the subset of Cosmos SDK REST responses the dashboard reads.
//! - Hide HTTP details behind the `LcdSource` trait so services and tests
//!   can swap the data source.
//!
//! # Invariants
//! - LCD endpoints are passive data sources; only `broadcast_tx` writes.
//! - Paginated listings are followed until the gateway stops returning a key.

mod client;
pub mod types;

pub use client::{HttpLcdClient, LcdError, LcdResult, LcdSource, DEFAULT_LCD_TIMEOUT};
pub use types::{
    AccountInfo, BroadcastResult, Coin, DelegationResponse, DelegatorReward, RewardsResponse,
    Validator,
};
