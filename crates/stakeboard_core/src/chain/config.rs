//! Per-chain network constants.

use super::key::ChainKey;
use crate::amount::{self, AmountResult};
use rust_decimal::Decimal;
use serde::Serialize;

const VALIDATOR_ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/cosmostation/cosmostation_token_resource/master/moniker";
const EXPLORER_BASE_URL: &str = "https://www.mintscan.io";

/// Icon shown when a validator has no published moniker image.
pub const FALLBACK_VALIDATOR_ICON_URL: &str =
    "https://www.mintscan.io/static/media/validator_none.f01f85a0.svg";

/// Transaction categories with their own fee and gas tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    /// Minimum fee used for eligibility checks and unknown messages.
    Default,
    Delegate,
    Undelegate,
    Redelegate,
    Withdraw,
    WithdrawReward,
    WithdrawCommission,
    ModifyWithdrawAddress,
}

/// Hardware and browser wallet support flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WalletSupport {
    pub ledger: bool,
    pub keystation: bool,
}

/// Key derivation and address encoding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WalletConfig {
    /// BIP-44 path without the `m/` prefix, e.g. `44/118/0/0/0`.
    pub hd_path: &'static str,
    /// Bech32 human-readable part of account addresses.
    pub prefix: &'static str,
    pub support: WalletSupport,
    /// Chain only accepts protobuf-encoded transactions.
    pub is_proto: bool,
}

/// Fee per transaction kind, in display units of the chain's native token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeTable {
    pub default: &'static str,
    pub delegate: &'static str,
    pub undelegate: &'static str,
    pub redelegate: &'static str,
    pub withdraw: &'static str,
    pub withdraw_reward: &'static str,
    pub withdraw_commission: &'static str,
    pub modify_withdraw_address: &'static str,
}

impl FeeTable {
    pub fn get(&self, kind: TxKind) -> &'static str {
        match kind {
            TxKind::Default => self.default,
            TxKind::Delegate => self.delegate,
            TxKind::Undelegate => self.undelegate,
            TxKind::Redelegate => self.redelegate,
            TxKind::Withdraw => self.withdraw,
            TxKind::WithdrawReward => self.withdraw_reward,
            TxKind::WithdrawCommission => self.withdraw_commission,
            TxKind::ModifyWithdrawAddress => self.modify_withdraw_address,
        }
    }
}

/// Gas limit per transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GasTable {
    pub default: u64,
    pub delegate: u64,
    pub undelegate: u64,
    pub redelegate: u64,
    pub withdraw: u64,
    pub withdraw_reward: u64,
    pub withdraw_commission: u64,
    pub modify_withdraw_address: u64,
}

impl GasTable {
    pub fn get(&self, kind: TxKind) -> u64 {
        match kind {
            TxKind::Default => self.default,
            TxKind::Delegate => self.delegate,
            TxKind::Undelegate => self.undelegate,
            TxKind::Redelegate => self.redelegate,
            TxKind::Withdraw => self.withdraw,
            TxKind::WithdrawReward => self.withdraw_reward,
            TxKind::WithdrawCommission => self.withdraw_commission,
            TxKind::ModifyWithdrawAddress => self.modify_withdraw_address,
        }
    }
}

/// Network constants for one supported chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainConfig {
    pub key: ChainKey,
    pub chain_id: &'static str,
    /// Human-facing network name.
    pub name: &'static str,
    pub img_url: &'static str,
    pub wallet: WalletConfig,
    pub lcd_url: &'static str,
    /// Ticker of the display unit, e.g. `ATOM`.
    pub symbol_name: &'static str,
    /// Base-unit denomination, e.g. `uatom`.
    pub denom: &'static str,
    /// Number of base-unit digits per display unit.
    pub decimal: u32,
    pub coingecko_id: &'static str,
    pub validator_icon_directory: &'static str,
    pub mintscan_path: &'static str,
    pub fee: FeeTable,
    pub gas: GasTable,
}

impl ChainConfig {
    /// Path key used in URLs and storage.
    pub fn path(&self) -> &'static str {
        self.key.as_str()
    }

    /// Fee for `kind` in display units.
    pub fn fee_amount(&self, kind: TxKind) -> AmountResult<Decimal> {
        amount::parse_decimal(self.fee.get(kind))
    }

    pub fn gas_limit(&self, kind: TxKind) -> u64 {
        self.gas.get(kind)
    }

    pub fn validator_icon_url(&self, operator_address: &str) -> String {
        format!(
            "{VALIDATOR_ICON_BASE_URL}/{}/{operator_address}.png",
            self.validator_icon_directory
        )
    }

    pub fn explorer_validator_url(&self, operator_address: &str) -> String {
        format!(
            "{EXPLORER_BASE_URL}/{}/validators/{operator_address}",
            self.mintscan_path
        )
    }
}
