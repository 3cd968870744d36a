//! Staking and distribution messages.

use super::{TxError, TxResult};
use crate::amount;
use crate::chain::{validate_account_address, validate_validator_address, ChainConfig, TxKind};
use crate::lcd::Coin;
use crate::staking::WithdrawPlan;
use serde_json::{json, Value};

/// One message of a staking transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingMsg {
    Delegate {
        delegator_address: String,
        validator_address: String,
        amount: Coin,
    },
    Undelegate {
        delegator_address: String,
        validator_address: String,
        amount: Coin,
    },
    Redelegate {
        delegator_address: String,
        validator_src_address: String,
        validator_dst_address: String,
        amount: Coin,
    },
    WithdrawReward {
        delegator_address: String,
        validator_address: String,
    },
    ModifyWithdrawAddress {
        delegator_address: String,
        withdraw_address: String,
    },
}

impl StakingMsg {
    /// Fee/gas table row used for this message.
    pub fn tx_kind(&self) -> TxKind {
        match self {
            Self::Delegate { .. } => TxKind::Delegate,
            Self::Undelegate { .. } => TxKind::Undelegate,
            Self::Redelegate { .. } => TxKind::Redelegate,
            Self::WithdrawReward { .. } => TxKind::WithdrawReward,
            Self::ModifyWithdrawAddress { .. } => TxKind::ModifyWithdrawAddress,
        }
    }

    pub fn amino_type(&self) -> &'static str {
        match self {
            Self::Delegate { .. } => "cosmos-sdk/MsgDelegate",
            Self::Undelegate { .. } => "cosmos-sdk/MsgUndelegate",
            Self::Redelegate { .. } => "cosmos-sdk/MsgBeginRedelegate",
            Self::WithdrawReward { .. } => "cosmos-sdk/MsgWithdrawDelegationReward",
            Self::ModifyWithdrawAddress { .. } => "cosmos-sdk/MsgModifyWithdrawAddress",
        }
    }

    /// Protobuf `Any` type URL, for wallets that sign direct mode.
    pub fn type_url(&self) -> &'static str {
        match self {
            Self::Delegate { .. } => "/cosmos.staking.v1beta1.MsgDelegate",
            Self::Undelegate { .. } => "/cosmos.staking.v1beta1.MsgUndelegate",
            Self::Redelegate { .. } => "/cosmos.staking.v1beta1.MsgBeginRedelegate",
            Self::WithdrawReward { .. } => {
                "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward"
            }
            Self::ModifyWithdrawAddress { .. } => {
                "/cosmos.distribution.v1beta1.MsgSetWithdrawAddress"
            }
        }
    }

    /// Amino JSON `{type, value}` form.
    pub fn to_amino_json(&self) -> Value {
        let value = match self {
            Self::Delegate {
                delegator_address,
                validator_address,
                amount,
            }
            | Self::Undelegate {
                delegator_address,
                validator_address,
                amount,
            } => json!({
                "delegator_address": delegator_address,
                "validator_address": validator_address,
                "amount": coin_json(amount),
            }),
            Self::Redelegate {
                delegator_address,
                validator_src_address,
                validator_dst_address,
                amount,
            } => json!({
                "delegator_address": delegator_address,
                "validator_src_address": validator_src_address,
                "validator_dst_address": validator_dst_address,
                "amount": coin_json(amount),
            }),
            Self::WithdrawReward {
                delegator_address,
                validator_address,
            } => json!({
                "delegator_address": delegator_address,
                "validator_address": validator_address,
            }),
            Self::ModifyWithdrawAddress {
                delegator_address,
                withdraw_address,
            } => json!({
                "delegator_address": delegator_address,
                "withdraw_address": withdraw_address,
            }),
        };
        json!({ "type": self.amino_type(), "value": value })
    }
}

fn coin_json(coin: &Coin) -> Value {
    json!({ "amount": coin.amount, "denom": coin.denom })
}

/// Builds validated messages for one delegator on one chain.
pub struct MsgBuilder<'a> {
    chain: &'a ChainConfig,
    delegator_address: String,
}

impl<'a> MsgBuilder<'a> {
    pub fn new(chain: &'a ChainConfig, delegator_address: &str) -> TxResult<Self> {
        Ok(Self {
            chain,
            delegator_address: validate_account_address(chain, delegator_address)?,
        })
    }

    pub fn delegate(&self, validator_address: &str, display_amount: &str) -> TxResult<StakingMsg> {
        Ok(StakingMsg::Delegate {
            delegator_address: self.delegator_address.clone(),
            validator_address: validate_validator_address(self.chain, validator_address)?,
            amount: self.base_coin(display_amount)?,
        })
    }

    pub fn undelegate(&self, validator_address: &str, display_amount: &str) -> TxResult<StakingMsg> {
        Ok(StakingMsg::Undelegate {
            delegator_address: self.delegator_address.clone(),
            validator_address: validate_validator_address(self.chain, validator_address)?,
            amount: self.base_coin(display_amount)?,
        })
    }

    pub fn redelegate(
        &self,
        validator_src_address: &str,
        validator_dst_address: &str,
        display_amount: &str,
    ) -> TxResult<StakingMsg> {
        let src = validate_validator_address(self.chain, validator_src_address)?;
        let dst = validate_validator_address(self.chain, validator_dst_address)?;
        if src == dst {
            return Err(TxError::SameValidator(src));
        }
        Ok(StakingMsg::Redelegate {
            delegator_address: self.delegator_address.clone(),
            validator_src_address: src,
            validator_dst_address: dst,
            amount: self.base_coin(display_amount)?,
        })
    }

    /// One withdraw message per validator of the plan, in plan order.
    pub fn withdraw_rewards(&self, plan: &WithdrawPlan) -> TxResult<Vec<StakingMsg>> {
        plan.validator_addresses
            .iter()
            .map(|validator_address| {
                Ok(StakingMsg::WithdrawReward {
                    delegator_address: self.delegator_address.clone(),
                    validator_address: validate_validator_address(self.chain, validator_address)?,
                })
            })
            .collect()
    }

    pub fn modify_withdraw_address(&self, withdraw_address: &str) -> TxResult<StakingMsg> {
        Ok(StakingMsg::ModifyWithdrawAddress {
            delegator_address: self.delegator_address.clone(),
            withdraw_address: validate_account_address(self.chain, withdraw_address)?,
        })
    }

    fn base_coin(&self, display_amount: &str) -> TxResult<Coin> {
        let base = amount::to_base_amount(display_amount, self.chain.decimal)?;
        if base == "0" {
            return Err(TxError::ZeroAmount);
        }
        Ok(Coin {
            denom: self.chain.denom.to_string(),
            amount: base,
        })
    }
}
