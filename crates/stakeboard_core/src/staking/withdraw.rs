//! Reward withdrawal planning and fee eligibility.

use super::reward::{reward_amount, top_rewards, ValidatorReward, MAX_CLAIM_ALL_VALIDATORS};
use crate::amount::{self, AmountError};
use crate::chain::{ChainConfig, TxKind};
use log::info;
use rust_decimal::Decimal;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which withdrawal action produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawScope {
    /// Top validators by reward, capped at `MAX_CLAIM_ALL_VALIDATORS`.
    All,
    Single,
}

/// Validated input for a reward withdrawal transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawPlan {
    pub scope: WithdrawScope,
    /// Validators to withdraw from, largest reward first.
    pub validator_addresses: Vec<String>,
    /// Total reward in display units, rounded to the chain decimal.
    pub amount: Decimal,
}

impl WithdrawPlan {
    pub fn amount_text(&self) -> String {
        self.amount.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawError {
    /// The claim would cost more in fees than it returns.
    RewardBelowFee { reward: Decimal, fee: Decimal },
    NoRewards,
    UnknownValidator(String),
    Amount(AmountError),
}

impl Display for WithdrawError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RewardBelowFee { reward, fee } => write!(
                f,
                "reward to claim ({reward}) is lower than the transaction fee ({fee})"
            ),
            Self::NoRewards => write!(f, "there are no rewards to claim"),
            Self::UnknownValidator(address) => {
                write!(f, "no reward entry for validator: {address}")
            }
            Self::Amount(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WithdrawError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Amount(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AmountError> for WithdrawError {
    fn from(value: AmountError) -> Self {
        Self::Amount(value)
    }
}

/// Rejects claims whose display-unit `reward` is below the chain's default fee.
///
/// A reward equal to the fee is accepted.
pub fn ensure_reward_covers_fee(reward: Decimal, chain: &ChainConfig) -> Result<(), WithdrawError> {
    let fee = chain.fee_amount(TxKind::Default)?;
    if amount::gt(fee, reward) {
        info!(
            "event=withdraw_check module=staking status=rejected chain={} reason=reward_below_fee",
            chain.path()
        );
        return Err(WithdrawError::RewardBelowFee { reward, fee });
    }
    Ok(())
}

/// Plans a "claim all" withdrawal over the largest rewards.
pub fn claim_all_plan(
    chain: &ChainConfig,
    rewards: &[ValidatorReward],
) -> Result<WithdrawPlan, WithdrawError> {
    let validator_addresses: Vec<String> = top_rewards(rewards, MAX_CLAIM_ALL_VALIDATORS)
        .into_iter()
        .map(|entry| entry.validator_address)
        .collect();
    if validator_addresses.is_empty() {
        return Err(WithdrawError::NoRewards);
    }

    let amount = reward_amount(rewards, &validator_addresses, chain.decimal)?;
    ensure_reward_covers_fee(amount, chain)?;
    Ok(WithdrawPlan {
        scope: WithdrawScope::All,
        validator_addresses,
        amount,
    })
}

/// Plans a withdrawal from one validator.
pub fn claim_one_plan(
    chain: &ChainConfig,
    rewards: &[ValidatorReward],
    validator_address: &str,
) -> Result<WithdrawPlan, WithdrawError> {
    let validator_address = validator_address.trim();
    if !rewards
        .iter()
        .any(|entry| entry.validator_address == validator_address)
    {
        return Err(WithdrawError::UnknownValidator(validator_address.to_string()));
    }

    let validator_addresses = vec![validator_address.to_string()];
    let amount = reward_amount(rewards, &validator_addresses, chain.decimal)?;
    ensure_reward_covers_fee(amount, chain)?;
    Ok(WithdrawPlan {
        scope: WithdrawScope::Single,
        validator_addresses,
        amount,
    })
}
