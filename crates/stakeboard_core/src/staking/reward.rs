//! Per-validator reward aggregation.

use crate::amount::{self, AmountResult};
use crate::lcd::{Coin, DelegatorReward};
use rust_decimal::Decimal;
use serde::Serialize;

/// Upper bound of validators included in one "claim all" request.
pub const MAX_CLAIM_ALL_VALIDATORS: usize = 10;

/// Reward owed by one validator, in base units of the chain denom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatorReward {
    pub validator_address: String,
    pub amount: Decimal,
}

/// Sums each validator's reward coins of `denom`.
///
/// Output keeps input order. Coins of other denoms (IBC rewards, fee
/// tokens) are ignored; a validator without a matching coin yields zero.
/// Withdrawal plans and totals are built from this list.
pub fn aggregate_rewards(
    rewards: &[DelegatorReward],
    denom: &str,
) -> AmountResult<Vec<ValidatorReward>> {
    aggregate_matching(rewards, |coin| coin.denom == denom)
}

/// Sums every reward coin of each validator regardless of denom.
///
/// This is the figure the delegation table shows per row.
pub fn aggregate_all_denoms(rewards: &[DelegatorReward]) -> AmountResult<Vec<ValidatorReward>> {
    aggregate_matching(rewards, |_| true)
}

fn aggregate_matching(
    rewards: &[DelegatorReward],
    keep: impl Fn(&Coin) -> bool,
) -> AmountResult<Vec<ValidatorReward>> {
    rewards
        .iter()
        .map(|entry| {
            let amount = entry
                .reward
                .iter()
                .filter(|coin| keep(coin))
                .try_fold(Decimal::ZERO, |acc, coin| {
                    amount::plus(acc, amount::parse_decimal(&coin.amount)?)
                })?;
            Ok(ValidatorReward {
                validator_address: entry.validator_address.clone(),
                amount,
            })
        })
        .collect()
}

/// Returns the `limit` largest rewards, largest first.
///
/// The sort is stable, so validators with equal rewards keep their input
/// order.
pub fn top_rewards(rewards: &[ValidatorReward], limit: usize) -> Vec<ValidatorReward> {
    let mut sorted = rewards.to_vec();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.truncate(limit);
    sorted
}

/// Sums rewards of the listed validators, in base units.
pub fn reward_sum(rewards: &[ValidatorReward], validator_addresses: &[String]) -> AmountResult<Decimal> {
    rewards
        .iter()
        .filter(|entry| validator_addresses.contains(&entry.validator_address))
        .try_fold(Decimal::ZERO, |acc, entry| amount::plus(acc, entry.amount))
}

/// Sums rewards of the listed validators and converts to display units.
pub fn reward_amount(
    rewards: &[ValidatorReward],
    validator_addresses: &[String],
    decimal: u32,
) -> AmountResult<Decimal> {
    amount::to_display_amount(reward_sum(rewards, validator_addresses)?, decimal)
}

#[cfg(test)]
mod tests {
    use super::{
        aggregate_all_denoms, aggregate_rewards, reward_amount, top_rewards, ValidatorReward,
    };
    use crate::lcd::{Coin, DelegatorReward};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn coin(denom: &str, amount: &str) -> Coin {
        Coin {
            denom: denom.to_string(),
            amount: amount.to_string(),
        }
    }

    fn entry(address: &str, amount: &str) -> ValidatorReward {
        ValidatorReward {
            validator_address: address.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
        }
    }

    #[test]
    fn aggregate_filters_by_denom() {
        let rewards = vec![
            DelegatorReward {
                validator_address: "val-a".to_string(),
                reward: vec![
                    coin("uatom", "100.5"),
                    coin("ibc/27394FB092D2ECCD", "999"),
                    coin("uatom", "0.5"),
                ],
            },
            DelegatorReward {
                validator_address: "val-b".to_string(),
                reward: vec![coin("ibc/27394FB092D2ECCD", "5")],
            },
        ];

        let aggregated = aggregate_rewards(&rewards, "uatom").unwrap();
        assert_eq!(aggregated, vec![entry("val-a", "101"), entry("val-b", "0")]);
    }

    #[test]
    fn all_denom_aggregate_adds_every_coin() {
        let rewards = vec![
            DelegatorReward {
                validator_address: "val-a".to_string(),
                reward: vec![coin("uatom", "1000000"), coin("ibc/ABC", "2000000")],
            },
            DelegatorReward {
                validator_address: "val-b".to_string(),
                reward: Vec::new(),
            },
        ];

        let aggregated = aggregate_all_denoms(&rewards).unwrap();
        assert_eq!(aggregated, vec![entry("val-a", "3000000"), entry("val-b", "0")]);
        assert_eq!(
            aggregate_rewards(&rewards, "uatom").unwrap()[0].amount,
            Decimal::from(1_000_000)
        );
    }

    #[test]
    fn aggregate_rejects_garbage_amounts() {
        let rewards = vec![DelegatorReward {
            validator_address: "val-a".to_string(),
            reward: vec![coin("uatom", "NaN")],
        }];
        assert!(aggregate_rewards(&rewards, "uatom").is_err());
    }

    #[test]
    fn top_rewards_sorts_descending_and_caps() {
        let rewards: Vec<_> = (0..15)
            .map(|idx| entry(&format!("val-{idx}"), &idx.to_string()))
            .collect();
        let top = top_rewards(&rewards, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].validator_address, "val-14");
        assert_eq!(top[9].validator_address, "val-5");
    }

    #[test]
    fn top_rewards_keeps_input_order_on_ties() {
        let rewards = vec![entry("first", "1"), entry("second", "1"), entry("big", "2")];
        let top = top_rewards(&rewards, 10);
        let order: Vec<_> = top.iter().map(|r| r.validator_address.as_str()).collect();
        assert_eq!(order, vec!["big", "first", "second"]);
    }

    #[test]
    fn reward_amount_sums_selected_validators_in_display_units() {
        let rewards = vec![
            entry("a", "1500000.4"),
            entry("b", "250000"),
            entry("c", "9999999"),
        ];
        let selected = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            reward_amount(&rewards, &selected, 6).unwrap().to_string(),
            "1.750000"
        );
    }
}
