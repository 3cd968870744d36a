//! "My delegations" table and validator picker projections.

use super::reward::ValidatorReward;
use crate::amount::{self, AmountResult};
use crate::chain::ChainConfig;
use crate::lcd::{DelegationResponse, Validator};
use log::warn;
use rust_decimal::Decimal;
use serde::Serialize;

const PERCENT_PLACES: u32 = 2;

/// One rendered row of the delegation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelegationRow {
    pub operator_address: String,
    pub moniker: String,
    pub icon_url: String,
    pub explorer_url: String,
    /// Validator's bonded tokens in whole display units.
    pub total_tokens: String,
    /// Share of active voting power, percent with two places.
    pub voting_power_percent: String,
    /// Commission rate, percent with two places.
    pub commission_percent: String,
    /// Delegated amount in display units.
    pub delegated: String,
    /// Pending reward in display units, summed over every reward denom.
    pub reward: String,
    pub jailed: bool,
}

/// One entry of the validator picker used to choose a redelegation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatorSummary {
    pub operator_address: String,
    pub moniker: String,
    pub icon_url: String,
    pub explorer_url: String,
    pub total_tokens: String,
    pub voting_power_percent: String,
    pub commission_percent: String,
}

/// Sums tokens of bonded, non-jailed validators.
pub fn total_bonded_tokens(validators: &[Validator]) -> AmountResult<Decimal> {
    validators
        .iter()
        .filter(|validator| validator.is_active())
        .try_fold(Decimal::ZERO, |acc, validator| {
            amount::plus(acc, amount::parse_decimal(&validator.tokens)?)
        })
}

/// Builds one row per delegation whose validator is known.
///
/// `rewards` feeds the row reward column as is; callers pass the all-denom
/// sums from `aggregate_all_denoms`.
///
/// Delegations pointing at validators missing from `validators` are skipped
/// and logged; the rest of the table still renders.
pub fn build_delegation_rows(
    chain: &ChainConfig,
    delegations: &[DelegationResponse],
    rewards: &[ValidatorReward],
    validators: &[Validator],
) -> AmountResult<Vec<DelegationRow>> {
    let total_tokens = total_bonded_tokens(validators)?;
    let mut rows = Vec::with_capacity(delegations.len());

    for item in delegations {
        let validator_address = item.delegation.validator_address.as_str();
        let Some(validator) = validators
            .iter()
            .find(|validator| validator.operator_address == validator_address)
        else {
            warn!(
                "event=delegation_row module=staking status=skipped chain={} reason=unknown_validator",
                chain.path()
            );
            continue;
        };

        let reward = rewards
            .iter()
            .find(|entry| entry.validator_address == validator_address)
            .map_or(Decimal::ZERO, |entry| entry.amount);
        let summary = summarize(chain, validator, total_tokens)?;

        rows.push(DelegationRow {
            operator_address: summary.operator_address,
            moniker: summary.moniker,
            icon_url: summary.icon_url,
            explorer_url: summary.explorer_url,
            total_tokens: summary.total_tokens,
            voting_power_percent: summary.voting_power_percent,
            commission_percent: summary.commission_percent,
            delegated: amount::format_display_amount(&item.balance.amount, chain.decimal)?,
            reward: amount::to_display_amount(reward, chain.decimal)?.to_string(),
            jailed: validator.jailed,
        });
    }

    Ok(rows)
}

/// Lists bonded, non-jailed validators by voting power, largest first.
///
/// `exclude` drops one operator address, typically the redelegation source.
/// Validators with equal tokens keep their LCD order.
pub fn active_validator_summaries(
    chain: &ChainConfig,
    validators: &[Validator],
    exclude: Option<&str>,
) -> AmountResult<Vec<ValidatorSummary>> {
    let total_tokens = total_bonded_tokens(validators)?;
    let mut ranked = Vec::new();
    for validator in validators.iter().filter(|validator| validator.is_active()) {
        if exclude == Some(validator.operator_address.as_str()) {
            continue;
        }
        let tokens = amount::parse_decimal(&validator.tokens)?;
        ranked.push((tokens, summarize(chain, validator, total_tokens)?));
    }
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(ranked.into_iter().map(|(_, summary)| summary).collect())
}

fn summarize(
    chain: &ChainConfig,
    validator: &Validator,
    total_tokens: Decimal,
) -> AmountResult<ValidatorSummary> {
    let tokens = amount::parse_decimal(&validator.tokens)?;
    let commission_rate = amount::parse_decimal(&validator.commission.commission_rates.rate)?;

    Ok(ValidatorSummary {
        operator_address: validator.operator_address.clone(),
        moniker: validator.description.moniker.clone(),
        icon_url: chain.validator_icon_url(&validator.operator_address),
        explorer_url: chain.explorer_validator_url(&validator.operator_address),
        total_tokens: amount::round_fixed(
            amount::times(tokens, amount::pow10(-(chain.decimal as i32))?)?,
            0,
        ),
        voting_power_percent: amount::percent(tokens, total_tokens, PERCENT_PLACES)?,
        commission_percent: amount::round_fixed(
            amount::times(commission_rate, Decimal::ONE_HUNDRED)?,
            PERCENT_PLACES,
        ),
    })
}
