//! Staking computations over LCD data.
//!
//! # Responsibility
//! - Aggregate delegator rewards per validator for the chain denom.
//! - Decide whether reward withdrawals are worth their fee.
//! - Project delegations into display rows and validators into picker entries.
//!
//! # Invariants
//! - Everything here is pure: no I/O, no clock, no global state.
//! - Amounts are `Decimal` in base units until converted for display.

pub mod reward;
pub mod rows;
pub mod withdraw;

pub use reward::{
    aggregate_all_denoms, aggregate_rewards, reward_amount, reward_sum, top_rewards, ValidatorReward,
    MAX_CLAIM_ALL_VALIDATORS,
};
pub use rows::{
    active_validator_summaries, build_delegation_rows, total_bonded_tokens, DelegationRow,
    ValidatorSummary,
};
pub use withdraw::{
    claim_all_plan, claim_one_plan, ensure_reward_covers_fee, WithdrawError, WithdrawPlan,
    WithdrawScope,
};
