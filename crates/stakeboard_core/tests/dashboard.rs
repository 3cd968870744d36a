mod common;

use common::{valoper, FakeLcd, DELEGATOR};
use stakeboard_core::db::open_db_in_memory;
use stakeboard_core::lcd::Coin;
use stakeboard_core::repo::snapshot_repo::{SnapshotResource, CHAIN_SCOPE};
use stakeboard_core::staking::WithdrawScope;
use stakeboard_core::{
    ChainKey, ClaimAllOutcome, DashboardError, DashboardService, DataSource, FetchMode, LcdError,
    SnapshotRepository, SqliteSnapshotRepository, WithdrawError,
};

const FETCHED_AT: i64 = 1_700_000_000_000;

fn fixed_clock() -> i64 {
    FETCHED_AT
}

#[test]
fn live_load_builds_rows_totals_and_claim_plan() {
    let conn = open_db_in_memory().unwrap();
    let lcd = FakeLcd::with_rewards(&["1500000.5", "2500000.25", "10"]);
    let service =
        DashboardService::new(lcd, SqliteSnapshotRepository::new(&conn)).with_clock(fixed_clock);

    let view = service
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
        .unwrap();

    assert_eq!(view.source, DataSource::Live { fetched_at: FETCHED_AT });
    assert_eq!(view.symbol, "ATOM");
    assert_eq!(view.available_balance, "2.500000");
    assert_eq!(view.total_delegated, "3.000000");
    assert_eq!(view.total_reward, "4.000011");

    assert_eq!(view.rows.len(), 3);
    let first = &view.rows[0];
    assert_eq!(first.operator_address, valoper(0));
    assert_eq!(first.moniker, "validator-0");
    // 1500000.5 uatom plus the 999999 ibc coin every fake validator pays.
    assert_eq!(first.reward, "2.500000");
    assert_eq!(first.delegated, "1.000000");
    assert_eq!(first.total_tokens, "1000000");
    assert_eq!(first.voting_power_percent, "33.33");
    assert_eq!(first.commission_percent, "5.00");

    match &view.claim_all {
        ClaimAllOutcome::Ready { plan } => {
            assert_eq!(plan.scope, WithdrawScope::All);
            assert_eq!(
                plan.validator_addresses,
                vec![valoper(1), valoper(0), valoper(2)]
            );
            assert_eq!(plan.amount_text(), "4.000011");
        }
        other => panic!("unexpected claim-all outcome: {other:?}"),
    }
}

#[test]
fn claim_all_is_capped_at_ten_largest_rewards() {
    let conn = open_db_in_memory().unwrap();
    let amounts: Vec<String> = (1..=12).map(|i| format!("{}", i * 1_000_000)).collect();
    let amount_refs: Vec<&str> = amounts.iter().map(String::as_str).collect();
    let service = DashboardService::new(
        FakeLcd::with_rewards(&amount_refs),
        SqliteSnapshotRepository::new(&conn),
    );

    let view = service
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
        .unwrap();

    let ClaimAllOutcome::Ready { plan } = &view.claim_all else {
        panic!("claim-all should be available");
    };
    assert_eq!(plan.validator_addresses.len(), 10);
    assert_eq!(plan.validator_addresses[0], valoper(11));
    assert!(!plan.validator_addresses.contains(&valoper(0)));
    assert!(!plan.validator_addresses.contains(&valoper(1)));
    // 3 + 4 + ... + 12 ATOM
    assert_eq!(plan.amount_text(), "75.000000");
    assert_eq!(view.total_reward, "78.000000");
}

#[test]
fn reward_below_fee_blocks_claim_all_but_equal_fee_passes() {
    let conn = open_db_in_memory().unwrap();
    let below = DashboardService::new(
        FakeLcd::with_rewards(&["1000", "2000"]),
        SqliteSnapshotRepository::new(&conn),
    )
    .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
    .unwrap();
    assert_eq!(
        below.claim_all,
        ClaimAllOutcome::RewardBelowFee {
            reward: "0.003000".to_string(),
            fee: "0.005".to_string(),
        }
    );

    let equal = DashboardService::new(
        FakeLcd::with_rewards(&["5000"]),
        SqliteSnapshotRepository::new(&conn),
    )
    .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
    .unwrap();
    assert!(matches!(equal.claim_all, ClaimAllOutcome::Ready { .. }));
}

#[test]
fn account_without_delegations_has_no_rewards_to_claim() {
    let conn = open_db_in_memory().unwrap();
    let view = DashboardService::new(FakeLcd::with_rewards(&[]), SqliteSnapshotRepository::new(&conn))
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
        .unwrap();

    assert!(view.rows.is_empty());
    assert_eq!(view.claim_all, ClaimAllOutcome::NoRewards);
    assert_eq!(view.total_reward, "0.000000");
}

#[test]
fn delegation_to_unknown_validator_is_skipped() {
    let conn = open_db_in_memory().unwrap();
    let mut lcd = FakeLcd::with_rewards(&["100", "200"]);
    lcd.validators.retain(|validator| validator.operator_address != valoper(0));

    let view = DashboardService::new(lcd, SqliteSnapshotRepository::new(&conn))
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
        .unwrap();

    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].operator_address, valoper(1));
    assert_eq!(view.rows[0].voting_power_percent, "100.00");
}

#[test]
fn network_failure_falls_back_to_cached_snapshots() {
    let conn = open_db_in_memory().unwrap();
    let live = DashboardService::new(
        FakeLcd::with_rewards(&["1500000", "2500000"]),
        SqliteSnapshotRepository::new(&conn),
    )
    .with_clock(fixed_clock)
    .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
    .unwrap();

    let offline = DashboardService::new(FakeLcd::offline(), SqliteSnapshotRepository::new(&conn));
    let cached = offline
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::NetworkWithCacheFallback)
        .unwrap();

    assert_eq!(cached.source, DataSource::Cached { fetched_at: FETCHED_AT });
    assert_eq!(cached.rows, live.rows);
    assert_eq!(cached.claim_all, live.claim_all);

    let cache_only = offline
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::CacheOnly)
        .unwrap();
    assert!(cache_only.source.is_cached());

    let err = offline
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
        .unwrap_err();
    assert!(matches!(err, DashboardError::Lcd(LcdError::Status { status: 503, .. })));
}

#[test]
fn missing_cache_is_reported_per_mode() {
    let conn = open_db_in_memory().unwrap();
    let offline = DashboardService::new(FakeLcd::offline(), SqliteSnapshotRepository::new(&conn));

    let err = offline
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::CacheOnly)
        .unwrap_err();
    assert!(matches!(err, DashboardError::NoCachedData { chain: ChainKey::Cosmos, .. }));

    let err = offline
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::NetworkWithCacheFallback)
        .unwrap_err();
    assert!(matches!(err, DashboardError::Lcd(_)));
}

#[test]
fn validator_set_is_cached_per_chain() {
    let conn = open_db_in_memory().unwrap();
    DashboardService::new(FakeLcd::with_rewards(&["1"]), SqliteSnapshotRepository::new(&conn))
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
        .unwrap();

    let repo = SqliteSnapshotRepository::new(&conn);
    assert!(repo
        .get_snapshot(ChainKey::Cosmos, CHAIN_SCOPE, SnapshotResource::Validators)
        .unwrap()
        .is_some());
    assert!(repo
        .get_snapshot(ChainKey::Cosmos, DELEGATOR, SnapshotResource::Validators)
        .unwrap()
        .is_none());
    assert!(repo
        .get_snapshot(ChainKey::Cosmos, DELEGATOR, SnapshotResource::Rewards)
        .unwrap()
        .is_some());
}

#[test]
fn address_of_another_chain_is_rejected_before_any_fetch() {
    let conn = open_db_in_memory().unwrap();
    let service = DashboardService::new(FakeLcd::offline(), SqliteSnapshotRepository::new(&conn));

    let err = service
        .load(ChainKey::Juno, DELEGATOR, FetchMode::Network)
        .unwrap_err();
    assert!(matches!(err, DashboardError::Address(_)));
}

#[test]
fn view_plans_single_validator_claims() {
    let conn = open_db_in_memory().unwrap();
    let view = DashboardService::new(
        FakeLcd::with_rewards(&["1000", "7000"]),
        SqliteSnapshotRepository::new(&conn),
    )
    .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
    .unwrap();

    let plan = view.claim_one_plan(&valoper(1)).unwrap();
    assert_eq!(plan.scope, WithdrawScope::Single);
    assert_eq!(plan.validator_addresses, vec![valoper(1)]);
    assert_eq!(plan.amount_text(), "0.007000");

    assert!(matches!(
        view.claim_one_plan(&valoper(0)).unwrap_err(),
        WithdrawError::RewardBelowFee { .. }
    ));
    assert!(matches!(
        view.claim_one_plan(&valoper(5)).unwrap_err(),
        WithdrawError::UnknownValidator(_)
    ));
}

#[test]
fn row_reward_adds_every_denom_while_claims_use_staking_denom() {
    let conn = open_db_in_memory().unwrap();
    let mut lcd = FakeLcd::with_rewards(&["1000000"]);
    lcd.rewards.rewards[0].reward = vec![
        Coin {
            denom: "uatom".to_string(),
            amount: "1000000".to_string(),
        },
        Coin {
            denom: "ibc/ABC".to_string(),
            amount: "2000000".to_string(),
        },
    ];

    let view = DashboardService::new(lcd, SqliteSnapshotRepository::new(&conn))
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
        .unwrap();

    assert_eq!(view.rows[0].reward, "3.000000");
    assert_eq!(view.total_reward, "1.000000");
    let ClaimAllOutcome::Ready { plan } = &view.claim_all else {
        panic!("claim-all should be available");
    };
    assert_eq!(plan.amount_text(), "1.000000");
}

#[test]
fn validator_list_ranks_targets_and_falls_back_to_cache() {
    let conn = open_db_in_memory().unwrap();
    let mut lcd = FakeLcd::with_rewards(&["1", "2", "3", "4"]);
    lcd.validators[2].tokens = "3000000000000".to_string();
    lcd.validators[3].jailed = true;

    let live = DashboardService::new(lcd, SqliteSnapshotRepository::new(&conn))
        .with_clock(fixed_clock)
        .validator_list(ChainKey::Cosmos, Some(&valoper(1)), FetchMode::Network)
        .unwrap();
    let order: Vec<_> = live
        .validators
        .iter()
        .map(|validator| validator.operator_address.clone())
        .collect();
    assert_eq!(order, vec![valoper(2), valoper(0)]);
    assert_eq!(live.validators[0].voting_power_percent, "60.00");
    assert_eq!(live.source, DataSource::Live { fetched_at: FETCHED_AT });

    let offline = DashboardService::new(FakeLcd::offline(), SqliteSnapshotRepository::new(&conn));
    let cached = offline
        .validator_list(ChainKey::Cosmos, None, FetchMode::NetworkWithCacheFallback)
        .unwrap();
    assert_eq!(cached.source, DataSource::Cached { fetched_at: FETCHED_AT });
    assert_eq!(cached.validators.len(), 3);

    let err = offline
        .validator_list(ChainKey::Juno, None, FetchMode::CacheOnly)
        .unwrap_err();
    assert!(matches!(err, DashboardError::NoCachedValidators { chain: ChainKey::Juno }));

    let err = offline
        .validator_list(
            ChainKey::Cosmos,
            Some("junovaloper1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5hdmv4a"),
            FetchMode::CacheOnly,
        )
        .unwrap_err();
    assert!(matches!(err, DashboardError::Address(_)));
}

fn later_clock() -> i64 {
    FETCHED_AT + 60_000
}

#[test]
fn failed_cache_write_keeps_previous_snapshot_set() {
    let conn = open_db_in_memory().unwrap();
    let first = DashboardService::new(
        FakeLcd::with_rewards(&["1000000"]),
        SqliteSnapshotRepository::new(&conn),
    )
    .with_clock(fixed_clock)
    .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
    .unwrap();

    conn.execute_batch(
        "CREATE TRIGGER reject_balance_insert BEFORE INSERT ON lcd_snapshots
         WHEN NEW.resource = 'balances'
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;
         CREATE TRIGGER reject_balance_update BEFORE UPDATE ON lcd_snapshots
         WHEN NEW.resource = 'balances'
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();

    let second = DashboardService::new(
        FakeLcd::with_rewards(&["9000000", "8000000"]),
        SqliteSnapshotRepository::new(&conn),
    )
    .with_clock(later_clock)
    .load(ChainKey::Cosmos, DELEGATOR, FetchMode::Network)
    .unwrap();
    assert_eq!(second.rows.len(), 2);

    let cached = DashboardService::new(FakeLcd::offline(), SqliteSnapshotRepository::new(&conn))
        .load(ChainKey::Cosmos, DELEGATOR, FetchMode::CacheOnly)
        .unwrap();
    assert_eq!(cached.source, DataSource::Cached { fetched_at: FETCHED_AT });
    assert_eq!(cached.rows, first.rows);

    let repo = SqliteSnapshotRepository::new(&conn);
    let rewards = repo
        .get_snapshot(ChainKey::Cosmos, DELEGATOR, SnapshotResource::Rewards)
        .unwrap()
        .unwrap();
    assert_eq!(rewards.fetched_at, FETCHED_AT);
}
