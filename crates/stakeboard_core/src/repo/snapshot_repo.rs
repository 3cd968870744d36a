//! Cached LCD payloads.
//!
//! # Responsibility
//! - Persist the last successful LCD response per `(chain, address, resource)`.
//! - Serve those payloads back when the network is unavailable.
//!
//! # Invariants
//! - One row per key; a newer fetch replaces the older payload.
//! - Payloads are stored as JSON text and are only decoded by callers.
//! - Chain-wide resources (validator sets) use an empty address.
//! - A batch written with `put_snapshots` lands whole or not at all.

use crate::chain::{parse_chain_key, ChainKey};
use crate::repo::account_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Address key used for payloads that do not belong to one account.
pub const CHAIN_SCOPE: &str = "";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotResource {
    Delegations,
    Rewards,
    Validators,
    Balances,
}

impl SnapshotResource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delegations => "delegations",
            Self::Rewards => "rewards",
            Self::Validators => "validators",
            Self::Balances => "balances",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "delegations" => Some(Self::Delegations),
            "rewards" => Some(Self::Rewards),
            "validators" => Some(Self::Validators),
            "balances" => Some(Self::Balances),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub chain: ChainKey,
    pub address: String,
    pub resource: SnapshotResource,
    pub payload: String,
    /// Unix epoch milliseconds of the fetch that produced `payload`.
    pub fetched_at: i64,
}

impl Snapshot {
    pub fn decode<T: DeserializeOwned>(&self) -> RepoResult<T> {
        serde_json::from_str(&self.payload).map_err(|err| {
            RepoError::InvalidData(format!(
                "cached {} payload for {}/{} is not decodable: {err}",
                self.resource.as_str(),
                self.chain,
                self.address
            ))
        })
    }
}

/// One payload of a batch stored by `SnapshotRepository::put_snapshots`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotWrite<'a> {
    pub address: &'a str,
    pub resource: SnapshotResource,
    pub payload: String,
}

impl<'a> SnapshotWrite<'a> {
    /// Serializes `value` as the payload of `resource` for `address`.
    pub fn json<T: Serialize>(
        address: &'a str,
        resource: SnapshotResource,
        value: &T,
    ) -> RepoResult<Self> {
        Ok(Self {
            address,
            resource,
            payload: encode_payload(resource, value)?,
        })
    }
}

pub trait SnapshotRepository {
    fn put_snapshot(
        &self,
        chain: ChainKey,
        address: &str,
        resource: SnapshotResource,
        payload: &str,
        fetched_at: i64,
    ) -> RepoResult<()>;
    fn get_snapshot(
        &self,
        chain: ChainKey,
        address: &str,
        resource: SnapshotResource,
    ) -> RepoResult<Option<Snapshot>>;
    /// Stores every write of one fetch under the same `fetched_at`.
    ///
    /// Either all writes are persisted or none are.
    fn put_snapshots(
        &self,
        chain: ChainKey,
        writes: &[SnapshotWrite<'_>],
        fetched_at: i64,
    ) -> RepoResult<()>;
    /// Removes every payload cached for `address` on `chain`; returns the count.
    fn delete_snapshots(&self, chain: ChainKey, address: &str) -> RepoResult<usize>;

    /// Serializes `value` and stores it under the given key.
    fn put_json<T: Serialize>(
        &self,
        chain: ChainKey,
        address: &str,
        resource: SnapshotResource,
        value: &T,
        fetched_at: i64,
    ) -> RepoResult<()> {
        let payload = encode_payload(resource, value)?;
        self.put_snapshot(chain, address, resource, &payload, fetched_at)
    }
}

fn encode_payload<T: Serialize>(resource: SnapshotResource, value: &T) -> RepoResult<String> {
    serde_json::to_string(value).map_err(|err| {
        RepoError::InvalidData(format!(
            "{} payload is not serializable: {err}",
            resource.as_str()
        ))
    })
}

pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn put_snapshot(
        &self,
        chain: ChainKey,
        address: &str,
        resource: SnapshotResource,
        payload: &str,
        fetched_at: i64,
    ) -> RepoResult<()> {
        upsert_snapshot(self.conn, chain, address, resource, payload, fetched_at)
    }

    fn put_snapshots(
        &self,
        chain: ChainKey,
        writes: &[SnapshotWrite<'_>],
        fetched_at: i64,
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for write in writes {
            upsert_snapshot(
                &tx,
                chain,
                write.address,
                write.resource,
                &write.payload,
                fetched_at,
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_snapshot(
        &self,
        chain: ChainKey,
        address: &str,
        resource: SnapshotResource,
    ) -> RepoResult<Option<Snapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT chain, address, resource, payload, fetched_at
             FROM lcd_snapshots
             WHERE chain = ?1 AND address = ?2 AND resource = ?3;",
        )?;
        let mut rows = stmt.query(params![chain.as_str(), address, resource.as_str()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_snapshot_row(row)?));
        }
        Ok(None)
    }

    fn delete_snapshots(&self, chain: ChainKey, address: &str) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM lcd_snapshots WHERE chain = ?1 AND address = ?2;",
            params![chain.as_str(), address],
        )?;
        Ok(removed)
    }
}

fn upsert_snapshot(
    conn: &Connection,
    chain: ChainKey,
    address: &str,
    resource: SnapshotResource,
    payload: &str,
    fetched_at: i64,
) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO lcd_snapshots (chain, address, resource, payload, fetched_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT (chain, address, resource) DO UPDATE SET
            payload = excluded.payload,
            fetched_at = excluded.fetched_at;",
        params![chain.as_str(), address, resource.as_str(), payload, fetched_at],
    )?;
    Ok(())
}

fn parse_snapshot_row(row: &Row<'_>) -> RepoResult<Snapshot> {
    let chain_text: String = row.get("chain")?;
    let chain = parse_chain_key(&chain_text).map_err(|_| {
        RepoError::InvalidData(format!("unknown chain `{chain_text}` in lcd_snapshots.chain"))
    })?;
    let resource_text: String = row.get("resource")?;
    let resource = SnapshotResource::parse(&resource_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "unknown resource `{resource_text}` in lcd_snapshots.resource"
        ))
    })?;

    Ok(Snapshot {
        chain,
        address: row.get("address")?,
        resource,
        payload: row.get("payload")?,
        fetched_at: row.get("fetched_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        SnapshotRepository, SnapshotResource, SnapshotWrite, SqliteSnapshotRepository,
        CHAIN_SCOPE,
    };
    use crate::chain::ChainKey;
    use crate::db::open_db_in_memory;
    use crate::lcd::Coin;

    const ADDRESS: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";

    #[test]
    fn newer_payload_replaces_older_one() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::new(&conn);

        repo.put_snapshot(ChainKey::Cosmos, ADDRESS, SnapshotResource::Balances, "[]", 1)
            .unwrap();
        let coins = vec![Coin {
            denom: "uatom".to_string(),
            amount: "42".to_string(),
        }];
        repo.put_json(ChainKey::Cosmos, ADDRESS, SnapshotResource::Balances, &coins, 2)
            .unwrap();

        let snapshot = repo
            .get_snapshot(ChainKey::Cosmos, ADDRESS, SnapshotResource::Balances)
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.fetched_at, 2);
        assert_eq!(snapshot.decode::<Vec<Coin>>().unwrap(), coins);
    }

    #[test]
    fn delete_only_touches_one_address() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::new(&conn);
        repo.put_snapshot(ChainKey::Cosmos, ADDRESS, SnapshotResource::Rewards, "{}", 1)
            .unwrap();
        repo.put_snapshot(ChainKey::Cosmos, CHAIN_SCOPE, SnapshotResource::Validators, "[]", 1)
            .unwrap();

        assert_eq!(repo.delete_snapshots(ChainKey::Cosmos, ADDRESS).unwrap(), 1);
        assert!(repo
            .get_snapshot(ChainKey::Cosmos, CHAIN_SCOPE, SnapshotResource::Validators)
            .unwrap()
            .is_some());
    }

    #[test]
    fn batch_write_is_all_or_nothing() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::new(&conn);
        conn.execute_batch(
            "CREATE TRIGGER reject_balances BEFORE INSERT ON lcd_snapshots
             WHEN NEW.resource = 'balances'
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .unwrap();

        let writes = vec![
            SnapshotWrite::json(ADDRESS, SnapshotResource::Rewards, &Vec::<Coin>::new()).unwrap(),
            SnapshotWrite::json(CHAIN_SCOPE, SnapshotResource::Validators, &Vec::<Coin>::new())
                .unwrap(),
            SnapshotWrite::json(ADDRESS, SnapshotResource::Balances, &Vec::<Coin>::new()).unwrap(),
        ];
        assert!(repo.put_snapshots(ChainKey::Cosmos, &writes, 7).is_err());
        assert!(repo
            .get_snapshot(ChainKey::Cosmos, ADDRESS, SnapshotResource::Rewards)
            .unwrap()
            .is_none());

        conn.execute_batch("DROP TRIGGER reject_balances;").unwrap();
        repo.put_snapshots(ChainKey::Cosmos, &writes, 7).unwrap();
        let stored = repo
            .get_snapshot(ChainKey::Cosmos, CHAIN_SCOPE, SnapshotResource::Validators)
            .unwrap()
            .unwrap();
        assert_eq!(stored.fetched_at, 7);
    }
}
