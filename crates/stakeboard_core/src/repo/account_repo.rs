//! Watched account repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `accounts` table.
//! - Remove an account's cached LCD payloads together with the account.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `WatchedAccount::validate()` before SQL mutations.
//! - A `(chain, address)` pair is stored at most once; duplicates surface as
//!   `RepoError::Duplicate`, not as raw constraint errors.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::chain::{parse_chain_key, ChainKey};
use crate::db::DbError;
use crate::model::account::{AccountId, AccountValidationError, WatchedAccount};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row, Transaction,
    TransactionBehavior,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ACCOUNT_SELECT_SQL: &str = "SELECT
    uuid,
    chain,
    address,
    label,
    created_at
FROM accounts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by the account and snapshot stores.
#[derive(Debug)]
pub enum RepoError {
    Validation(AccountValidationError),
    Db(DbError),
    NotFound(AccountId),
    Duplicate { chain: ChainKey, address: String },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "account not found: {id}"),
            Self::Duplicate { chain, address } => {
                write!(f, "account {address} is already watched on {chain}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Duplicate { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<AccountValidationError> for RepoError {
    fn from(value: AccountValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for watched accounts.
pub trait AccountRepository {
    fn create_account(&self, account: &WatchedAccount) -> RepoResult<AccountId>;
    fn get_account(&self, id: AccountId) -> RepoResult<Option<WatchedAccount>>;
    fn find_account(&self, chain: ChainKey, address: &str) -> RepoResult<Option<WatchedAccount>>;
    /// Lists accounts in insertion order, optionally for one chain.
    fn list_accounts(&self, chain: Option<ChainKey>) -> RepoResult<Vec<WatchedAccount>>;
    fn update_label(&self, id: AccountId, label: Option<&str>) -> RepoResult<()>;
    /// Deletes the account and its cached LCD payloads in one transaction.
    ///
    /// Returns how many snapshots were removed with it.
    fn delete_account(&self, id: AccountId) -> RepoResult<usize>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn create_account(&self, account: &WatchedAccount) -> RepoResult<AccountId> {
        account.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO accounts (uuid, chain, address, label)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                account.uuid.to_string(),
                account.chain.as_str(),
                account.address.as_str(),
                account.label.as_deref(),
            ],
        );

        match inserted {
            Ok(_) => Ok(account.uuid),
            Err(err) if is_unique_violation(&err) => Err(RepoError::Duplicate {
                chain: account.chain,
                address: account.address.clone(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn get_account(&self, id: AccountId) -> RepoResult<Option<WatchedAccount>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }
        Ok(None)
    }

    fn find_account(&self, chain: ChainKey, address: &str) -> RepoResult<Option<WatchedAccount>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACCOUNT_SELECT_SQL} WHERE chain = ?1 AND address = ?2;"
        ))?;
        let mut rows = stmt.query(params![chain.as_str(), address.trim()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }
        Ok(None)
    }

    fn list_accounts(&self, chain: Option<ChainKey>) -> RepoResult<Vec<WatchedAccount>> {
        let mut sql = format!("{ACCOUNT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(chain) = chain {
            sql.push_str(" AND chain = ?");
            bind_values.push(Value::Text(chain.as_str().to_string()));
        }
        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut accounts = Vec::new();
        while let Some(row) = rows.next()? {
            accounts.push(parse_account_row(row)?);
        }
        Ok(accounts)
    }

    fn update_label(&self, id: AccountId, label: Option<&str>) -> RepoResult<()> {
        let Some(mut account) = self.get_account(id)? else {
            return Err(RepoError::NotFound(id));
        };
        account.label = label
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        account.validate()?;

        self.conn.execute(
            "UPDATE accounts SET label = ?1 WHERE uuid = ?2;",
            params![account.label.as_deref(), id.to_string()],
        )?;
        Ok(())
    }

    fn delete_account(&self, id: AccountId) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let owner: Option<(String, String)> = tx
            .query_row(
                "SELECT chain, address FROM accounts WHERE uuid = ?1;",
                [id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((chain, address)) = owner else {
            return Err(RepoError::NotFound(id));
        };

        tx.execute("DELETE FROM accounts WHERE uuid = ?1;", [id.to_string()])?;
        let removed = tx.execute(
            "DELETE FROM lcd_snapshots WHERE chain = ?1 AND address = ?2;",
            params![chain, address],
        )?;
        tx.commit()?;
        Ok(removed)
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<WatchedAccount> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in accounts.uuid"))
    })?;

    let chain_text: String = row.get("chain")?;
    let chain = parse_chain_key(&chain_text).map_err(|_| {
        RepoError::InvalidData(format!("unknown chain `{chain_text}` in accounts.chain"))
    })?;

    let account = WatchedAccount {
        uuid,
        chain,
        address: row.get("address")?,
        label: row.get("label")?,
        created_at: row.get("created_at")?,
    };
    account.validate()?;
    Ok(account)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _) if inner.code == ErrorCode::ConstraintViolation
    )
}
