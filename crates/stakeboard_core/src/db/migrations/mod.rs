//! Schema generations of the local store.
//!
//! Generation 1 holds the watched-account list; generation 2 adds the
//! per-resource LCD snapshot cache. Each step is a released `.sql` file and
//! is never edited afterwards.
//!
//! # Invariants
//! - Steps are numbered 1, 2, 3, ... without gaps.
//! - All pending steps and the new `user_version` commit together.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct Step {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        name: "accounts",
        sql: include_str!("0001_accounts.sql"),
    },
    Step {
        version: 2,
        name: "snapshots",
        sql: include_str!("0002_snapshots.sql"),
    },
];

/// Newest schema generation this build can read and write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`], returning how many steps ran.
///
/// # Errors
/// - `SchemaTooNew` when the store is ahead of this build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = &STEPS[STEPS.partition_point(|step| step.version <= found)..];
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={found} to={supported} steps={}",
        pending
            .iter()
            .map(|step| step.name)
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(pending.len())
}
