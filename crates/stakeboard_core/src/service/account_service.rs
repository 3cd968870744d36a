//! Watched account use-case service.
//!
//! # Responsibility
//! - Add, list, rename and remove watched accounts.
//! - Drop cached LCD payloads together with the account they belong to.
//!
//! # Invariants
//! - Addresses are validated against the chain prefix before persistence.
//! - Service APIs never bypass repository validation.

use crate::chain::ChainKey;
use crate::model::account::{AccountId, WatchedAccount};
use crate::repo::account_repo::{AccountRepository, RepoError, RepoResult};
use log::info;

pub struct AccountService<A: AccountRepository> {
    accounts: A,
}

impl<A: AccountRepository> AccountService<A> {
    pub fn new(accounts: A) -> Self {
        Self { accounts }
    }

    /// Starts watching `address` on `chain`.
    ///
    /// # Errors
    /// - `RepoError::Validation` for an address of another chain.
    /// - `RepoError::Duplicate` when the pair is already watched.
    pub fn add_account(
        &self,
        chain: ChainKey,
        address: &str,
        label: Option<&str>,
    ) -> RepoResult<WatchedAccount> {
        let account = WatchedAccount::new(chain, address, label)?;
        let id = self.accounts.create_account(&account)?;
        info!("event=account_add module=service status=ok chain={chain} account_id={id}");

        // Read back for the storage-assigned timestamp.
        self.accounts
            .get_account(id)?
            .ok_or(RepoError::NotFound(id))
    }

    pub fn get_account(&self, id: AccountId) -> RepoResult<Option<WatchedAccount>> {
        self.accounts.get_account(id)
    }

    /// Lists accounts for one chain, or all chains when `chain` is `None`.
    pub fn list_accounts(&self, chain: Option<ChainKey>) -> RepoResult<Vec<WatchedAccount>> {
        self.accounts.list_accounts(chain)
    }

    pub fn rename_account(&self, id: AccountId, label: Option<&str>) -> RepoResult<()> {
        self.accounts.update_label(id, label)
    }

    /// Stops watching an account and forgets its cached payloads.
    pub fn remove_account(&self, id: AccountId) -> RepoResult<WatchedAccount> {
        let account = self
            .accounts
            .get_account(id)?
            .ok_or(RepoError::NotFound(id))?;
        let removed = self.accounts.delete_account(id)?;
        info!(
            "event=account_remove module=service status=ok chain={} account_id={id} snapshots_removed={removed}",
            account.chain
        );
        Ok(account)
    }
}
