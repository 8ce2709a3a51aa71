//! Transaction manager
//!
//! A [`Database`] owns the [`Store`] behind a `RwLock`. Readers share the lock.
//! A writer takes the exclusive lock for the whole transaction and mutates a
//! private working copy; [`Tx::commit`] persists that copy and then publishes
//! it, while [`Tx::rollback`] (or dropping the `Tx`) throws it away. Readers
//! therefore never observe a half-applied transaction.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::file_io::{read_json, write_json_atomic};
use super::Store;
use crate::error::{LedgerError, LedgerResult};

/// Shared, optionally file-backed ledger storage
#[derive(Debug)]
pub struct Database {
    path: Option<PathBuf>,
    store: RwLock<Store>,
}

impl Database {
    /// A database that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            path: None,
            store: RwLock::new(Store::default()),
        }
    }

    /// Open the ledger file at `path`; a missing file starts an empty ledger
    pub fn open(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let store: Store = read_json(&path)?;
        debug!(path = %path.display(), "opened ledger");
        Ok(Self {
            path: Some(path),
            store: RwLock::new(store),
        })
    }

    /// The backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Shared read access to committed state
    pub fn read(&self) -> LedgerResult<RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Start a transaction
    pub fn begin(&self) -> LedgerResult<Tx<'_>> {
        let guard = self
            .store
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let working = guard.clone();
        Ok(Tx {
            path: self.path.as_deref(),
            guard,
            working,
        })
    }

    /// Run `f` inside a transaction, committing on `Ok` and rolling back on `Err`
    pub fn exec_tx<T, F>(&self, f: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut Store) -> LedgerResult<T>,
    {
        let mut tx = self.begin()?;
        match f(tx.store()) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                tx.rollback();
                Err(err)
            }
        }
    }
}

/// An open transaction holding the exclusive lock
pub struct Tx<'a> {
    path: Option<&'a Path>,
    guard: RwLockWriteGuard<'a, Store>,
    working: Store,
}

impl<'a> Tx<'a> {
    /// The working copy all writes go to
    pub fn store(&mut self) -> &mut Store {
        &mut self.working
    }

    /// Persist and publish the working copy
    ///
    /// If persisting fails the committed state is left unchanged.
    pub fn commit(self) -> LedgerResult<()> {
        let Tx {
            path,
            mut guard,
            working,
        } = self;

        if let Some(path) = path {
            write_json_atomic(path, &working)?;
        }
        *guard = working;
        debug!("transaction committed");
        Ok(())
    }

    /// Discard the working copy
    pub fn rollback(self) {
        debug!("transaction rolled back");
    }
}
