//! Transaction repository
//!
//! Transactions carry no budget of their own; they belong to a budget through
//! their account. Budget-scoped queries therefore live on
//! [`Store`](super::Store), which can join against accounts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, CategoryId, Transaction, TransactionId};

/// Transactions keyed by id with account and category indexes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Transaction>", into = "Vec<Transaction>")]
pub struct TransactionRepository {
    data: HashMap<TransactionId, Transaction>,
    /// Index: account_id -> transaction_ids
    by_account: HashMap<AccountId, Vec<TransactionId>>,
    /// Index: category_id -> transaction_ids
    by_category: HashMap<CategoryId, Vec<TransactionId>>,
}

impl TransactionRepository {
    fn index(&mut self, txn: &Transaction) {
        self.by_account.entry(txn.account_id).or_default().push(txn.id);
        if let Some(category_id) = txn.category_id {
            self.by_category.entry(category_id).or_default().push(txn.id);
        }
    }

    fn unindex(&mut self, txn: &Transaction) {
        if let Some(ids) = self.by_account.get_mut(&txn.account_id) {
            ids.retain(|id| *id != txn.id);
        }
        if let Some(category_id) = txn.category_id {
            if let Some(ids) = self.by_category.get_mut(&category_id) {
                ids.retain(|id| *id != txn.id);
            }
        }
    }

    pub fn create(&mut self, txn: Transaction) -> LedgerResult<()> {
        if self.data.contains_key(&txn.id) {
            return Err(LedgerError::Duplicate {
                entity_type: "Transaction",
                identifier: txn.id.to_string(),
            });
        }
        self.index(&txn);
        self.data.insert(txn.id, txn);
        Ok(())
    }

    /// Replace a stored transaction, keeping the indexes in step
    pub fn update(&mut self, txn: Transaction) -> LedgerResult<()> {
        let old = self
            .data
            .remove(&txn.id)
            .ok_or_else(|| LedgerError::transaction_not_found(txn.id))?;
        self.unindex(&old);
        self.index(&txn);
        self.data.insert(txn.id, txn);
        Ok(())
    }

    /// Remove a transaction, returning it if it existed
    pub fn delete(&mut self, id: TransactionId) -> Option<Transaction> {
        let txn = self.data.remove(&id)?;
        self.unindex(&txn);
        Some(txn)
    }

    pub fn find(&self, id: TransactionId) -> Option<&Transaction> {
        self.data.get(&id)
    }

    /// Transactions recorded against an account
    pub fn get_by_account(&self, account_id: AccountId) -> Vec<&Transaction> {
        self.by_account
            .get(&account_id)
            .map(|ids| ids.iter().filter_map(|id| self.data.get(id)).collect())
            .unwrap_or_default()
    }

    /// Transactions categorized under a category
    pub fn get_by_category(&self, category_id: CategoryId) -> Vec<&Transaction> {
        self.by_category
            .get(&category_id)
            .map(|ids| ids.iter().filter_map(|id| self.data.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }
}

impl From<Vec<Transaction>> for TransactionRepository {
    fn from(list: Vec<Transaction>) -> Self {
        let mut repo = Self::default();
        for txn in list {
            repo.index(&txn);
            repo.data.insert(txn.id, txn);
        }
        repo
    }
}

impl From<TransactionRepository> for Vec<Transaction> {
    fn from(repo: TransactionRepository) -> Self {
        let mut list: Vec<_> = repo.data.into_values().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        list
    }
}
