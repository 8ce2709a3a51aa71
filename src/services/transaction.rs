//! Transaction service
//!
//! Every reference a transaction carries (account, category, payee) must
//! belong to the caller's budget. A categorized transaction makes sure its
//! month exists, with a row for every category, before it is stored.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::auth::BudgetAuthContext;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AccountId, BudgetId, MonthDate, Transaction, TransactionDetails, TransactionId,
    TransactionParams,
};
use crate::services::backfill::ensure_month;
use crate::storage::{Database, Store};

/// Service for transaction management
pub struct TransactionService<'a> {
    db: &'a Database,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Record a new transaction
    pub fn create(&self, ctx: &BudgetAuthContext, params: TransactionParams) -> LedgerResult<Transaction> {
        params.validate()?;
        let (account_id, date) = required_parts(&params)?;

        let txn = self.db.exec_tx(|store| {
            check_references(store, ctx.budget_id(), account_id, &params)?;

            let mut txn = Transaction::new(account_id, params.amount.clone(), date);
            txn.apply(account_id, &params, date);
            if txn.category_id.is_some() {
                ensure_month(store, ctx.budget_id(), MonthDate::from_date(date))?;
            }
            store.transactions.create(txn.clone())?;
            Ok(txn)
        })?;

        info!(
            budget = %ctx.budget_id(),
            transaction = %txn.id,
            amount = %txn.amount,
            "transaction created"
        );
        Ok(txn)
    }

    /// Replace every editable field of a transaction
    pub fn update(
        &self,
        ctx: &BudgetAuthContext,
        id: TransactionId,
        params: TransactionParams,
    ) -> LedgerResult<Transaction> {
        params.validate()?;
        let (account_id, date) = required_parts(&params)?;

        let txn = self.db.exec_tx(|store| {
            let mut txn = store.get_transaction(ctx.budget_id(), id)?;
            check_references(store, ctx.budget_id(), account_id, &params)?;

            txn.apply(account_id, &params, date);
            if txn.category_id.is_some() {
                ensure_month(store, ctx.budget_id(), MonthDate::from_date(date))?;
            }
            store.transactions.update(txn.clone())?;
            Ok(txn)
        })?;

        info!(
            budget = %ctx.budget_id(),
            transaction = %txn.id,
            amount = %txn.amount,
            "transaction updated"
        );
        Ok(txn)
    }

    /// Delete transactions by id
    ///
    /// Ids that do not exist in the budget are skipped. Returns how many were
    /// deleted.
    pub fn delete(&self, ctx: &BudgetAuthContext, ids: &[TransactionId]) -> LedgerResult<usize> {
        let deleted = self
            .db
            .exec_tx(|store| Ok(store.delete_transactions(ctx.budget_id(), ids)))?;

        if deleted < ids.len() {
            debug!(requested = ids.len(), deleted, "skipped transactions outside the budget");
        }
        info!(budget = %ctx.budget_id(), deleted, "transactions deleted");
        Ok(deleted)
    }

    /// Get a transaction with its account, category and payee names
    pub fn get(&self, ctx: &BudgetAuthContext, id: TransactionId) -> LedgerResult<TransactionDetails> {
        let store = self.db.read()?;
        let txn = store.get_transaction(ctx.budget_id(), id)?;
        store.transaction_details(&txn)
    }

    /// Find a transaction by full ID string
    pub fn find(&self, ctx: &BudgetAuthContext, identifier: &str) -> LedgerResult<Option<TransactionDetails>> {
        let Ok(id) = identifier.parse::<TransactionId>() else {
            return Ok(None);
        };
        match self.get(ctx, id) {
            Ok(details) => Ok(Some(details)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Every transaction of the budget, newest first
    pub fn get_all(&self, ctx: &BudgetAuthContext) -> LedgerResult<Vec<TransactionDetails>> {
        let store = self.db.read()?;
        store
            .transactions_for_budget(ctx.budget_id())
            .into_iter()
            .map(|txn| store.transaction_details(txn))
            .collect()
    }
}

/// Account and date after validation has confirmed both are present
fn required_parts(params: &TransactionParams) -> LedgerResult<(AccountId, NaiveDate)> {
    let account_id = params
        .account_id
        .ok_or_else(|| LedgerError::Validation("Account ID is required.".into()))?;
    let date = params
        .date
        .ok_or_else(|| LedgerError::Validation("Date is required.".into()))?;
    Ok((account_id, date))
}

fn check_references(
    store: &Store,
    budget_id: BudgetId,
    account_id: AccountId,
    params: &TransactionParams,
) -> LedgerResult<()> {
    store.accounts.get(budget_id, account_id)?;
    if let Some(category_id) = params.category_id {
        store.categories.get_single_for_budget(budget_id, category_id)?;
    }
    if let Some(payee_id) = params.payee_id {
        store.payees.get(budget_id, payee_id)?;
    }
    Ok(())
}
