//! Storage layer for the ledger
//!
//! [`Store`] holds one repository per entity plus the queries that join across
//! them. [`Database`] wraps a store behind a lock, hands out read guards and
//! all-or-nothing transactions, and persists committed state as one JSON file.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod database;
pub mod file_io;
pub mod month_categories;
pub mod months;
pub mod payees;
pub mod transactions;
pub mod users;

pub use accounts::AccountRepository;
pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use database::{Database, Tx};
pub use file_io::{read_json, write_json_atomic};
pub use month_categories::MonthCategoryRepository;
pub use months::MonthRepository;
pub use payees::PayeeRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AccountId, AccountWithBalance, Amount, BudgetId, CategoryId, MonthDate, Transaction,
    TransactionDetails, TransactionId,
};

/// Every repository of the ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    pub users: UserRepository,
    pub budgets: BudgetRepository,
    pub accounts: AccountRepository,
    pub categories: CategoryRepository,
    pub months: MonthRepository,
    pub month_categories: MonthCategoryRepository,
    pub payees: PayeeRepository,
    pub transactions: TransactionRepository,
}

impl Store {
    fn budget_accounts(&self, budget_id: BudgetId) -> Vec<AccountId> {
        self.accounts
            .get_for_budget(budget_id)
            .into_iter()
            .map(|a| a.id)
            .collect()
    }

    /// Every transaction of a budget, newest first
    pub fn transactions_for_budget(&self, budget_id: BudgetId) -> Vec<&Transaction> {
        let mut list: Vec<_> = self
            .budget_accounts(budget_id)
            .into_iter()
            .flat_map(|account_id| self.transactions.get_by_account(account_id))
            .collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        list
    }

    /// Get a transaction of the budget; transactions of other budgets are not found
    pub fn get_transaction(&self, budget_id: BudgetId, id: TransactionId) -> LedgerResult<Transaction> {
        self.transactions
            .find(id)
            .filter(|t| {
                self.accounts
                    .find(t.account_id)
                    .is_some_and(|a| a.budget_id == budget_id)
            })
            .cloned()
            .ok_or_else(|| LedgerError::transaction_not_found(id))
    }

    /// Attach account, category, and payee names to a transaction
    pub fn transaction_details(&self, txn: &Transaction) -> LedgerResult<TransactionDetails> {
        let account = self.accounts.find(txn.account_id).ok_or_else(|| {
            LedgerError::Consistency(format!(
                "transaction {} refers to missing account {}",
                txn.id, txn.account_id
            ))
        })?;

        Ok(TransactionDetails {
            transaction: txn.clone(),
            account_name: account.name.clone(),
            category_name: txn
                .category_id
                .and_then(|id| self.categories.find(id))
                .map(|c| c.name.clone()),
            payee_name: txn
                .payee_id
                .and_then(|id| self.payees.find(id))
                .map(|p| p.name.clone()),
        })
    }

    /// Delete the given transactions of a budget; ids outside it are ignored
    pub fn delete_transactions(&mut self, budget_id: BudgetId, ids: &[TransactionId]) -> usize {
        let owned: HashSet<AccountId> = self.budget_accounts(budget_id).into_iter().collect();
        let mut deleted = 0;
        for id in ids {
            let in_budget = self
                .transactions
                .find(*id)
                .is_some_and(|t| owned.contains(&t.account_id));
            if in_budget && self.transactions.delete(*id).is_some() {
                deleted += 1;
            }
        }
        deleted
    }

    /// Sum of income-category transactions dated within `[begin, end]`
    pub fn get_income_between(
        &self,
        budget_id: BudgetId,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<Amount> {
        let income = self
            .transactions_for_budget(budget_id)
            .into_iter()
            .filter(|t| t.date >= begin && t.date <= end)
            .filter(|t| t.category_id.is_some_and(|c| self.categories.is_income(c)))
            .map(|t| &t.amount);
        Ok(Amount::sum(income)?)
    }

    fn sum_by_category<F>(&self, budget_id: BudgetId, include: F) -> LedgerResult<HashMap<CategoryId, Amount>>
    where
        F: Fn(NaiveDate) -> bool,
    {
        let mut grouped: HashMap<CategoryId, Vec<&Amount>> = HashMap::new();
        for txn in self.transactions_for_budget(budget_id) {
            if let Some(category_id) = txn.category_id {
                if include(txn.date) {
                    grouped.entry(category_id).or_default().push(&txn.amount);
                }
            }
        }

        grouped
            .into_iter()
            .map(|(category_id, amounts)| -> LedgerResult<(CategoryId, Amount)> {
                Ok((category_id, Amount::sum(amounts)?))
            })
            .collect()
    }

    /// Per-category sum of transactions dated within `[from, to]`
    pub fn get_activity_by_category(
        &self,
        budget_id: BudgetId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> LedgerResult<HashMap<CategoryId, Amount>> {
        self.sum_by_category(budget_id, |date| date >= from && date <= to)
    }

    /// Per-category sum of transactions dated strictly before `date`
    pub fn get_activity_before(
        &self,
        budget_id: BudgetId,
        date: NaiveDate,
    ) -> LedgerResult<HashMap<CategoryId, Amount>> {
        self.sum_by_category(budget_id, |d| d < date)
    }

    /// Per-category sum of amounts assigned in the budget's months before `date`
    pub fn get_assigned_before(
        &self,
        budget_id: BudgetId,
        date: MonthDate,
    ) -> LedgerResult<HashMap<CategoryId, Amount>> {
        let mut grouped: HashMap<CategoryId, Vec<&Amount>> = HashMap::new();
        for row in self.month_categories.iter() {
            let earlier = self
                .months
                .find(row.month_id)
                .is_some_and(|m| m.budget_id == budget_id && m.date < date);
            if earlier {
                grouped.entry(row.category_id).or_default().push(&row.amount);
            }
        }

        grouped
            .into_iter()
            .map(|(category_id, amounts)| -> LedgerResult<(CategoryId, Amount)> {
                Ok((category_id, Amount::sum(amounts)?))
            })
            .collect()
    }

    /// Accounts of a budget with the sum of their transactions
    pub fn get_accounts_with_balance(&self, budget_id: BudgetId) -> LedgerResult<Vec<AccountWithBalance>> {
        self.accounts
            .get_for_budget(budget_id)
            .into_iter()
            .map(|account| -> LedgerResult<AccountWithBalance> {
                let txns = self.transactions.get_by_account(account.id);
                let balance = Amount::sum(txns.into_iter().map(|t| &t.amount))?;
                Ok(AccountWithBalance { account, balance })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Budget, Category, CategoryGroup, MonthCategory, UserId};

    struct Fixture {
        store: Store,
        budget_id: BudgetId,
        account_id: AccountId,
        income: CategoryId,
        electric: CategoryId,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> Fixture {
        let mut store = Store::default();
        let budget = Budget::new("B", UserId::new());
        let budget_id = budget.id;
        store.budgets.create(budget).unwrap();

        let account = Account::new(budget_id, "Checking");
        let account_id = account.id;
        store.accounts.create(account).unwrap();

        let income_group = CategoryGroup::income(budget_id, "Income");
        let income = Category::new(&income_group, "Income");
        let bills = CategoryGroup::new(budget_id, "Bills");
        let electric = Category::new(&bills, "Electric");
        let (income_id, electric_id) = (income.id, electric.id);
        store.categories.create_group(income_group).unwrap();
        store.categories.create_group(bills).unwrap();
        store.categories.create(income).unwrap();
        store.categories.create(electric).unwrap();

        Fixture {
            store,
            budget_id,
            account_id,
            income: income_id,
            electric: electric_id,
        }
    }

    fn add_txn(f: &mut Fixture, category: Option<CategoryId>, amount: &str, on: NaiveDate) -> TransactionId {
        let mut txn = Transaction::new(f.account_id, amount.parse().unwrap(), on);
        txn.category_id = category;
        let id = txn.id;
        f.store.transactions.create(txn).unwrap();
        id
    }

    #[test]
    fn test_income_between_only_counts_income_categories() {
        let mut f = fixture();
        let income = Some(f.income);
        let electric = Some(f.electric);
        add_txn(&mut f, income, "9.00", date(2022, 5, 15));
        add_txn(&mut f, income, "1.00", date(2022, 6, 1));
        add_txn(&mut f, electric, "-3.00", date(2022, 5, 20));
        add_txn(&mut f, None, "100", date(2022, 5, 20));

        let total = f
            .store
            .get_income_between(f.budget_id, date(2022, 5, 1), date(2022, 5, 31))
            .unwrap();
        assert_eq!(total, Amount::new(9, 0));
    }

    #[test]
    fn test_activity_by_category() {
        let mut f = fixture();
        let electric = Some(f.electric);
        add_txn(&mut f, electric, "-3.00", date(2022, 4, 30));
        add_txn(&mut f, electric, "-1.25", date(2022, 5, 1));
        add_txn(&mut f, electric, "-0.75", date(2022, 5, 31));

        let activity = f
            .store
            .get_activity_by_category(f.budget_id, date(2022, 5, 1), date(2022, 5, 31))
            .unwrap();
        assert_eq!(activity[&f.electric], Amount::new(-2, 0));

        let before = f
            .store
            .get_activity_before(f.budget_id, date(2022, 5, 1))
            .unwrap();
        assert_eq!(before[&f.electric], Amount::new(-3, 0));
    }

    #[test]
    fn test_assigned_before() {
        let mut f = fixture();
        let april = MonthDate::from_ymd(2022, 4).unwrap();
        let (apr, _) = f.store.months.get_or_create(f.budget_id, april).unwrap();
        let (may, _) = f.store.months.get_or_create(f.budget_id, april.next()).unwrap();

        let mut row = MonthCategory::new(apr.id, f.electric);
        row.amount = "3.40".parse().unwrap();
        f.store.month_categories.create(row).unwrap();
        let mut row = MonthCategory::new(may.id, f.electric);
        row.amount = "1.00".parse().unwrap();
        f.store.month_categories.create(row).unwrap();

        let assigned = f.store.get_assigned_before(f.budget_id, may.date).unwrap();
        assert_eq!(assigned[&f.electric], Amount::new(340, -2));
        assert!(f
            .store
            .get_assigned_before(f.budget_id, april)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_transactions_scoped_by_account_budget() {
        let mut f = fixture();
        let id = add_txn(&mut f, None, "-5", date(2022, 5, 2));

        assert!(f.store.get_transaction(f.budget_id, id).is_ok());
        assert!(f
            .store
            .get_transaction(BudgetId::new(), id)
            .unwrap_err()
            .is_not_found());

        assert_eq!(f.store.delete_transactions(BudgetId::new(), &[id]), 0);
        assert_eq!(f.store.delete_transactions(f.budget_id, &[id, TransactionId::new()]), 1);
        assert!(f.store.transactions_for_budget(f.budget_id).is_empty());
    }

    #[test]
    fn test_accounts_with_balance() {
        let mut f = fixture();
        add_txn(&mut f, None, "10.50", date(2022, 5, 2));
        add_txn(&mut f, None, "-0.25", date(2022, 5, 3));

        let accounts = f.store.get_accounts_with_balance(f.budget_id).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].balance.to_string(), "10.25");
    }

    #[test]
    fn test_transaction_details() {
        let mut f = fixture();
        let electric = Some(f.electric);
        let id = add_txn(&mut f, electric, "-5", date(2022, 5, 2));
        let txn = f.store.get_transaction(f.budget_id, id).unwrap();

        let details = f.store.transaction_details(&txn).unwrap();
        assert_eq!(details.account_name, "Checking");
        assert_eq!(details.category_name.as_deref(), Some("Electric"));
        assert!(details.payee_name.is_none());
    }

    #[test]
    fn test_store_serde_round_trip() {
        let f = fixture();
        let json = serde_json::to_string(&f.store).unwrap();
        let loaded: Store = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.categories.get_for_budget(f.budget_id).len(), 2);

        // Missing tables default to empty
        let empty: Store = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.transactions.count(), 0);
    }
}
