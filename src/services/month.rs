//! Month service
//!
//! Viewing a month creates it (and the month before it) on first reference.
//! The two mutations are setting a month's carryover and assigning funds to a
//! category for a month.

use tracing::info;

use crate::auth::BudgetAuthContext;
use crate::error::LedgerResult;
use crate::models::transaction::{MAX_AMOUNT_DIGITS, MAX_AMOUNT_PLACES};
use crate::models::{Amount, CategoryId, Month, MonthCategory, MonthDate, MonthId, MonthView};
use crate::services::backfill::ensure_month;
use crate::services::reconcile::reconcile;
use crate::storage::Database;
use crate::validation::{
    max_decimal_places, max_integer_digits, non_zero, positive, required, validate_fields, Field,
};

/// Service for months and their assignments
pub struct MonthService<'a> {
    db: &'a Database,
}

impl<'a> MonthService<'a> {
    /// Create a new month service
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// The reconciled view of the month containing `date`
    ///
    /// The month and the previous month are created, with a row for every
    /// category, if they do not exist yet.
    pub fn get_or_create(&self, ctx: &BudgetAuthContext, date: MonthDate) -> LedgerResult<MonthView> {
        let budget_id = ctx.budget_id();

        {
            let store = self.db.read()?;
            let month = store.months.find_by_date(budget_id, date);
            let previous = store.months.find_by_date(budget_id, date.previous());
            if let (Some(month), Some(previous)) = (month, previous) {
                return reconcile(&store, month, previous);
            }
        }

        let (month, previous) = self.db.exec_tx(|store| {
            let month = ensure_month(store, budget_id, date)?;
            let previous = ensure_month(store, budget_id, date.previous())?;
            Ok((month, previous))
        })?;

        let store = self.db.read()?;
        reconcile(&store, &month, &previous)
    }

    /// Every month of the budget created so far, in calendar order
    pub fn get_all(&self, ctx: &BudgetAuthContext) -> LedgerResult<Vec<Month>> {
        Ok(self.db.read()?.months.get_for_budget(ctx.budget_id()))
    }

    /// Set the funds held back from a month into the next one
    pub fn update(&self, ctx: &BudgetAuthContext, month_id: MonthId, carryover: Amount) -> LedgerResult<Month> {
        validate_fields(&[Field::new(
            "Carryover",
            [
                required(&carryover),
                positive(&carryover),
                max_decimal_places(&carryover, MAX_AMOUNT_PLACES),
                max_integer_digits(&carryover, MAX_AMOUNT_DIGITS),
            ],
        )])?;

        let month = self.db.exec_tx(|store| {
            let mut month = store.months.get(ctx.budget_id(), month_id)?;
            month.set_carryover(carryover);
            store.months.update(&month)?;
            Ok(month)
        })?;

        info!(
            budget = %ctx.budget_id(),
            month = %month.date,
            carryover = %month.carryover,
            "carryover updated"
        );
        Ok(month)
    }

    /// Assign funds to a category for a month
    pub fn set_category_amount(
        &self,
        ctx: &BudgetAuthContext,
        month_id: MonthId,
        category_id: CategoryId,
        amount: Amount,
    ) -> LedgerResult<MonthCategory> {
        validate_fields(&[Field::new(
            "Amount",
            [
                required(&amount),
                non_zero(&amount),
                positive(&amount),
                max_decimal_places(&amount, MAX_AMOUNT_PLACES),
                max_integer_digits(&amount, MAX_AMOUNT_DIGITS),
            ],
        )])?;

        let (month, row) = self.db.exec_tx(|store| {
            let month = store.months.get(ctx.budget_id(), month_id)?;
            store
                .categories
                .get_single_for_budget(ctx.budget_id(), category_id)?;

            let (mut row, _) = store.month_categories.get_or_create(month.id, category_id)?;
            store.month_categories.update_amount(row.id, amount.clone())?;
            row.amount = amount;
            Ok((month, row))
        })?;

        info!(
            budget = %ctx.budget_id(),
            month = %month.date,
            category = %category_id,
            amount = %row.amount,
            "category amount set"
        );
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::models::{Account, Category, TransactionParams};
    use crate::services::testing::{other_budget, setup};
    use crate::services::{AccountService, CategoryService, TransactionService};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::thread;

    fn md(s: &str) -> MonthDate {
        s.parse().unwrap()
    }

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    /// Budget "B" with account "Checking" and category "Electric" in a new group
    fn scenario() -> (Database, BudgetAuthContext, Account, Category) {
        let (db, ctx) = setup();
        let account = AccountService::new(&db).create(&ctx, "Checking").unwrap();
        let categories = CategoryService::new(&db);
        let bills = categories.create_group(&ctx, "Bills").unwrap();
        let electric = categories.create_category(&ctx, bills.id, "Electric").unwrap();
        (db, ctx, account, electric)
    }

    fn income_id(db: &Database, ctx: &BudgetAuthContext) -> CategoryId {
        CategoryService::new(db)
            .find_category(ctx, "Income")
            .unwrap()
            .unwrap()
            .id
    }

    #[test]
    fn test_scenario_assignment_without_income() {
        let (db, ctx, _, electric) = scenario();
        let service = MonthService::new(&db);

        let may = service.get_or_create(&ctx, md("2022-05")).unwrap();
        service
            .set_category_amount(&ctx, may.month.id, electric.id, amount("5.00"))
            .unwrap();

        let view = service.get_or_create(&ctx, md("2022-05")).unwrap();
        assert_eq!(view.assigned, amount("5.00"));
        assert_eq!(view.budgetable, amount("-5.00"));
        assert!(view.income.is_zero());
        assert!(view.carried_over.is_zero());
    }

    #[test]
    fn test_scenario_income_raises_budgetable() {
        let (db, ctx, account, electric) = scenario();
        let service = MonthService::new(&db);
        let may = service.get_or_create(&ctx, md("2022-05")).unwrap();
        service
            .set_category_amount(&ctx, may.month.id, electric.id, amount("5.00"))
            .unwrap();

        TransactionService::new(&db)
            .create(
                &ctx,
                TransactionParams {
                    account_id: Some(account.id),
                    category_id: Some(income_id(&db, &ctx)),
                    amount: amount("9.00"),
                    date: NaiveDate::from_ymd_opt(2022, 5, 15),
                    ..Default::default()
                },
            )
            .unwrap();

        let view = service.get_or_create(&ctx, md("2022-05")).unwrap();
        assert_eq!(view.income, amount("9.00"));
        assert_eq!(view.budgetable, amount("4.00"));
    }

    #[test]
    fn test_scenario_carryover_and_available() {
        let (db, ctx, _, electric) = scenario();
        let service = MonthService::new(&db);

        let april = service.get_or_create(&ctx, md("2022-04")).unwrap().month;
        let may = service.get_or_create(&ctx, md("2022-05")).unwrap().month;
        service.update(&ctx, april.id, amount("6.70")).unwrap();
        service.update(&ctx, may.id, amount("0.40")).unwrap();
        service
            .set_category_amount(&ctx, april.id, electric.id, amount("3.40"))
            .unwrap();
        service
            .set_category_amount(&ctx, may.id, electric.id, amount("3.40"))
            .unwrap();

        let view = service.get_or_create(&ctx, md("2022-05")).unwrap();
        assert_eq!(view.carried_over, amount("6.70"));
        assert_eq!(view.assigned, amount("3.40"));
        assert_eq!(view.category(electric.id).unwrap().available, amount("6.80"));
        // 0 + 6.70 - 0.40 - 3.40
        assert_eq!(view.budgetable, amount("2.90"));
    }

    #[test]
    fn test_scenario_amount_must_be_positive_and_non_zero() {
        let (db, ctx, _, electric) = scenario();
        let service = MonthService::new(&db);
        let may = service.get_or_create(&ctx, md("2022-05")).unwrap().month;

        let negative = service
            .set_category_amount(&ctx, may.id, electric.id, amount("-5.00"))
            .unwrap_err();
        assert_eq!(negative.code(), ErrorCode::Invalid);
        assert_eq!(negative.to_string(), "Amount must be positive.");

        let zero = service
            .set_category_amount(&ctx, may.id, electric.id, amount("0"))
            .unwrap_err();
        assert_eq!(zero.code(), ErrorCode::Invalid);
        assert_eq!(zero.to_string(), "Amount must not be zero.");

        let missing = service
            .set_category_amount(&ctx, may.id, electric.id, Amount::empty())
            .unwrap_err();
        assert_eq!(missing.to_string(), "Amount is required.");

        let view = service.get_or_create(&ctx, md("2022-05")).unwrap();
        assert!(view.assigned.is_zero());
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let (db, ctx, _, _) = scenario();
        let service = MonthService::new(&db);

        let first = service.get_or_create(&ctx, md("2022-05")).unwrap();
        let second = service.get_or_create(&ctx, md("2022-05-28")).unwrap();
        assert_eq!(first.month.id, second.month.id);

        let store = db.read().unwrap();
        // Income and Electric
        assert_eq!(store.month_categories.count_for_month(first.month.id), 2);
        assert!(store
            .months
            .find_by_date(ctx.budget_id(), md("2022-04"))
            .is_some());
    }

    #[test]
    fn test_new_month_gets_zero_rows_for_every_category() {
        let (db, ctx, _, _) = scenario();
        let categories = db.read().unwrap().categories.get_for_budget(ctx.budget_id()).len();

        let view = MonthService::new(&db)
            .get_or_create(&ctx, md("2019-01"))
            .unwrap();
        assert_eq!(view.categories.len(), categories);
        assert!(view.categories.iter().all(|c| c.amount.is_zero()));
    }

    #[test]
    fn test_carryover_validation() {
        let (db, ctx, _, _) = scenario();
        let service = MonthService::new(&db);
        let may = service.get_or_create(&ctx, md("2022-05")).unwrap().month;

        assert!(service.update(&ctx, may.id, Amount::zero()).is_ok());
        let err = service.update(&ctx, may.id, amount("-1")).unwrap_err();
        assert_eq!(err.to_string(), "Carryover must be positive.");
        let err = service.update(&ctx, may.id, Amount::empty()).unwrap_err();
        assert_eq!(err.to_string(), "Carryover is required.");
    }

    #[test]
    fn test_out_of_range_amounts_rejected() {
        let (db, ctx, _, electric) = scenario();
        let service = MonthService::new(&db);
        let may = service.get_or_create(&ctx, md("2022-05")).unwrap().month;

        let err = service.update(&ctx, may.id, amount("1e300")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Carryover must have at most 13 digits before the decimal point."
        );
        let err = service
            .set_category_amount(&ctx, may.id, electric.id, amount("1e300"))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Invalid);

        let view = service.get_or_create(&ctx, md("2022-05")).unwrap();
        assert!(view.assigned.is_zero());
        assert!(view.month.carryover.is_zero());
    }

    #[test]
    fn test_concurrent_views_and_assignments() {
        let (db, ctx, _, electric) = scenario();
        let db = Arc::new(db);
        let electric_id = electric.id;

        let workers: Vec<_> = (1..=8)
            .map(|i| {
                let db = Arc::clone(&db);
                let ctx = ctx.clone();
                thread::spawn(move || {
                    let service = MonthService::new(&db);
                    let view = service.get_or_create(&ctx, md("2022-05")).unwrap();
                    service
                        .set_category_amount(&ctx, view.month.id, electric_id, Amount::new(i, 0))
                        .unwrap();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let store = db.read().unwrap();
        let months = store.months.get_for_budget(ctx.budget_id());
        for date in [md("2022-04"), md("2022-05")] {
            let matching: Vec<_> = months.iter().filter(|m| m.date == date).collect();
            assert_eq!(matching.len(), 1);
            // Income and Electric, one row each
            let rows = store.month_categories.get_for_month(matching[0].id);
            assert_eq!(rows.len(), 2);
            assert_eq!(rows.iter().filter(|r| r.category_id == electric_id).count(), 1);
        }
        drop(store);

        let view = MonthService::new(&db).get_or_create(&ctx, md("2022-05")).unwrap();
        assert!(view.assigned >= amount("1") && view.assigned <= amount("8"));
    }

    #[test]
    fn test_other_budget_month_and_category_not_found() {
        let (db, ctx, _, electric) = scenario();
        let other = other_budget(&db);
        let service = MonthService::new(&db);

        let theirs = service.get_or_create(&other, md("2022-05")).unwrap().month;
        let mine = service.get_or_create(&ctx, md("2022-05")).unwrap().month;

        assert!(service.update(&ctx, theirs.id, amount("1")).unwrap_err().is_not_found());
        assert!(service
            .set_category_amount(&ctx, theirs.id, electric.id, amount("1"))
            .unwrap_err()
            .is_not_found());
        assert!(service
            .set_category_amount(&other, mine.id, electric.id, amount("1"))
            .unwrap_err()
            .is_not_found());
        assert!(service
            .set_category_amount(&ctx, mine.id, CategoryId::new(), amount("1"))
            .unwrap_err()
            .is_not_found());

        let untouched = service.get_or_create(&other, md("2022-05")).unwrap();
        assert!(untouched.month.carryover.is_zero());
    }

    #[test]
    fn test_setting_amount_overwrites() {
        let (db, ctx, _, electric) = scenario();
        let service = MonthService::new(&db);
        let may = service.get_or_create(&ctx, md("2022-05")).unwrap().month;

        service
            .set_category_amount(&ctx, may.id, electric.id, amount("5"))
            .unwrap();
        let row = service
            .set_category_amount(&ctx, may.id, electric.id, amount("2.50"))
            .unwrap();
        assert_eq!(row.amount, amount("2.50"));

        let view = service.get_or_create(&ctx, md("2022-05")).unwrap();
        assert_eq!(view.assigned, amount("2.50"));
        assert_eq!(db.read().unwrap().month_categories.count_for_month(may.id), 2);
    }
}
