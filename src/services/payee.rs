//! Payee service

use tracing::info;

use crate::auth::BudgetAuthContext;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Payee, PayeeId};
use crate::storage::Database;

/// Service for payee management
pub struct PayeeService<'a> {
    db: &'a Database,
}

impl<'a> PayeeService<'a> {
    /// Create a new payee service
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a new payee
    pub fn create(&self, ctx: &BudgetAuthContext, name: &str) -> LedgerResult<Payee> {
        let payee = Payee::new(ctx.budget_id(), name);
        payee.validate()?;

        self.db.exec_tx(|store| {
            if store.payees.get_by_name(ctx.budget_id(), &payee.name).is_some() {
                return Err(LedgerError::Validation(format!(
                    "A payee named '{}' already exists.",
                    payee.name
                )));
            }
            store.payees.create(payee.clone())
        })?;

        info!(budget = %ctx.budget_id(), payee = %payee.id, "payee created");
        Ok(payee)
    }

    /// Get a payee of the budget
    pub fn get(&self, ctx: &BudgetAuthContext, id: PayeeId) -> LedgerResult<Payee> {
        self.db.read()?.payees.get(ctx.budget_id(), id)
    }

    /// Find a payee by name or ID string
    pub fn find(&self, ctx: &BudgetAuthContext, identifier: &str) -> LedgerResult<Option<Payee>> {
        let store = self.db.read()?;
        if let Some(payee) = store.payees.get_by_name(ctx.budget_id(), identifier) {
            return Ok(Some(payee));
        }

        if let Ok(id) = identifier.parse::<PayeeId>() {
            return Ok(store.payees.get(ctx.budget_id(), id).ok());
        }

        Ok(None)
    }

    /// Every payee of the budget, sorted by name
    pub fn get_all(&self, ctx: &BudgetAuthContext) -> LedgerResult<Vec<Payee>> {
        Ok(self.db.read()?.payees.get_for_budget(ctx.budget_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{other_budget, setup};

    #[test]
    fn test_create_and_get() {
        let (db, ctx) = setup();
        let service = PayeeService::new(&db);

        let payee = service.create(&ctx, "  Power Co ").unwrap();
        assert_eq!(payee.name, "Power Co");
        assert_eq!(service.get(&ctx, payee.id).unwrap().name, "Power Co");
        assert_eq!(service.find(&ctx, "power co").unwrap().unwrap().id, payee.id);
    }

    #[test]
    fn test_get_all_sorted() {
        let (db, ctx) = setup();
        let service = PayeeService::new(&db);
        service.create(&ctx, "Water Board").unwrap();
        service.create(&ctx, "Grocer").unwrap();

        let names: Vec<_> = service
            .get_all(&ctx)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Grocer", "Water Board"]);
    }

    #[test]
    fn test_validation_and_scoping() {
        let (db, ctx) = setup();
        let other = other_budget(&db);
        let service = PayeeService::new(&db);

        assert!(service.create(&ctx, "").unwrap_err().is_validation());
        assert!(service
            .create(&ctx, &"p".repeat(256))
            .unwrap_err()
            .is_validation());

        let payee = service.create(&other, "Grocer").unwrap();
        assert!(service.get(&ctx, payee.id).unwrap_err().is_not_found());
        assert!(service.get_all(&ctx).unwrap().is_empty());
        // Same name in another budget is fine
        service.create(&ctx, "Grocer").unwrap();
    }
}
