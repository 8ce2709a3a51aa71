//! Payee model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, PayeeId};
use crate::error::LedgerResult;
use crate::validation::validate_name;

/// Someone money is paid to or received from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payee {
    /// Unique identifier
    pub id: PayeeId,

    /// Owning budget
    pub budget_id: BudgetId,

    /// Payee name
    pub name: String,

    /// When the payee was created
    pub created_at: DateTime<Utc>,
}

impl Payee {
    /// Create a new payee
    pub fn new(budget_id: BudgetId, name: impl Into<String>) -> Self {
        Self {
            id: PayeeId::new(),
            budget_id,
            name: name.into().trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Validate the payee
    pub fn validate(&self) -> LedgerResult<()> {
        validate_name("Name", &self.name)
    }
}

impl fmt::Display for Payee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
