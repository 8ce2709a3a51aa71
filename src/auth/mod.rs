//! Authentication
//!
//! Passwords are hashed with Argon2id and sessions are opaque random tokens.
//! Services receive an [`AuthContext`] once a session has been checked, and a
//! [`BudgetAuthContext`] once the session's user has been granted a budget.

pub mod password;
pub mod session;

pub use password::{hash_password, verify_password, Password};
pub use session::{InMemorySessionStore, Session, SessionId, SessionStore};

use crate::models::{Budget, BudgetId, UserId};

/// An authenticated caller
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: UserId,
    pub session_id: SessionId,
}

/// An authenticated caller acting inside one budget they have access to
#[derive(Debug, Clone)]
pub struct BudgetAuthContext {
    pub auth: AuthContext,
    pub budget: Budget,
}

impl BudgetAuthContext {
    pub fn budget_id(&self) -> BudgetId {
        self.budget.id
    }

    pub fn user_id(&self) -> UserId {
        self.auth.user_id
    }
}
