//! Login sessions
//!
//! A session is an opaque random token bound to a user. Sessions are held by a
//! [`SessionStore`]; the ledger ships an in-memory implementation that lives as
//! long as the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use zeroize::Zeroize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::UserId;

/// Number of random bytes in a session token
pub const SESSION_ID_BYTES: usize = 64;

/// An opaque session token
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh token from the operating system's RNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let id = URL_SAFE_NO_PAD.encode(bytes);
        bytes.zeroize();
        Self(id)
    }

    /// Wrap a token received from a caller
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionId(***)")
    }
}

/// A live session
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Storage for sessions
pub trait SessionStore: Send + Sync {
    /// Start a session for `user_id`
    fn create(&self, user_id: UserId) -> LedgerResult<Session>;

    /// Look up a session; `None` when it does not exist
    fn get(&self, id: &SessionId) -> LedgerResult<Option<Session>>;

    /// End a session. Deleting an unknown session is not an error.
    fn delete(&self, id: &SessionId) -> LedgerResult<()>;
}

/// Process-local session storage
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(e: impl fmt::Display) -> LedgerError {
    LedgerError::Storage(format!("Session store lock poisoned: {}", e))
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, user_id: UserId) -> LedgerResult<Session> {
        let session = Session {
            id: SessionId::generate(),
            user_id,
            created_at: Utc::now(),
        };

        let mut sessions = self.sessions.write().map_err(lock_error)?;
        if sessions.contains_key(&session.id) {
            return Err(LedgerError::Duplicate {
                entity_type: "Session",
                identifier: "(redacted)".to_string(),
            });
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn get(&self, id: &SessionId) -> LedgerResult<Option<Session>> {
        let sessions = self.sessions.read().map_err(lock_error)?;
        Ok(sessions.get(id).cloned())
    }

    fn delete(&self, id: &SessionId) -> LedgerResult<()> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;
        sessions.remove(id);
        Ok(())
    }
}
