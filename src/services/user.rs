//! User service
//!
//! Registration, login and session lookup.

use tracing::info;

use crate::auth::{hash_password, verify_password, AuthContext, Password, SessionId, SessionStore};
use crate::error::{LedgerError, LedgerResult};
use crate::models::user::username_field;
use crate::models::{User, UserId, UserPublic};
use crate::storage::Database;
use crate::validation::validate_fields;

const INVALID_CREDENTIALS: &str = "Invalid username or password.";
const INVALID_SESSION: &str = "Invalid or expired session.";

/// Service for users and their sessions
pub struct UserService<'a> {
    db: &'a Database,
    sessions: &'a dyn SessionStore,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(db: &'a Database, sessions: &'a dyn SessionStore) -> Self {
        Self { db, sessions }
    }

    /// Register a new user
    pub fn register(&self, username: &str, password: &Password) -> LedgerResult<UserPublic> {
        let username = username.trim();
        validate_fields(&[username_field(username), password.field()])?;

        let user = User::new(username, hash_password(password)?);
        self.db.exec_tx(|store| {
            if store.users.exists(&user.username) {
                return Err(LedgerError::Validation("Username is already taken.".into()));
            }
            store.users.create(user.clone())
        })?;

        info!(user = %user.id, "user registered");
        Ok(user.public())
    }

    /// Check credentials and start a session
    ///
    /// An unknown username and a wrong password fail the same way.
    pub fn login(&self, username: &str, password: &Password) -> LedgerResult<AuthContext> {
        validate_fields(&[username_field(username), password.field()])?;

        let found = self.db.read()?.users.get_by_username(username);
        let user = match found {
            Ok(user) => user,
            Err(err) if err.is_not_found() => {
                return Err(LedgerError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
            Err(err) => return Err(err),
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(LedgerError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
        self.open_session(user.id)
    }

    /// Start a session for a known user without a password check
    ///
    /// Used by the command line, which acts for the locally configured user.
    pub fn open_session(&self, user_id: UserId) -> LedgerResult<AuthContext> {
        let found = self.db.read()?.users.get(user_id);
        if let Err(err) = found {
            return Err(if err.is_not_found() {
                LedgerError::Unauthorized(INVALID_SESSION.into())
            } else {
                err
            });
        }

        let session = self.sessions.create(user_id)?;
        info!(user = %user_id, "session created");
        Ok(AuthContext {
            user_id,
            session_id: session.id,
        })
    }

    /// End the caller's session
    pub fn logout(&self, auth: &AuthContext) -> LedgerResult<()> {
        self.sessions.delete(&auth.session_id)?;
        info!(user = %auth.user_id, "session deleted");
        Ok(())
    }

    /// The signed-in user
    pub fn get_me(&self, auth: &AuthContext) -> LedgerResult<UserPublic> {
        match self.db.read()?.users.get(auth.user_id) {
            Ok(user) => Ok(user.public()),
            Err(err) if err.is_not_found() => Err(LedgerError::Unauthorized(INVALID_SESSION.into())),
            Err(err) => Err(err),
        }
    }

    /// Resolve a session token into an [`AuthContext`]
    pub fn get_auth(&self, session_id: &SessionId) -> LedgerResult<AuthContext> {
        let session = self
            .sessions
            .get(session_id)?
            .ok_or_else(|| LedgerError::Unauthorized(INVALID_SESSION.into()))?;
        Ok(AuthContext {
            user_id: session.user_id,
            session_id: session.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::InMemorySessionStore;
    use crate::error::ErrorCode;

    fn password(s: &str) -> Password {
        Password::new(s)
    }

    #[test]
    fn test_register_and_login() {
        let db = Database::in_memory();
        let sessions = InMemorySessionStore::new();
        let service = UserService::new(&db, &sessions);

        let user = service.register(" alice ", &password("hunter22")).unwrap();
        assert_eq!(user.username, "alice");

        let auth = service.login("alice", &password("hunter22")).unwrap();
        assert_eq!(auth.user_id, user.id);
        assert_eq!(service.get_me(&auth).unwrap(), user);
        assert_eq!(service.get_auth(&auth.session_id).unwrap().user_id, user.id);
    }

    #[test]
    fn test_password_is_stored_hashed() {
        let db = Database::in_memory();
        let sessions = InMemorySessionStore::new();
        let service = UserService::new(&db, &sessions);

        service.register("alice", &password("hunter22")).unwrap();
        let stored = db.read().unwrap().users.get_by_username("alice").unwrap();
        assert_ne!(stored.password_hash, "hunter22");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_duplicate_username_is_invalid() {
        let db = Database::in_memory();
        let sessions = InMemorySessionStore::new();
        let service = UserService::new(&db, &sessions);

        service.register("alice", &password("one")).unwrap();
        let err = service.register("alice", &password("two")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Invalid);
        assert_eq!(err.to_string(), "Username is already taken.");
    }

    #[test]
    fn test_register_validation() {
        let db = Database::in_memory();
        let sessions = InMemorySessionStore::new();
        let service = UserService::new(&db, &sessions);

        let err = service.register("", &password("")).unwrap_err();
        assert_eq!(err.to_string(), "Username is required. Password is required.");

        let err = service
            .register(&"a".repeat(33), &password("x"))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Invalid);
    }

    #[test]
    fn test_bad_credentials_are_unauthorized() {
        let db = Database::in_memory();
        let sessions = InMemorySessionStore::new();
        let service = UserService::new(&db, &sessions);
        service.register("alice", &password("hunter22")).unwrap();

        let wrong_password = service.login("alice", &password("nope")).unwrap_err();
        let unknown_user = service.login("bob", &password("hunter22")).unwrap_err();

        assert_eq!(wrong_password.code(), ErrorCode::Unauthorized);
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_logout_ends_session() {
        let db = Database::in_memory();
        let sessions = InMemorySessionStore::new();
        let service = UserService::new(&db, &sessions);
        service.register("alice", &password("hunter22")).unwrap();

        let auth = service.login("alice", &password("hunter22")).unwrap();
        service.logout(&auth).unwrap();

        let err = service.get_auth(&auth.session_id).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn test_open_session_for_unknown_user() {
        let db = Database::in_memory();
        let sessions = InMemorySessionStore::new();
        let service = UserService::new(&db, &sessions);

        let err = service.open_session(UserId::new()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
