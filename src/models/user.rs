//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use crate::validation::{max_length, required, Field};

/// Maximum username length in characters
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Maximum password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 255;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Unique login name
    pub username: String,

    /// Argon2 hash in PHC string format
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            username: username.into().trim().to_string(),
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// The fields safe to show to the user
    pub fn public(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Field rules for a username
pub fn username_field(username: &str) -> Field {
    Field::new(
        "Username",
        [required(username), max_length(username, MAX_USERNAME_LENGTH)],
    )
}

/// A user without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPublic {
    pub id: UserId,
    pub username: String,
}

impl fmt::Display for UserPublic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}
