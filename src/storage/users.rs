//! User repository
//!
//! Usernames are unique.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{User, UserId};

/// Users keyed by id, indexed by username
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<User>", into = "Vec<User>")]
pub struct UserRepository {
    users: HashMap<UserId, User>,
    by_username: HashMap<String, UserId>,
}

impl UserRepository {
    pub fn create(&mut self, user: User) -> LedgerResult<()> {
        if self.users.contains_key(&user.id) || self.by_username.contains_key(&user.username) {
            return Err(LedgerError::Duplicate {
                entity_type: "User",
                identifier: user.username,
            });
        }
        self.by_username.insert(user.username.clone(), user.id);
        self.users.insert(user.id, user);
        Ok(())
    }

    pub fn exists(&self, username: &str) -> bool {
        self.by_username.contains_key(username.trim())
    }

    pub fn get(&self, id: UserId) -> LedgerResult<User> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::user_not_found(id))
    }

    pub fn get_by_username(&self, username: &str) -> LedgerResult<User> {
        self.by_username
            .get(username.trim())
            .and_then(|id| self.users.get(id))
            .cloned()
            .ok_or_else(|| LedgerError::user_not_found(username.trim()))
    }
}

impl From<Vec<User>> for UserRepository {
    fn from(list: Vec<User>) -> Self {
        let mut repo = Self::default();
        for user in list {
            repo.by_username.insert(user.username.clone(), user.id);
            repo.users.insert(user.id, user);
        }
        repo
    }
}

impl From<UserRepository> for Vec<User> {
    fn from(repo: UserRepository) -> Self {
        let mut list: Vec<_> = repo.users.into_values().collect();
        list.sort_by_key(|u| u.created_at);
        list
    }
}
