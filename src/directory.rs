//! A small user directory with the same split as the store: lookups that
//! may miss return `Option`, lookups that must hit return `Result`, and
//! rejected additions return `false`.

use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use crate::error::DirectoryError;
use crate::store::normalize_key;

pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub role: String,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: BTreeMap<String, User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        info!("UserDirectory initialized");
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        debug!(username, "Looking up user");
        let Some(username) = normalize_key(username) else {
            warn!(username, "Invalid username provided");
            return None;
        };

        match self.users.get(username) {
            Some(user) => {
                info!(username, "User found");
                Some(user)
            }
            None => {
                warn!(username, "User not found");
                None
            }
        }
    }

    pub fn get_user(&self, username: &str) -> Result<&User, DirectoryError> {
        let Some(normalized) = normalize_key(username) else {
            error!(username, "Invalid username");
            return Err(DirectoryError::InvalidUsername {
                username: username.to_string(),
            });
        };

        match self.users.get(normalized) {
            Some(user) => {
                info!(username = normalized, "User retrieved");
                Ok(user)
            }
            None => {
                error!(username = normalized, "User not found");
                Err(DirectoryError::UserNotFound {
                    username: normalized.to_string(),
                })
            }
        }
    }

    /// Add a user. `false` means the input was rejected (bad username, bad
    /// email, or the name is taken).
    pub fn add_user(&mut self, username: &str, email: &str, role: &str) -> bool {
        let Some(username) = normalize_key(username) else {
            warn!(username, "Invalid username for user creation");
            return false;
        };
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            warn!(username, email, "Invalid email for user");
            return false;
        }
        if self.users.contains_key(username) {
            warn!(username, "Attempted to add duplicate user");
            return false;
        }

        self.users.insert(
            username.to_string(),
            User {
                email: email.to_string(),
                role: role.to_string(),
            },
        );
        info!(username, role, "User added");
        true
    }

    /// Usernames holding `role`, in name order. Empty when nobody matches.
    pub fn list_users_by_role(&self, role: &str) -> Vec<String> {
        let matching: Vec<String> = self
            .users
            .iter()
            .filter(|(_, user)| user.role == role)
            .map(|(name, _)| name.clone())
            .collect();
        info!(role, count = matching.len(), "Listed users by role");
        matching
    }
}
