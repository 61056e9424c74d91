//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use parley_shared::validation::display_name_from_email;

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name, defaults to the email local part
    pub name: String,

    /// Normalized (lowercase) email, unique across users
    pub email: String,

    /// bcrypt hash; `None` for accounts created through an external provider
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Refresh tokens currently valid for this user (the active set)
    #[serde(skip_serializing, default)]
    pub refresh_tokens: HashSet<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a password-authenticated user
    pub fn new(email: String, password_hash: String) -> Self {
        Self::build(email, Some(password_hash))
    }

    /// Creates an account that authenticates through an external provider
    /// and therefore has no password
    pub fn new_external(email: String) -> Self {
        Self::build(email, None)
    }

    fn build(email: String, password_hash: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: display_name_from_email(&email),
            email,
            password_hash,
            refresh_tokens: HashSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether password login is possible at all
    pub fn has_password(&self) -> bool {
        matches!(&self.password_hash, Some(hash) if !hash.is_empty())
    }

    /// Whether `token` is in the active set
    pub fn owns_refresh_token(&self, token: &str) -> bool {
        self.refresh_tokens.contains(token)
    }

    /// Public view of the user without secrets
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User without password hash or refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
