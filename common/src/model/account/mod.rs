//! Account models and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Stored account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Account {
    /// Unique account ID, assigned by the store
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Free-form account type classifier
    pub account_type: String,
    /// Login credential
    pub login: String,
    /// Account password, stored as given
    pub password: String,
    /// Primary email
    pub email: String,
    /// Password of the primary email
    #[serde(alias = "emailPassword")]
    pub email_password: String,
    /// Recovery email
    pub recovery_email: String,
    /// Password of the recovery email
    pub recovery_email_password: String,
    /// Opaque session cookie
    pub cookie: String,
    /// Account status
    pub status: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating an account
///
/// Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(default)]
pub struct AccountCreate {
    pub name: String,
    pub account_type: String,
    pub login: String,
    pub password: String,
    pub email: String,
    #[serde(alias = "emailPassword")]
    pub email_password: String,
    pub recovery_email: String,
    pub recovery_email_password: String,
    pub cookie: String,
    pub status: String,
}

/// Partial update of an account
///
/// An empty field means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(default)]
pub struct AccountUpdate {
    pub name: String,
    pub account_type: String,
    pub login: String,
    pub password: String,
    pub email: String,
    #[serde(alias = "emailPassword")]
    pub email_password: String,
    pub recovery_email: String,
    pub recovery_email_password: String,
    pub cookie: String,
    pub status: String,
}

impl Account {
    /// Build a new account from creation input
    pub fn new(id: Uuid, input: AccountCreate, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            account_type: input.account_type,
            login: input.login,
            password: input.password,
            email: input.email,
            email_password: input.email_password,
            recovery_email: input.recovery_email,
            recovery_email_password: input.recovery_email_password,
            cookie: input.cookie,
            status: input.status,
            created_at,
        }
    }

    /// Merge the non-empty fields of `update` into this account
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, update: &AccountUpdate) {
        fn merge(target: &mut String, value: &str) {
            if !value.is_empty() {
                *target = value.to_string();
            }
        }

        merge(&mut self.name, &update.name);
        merge(&mut self.account_type, &update.account_type);
        merge(&mut self.login, &update.login);
        merge(&mut self.password, &update.password);
        merge(&mut self.email, &update.email);
        merge(&mut self.email_password, &update.email_password);
        merge(&mut self.recovery_email, &update.recovery_email);
        merge(&mut self.recovery_email_password, &update.recovery_email_password);
        merge(&mut self.cookie, &update.cookie);
        merge(&mut self.status, &update.status);
    }
}
