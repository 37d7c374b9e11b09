//! The signed-in staff user.
//!
//! Session handling lives outside this crate. Whoever authenticates the request
//! builds a [`CurrentUser`] and hands it to each handler explicitly.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Staff permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Staff,
    Admin,
}

/// Staff user performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub role: StaffRole,
}

impl CurrentUser {
    pub fn staff(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: StaffRole::Staff,
        }
    }

    pub fn admin(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: StaffRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }
}
