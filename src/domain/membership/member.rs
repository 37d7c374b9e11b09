//! Member directory entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Timestamp};

use super::LegacyMembershipType;

/// A gym member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Catalog code of the member's plan. May still hold a retired code.
    pub membership_type: String,
    pub active: bool,
    pub created_at: Timestamp,
}

impl Member {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        membership_type: impl Into<String>,
    ) -> Self {
        Self {
            id: MemberId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            phone: None,
            membership_type: membership_type.into(),
            active: true,
            created_at: Timestamp::now(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Retired plan code still stored on this member, if any.
    pub fn legacy_membership_type(&self) -> Option<LegacyMembershipType> {
        LegacyMembershipType::parse(&self.membership_type)
    }

    /// Case-insensitive match on name or email, used by the directory search.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.full_name().to_lowercase().contains(&query)
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_parts() {
        assert_eq!(Member::new("Ana", "Silva", "monthly").full_name(), "Ana Silva");
    }

    #[test]
    fn detects_legacy_codes() {
        let member = Member::new("Ana", "Silva", "premium");
        assert_eq!(
            member.legacy_membership_type(),
            Some(LegacyMembershipType::Premium)
        );
        assert!(Member::new("Ana", "Silva", "monthly")
            .legacy_membership_type()
            .is_none());
    }

    #[test]
    fn search_matches_name_and_email() {
        let member = Member::new("Ana", "Silva", "monthly").with_email("ana@example.com");
        assert!(member.matches("silv"));
        assert!(member.matches("EXAMPLE"));
        assert!(!member.matches("bruno"));
        assert!(member.matches("  "));
    }
}
