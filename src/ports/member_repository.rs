//! Member repository port.
//!
//! Table-scoped access to the `members` table.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::Member;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a new member.
    async fn insert(&self, member: &Member) -> Result<(), DomainError>;

    /// Find a member by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// All members, ordered by last name then first name.
    async fn list(&self) -> Result<Vec<Member>, DomainError>;

    /// Case-insensitive substring search on name and email.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Member>, DomainError>;

    /// Rewrite the member's plan code.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    async fn update_membership_type(
        &self,
        id: &MemberId,
        membership_type: &str,
    ) -> Result<(), DomainError>;

    /// Members whose plan code is one of `codes` (used by the legacy migration).
    async fn list_by_membership_types(&self, codes: &[&str]) -> Result<Vec<Member>, DomainError>;
}
