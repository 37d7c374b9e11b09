//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NoMembershipTypesConfigured | 422 |
//! | TypeNotFound | 404 |
//! | MemberNotFound | 404 |
//! | Validation | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ValidationError};

/// Membership catalog and member plan errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    /// The catalog has no entries, so no price can be resolved.
    #[error("No membership types are configured")]
    NoMembershipTypesConfigured,

    #[error("Membership type not found: {0}")]
    TypeNotFound(String),

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Invalid membership type: {0}")]
    Validation(#[from] ValidationError),

    #[error("Data store error: {0}")]
    Infrastructure(String),
}

impl MembershipError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NoMembershipTypesConfigured => ErrorCode::NoMembershipTypesConfigured,
            MembershipError::TypeNotFound(_) => ErrorCode::MembershipTypeNotFound,
            MembershipError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            MembershipError::Validation(_) => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::NoMembershipTypesConfigured => MembershipError::NoMembershipTypesConfigured,
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_has_dedicated_code() {
        assert_eq!(
            MembershipError::NoMembershipTypesConfigured.code(),
            ErrorCode::NoMembershipTypesConfigured
        );
    }

    #[test]
    fn converts_to_domain_error() {
        let err = MembershipError::TypeNotFound("vip".to_string());
        let domain: DomainError = err.clone().into();
        assert_eq!(domain.code, err.code());
        assert!(domain.message.contains("vip"));
    }

    #[test]
    fn database_failures_become_infrastructure() {
        let err: MembershipError = DomainError::database("timeout").into();
        assert!(matches!(err, MembershipError::Infrastructure(_)));
    }
}
