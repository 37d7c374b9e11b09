//! Payment-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, PaymentId, ValidationError};
use crate::domain::membership::MembershipError;

/// Errors raised by payment workflows.
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    #[error("Payment not found: {0}")]
    NotFound(PaymentId),

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Invalid payment: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error("Data store error: {0}")]
    Infrastructure(String),
}

impl PaymentError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::NotFound(_) => ErrorCode::PaymentNotFound,
            PaymentError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            PaymentError::Validation(_) => ErrorCode::ValidationFailed,
            PaymentError::Membership(err) => err.code(),
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => {
                let field = err.details.get("field").cloned().unwrap_or_default();
                PaymentError::Validation(ValidationError::invalid_format(field, err.message))
            }
            _ => PaymentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_payment_not_found() {
        let err = PaymentError::NotFound(PaymentId::new());
        assert_eq!(err.code(), ErrorCode::PaymentNotFound);
    }

    #[test]
    fn database_errors_become_infrastructure() {
        let err: PaymentError = DomainError::database("connection refused").into();
        assert!(matches!(err, PaymentError::Infrastructure(ref m) if m.contains("connection refused")));
    }

    #[test]
    fn validation_domain_errors_keep_field() {
        let err: PaymentError = DomainError::validation("amount", "too small").into();
        match err {
            PaymentError::Validation(v) => assert_eq!(v.field(), "amount"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
