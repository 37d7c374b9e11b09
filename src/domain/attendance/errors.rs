//! Attendance-specific error types.

use thiserror::Error;

use crate::domain::foundation::{
    AttendanceId, DomainError, ErrorCode, MemberId, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttendanceError {
    #[error("Attendance record not found: {0}")]
    NotFound(AttendanceId),

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Member {0} has no open session")]
    NoOpenSession(MemberId),

    #[error("Member {member_id} is already checked in (session {attendance_id})")]
    AlreadyCheckedIn {
        member_id: MemberId,
        attendance_id: AttendanceId,
    },

    #[error("Attendance record {0} is already checked out")]
    AlreadyCheckedOut(AttendanceId),

    #[error("Invalid check-out: {reason}")]
    InvalidCheckout { reason: String },

    #[error("Invalid QR code: {0}")]
    InvalidQrPayload(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid attendance data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Data store error: {0}")]
    Infrastructure(String),
}

impl AttendanceError {
    pub fn invalid_checkout(reason: impl Into<String>) -> Self {
        AttendanceError::InvalidCheckout {
            reason: reason.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AttendanceError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AttendanceError::NotFound(_) | AttendanceError::NoOpenSession(_) => {
                ErrorCode::AttendanceNotFound
            }
            AttendanceError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            AttendanceError::AlreadyCheckedIn { .. } => ErrorCode::AlreadyCheckedIn,
            AttendanceError::AlreadyCheckedOut(_) | AttendanceError::InvalidCheckout { .. } => {
                ErrorCode::InvalidStateTransition
            }
            AttendanceError::InvalidQrPayload(_) => ErrorCode::InvalidFormat,
            AttendanceError::Forbidden(_) => ErrorCode::Forbidden,
            AttendanceError::Validation(_) => ErrorCode::ValidationFailed,
            AttendanceError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for AttendanceError {
    fn from(err: DomainError) -> Self {
        AttendanceError::Infrastructure(err.to_string())
    }
}

impl From<AttendanceError> for DomainError {
    fn from(err: AttendanceError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
