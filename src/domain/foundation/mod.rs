//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the state machine trait and error types
//! that form the vocabulary of the gym domain.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{CurrentUser, StaffRole};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AttendanceId, ClassId, EnrollmentId, MemberId, MembershipTypeId, PaymentId, UserId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
