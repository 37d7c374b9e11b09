//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresMemberRepository` - Members and their plan codes
//! - `PostgresPaymentRepository` - Payments with filtered, paged listing
//! - `PostgresAttendanceRepository` - Check-in sessions and the bulk auto check-out
//! - `PostgresMembershipTypeRepository` / `PostgresSettingsRepository` - Catalog and gym settings
//! - `PostgresClassRepository` - Class schedule and enrollments

mod attendance_repository;
mod catalog_repository;
mod class_repository;
mod member_repository;
mod payment_repository;

pub use attendance_repository::PostgresAttendanceRepository;
pub use catalog_repository::{PostgresMembershipTypeRepository, PostgresSettingsRepository};
pub use class_repository::PostgresClassRepository;
pub use member_repository::PostgresMemberRepository;
pub use payment_repository::PostgresPaymentRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a driver error as a `DatabaseError` with context.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}
