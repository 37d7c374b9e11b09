//! Attendance repository port.

use async_trait::async_trait;

use crate::domain::attendance::Attendance;
use crate::domain::foundation::{AttendanceId, DomainError, MemberId, Timestamp};

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn insert(&self, attendance: &Attendance) -> Result<(), DomainError>;

    /// Overwrite check-in and check-out times of an existing row.
    ///
    /// # Errors
    ///
    /// - `AttendanceNotFound` if the row doesn't exist
    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &AttendanceId) -> Result<Option<Attendance>, DomainError>;

    /// The member's most recent session without a check-out, if any.
    async fn find_open_for_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<Attendance>, DomainError>;

    /// Sessions checked in within `[from, to)`, newest first.
    async fn list_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Attendance>, DomainError>;

    /// Sets `check_out_time = now` on every open session checked in before
    /// `cutoff`, in one update. Returns the number of rows closed.
    async fn close_open_before(&self, cutoff: Timestamp, now: Timestamp)
        -> Result<u64, DomainError>;

    /// Hard delete. Reserved for administrators.
    async fn delete(&self, id: &AttendanceId) -> Result<(), DomainError>;
}
