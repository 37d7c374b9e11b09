//! Class schedule port.

use async_trait::async_trait;

use crate::domain::classes::{ClassEnrollment, GymClass};
use crate::domain::foundation::{ClassId, DomainError};

#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// All classes ordered by weekday then start time.
    async fn list(&self) -> Result<Vec<GymClass>, DomainError>;

    async fn count_enrollments(&self, class_id: &ClassId) -> Result<u32, DomainError>;

    async fn enroll(&self, enrollment: &ClassEnrollment) -> Result<(), DomainError>;
}
