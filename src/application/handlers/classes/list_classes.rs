//! ListClassesHandler - Query handler for the weekly schedule.
//!
//! The class-list fetch is the only operation that retries on failure.

use std::sync::Arc;

use serde::Serialize;

use crate::application::RetryPolicy;
use crate::domain::classes::GymClass;
use crate::domain::foundation::DomainError;
use crate::ports::{ClassRepository, Notification, Notifier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassView {
    #[serde(flatten)]
    pub class: GymClass,
    pub enrolled: u32,
    pub spots_left: u32,
}

pub struct ListClassesHandler {
    classes: Arc<dyn ClassRepository>,
    notifier: Arc<dyn Notifier>,
    retry: RetryPolicy,
}

impl ListClassesHandler {
    pub fn new(classes: Arc<dyn ClassRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            classes,
            notifier,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn handle(&self) -> Result<Vec<ClassView>, DomainError> {
        let classes = self
            .retry
            .retry("list_classes", || self.classes.list())
            .await
            .map_err(|e| super::store_failure(self.notifier.as_ref(), "Could not load classes", e))?;

        let mut views = Vec::with_capacity(classes.len());
        for class in classes {
            let enrolled = self.classes.count_enrollments(&class.id).await?;
            views.push(ClassView {
                spots_left: class.spots_left(enrolled),
                enrolled,
                class,
            });
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notify::RecordingNotifier;
    use crate::domain::classes::ClassEnrollment;
    use crate::domain::foundation::{ClassId, ErrorCode};
    use crate::ports::NotificationLevel;
    use async_trait::async_trait;
    use chrono::{NaiveTime, Weekday};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// Fails the first `failures` list calls.
    struct FlakyClasses {
        failures: u32,
        calls: AtomicU32,
        class: GymClass,
    }

    impl FlakyClasses {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
                class: GymClass {
                    id: ClassId::new(),
                    name: "Spin".to_string(),
                    instructor: Some("Marta".to_string()),
                    day_of_week: Weekday::Tue,
                    start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
                    duration_minutes: 45,
                    capacity: 10,
                },
            }
        }
    }

    #[async_trait]
    impl ClassRepository for FlakyClasses {
        async fn list(&self) -> Result<Vec<GymClass>, DomainError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(DomainError::database("timeout"));
            }
            Ok(vec![self.class.clone()])
        }

        async fn count_enrollments(&self, _class_id: &ClassId) -> Result<u32, DomainError> {
            Ok(4)
        }

        async fn enroll(&self, _enrollment: &ClassEnrollment) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(4))
    }

    #[tokio::test]
    async fn recovers_within_two_retries() {
        let classes = Arc::new(FlakyClasses::new(2));
        let handler = ListClassesHandler::new(classes.clone(), Arc::new(RecordingNotifier::new()))
            .with_retry(fast_retry());

        let views = handler.handle().await.unwrap();

        assert_eq!(classes.calls.load(Ordering::SeqCst), 3);
        assert_eq!(views[0].enrolled, 4);
        assert_eq!(views[0].spots_left, 6);
    }

    #[tokio::test]
    async fn third_failure_is_reported() {
        let classes = Arc::new(FlakyClasses::new(3));
        let notifier = Arc::new(RecordingNotifier::new());
        let handler =
            ListClassesHandler::new(classes.clone(), notifier.clone()).with_retry(fast_retry());

        let err = handler.handle().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(classes.calls.load(Ordering::SeqCst), 3);
        assert_eq!(notifier.last().unwrap().level, NotificationLevel::Error);
    }
}
