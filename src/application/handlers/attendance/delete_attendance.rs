//! DeleteAttendanceHandler - Command handler removing an attendance row.

use std::sync::Arc;

use crate::domain::attendance::AttendanceError;
use crate::domain::foundation::{AttendanceId, CurrentUser};
use crate::ports::{AttendanceRepository, Notification, Notifier};

#[derive(Debug, Clone)]
pub struct DeleteAttendanceCommand {
    pub id: AttendanceId,
    pub user: CurrentUser,
}

/// Hard delete, restricted to administrators.
pub struct DeleteAttendanceHandler {
    attendance: Arc<dyn AttendanceRepository>,
    notifier: Arc<dyn Notifier>,
}

impl DeleteAttendanceHandler {
    pub fn new(attendance: Arc<dyn AttendanceRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            attendance,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: DeleteAttendanceCommand) -> Result<(), AttendanceError> {
        if !cmd.user.is_admin() {
            tracing::warn!(user_id = %cmd.user.id, attendance_id = %cmd.id, "non-admin attempted attendance delete");
            return Err(AttendanceError::Forbidden(
                "only administrators can delete attendance records".to_string(),
            ));
        }

        let notifier = self.notifier.as_ref();
        self.attendance
            .find_by_id(&cmd.id)
            .await
            .map_err(|e| super::store_failure(notifier, "Could not delete attendance", e))?
            .ok_or(AttendanceError::NotFound(cmd.id))?;

        self.attendance
            .delete(&cmd.id)
            .await
            .map_err(|e| super::store_failure(notifier, "Could not delete attendance", e))?;

        tracing::info!(attendance_id = %cmd.id, user_id = %cmd.user.id, "attendance deleted");
        notifier.notify(Notification::success("Attendance deleted", "Record removed"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGymStore;
    use crate::adapters::notify::RecordingNotifier;
    use crate::domain::attendance::Attendance;
    use crate::domain::foundation::{MemberId, Timestamp, UserId};

    async fn seeded() -> (Arc<InMemoryGymStore>, Attendance, DeleteAttendanceHandler) {
        let store = Arc::new(InMemoryGymStore::new());
        let session = Attendance::check_in(MemberId::new(), Timestamp::now());
        store.seed_attendance(session.clone()).await;
        let handler = DeleteAttendanceHandler::new(store.clone(), Arc::new(RecordingNotifier::new()));
        (store, session, handler)
    }

    #[tokio::test]
    async fn admin_can_delete() {
        let (store, session, handler) = seeded().await;
        let admin = CurrentUser::admin(UserId::new("owner").unwrap(), "owner@gym.test");

        handler
            .handle(DeleteAttendanceCommand { id: session.id, user: admin })
            .await
            .unwrap();

        assert!(store.attendance_rows().await.is_empty());
    }

    #[tokio::test]
    async fn staff_cannot_delete() {
        let (store, session, handler) = seeded().await;
        let staff = CurrentUser::staff(UserId::new("desk").unwrap(), "desk@gym.test");

        let err = handler
            .handle(DeleteAttendanceCommand { id: session.id, user: staff })
            .await
            .unwrap_err();

        assert!(matches!(err, AttendanceError::Forbidden(_)));
        assert_eq!(store.attendance_rows().await.len(), 1);
    }
}
