//! EditAttendanceHandler - Command handler correcting a check-in time.

use std::sync::Arc;

use crate::domain::attendance::{Attendance, AttendanceError};
use crate::domain::foundation::{AttendanceId, Timestamp};
use crate::ports::{AttendanceRepository, Notification, Notifier};

#[derive(Debug, Clone)]
pub struct EditAttendanceCommand {
    pub id: AttendanceId,
    pub check_in_time: Timestamp,
}

/// Replaces the check-in time. The session is reopened: its check-out is cleared.
///
/// A member holds at most one open session, so the edit is refused while a
/// different session of the same member is still open.
pub struct EditAttendanceHandler {
    attendance: Arc<dyn AttendanceRepository>,
    notifier: Arc<dyn Notifier>,
}

impl EditAttendanceHandler {
    pub fn new(attendance: Arc<dyn AttendanceRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            attendance,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: EditAttendanceCommand) -> Result<Attendance, AttendanceError> {
        let notifier = self.notifier.as_ref();
        let mut session = self
            .attendance
            .find_by_id(&cmd.id)
            .await
            .map_err(|e| super::store_failure(notifier, "Could not update attendance", e))?
            .ok_or(AttendanceError::NotFound(cmd.id))?;

        if let Some(open) = self
            .attendance
            .find_open_for_member(&session.member_id)
            .await
            .map_err(|e| super::store_failure(notifier, "Could not update attendance", e))?
            .filter(|open| open.id != session.id)
        {
            notifier.notify(Notification::warning(
                "Already checked in",
                "The member has another open session; check it out first",
            ));
            return Err(AttendanceError::AlreadyCheckedIn {
                member_id: session.member_id,
                attendance_id: open.id,
            });
        }

        session.edit(cmd.check_in_time);
        self.attendance
            .update(&session)
            .await
            .map_err(|e| super::store_failure(notifier, "Could not update attendance", e))?;

        tracing::info!(attendance_id = %session.id, "attendance edited");
        notifier.notify(Notification::success("Attendance updated", "Check-in time changed"));
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGymStore;
    use crate::adapters::notify::RecordingNotifier;
    use crate::domain::attendance::AttendanceState;
    use crate::domain::foundation::MemberId;
    use crate::ports::NotificationLevel;

    #[tokio::test]
    async fn edit_reopens_closed_session() {
        let store = Arc::new(InMemoryGymStore::new());
        let now = Timestamp::now();
        let mut session = Attendance::check_in(MemberId::new(), now.minus_minutes(90));
        session.check_out(now.minus_minutes(10)).unwrap();
        store.seed_attendance(session.clone()).await;
        let handler = EditAttendanceHandler::new(store.clone(), Arc::new(RecordingNotifier::new()));

        let edited = handler
            .handle(EditAttendanceCommand {
                id: session.id,
                check_in_time: now.minus_minutes(60),
            })
            .await
            .unwrap();

        assert_eq!(edited.state(), AttendanceState::CheckedIn);
        assert_eq!(edited.check_in_time, now.minus_minutes(60));
        assert_eq!(store.attendance_rows().await[0], edited);
    }

    #[tokio::test]
    async fn edit_is_refused_while_member_has_another_open_session() {
        let store = Arc::new(InMemoryGymStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let now = Timestamp::now();
        let member_id = MemberId::new();
        let mut earlier = Attendance::check_in(member_id, now.minus_minutes(120));
        earlier.check_out(now.minus_minutes(60)).unwrap();
        let current = Attendance::check_in(member_id, now.minus_minutes(10));
        store.seed_attendance(earlier.clone()).await;
        store.seed_attendance(current.clone()).await;
        let handler = EditAttendanceHandler::new(store.clone(), notifier.clone());

        let err = handler
            .handle(EditAttendanceCommand {
                id: earlier.id,
                check_in_time: now.minus_minutes(100),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AttendanceError::AlreadyCheckedIn {
                member_id,
                attendance_id: current.id,
            }
        );
        let open: Vec<_> = store
            .attendance_rows()
            .await
            .into_iter()
            .filter(|a| a.is_open())
            .collect();
        assert_eq!(open, vec![current]);
        assert_eq!(notifier.last().unwrap().level, NotificationLevel::Warning);
    }

    #[tokio::test]
    async fn open_session_can_edit_its_own_check_in() {
        let store = Arc::new(InMemoryGymStore::new());
        let now = Timestamp::now();
        let session = Attendance::check_in(MemberId::new(), now.minus_minutes(30));
        store.seed_attendance(session.clone()).await;
        let handler = EditAttendanceHandler::new(store.clone(), Arc::new(RecordingNotifier::new()));

        let edited = handler
            .handle(EditAttendanceCommand {
                id: session.id,
                check_in_time: now.minus_minutes(45),
            })
            .await
            .unwrap();

        assert_eq!(edited.check_in_time, now.minus_minutes(45));
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let store = Arc::new(InMemoryGymStore::new());
        let handler = EditAttendanceHandler::new(store, Arc::new(RecordingNotifier::new()));
        let id = AttendanceId::new();

        let err = handler
            .handle(EditAttendanceCommand { id, check_in_time: Timestamp::now() })
            .await
            .unwrap_err();

        assert_eq!(err, AttendanceError::NotFound(id));
    }
}
