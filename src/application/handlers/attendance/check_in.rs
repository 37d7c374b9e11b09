//! CheckInHandler - Command handler opening an attendance session.

use std::sync::Arc;

use crate::domain::attendance::{Attendance, AttendanceError, QrPayload};
use crate::domain::foundation::{MemberId, Timestamp};
use crate::ports::{AttendanceRepository, MemberRepository, Notification, Notifier};

/// Command to check a member in.
#[derive(Debug, Clone)]
pub struct CheckInCommand {
    pub member_id: MemberId,
    pub at: Timestamp,
}

impl CheckInCommand {
    pub fn now(member_id: MemberId) -> Self {
        Self {
            member_id,
            at: Timestamp::now(),
        }
    }

    /// Check-in from a scanned badge.
    pub fn from_qr(raw: &str, at: Timestamp) -> Result<Self, AttendanceError> {
        let payload = QrPayload::parse(raw)?;
        Ok(Self {
            member_id: payload.id,
            at,
        })
    }
}

/// Opens a session. A member may hold at most one open session.
pub struct CheckInHandler {
    members: Arc<dyn MemberRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    notifier: Arc<dyn Notifier>,
}

impl CheckInHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            members,
            attendance,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: CheckInCommand) -> Result<Attendance, AttendanceError> {
        let notifier = self.notifier.as_ref();

        let member = self
            .members
            .find_by_id(&cmd.member_id)
            .await
            .map_err(|e| super::store_failure(notifier, "Check-in failed", e))?
            .ok_or(AttendanceError::MemberNotFound(cmd.member_id))?;

        if let Some(open) = self
            .attendance
            .find_open_for_member(&member.id)
            .await
            .map_err(|e| super::store_failure(notifier, "Check-in failed", e))?
        {
            notifier.notify(Notification::warning(
                "Already checked in",
                format!("{} is already checked in", member.full_name()),
            ));
            return Err(AttendanceError::AlreadyCheckedIn {
                member_id: member.id,
                attendance_id: open.id,
            });
        }

        let session = Attendance::check_in(member.id, cmd.at);
        self.attendance
            .insert(&session)
            .await
            .map_err(|e| super::store_failure(notifier, "Check-in failed", e))?;

        tracing::info!(attendance_id = %session.id, member_id = %member.id, "member checked in");
        notifier.notify(Notification::success(
            "Checked in",
            format!("{} checked in", member.full_name()),
        ));
        Ok(session)
    }
}
