//! CheckOutHandler - Command handler closing an attendance session.

use std::sync::Arc;

use crate::domain::attendance::{Attendance, AttendanceError, CheckoutSource, QrPayload};
use crate::domain::foundation::{AttendanceId, Timestamp};
use crate::ports::{AttendanceRepository, Notification, Notifier};

/// Which session to close.
#[derive(Debug, Clone)]
pub enum CheckOutTarget {
    /// Staff picked the row in the attendance table.
    Session(AttendanceId),
    /// A badge was scanned; the member's open session is closed.
    Badge(String),
}

#[derive(Debug, Clone)]
pub struct CheckOutCommand {
    pub target: CheckOutTarget,
    pub at: Timestamp,
}

impl CheckOutCommand {
    pub fn manual(id: AttendanceId) -> Self {
        Self {
            target: CheckOutTarget::Session(id),
            at: Timestamp::now(),
        }
    }

    pub fn badge(raw: impl Into<String>) -> Self {
        Self {
            target: CheckOutTarget::Badge(raw.into()),
            at: Timestamp::now(),
        }
    }
}

pub struct CheckOutHandler {
    attendance: Arc<dyn AttendanceRepository>,
    notifier: Arc<dyn Notifier>,
}

impl CheckOutHandler {
    pub fn new(attendance: Arc<dyn AttendanceRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            attendance,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: CheckOutCommand) -> Result<Attendance, AttendanceError> {
        let notifier = self.notifier.as_ref();

        let (mut session, source) = match &cmd.target {
            CheckOutTarget::Session(id) => {
                let session = self
                    .attendance
                    .find_by_id(id)
                    .await
                    .map_err(|e| super::store_failure(notifier, "Check-out failed", e))?
                    .ok_or(AttendanceError::NotFound(*id))?;
                (session, CheckoutSource::Manual)
            }
            CheckOutTarget::Badge(raw) => {
                let payload = QrPayload::parse(raw)?;
                let session = self
                    .attendance
                    .find_open_for_member(&payload.id)
                    .await
                    .map_err(|e| super::store_failure(notifier, "Check-out failed", e))?
                    .ok_or(AttendanceError::NoOpenSession(payload.id))?;
                (session, CheckoutSource::QrScan)
            }
        };

        session.check_out(cmd.at)?;
        self.attendance
            .update(&session)
            .await
            .map_err(|e| super::store_failure(notifier, "Check-out failed", e))?;

        tracing::info!(
            attendance_id = %session.id,
            member_id = %session.member_id,
            source = source.as_str(),
            minutes = session.duration_minutes(cmd.at),
            "member checked out"
        );
        notifier.notify(Notification::success("Checked out", "Check-out recorded"));
        Ok(session)
    }
}
