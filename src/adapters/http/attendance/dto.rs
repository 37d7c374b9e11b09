//! Request types for attendance endpoints.

use serde::Deserialize;

use crate::application::{CheckInCommand, CheckOutCommand};
use crate::domain::attendance::AttendanceError;
use crate::domain::foundation::{AttendanceId, MemberId, Timestamp};

/// Body of `POST /api/attendance/check-in`: a member id picked from the
/// list, or the raw text of a scanned badge.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CheckInRequest {
    Member { member_id: MemberId },
    Badge { qr: String },
}

impl CheckInRequest {
    pub fn into_command(self, at: Timestamp) -> Result<CheckInCommand, AttendanceError> {
        match self {
            CheckInRequest::Member { member_id } => Ok(CheckInCommand { member_id, at }),
            CheckInRequest::Badge { qr } => CheckInCommand::from_qr(&qr, at),
        }
    }
}

/// Body of `POST /api/attendance/check-out`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CheckOutRequest {
    Session { attendance_id: AttendanceId },
    Badge { qr: String },
}

impl From<CheckOutRequest> for CheckOutCommand {
    fn from(request: CheckOutRequest) -> Self {
        match request {
            CheckOutRequest::Session { attendance_id } => CheckOutCommand::manual(attendance_id),
            CheckOutRequest::Badge { qr } => CheckOutCommand::badge(qr),
        }
    }
}

/// Body of `PATCH /api/attendance/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct EditAttendanceRequest {
    pub check_in_time: Timestamp,
}

/// Query string for `POST /api/attendance/sweep`.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepParams {
    #[serde(default = "default_viewing_today")]
    pub viewing_today: bool,
}

fn default_viewing_today() -> bool {
    true
}
