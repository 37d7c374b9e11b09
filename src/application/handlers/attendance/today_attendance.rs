//! TodayAttendanceHandler - Query handler for the day's sessions.

use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use crate::domain::attendance::{Attendance, AttendanceError, AttendanceSummary};
use crate::domain::foundation::Timestamp;
use crate::ports::AttendanceRepository;

#[derive(Debug, Clone, Serialize)]
pub struct TodayAttendance {
    pub sessions: Vec<Attendance>,
    pub summary: AttendanceSummary,
}

pub struct TodayAttendanceHandler {
    attendance: Arc<dyn AttendanceRepository>,
}

impl TodayAttendanceHandler {
    pub fn new(attendance: Arc<dyn AttendanceRepository>) -> Self {
        Self { attendance }
    }

    /// Sessions checked in on the calendar day of `now`, newest first.
    pub async fn handle(&self, now: Timestamp) -> Result<TodayAttendance, AttendanceError> {
        let start = Timestamp::start_of_day(now.date());
        let end = Timestamp::start_of_day(now.date() + Duration::days(1));
        let sessions = self.attendance.list_between(start, end).await?;
        let summary = AttendanceSummary::from_sessions(&sessions, now);
        Ok(TodayAttendance { sessions, summary })
    }
}
