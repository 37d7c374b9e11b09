//! Daily attendance figures.

use serde::Serialize;
use std::collections::HashSet;

use crate::domain::foundation::Timestamp;

use super::Attendance;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub open_sessions: usize,
    pub closed_sessions: usize,
    pub unique_members: usize,
    /// Mean length of closed sessions, in minutes.
    pub average_session_minutes: Option<i64>,
}

impl AttendanceSummary {
    pub fn from_sessions(sessions: &[Attendance], now: Timestamp) -> Self {
        let closed: Vec<i64> = sessions
            .iter()
            .filter(|s| !s.is_open())
            .map(|s| s.duration_minutes(now))
            .collect();
        let members: HashSet<_> = sessions.iter().map(|s| s.member_id).collect();

        Self {
            open_sessions: sessions.len() - closed.len(),
            closed_sessions: closed.len(),
            unique_members: members.len(),
            average_session_minutes: (!closed.is_empty())
                .then(|| closed.iter().sum::<i64>() / closed.len() as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MemberId;

    #[test]
    fn counts_open_and_closed() {
        let now = Timestamp::now();
        let member = MemberId::new();
        let mut first = Attendance::check_in(member, now.minus_minutes(120));
        first.check_out(now.minus_minutes(60)).unwrap();
        let mut second = Attendance::check_in(MemberId::new(), now.minus_minutes(100));
        second.check_out(now.minus_minutes(70)).unwrap();
        let open = Attendance::check_in(member, now.minus_minutes(10));

        let summary = AttendanceSummary::from_sessions(&[first, second, open], now);

        assert_eq!(summary.open_sessions, 1);
        assert_eq!(summary.closed_sessions, 2);
        assert_eq!(summary.unique_members, 2);
        assert_eq!(summary.average_session_minutes, Some(45));
    }

    #[test]
    fn empty_day_has_no_average() {
        let summary = AttendanceSummary::from_sessions(&[], Timestamp::now());
        assert_eq!(summary, AttendanceSummary::default());
    }
}
