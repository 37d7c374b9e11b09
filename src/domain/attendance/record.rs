//! Attendance sessions.
//!
//! A session is opened on check-in and closed once, by staff, by a QR scan or by
//! the auto-checkout sweep. Editing a session reopens it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AttendanceId, MemberId, StateMachine, Timestamp};

use super::AttendanceError;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    CheckedIn,
    CheckedOut,
}

impl StateMachine for AttendanceState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (AttendanceState::CheckedIn, AttendanceState::CheckedOut)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            AttendanceState::CheckedIn => vec![AttendanceState::CheckedOut],
            AttendanceState::CheckedOut => vec![],
        }
    }
}

/// What closed a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutSource {
    Manual,
    QrScan,
    AutoSweep,
}

impl CheckoutSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutSource::Manual => "manual",
            CheckoutSource::QrScan => "qr_scan",
            CheckoutSource::AutoSweep => "auto_sweep",
        }
    }
}

/// An attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: AttendanceId,
    pub member_id: MemberId,
    pub check_in_time: Timestamp,
    pub check_out_time: Option<Timestamp>,
}

impl Attendance {
    /// Opens a new session.
    pub fn check_in(member_id: MemberId, at: Timestamp) -> Self {
        Self {
            id: AttendanceId::new(),
            member_id,
            check_in_time: at,
            check_out_time: None,
        }
    }

    pub fn state(&self) -> AttendanceState {
        if self.check_out_time.is_some() {
            AttendanceState::CheckedOut
        } else {
            AttendanceState::CheckedIn
        }
    }

    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }

    /// Closes the session at `at`.
    ///
    /// # Errors
    ///
    /// - `AlreadyCheckedOut` if the session is closed
    /// - `InvalidCheckout` if `at` precedes the check-in
    pub fn check_out(&mut self, at: Timestamp) -> Result<(), AttendanceError> {
        self.state()
            .transition_to(AttendanceState::CheckedOut)
            .map_err(|_| AttendanceError::AlreadyCheckedOut(self.id))?;
        if at.is_before(&self.check_in_time) {
            return Err(AttendanceError::invalid_checkout(
                "check-out time precedes check-in time",
            ));
        }
        self.check_out_time = Some(at);
        Ok(())
    }

    /// Replaces the check-in time. The session goes back to checked in.
    pub fn edit(&mut self, check_in_time: Timestamp) {
        self.check_in_time = check_in_time;
        self.check_out_time = None;
    }

    /// Open and started before `cutoff`.
    pub fn is_stale(&self, cutoff: Timestamp) -> bool {
        self.is_open() && self.check_in_time.is_before(&cutoff)
    }

    /// Minutes spent in the gym. Open sessions are measured up to `now`.
    pub fn duration_minutes(&self, now: Timestamp) -> i64 {
        let end = self.check_out_time.unwrap_or(now);
        end.duration_since(&self.check_in_time).num_minutes().max(0)
    }
}
