//! Attendance handlers.
//!
//! ## Commands
//! - Check-in (manual or badge)
//! - Check-out (manual or badge)
//! - Editing a session's check-in time
//! - Deleting a session (administrators)
//! - Sweeping sessions left open past the auto-checkout threshold
//!
//! ## Queries
//! - Today's sessions and summary

mod check_in;
mod check_out;
mod delete_attendance;
mod edit_attendance;
mod sweep_overdue;
mod today_attendance;

use super::store_failure;

// Commands
pub use check_in::{CheckInCommand, CheckInHandler};
pub use check_out::{CheckOutCommand, CheckOutHandler, CheckOutTarget};
pub use delete_attendance::{DeleteAttendanceCommand, DeleteAttendanceHandler};
pub use edit_attendance::{EditAttendanceCommand, EditAttendanceHandler};
pub use sweep_overdue::{SweepOverdueCheckinsCommand, SweepOverdueCheckinsHandler, SweepResult};

// Queries
pub use today_attendance::{TodayAttendance, TodayAttendanceHandler};
