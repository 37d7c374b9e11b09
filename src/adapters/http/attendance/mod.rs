//! HTTP adapter for attendance endpoints.
//!
//! - `GET /api/attendance/today` - Today's sessions and summary
//! - `POST /api/attendance/check-in` - Check a member in by id or badge
//! - `POST /api/attendance/check-out` - Close a session by id or badge
//! - `PATCH /api/attendance/:id` - Correct the check-in time
//! - `DELETE /api/attendance/:id` - Remove a record (admin only)
//! - `POST /api/attendance/sweep` - Run the auto check-out now

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::attendance_routes;
