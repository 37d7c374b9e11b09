//! Attendance domain module.
//!
//! Check-in sessions, the auto-checkout settings and QR badge decoding.
//!
//! # Module Structure
//!
//! - `record` - Attendance session and its CheckedIn -> CheckedOut lifecycle
//! - `settings` - Auto-checkout threshold and switch
//! - `qr` - Badge payload decoding
//! - `summary` - Daily figures

mod errors;
mod qr;
mod record;
mod settings;
mod summary;

pub use errors::AttendanceError;
pub use qr::{QrPayload, QR_PAYLOAD_KIND};
pub use record::{Attendance, AttendanceState, CheckoutSource};
pub use settings::{GymSettings, DEFAULT_AUTO_CHECKOUT_MINUTES};
pub use summary::AttendanceSummary;
