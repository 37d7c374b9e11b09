//! Payment domain module.
//!
//! Stored payment records, the derived display status and billing summaries.
//!
//! # Module Structure
//!
//! - `record` - Payment row, creation draft and partial updates
//! - `status` - Stored status, display status and the derivation policy
//! - `method` - Accepted payment methods
//! - `summary` - Dashboard totals per display status

mod errors;
mod method;
mod record;
mod status;
mod summary;

pub use errors::PaymentError;
pub use method::PaymentMethod;
pub use record::{Payment, PaymentDraft, PaymentPatch};
pub use status::{derive_status, DisplayStatus, PaymentStatus, StatusPolicy, NEAR_OVERDUE_DAYS};
pub use summary::{PaymentSummary, StatusBucket};
