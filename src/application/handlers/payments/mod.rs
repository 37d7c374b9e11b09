//! Payment handlers.
//!
//! ## Commands
//! - Recording a payment (with membership-type write-through)
//! - Editing a payment
//!
//! ## Queries
//! - Paged payment list with display statuses
//! - Amount resolution for the payment form

mod create_payment;
mod list_payments;
mod resolve_amount;
mod update_payment;
mod write_through;

use super::store_failure;

// Commands
pub use create_payment::{CreatePaymentCommand, CreatePaymentHandler, PaymentSaved};
pub use update_payment::{UpdatePaymentCommand, UpdatePaymentHandler};
pub use write_through::MembershipWriteThrough;

// Queries
pub use list_payments::{ListPaymentsHandler, ListPaymentsQuery, ListPaymentsResult, PaymentView};
pub use resolve_amount::{
    ResolveMembershipAmountHandler, ResolveMembershipAmountQuery, ResolvedAmount,
};
