//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler receives its ports, and where it reports to staff a [`Notifier`],
//! through its constructor.

pub mod attendance;
pub mod classes;
pub mod memberships;
pub mod payments;
pub mod reports;

use crate::domain::foundation::DomainError;
use crate::ports::{Notification, Notifier};

/// Logs a data-store failure and tells staff the action did not go through.
fn store_failure(notifier: &dyn Notifier, title: &str, err: DomainError) -> DomainError {
    tracing::error!(code = %err.code, error = %err.message, "{}", title);
    notifier.notify(Notification::error(title, err.message.clone()));
    err
}
