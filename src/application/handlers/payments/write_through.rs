//! Membership-type write-through after a payment save.
//!
//! The payment form carries the member's plan. The selection is resolved
//! against the catalog first, so only catalog codes reach the member row:
//! retired codes map to their replacement and unknown codes fall back to the
//! first catalog entry with a warning. When the resolved code differs from the
//! plan stored on the member row, the member row is rewritten after the
//! payment is saved. The two writes are not atomic: if the second one fails the payment
//! stays saved, the failure is logged, staff get a warning and the outcome is
//! reported as [`MembershipWriteThrough::Failed`]. No compensation is attempted.

use serde::Serialize;

use crate::domain::membership::{resolve_amount, AmountResolution, Member};
use crate::domain::payment::PaymentError;
use crate::ports::{MemberRepository, MembershipTypeRepository, Notification, Notifier};

/// What happened to the member's plan code after the payment was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MembershipWriteThrough {
    /// The member already had the selected plan.
    Unchanged,
    Updated { from: String, to: String },
    /// The payment is saved but the member row still holds `from`.
    Failed { from: String, to: String, reason: String },
}

impl MembershipWriteThrough {
    pub fn is_partial_failure(&self) -> bool {
        matches!(self, MembershipWriteThrough::Failed { .. })
    }
}

/// Resolves the plan selected on the payment form against the catalog.
///
/// # Errors
///
/// `Membership(NoMembershipTypesConfigured)` when the catalog is empty.
pub(super) async fn resolve_selection(
    membership_types: &dyn MembershipTypeRepository,
    notifier: &dyn Notifier,
    selected: &str,
) -> Result<AmountResolution, PaymentError> {
    let catalog = membership_types
        .list()
        .await
        .map_err(|e| super::store_failure(notifier, "Could not load membership types", e))?;

    let resolution = resolve_amount(selected, &catalog).map_err(|err| {
        notifier.notify(Notification::error("No membership types", err.to_string()));
        PaymentError::from(err)
    })?;

    if let Some(warning) = resolution.warning() {
        tracing::warn!(
            requested = %resolution.requested_code,
            resolved = %resolution.resolved_code(),
            "selected membership type fell back to first catalog entry"
        );
        notifier.notify(Notification::warning("Membership type not found", warning));
    }
    Ok(resolution)
}

/// Writes `resolved_code` onto the member row when it differs.
pub(super) async fn write_through(
    members: &dyn MemberRepository,
    notifier: &dyn Notifier,
    member: &Member,
    resolved_code: &str,
) -> MembershipWriteThrough {
    if member.membership_type == resolved_code {
        return MembershipWriteThrough::Unchanged;
    }

    let from = member.membership_type.clone();
    let to = resolved_code.to_string();
    match members.update_membership_type(&member.id, resolved_code).await {
        Ok(()) => {
            tracing::info!(member_id = %member.id, from = %from, to = %to, "member membership type updated");
            MembershipWriteThrough::Updated { from, to }
        }
        Err(err) => {
            tracing::warn!(
                member_id = %member.id,
                from = %from,
                to = %to,
                error = %err,
                "payment saved but member membership type update failed"
            );
            notifier.notify(Notification::warning(
                "Payment saved",
                format!(
                    "The payment was saved, but {}'s membership type could not be changed to '{}'",
                    member.full_name(),
                    to
                ),
            ));
            MembershipWriteThrough::Failed {
                from,
                to,
                reason: err.to_string(),
            }
        }
    }
}
