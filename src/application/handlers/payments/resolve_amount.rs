//! ResolveMembershipAmountHandler - Query handler prefilling the payment form.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::membership::{resolve_amount, AmountResolution, MembershipError};
use crate::ports::{MembershipTypeRepository, Notification, Notifier};

#[derive(Debug, Clone)]
pub struct ResolveMembershipAmountQuery {
    pub membership_type: String,
    /// Payment date used to prefill the due date.
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAmount {
    #[serde(flatten)]
    pub resolution: AmountResolution,
    pub due_date: NaiveDate,
}

/// Looks up the price for a membership code.
///
/// A fallback resolution raises a warning notification but still returns an
/// amount, so the payment form is never blocked.
pub struct ResolveMembershipAmountHandler {
    membership_types: Arc<dyn MembershipTypeRepository>,
    notifier: Arc<dyn Notifier>,
}

impl ResolveMembershipAmountHandler {
    pub fn new(
        membership_types: Arc<dyn MembershipTypeRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            membership_types,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        query: ResolveMembershipAmountQuery,
    ) -> Result<ResolvedAmount, MembershipError> {
        let catalog = self.membership_types.list().await.map_err(|e| {
            super::store_failure(
                self.notifier.as_ref(),
                "Could not load membership types",
                e,
            )
        })?;

        let resolution = resolve_amount(&query.membership_type, &catalog).map_err(|err| {
            self.notifier
                .notify(Notification::error("No membership types", err.to_string()));
            err
        })?;

        if let Some(warning) = resolution.warning() {
            tracing::warn!(
                requested = %resolution.requested_code,
                resolved = %resolution.resolved_code(),
                "membership type fell back to first catalog entry"
            );
            self.notifier
                .notify(Notification::warning("Membership type not found", warning));
        }

        let due_date = resolution.membership_type.due_date_from(query.start_date);
        Ok(ResolvedAmount {
            resolution,
            due_date,
        })
    }
}
