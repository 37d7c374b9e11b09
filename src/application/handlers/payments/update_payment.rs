//! UpdatePaymentHandler - Command handler for editing a payment.

use std::sync::Arc;

use crate::domain::foundation::CurrentUser;
use crate::domain::payment::{PaymentError, PaymentPatch};
use crate::ports::{
    MemberRepository, MembershipTypeRepository, Notification, Notifier, PaymentRepository,
};

use super::create_payment::PaymentSaved;
use super::write_through::{resolve_selection, write_through, MembershipWriteThrough};

/// Command to edit an existing payment.
#[derive(Debug, Clone)]
pub struct UpdatePaymentCommand {
    pub patch: PaymentPatch,
    /// Plan selected on the edit form, if it was shown.
    pub membership_type: Option<String>,
    pub user: CurrentUser,
}

pub struct UpdatePaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    members: Arc<dyn MemberRepository>,
    membership_types: Arc<dyn MembershipTypeRepository>,
    notifier: Arc<dyn Notifier>,
}

impl UpdatePaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        members: Arc<dyn MemberRepository>,
        membership_types: Arc<dyn MembershipTypeRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            payments,
            members,
            membership_types,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: UpdatePaymentCommand) -> Result<PaymentSaved, PaymentError> {
        cmd.patch.validate()?;

        let mut payment = self
            .payments
            .find_by_id(&cmd.patch.id)
            .await
            .map_err(|e| super::store_failure(self.notifier.as_ref(), "Could not update payment", e))?
            .ok_or(PaymentError::NotFound(cmd.patch.id))?;

        let resolution = match cmd.membership_type.as_deref() {
            Some(selected) => Some(
                resolve_selection(self.membership_types.as_ref(), self.notifier.as_ref(), selected)
                    .await?,
            ),
            None => None,
        };

        payment.apply(&cmd.patch);
        self.payments
            .update(&payment)
            .await
            .map_err(|e| super::store_failure(self.notifier.as_ref(), "Could not update payment", e))?;

        tracing::info!(
            payment_id = %payment.id,
            status = %payment.status,
            user_id = %cmd.user.id,
            "payment updated"
        );

        let membership = match &resolution {
            Some(resolution) => match self.members.find_by_id(&payment.member_id).await {
                Ok(Some(member)) => {
                    write_through(
                        self.members.as_ref(),
                        self.notifier.as_ref(),
                        &member,
                        resolution.resolved_code(),
                    )
                    .await
                }
                Ok(None) => {
                    tracing::warn!(member_id = %payment.member_id, "payment references a missing member");
                    MembershipWriteThrough::Unchanged
                }
                Err(err) => {
                    tracing::warn!(member_id = %payment.member_id, error = %err, "could not load member for write-through");
                    self.notifier.notify(Notification::warning(
                        "Payment updated",
                        "The payment was updated, but the member's membership type could not be checked",
                    ));
                    MembershipWriteThrough::Failed {
                        from: String::new(),
                        to: resolution.resolved_code().to_string(),
                        reason: err.to_string(),
                    }
                }
            },
            None => MembershipWriteThrough::Unchanged,
        };

        if !membership.is_partial_failure() {
            self.notifier
                .notify(Notification::success("Payment updated", "Changes saved"));
        }

        Ok(PaymentSaved {
            payment,
            membership,
        })
    }
}
