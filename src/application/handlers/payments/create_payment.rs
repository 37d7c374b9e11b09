//! CreatePaymentHandler - Command handler for recording a payment.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{CurrentUser, PaymentId, Timestamp};
use crate::domain::payment::{Payment, PaymentDraft, PaymentError};
use crate::ports::{
    MemberRepository, MembershipTypeRepository, Notification, Notifier, PaymentRepository,
};

use super::write_through::{resolve_selection, write_through, MembershipWriteThrough};

/// Command to record a new payment.
#[derive(Debug, Clone)]
pub struct CreatePaymentCommand {
    pub draft: PaymentDraft,
    pub user: CurrentUser,
}

/// A saved payment and the outcome of the membership-type write-through.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSaved {
    pub payment: Payment,
    pub membership: MembershipWriteThrough,
}

/// Handler for recording payments.
///
/// The payment insert is the primary operation. The member's plan code is
/// resolved against the catalog and written afterwards; see
/// [`MembershipWriteThrough`].
pub struct CreatePaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    members: Arc<dyn MemberRepository>,
    membership_types: Arc<dyn MembershipTypeRepository>,
    notifier: Arc<dyn Notifier>,
}

impl CreatePaymentHandler {
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

    pub async fn handle(&self, cmd: CreatePaymentCommand) -> Result<PaymentSaved, PaymentError> {
        // 1. Schema checks before any store call
        cmd.draft.validate()?;

        // 2. Load the member
        let member = self
            .members
            .find_by_id(&cmd.draft.member_id)
            .await
            .map_err(|e| super::store_failure(self.notifier.as_ref(), "Could not save payment", e))?
            .ok_or(PaymentError::MemberNotFound(cmd.draft.member_id))?;

        // 3. Resolve the selected plan against the catalog
        let resolution = resolve_selection(
            self.membership_types.as_ref(),
            self.notifier.as_ref(),
            &cmd.draft.membership_type,
        )
        .await?;

        // 4. Insert the payment
        let payment = cmd.draft.into_payment(PaymentId::new(), Timestamp::now());
        self.payments
            .insert(&payment)
            .await
            .map_err(|e| super::store_failure(self.notifier.as_ref(), "Could not save payment", e))?;

        tracing::info!(
            payment_id = %payment.id,
            member_id = %payment.member_id,
            amount = %payment.amount,
            status = %payment.status,
            user_id = %cmd.user.id,
            "payment created"
        );

        // 5. Write the resolved plan through to the member
        let membership = write_through(
            self.members.as_ref(),
            self.notifier.as_ref(),
            &member,
            resolution.resolved_code(),
        )
        .await;

        if !membership.is_partial_failure() {
            self.notifier.notify(Notification::success(
                "Payment saved",
                format!("Payment of {} recorded for {}", payment.amount, member.full_name()),
            ));
        }

        Ok(PaymentSaved {
            payment,
            membership,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGymStore;
    use crate::adapters::notify::RecordingNotifier;
    use crate::domain::foundation::{DomainError, ErrorCode, MemberId, MembershipTypeId, UserId};
    use crate::domain::membership::{Member, MembershipError, MembershipType};
    use crate::domain::payment::{PaymentMethod, PaymentStatus};
    use crate::ports::NotificationLevel;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// Member repository that can read but refuses plan updates.
    struct ReadOnlyMembers {
        member: Member,
    }

    #[async_trait]
    impl MemberRepository for ReadOnlyMembers {
        async fn insert(&self, _member: &Member) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
            Ok((self.member.id == *id).then(|| self.member.clone()))
        }

        async fn list(&self) -> Result<Vec<Member>, DomainError> {
            Ok(vec![self.member.clone()])
        }

        async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<Member>, DomainError> {
            Ok(vec![])
        }

        async fn update_membership_type(
            &self,
            _id: &MemberId,
            _membership_type: &str,
        ) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated update failure"))
        }

        async fn list_by_membership_types(
            &self,
            _codes: &[&str],
        ) -> Result<Vec<Member>, DomainError> {
            Ok(vec![])
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn user() -> CurrentUser {
        CurrentUser::staff(UserId::new("staff-1").unwrap(), "front@gym.test")
    }

    fn draft(member_id: MemberId, membership_type: &str) -> PaymentDraft {
        PaymentDraft {
            member_id,
            membership_type: membership_type.to_string(),
            amount: Decimal::new(300, 0),
            due_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: PaymentStatus::Paid,
            payment_method: PaymentMethod::Card,
            notes: None,
        }
    }

    fn plan(code: &str, price: i64, days: u32) -> MembershipType {
        MembershipType::new(MembershipTypeId::new(), code, Decimal::new(price, 0), days).unwrap()
    }

    async fn setup(code: &str) -> (Arc<InMemoryGymStore>, Arc<RecordingNotifier>, Member, CreatePaymentHandler) {
        let store = Arc::new(InMemoryGymStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        store
            .seed_catalog(vec![
                plan("monthly", 300, 30),
                plan("quarterly", 800, 90),
                plan("annual", 3000, 365),
            ])
            .await;
        let member = Member::new("Ana", "Silva", code);
        store.seed_member(member.clone()).await;
        let handler =
            CreatePaymentHandler::new(store.clone(), store.clone(), store.clone(), notifier.clone());
        (store, notifier, member, handler)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn creates_payment_without_touching_matching_member() {
        let (store, notifier, member, handler) = setup("monthly").await;

        let saved = handler
            .handle(CreatePaymentCommand {
                draft: draft(member.id, "monthly"),
                user: user(),
            })
            .await
            .unwrap();

        assert_eq!(saved.membership, MembershipWriteThrough::Unchanged);
        assert_eq!(store.payment_rows().await.len(), 1);
        assert_eq!(notifier.last().unwrap().level, NotificationLevel::Success);
    }

    #[tokio::test]
    async fn writes_selected_type_through_to_member() {
        let (store, _notifier, member, handler) = setup("premium").await;

        let saved = handler
            .handle(CreatePaymentCommand {
                draft: draft(member.id, "quarterly"),
                user: user(),
            })
            .await
            .unwrap();

        assert_eq!(
            saved.membership,
            MembershipWriteThrough::Updated {
                from: "premium".to_string(),
                to: "quarterly".to_string()
            }
        );
        assert_eq!(store.member(&member.id).await.unwrap().membership_type, "quarterly");
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_store() {
        let (store, _notifier, member, handler) = setup("monthly").await;
        let mut bad = draft(member.id, "monthly");
        bad.amount = Decimal::ZERO;

        let result = handler.handle(CreatePaymentCommand { draft: bad, user: user() }).await;

        assert!(matches!(result, Err(PaymentError::Validation(_))));
        assert!(store.payment_rows().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_member_is_rejected() {
        let (_store, _notifier, _member, handler) = setup("monthly").await;
        let missing = MemberId::new();

        let result = handler
            .handle(CreatePaymentCommand {
                draft: draft(missing, "monthly"),
                user: user(),
            })
            .await;

        assert!(matches!(result, Err(PaymentError::MemberNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn member_update_failure_keeps_payment_and_warns() {
        let store = Arc::new(InMemoryGymStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let member = Member::new("Ana", "Silva", "monthly");
        let members = Arc::new(ReadOnlyMembers { member: member.clone() });
        store.seed_catalog(vec![plan("monthly", 300, 30), plan("annual", 3000, 365)]).await;
        let handler = CreatePaymentHandler::new(store.clone(), members, store.clone(), notifier.clone());

        let saved = handler
            .handle(CreatePaymentCommand {
                draft: draft(member.id, "annual"),
                user: user(),
            })
            .await
            .unwrap();

        assert!(saved.membership.is_partial_failure());
        assert_eq!(store.payment_rows().await.len(), 1);
        let warnings = notifier.of_level(NotificationLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("annual"));
    }

    #[tokio::test]
    async fn retired_code_is_written_as_its_replacement() {
        let (store, _notifier, member, handler) = setup("monthly").await;

        let saved = handler
            .handle(CreatePaymentCommand {
                draft: draft(member.id, "platinum"),
                user: user(),
            })
            .await
            .unwrap();

        assert_eq!(
            saved.membership,
            MembershipWriteThrough::Updated {
                from: "monthly".to_string(),
                to: "annual".to_string()
            }
        );
        assert_eq!(store.member(&member.id).await.unwrap().membership_type, "annual");
    }

    #[tokio::test]
    async fn unknown_code_falls_back_to_first_plan_with_warning() {
        let (store, notifier, member, handler) = setup("annual").await;

        handler
            .handle(CreatePaymentCommand {
                draft: draft(member.id, "does-not-exist"),
                user: user(),
            })
            .await
            .unwrap();

        assert_eq!(store.member(&member.id).await.unwrap().membership_type, "monthly");
        let warnings = notifier.of_level(NotificationLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("does-not-exist"));
    }

    #[tokio::test]
    async fn empty_catalog_rejects_payment_before_storage() {
        let store = Arc::new(InMemoryGymStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let member = Member::new("Ana", "Silva", "monthly");
        store.seed_member(member.clone()).await;
        let handler =
            CreatePaymentHandler::new(store.clone(), store.clone(), store.clone(), notifier);

        let result = handler
            .handle(CreatePaymentCommand {
                draft: draft(member.id, "monthly"),
                user: user(),
            })
            .await;

        assert!(matches!(
            result,
            Err(PaymentError::Membership(MembershipError::NoMembershipTypesConfigured))
        ));
        assert!(store.payment_rows().await.is_empty());
    }
}
