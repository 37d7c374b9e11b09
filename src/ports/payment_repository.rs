//! Payment repository port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, MemberId, PaymentId};
use crate::domain::payment::{Payment, PaymentStatus};

/// Filter and page for payment listings.
///
/// Results are ordered by due date, newest first. `offset` and `limit` drive
/// the infinite-scroll page loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentQuery {
    pub member_id: Option<MemberId>,
    pub status: Option<PaymentStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for PaymentQuery {
    fn default() -> Self {
        Self {
            member_id: None,
            status: None,
            limit: 50,
            offset: 0,
        }
    }
}

impl PaymentQuery {
    pub fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            ..Default::default()
        }
    }

    pub fn for_member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when the row satisfies the filters (ignores paging).
    pub fn matches(&self, payment: &Payment) -> bool {
        self.member_id.map_or(true, |id| payment.member_id == id)
            && self.status.map_or(true, |s| payment.status == s)
    }
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Overwrite an existing payment.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if the payment doesn't exist
    async fn update(&self, payment: &Payment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, DomainError>;

    /// Paid payments whose `payment_date` falls in `[from, to)`.
    async fn list_paid_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PaymentRepository) {}
    }

    #[test]
    fn query_matches_on_filters() {
        let payment = Payment::sample(PaymentStatus::Paid, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(PaymentQuery::default().matches(&payment));
        assert!(PaymentQuery::default().for_member(payment.member_id).matches(&payment));
        assert!(!PaymentQuery::default().with_status(PaymentStatus::Pending).matches(&payment));
    }
}
