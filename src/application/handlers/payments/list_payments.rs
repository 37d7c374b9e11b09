//! ListPaymentsHandler - Query handler for the paged payments table.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{DisplayStatus, Payment, PaymentError, StatusPolicy};
use crate::ports::{PaymentQuery, PaymentRepository};

/// One page of the infinite-scroll payments table.
#[derive(Debug, Clone)]
pub struct ListPaymentsQuery {
    pub query: PaymentQuery,
    /// Instant the display statuses are derived at.
    pub as_of: Timestamp,
}

impl ListPaymentsQuery {
    pub fn new(query: PaymentQuery) -> Self {
        Self {
            query,
            as_of: Timestamp::now(),
        }
    }
}

/// A payment with its derived display status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentView {
    #[serde(flatten)]
    pub payment: Payment,
    pub display_status: DisplayStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPaymentsResult {
    pub items: Vec<PaymentView>,
    /// Offset of the next page, `None` when the list is exhausted.
    pub next_offset: Option<u32>,
}

pub struct ListPaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
    policy: StatusPolicy,
}

impl ListPaymentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, policy: StatusPolicy) -> Self {
        Self { payments, policy }
    }

    pub async fn handle(&self, query: ListPaymentsQuery) -> Result<ListPaymentsResult, PaymentError> {
        let page_size = query.query.limit;

        // One extra row tells us whether another page exists.
        let mut lookahead = query.query.clone();
        lookahead.limit = page_size.saturating_add(1);
        let mut rows = self.payments.list(&lookahead).await?;

        let has_more = rows.len() > page_size as usize;
        rows.truncate(page_size as usize);

        let items: Vec<PaymentView> = rows
            .into_iter()
            .map(|payment| PaymentView {
                display_status: self.policy.derive(&payment, query.as_of),
                payment,
            })
            .collect();

        let next_offset = has_more.then(|| query.query.offset + page_size);
        tracing::debug!(count = items.len(), offset = query.query.offset, has_more, "payments page loaded");

        Ok(ListPaymentsResult { items, next_offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGymStore;
    use crate::domain::payment::PaymentStatus;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap())
    }

    async fn store_with(due_offsets: &[(PaymentStatus, i64)]) -> Arc<InMemoryGymStore> {
        let store = Arc::new(InMemoryGymStore::new());
        for (status, offset) in due_offsets {
            let due = now().date() + Duration::days(*offset);
            store.seed_payment(Payment::sample(*status, due)).await;
        }
        store
    }

    #[tokio::test]
    async fn attaches_display_status() {
        let store = store_with(&[
            (PaymentStatus::Pending, -1),
            (PaymentStatus::Pending, 0),
            (PaymentStatus::Pending, 30),
            (PaymentStatus::Paid, -60),
        ])
        .await;
        let handler = ListPaymentsHandler::new(store, StatusPolicy::default());

        let result = handler
            .handle(ListPaymentsQuery {
                query: PaymentQuery::page(10, 0),
                as_of: now(),
            })
            .await
            .unwrap();

        let statuses: Vec<_> = result.items.iter().map(|v| v.display_status).collect();
        assert_eq!(
            statuses,
            vec![
                DisplayStatus::Pending,
                DisplayStatus::NearOverdue,
                DisplayStatus::Overdue,
                DisplayStatus::Paid
            ]
        );
        assert_eq!(result.next_offset, None);
    }

    #[tokio::test]
    async fn pages_until_exhausted() {
        let store = store_with(&[
            (PaymentStatus::Paid, 1),
            (PaymentStatus::Paid, 2),
            (PaymentStatus::Paid, 3),
        ])
        .await;
        let handler = ListPaymentsHandler::new(store, StatusPolicy::default());

        let first = handler
            .handle(ListPaymentsQuery { query: PaymentQuery::page(2, 0), as_of: now() })
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.next_offset, Some(2));

        let second = handler
            .handle(ListPaymentsQuery { query: PaymentQuery::page(2, 2), as_of: now() })
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.next_offset, None);
    }
}
