//! PaymentStatusReportHandler - Counts and totals per display status.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::payment::{PaymentError, PaymentSummary, StatusPolicy};
use crate::ports::{PaymentQuery, PaymentRepository};

const PAGE_SIZE: u32 = 500;

pub struct PaymentStatusReportHandler {
    payments: Arc<dyn PaymentRepository>,
    policy: StatusPolicy,
}

impl PaymentStatusReportHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, policy: StatusPolicy) -> Self {
        Self { payments, policy }
    }

    /// Summarises every payment (optionally one member's) as of `now`.
    pub async fn handle(
        &self,
        member_id: Option<MemberId>,
        now: Timestamp,
    ) -> Result<PaymentSummary, PaymentError> {
        let mut query = PaymentQuery::page(PAGE_SIZE, 0);
        query.member_id = member_id;

        let mut rows = Vec::new();
        loop {
            let page = self.payments.list(&query).await?;
            let last_page = page.len() < PAGE_SIZE as usize;
            rows.extend(page);
            if last_page {
                break;
            }
            query.offset += PAGE_SIZE;
        }

        Ok(PaymentSummary::from_payments(&rows, &self.policy, now))
    }
}
