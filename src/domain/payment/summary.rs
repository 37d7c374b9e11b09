//! Aggregated counts and totals per display status.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::{DisplayStatus, Payment, StatusPolicy};

/// Count and amount for one display status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBucket {
    pub count: usize,
    pub total: Decimal,
}

impl StatusBucket {
    fn add(&mut self, amount: Decimal) {
        self.count += 1;
        self.total += amount;
    }
}

/// Payment overview for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    pub paid: StatusBucket,
    pub pending: StatusBucket,
    pub near_overdue: StatusBucket,
    pub overdue: StatusBucket,
    pub cancelled: StatusBucket,
}

impl PaymentSummary {
    pub fn from_payments<'a>(
        payments: impl IntoIterator<Item = &'a Payment>,
        policy: &StatusPolicy,
        now: Timestamp,
    ) -> Self {
        let mut summary = Self::default();
        for payment in payments {
            summary
                .bucket_mut(policy.derive(payment, now))
                .add(payment.amount);
        }
        summary
    }

    pub fn bucket(&self, status: DisplayStatus) -> &StatusBucket {
        match status {
            DisplayStatus::Paid => &self.paid,
            DisplayStatus::Pending => &self.pending,
            DisplayStatus::NearOverdue => &self.near_overdue,
            DisplayStatus::Overdue => &self.overdue,
            DisplayStatus::Cancelled => &self.cancelled,
        }
    }

    fn bucket_mut(&mut self, status: DisplayStatus) -> &mut StatusBucket {
        match status {
            DisplayStatus::Paid => &mut self.paid,
            DisplayStatus::Pending => &mut self.pending,
            DisplayStatus::NearOverdue => &mut self.near_overdue,
            DisplayStatus::Overdue => &mut self.overdue,
            DisplayStatus::Cancelled => &mut self.cancelled,
        }
    }

    /// Amount still expected from members (pending, near overdue, overdue).
    pub fn outstanding(&self) -> Decimal {
        self.pending.total + self.near_overdue.total + self.overdue.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    #[test]
    fn buckets_follow_display_status() {
        let now = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap());
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let payments = vec![
            Payment::sample(PaymentStatus::Paid, today - Duration::days(40)),
            Payment::sample(PaymentStatus::Pending, today - Duration::days(2)),
            Payment::sample(PaymentStatus::Pending, today + Duration::days(2)),
            Payment::sample(PaymentStatus::Pending, today + Duration::days(20)),
        ];

        let summary = PaymentSummary::from_payments(&payments, &StatusPolicy::default(), now);

        assert_eq!(summary.paid.count, 1);
        assert_eq!(summary.overdue.count, 1);
        assert_eq!(summary.near_overdue.count, 1);
        assert_eq!(summary.pending.count, 1);
        assert_eq!(summary.cancelled, StatusBucket::default());
        assert_eq!(summary.outstanding(), Decimal::new(900, 0));
        assert_eq!(summary.bucket(DisplayStatus::Paid).total, Decimal::new(300, 0));
    }
}
