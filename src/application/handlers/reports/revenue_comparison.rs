//! RevenueComparisonHandler - Revenue of a period against the one before it.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::ValidationError;
use crate::domain::payment::{Payment, PaymentError};
use crate::ports::PaymentRepository;

/// Half-open date range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if to <= from {
            return Err(ValidationError::invalid_format(
                "period",
                "end date must be after start date",
            ));
        }
        Ok(Self { from, to })
    }

    /// The period of equal length ending where this one starts.
    pub fn previous(&self) -> Self {
        let length = self.to - self.from;
        Self {
            from: self.from - length,
            to: self.from,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodRevenue {
    pub period: Period,
    pub total: Decimal,
    pub payments: usize,
}

impl PeriodRevenue {
    fn from_payments(period: Period, payments: &[Payment]) -> Self {
        Self {
            period,
            total: payments.iter().map(|p| p.amount).sum(),
            payments: payments.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueComparison {
    pub current: PeriodRevenue,
    pub previous: PeriodRevenue,
    /// Percentage change, rounded to one decimal. `None` when the previous
    /// period earned nothing.
    pub change_percent: Option<Decimal>,
}

pub struct RevenueComparisonHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl RevenueComparisonHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, current: Period) -> Result<RevenueComparison, PaymentError> {
        let previous = current.previous();

        let (current_rows, previous_rows) = futures::try_join!(
            self.payments.list_paid_between(current.from, current.to),
            self.payments.list_paid_between(previous.from, previous.to),
        )?;

        let current = PeriodRevenue::from_payments(current, &current_rows);
        let previous = PeriodRevenue::from_payments(previous, &previous_rows);
        let change_percent = (!previous.total.is_zero()).then(|| {
            ((current.total - previous.total) / previous.total * Decimal::ONE_HUNDRED).round_dp(1)
        });

        Ok(RevenueComparison {
            current,
            previous,
            change_percent,
        })
    }
}
