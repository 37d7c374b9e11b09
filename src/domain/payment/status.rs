//! Stored payment status and the derived display status.
//!
//! The stored [`PaymentStatus`] is authoritative. [`DisplayStatus`] layers due-date
//! proximity on top of it and is recomputed on every read; it is never written back.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::Payment;

/// Default width of the "due soon" window, in days.
pub const NEAR_OVERDUE_DAYS: i64 = 7;

/// Persisted payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    /// Parses the lowercase storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paid" => Some(PaymentStatus::Paid),
            "pending" => Some(PaymentStatus::Pending),
            "overdue" => Some(PaymentStatus::Overdue),
            "cancelled" => Some(PaymentStatus::Cancelled),
            _ => None,
        }
    }

    /// Paid and cancelled are final; due dates no longer matter for them.
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Cancelled)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status shown to staff: the stored status plus due-date proximity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Paid,
    Pending,
    NearOverdue,
    Overdue,
    Cancelled,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Paid => "paid",
            DisplayStatus::Pending => "pending",
            DisplayStatus::NearOverdue => "near_overdue",
            DisplayStatus::Overdue => "overdue",
            DisplayStatus::Cancelled => "cancelled",
        }
    }

    /// True when the payment still needs staff attention.
    pub fn needs_attention(&self) -> bool {
        matches!(self, DisplayStatus::NearOverdue | DisplayStatus::Overdue)
    }
}

impl From<PaymentStatus> for DisplayStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Paid => DisplayStatus::Paid,
            PaymentStatus::Pending => DisplayStatus::Pending,
            PaymentStatus::Overdue => DisplayStatus::Overdue,
            PaymentStatus::Cancelled => DisplayStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule set for deriving display statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    /// Pending payments due within this many days are shown as near overdue.
    pub near_overdue_days: i64,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            near_overdue_days: NEAR_OVERDUE_DAYS,
        }
    }
}

impl StatusPolicy {
    pub fn new(near_overdue_days: i64) -> Self {
        Self { near_overdue_days }
    }

    /// Derives the display status of a stored status and due date on a given day.
    ///
    /// Comparison is on calendar days: a payment due today is near overdue,
    /// a payment due yesterday is overdue.
    pub fn derive_on(&self, status: PaymentStatus, due_date: NaiveDate, today: NaiveDate) -> DisplayStatus {
        match status {
            PaymentStatus::Pending => {
                if due_date < today {
                    DisplayStatus::Overdue
                } else if due_date < today + Duration::days(self.near_overdue_days) {
                    DisplayStatus::NearOverdue
                } else {
                    DisplayStatus::Pending
                }
            }
            other => other.into(),
        }
    }

    /// Derives the display status of a payment at instant `now`.
    pub fn derive(&self, payment: &Payment, now: Timestamp) -> DisplayStatus {
        self.derive_on(payment.status, payment.due_date, now.date())
    }
}

/// Derives the display status with the default seven-day window.
pub fn derive_status(payment: &Payment, now: Timestamp) -> DisplayStatus {
    StatusPolicy::default().derive(payment, now)
}
