//! Request types for report endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::foundation::MemberId;

/// Query string for `GET /api/reports/revenue`. The range is `[from, to)`.
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueParams {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Query string for `GET /api/reports/payment-status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentStatusParams {
    pub member_id: Option<MemberId>,
}
