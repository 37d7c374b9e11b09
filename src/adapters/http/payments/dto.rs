//! Request types for payment endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::foundation::{MemberId, PaymentId};
use crate::domain::payment::{PaymentMethod, PaymentPatch, PaymentStatus};
use crate::ports::PaymentQuery;

/// Query string for `GET /api/payments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPaymentsParams {
    pub member_id: Option<MemberId>,
    pub status: Option<PaymentStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Largest page a client may ask for.
pub const MAX_PAGE_SIZE: u32 = 200;

impl ListPaymentsParams {
    pub fn into_query(self) -> PaymentQuery {
        let defaults = PaymentQuery::default();
        PaymentQuery {
            member_id: self.member_id,
            status: self.status,
            limit: self.limit.unwrap_or(defaults.limit).clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.unwrap_or(0),
        }
    }
}

/// Body of `PATCH /api/payments/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePaymentRequest {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Plan selected on the edit form; written through to the member.
    #[serde(default)]
    pub membership_type: Option<String>,
}

impl UpdatePaymentRequest {
    pub fn into_patch(self, id: PaymentId) -> (PaymentPatch, Option<String>) {
        let patch = PaymentPatch {
            id,
            amount: self.amount,
            due_date: self.due_date,
            payment_date: self.payment_date,
            status: self.status,
            payment_method: self.payment_method,
            notes: self.notes,
        };
        (patch, self.membership_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_default_to_first_page() {
        let query = ListPaymentsParams::default().into_query();
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, PaymentQuery::default().limit);
    }

    #[test]
    fn list_params_clamp_page_size() {
        let query = ListPaymentsParams {
            limit: Some(10_000),
            ..Default::default()
        }
        .into_query();
        assert_eq!(query.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn update_request_keeps_absent_fields_empty() {
        let request: UpdatePaymentRequest =
            serde_json::from_str(r#"{"status": "paid", "membership_type": "annual"}"#).unwrap();
        let id = PaymentId::new();
        let (patch, plan) = request.into_patch(id);

        assert_eq!(patch.id, id);
        assert_eq!(patch.status, Some(PaymentStatus::Paid));
        assert_eq!(patch.amount, None);
        assert_eq!(plan.as_deref(), Some("annual"));
    }
}
