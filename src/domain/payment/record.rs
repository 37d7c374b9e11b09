//! Payment record, creation draft and partial updates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, PaymentId, Timestamp, ValidationError};

use super::{PaymentMethod, PaymentStatus};

const MAX_NOTES_LEN: usize = 1000;

/// A payment row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub member_id: MemberId,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_date: NaiveDate,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl Payment {
    /// Applies a partial update in place. Fields absent from the patch are kept.
    pub fn apply(&mut self, patch: &PaymentPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(payment_date) = patch.payment_date {
            self.payment_date = payment_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(method) = patch.payment_method {
            self.payment_method = method;
        }
        if let Some(notes) = &patch.notes {
            self.notes = normalize_notes(notes.clone());
        }
    }

    #[cfg(test)]
    pub(crate) fn sample(status: PaymentStatus, due_date: NaiveDate) -> Self {
        Self {
            id: PaymentId::new(),
            member_id: MemberId::new(),
            amount: Decimal::new(30000, 2),
            due_date,
            payment_date: due_date,
            status,
            payment_method: PaymentMethod::Cash,
            notes: None,
            created_at: Timestamp::now(),
        }
    }
}

/// Payment form contents before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub member_id: MemberId,
    /// Membership type code selected on the form.
    pub membership_type: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_date: NaiveDate,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PaymentDraft {
    /// Schema checks run before anything reaches the data store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)?;
        if self.membership_type.trim().is_empty() {
            return Err(ValidationError::empty_field("membership_type"));
        }
        if let Some(notes) = &self.notes {
            validate_notes(notes)?;
        }
        Ok(())
    }

    /// Builds the stored record.
    pub fn into_payment(self, id: PaymentId, created_at: Timestamp) -> Payment {
        Payment {
            id,
            member_id: self.member_id,
            amount: self.amount,
            due_date: self.due_date,
            payment_date: self.payment_date,
            status: self.status,
            payment_method: self.payment_method,
            notes: self.notes.and_then(normalize_notes),
            created_at,
        }
    }
}

/// Partial update of a payment. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentPatch {
    pub id: PaymentId,
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
}

impl PaymentPatch {
    pub fn new(id: PaymentId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(notes) = &self.notes {
            validate_notes(notes)?;
        }
        Ok(())
    }
}

fn validate_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::invalid_format(
            "amount",
            "must be greater than zero",
        ));
    }
    Ok(())
}

fn validate_notes(notes: &str) -> Result<(), ValidationError> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::out_of_range(
            "notes",
            0,
            MAX_NOTES_LEN as i64,
            notes.chars().count() as i64,
        ));
    }
    Ok(())
}

fn normalize_notes(notes: String) -> Option<String> {
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn draft() -> PaymentDraft {
        PaymentDraft {
            member_id: MemberId::new(),
            membership_type: "monthly".to_string(),
            amount: Decimal::new(300, 0),
            due_date: date(31),
            payment_date: date(1),
            status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Card,
            notes: Some("  first month  ".to_string()),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn zero_amount_is_rejected() {
        let mut d = draft();
        d.amount = Decimal::ZERO;
        let err = d.validate().unwrap_err();
        assert_eq!(err.field(), "amount");
    }

    #[test]
    fn blank_membership_type_is_rejected() {
        let mut d = draft();
        d.membership_type = " ".to_string();
        assert!(matches!(d.validate(), Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn into_payment_trims_notes() {
        let payment = draft().into_payment(PaymentId::new(), Timestamp::now());
        assert_eq!(payment.notes.as_deref(), Some("first month"));
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut payment = draft().into_payment(PaymentId::new(), Timestamp::now());
        let before = payment.clone();
        let patch = PaymentPatch::new(payment.id).with_status(PaymentStatus::Paid);

        payment.apply(&patch);

        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.amount, before.amount);
        assert_eq!(payment.due_date, before.due_date);
        assert_eq!(payment.notes, before.notes);
    }

    #[test]
    fn blank_notes_in_patch_clear_notes() {
        let mut payment = draft().into_payment(PaymentId::new(), Timestamp::now());
        let mut patch = PaymentPatch::new(payment.id);
        patch.notes = Some(String::new());
        payment.apply(&patch);
        assert!(payment.notes.is_none());
    }

    #[test]
    fn patch_with_negative_amount_is_invalid() {
        let patch = PaymentPatch::new(PaymentId::new()).with_amount(Decimal::new(-5, 0));
        assert!(patch.validate().is_err());
    }
}
