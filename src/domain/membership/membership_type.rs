//! Membership-type catalog.
//!
//! Members reference a catalog entry by its `type` code rather than by id, so the
//! catalog is the only place a code can be checked. Catalog order is insertion order.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MembershipTypeId, ValidationError};

/// A purchasable membership plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipType {
    pub id: MembershipTypeId,
    /// Catalog code, e.g. `monthly`.
    #[serde(rename = "type")]
    pub code: String,
    pub price: Decimal,
    /// Length of one billing period in days.
    pub duration_days: u32,
    #[serde(default)]
    pub description: Option<String>,
}

impl MembershipType {
    /// Creates a catalog entry, rejecting blank codes, negative prices and empty durations.
    pub fn new(
        id: MembershipTypeId,
        code: impl Into<String>,
        price: Decimal,
        duration_days: u32,
    ) -> Result<Self, ValidationError> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err(ValidationError::empty_field("type"));
        }
        if price < Decimal::ZERO {
            return Err(ValidationError::invalid_format("price", "cannot be negative"));
        }
        if duration_days == 0 {
            return Err(ValidationError::out_of_range(
                "duration",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        Ok(Self {
            id,
            code,
            price,
            duration_days,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Due date of a period starting on `start`.
    pub fn due_date_from(&self, start: NaiveDate) -> NaiveDate {
        start + Duration::days(i64::from(self.duration_days))
    }
}

/// Ordered set of membership types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MembershipCatalog(Vec<MembershipType>);

impl MembershipCatalog {
    pub fn new(entries: Vec<MembershipType>) -> Self {
        Self(entries)
    }

    /// Exact match on the `type` code.
    pub fn find(&self, code: &str) -> Option<&MembershipType> {
        self.0.iter().find(|t| t.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    /// First entry by insertion order.
    pub fn first(&self) -> Option<&MembershipType> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MembershipType> {
        self.0.iter()
    }
}

impl From<Vec<MembershipType>> for MembershipCatalog {
    fn from(entries: Vec<MembershipType>) -> Self {
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, price: i64, days: u32) -> MembershipType {
        MembershipType::new(MembershipTypeId::new(), code, Decimal::new(price, 0), days).unwrap()
    }

    #[test]
    fn rejects_zero_duration() {
        let result = MembershipType::new(MembershipTypeId::new(), "monthly", Decimal::ONE, 0);
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn rejects_negative_price() {
        let result =
            MembershipType::new(MembershipTypeId::new(), "monthly", Decimal::new(-1, 0), 30);
        assert!(result.is_err());
    }

    #[test]
    fn free_plans_are_allowed() {
        assert!(MembershipType::new(MembershipTypeId::new(), "trial", Decimal::ZERO, 7).is_ok());
    }

    #[test]
    fn find_is_exact() {
        let catalog = MembershipCatalog::new(vec![entry("monthly", 300, 30)]);
        assert!(catalog.find("monthly").is_some());
        assert!(catalog.find("Monthly").is_none());
    }

    #[test]
    fn first_keeps_insertion_order() {
        let catalog =
            MembershipCatalog::new(vec![entry("annual", 3000, 365), entry("monthly", 300, 30)]);
        assert_eq!(catalog.first().map(|t| t.code.as_str()), Some("annual"));
    }

    #[test]
    fn due_date_adds_duration() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let due = entry("monthly", 300, 30).due_date_from(start);
        assert_eq!(due, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn serializes_code_as_type() {
        let json = serde_json::to_value(entry("day_pass", 20, 1)).unwrap();
        assert_eq!(json["type"], "day_pass");
    }
}
