//! Payment methods accepted at the front desk.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Check,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Check => "check",
            PaymentMethod::Other => "other",
        }
    }

    /// Parses the storage representation. Unknown values map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cash" => PaymentMethod::Cash,
            "card" => PaymentMethod::Card,
            "transfer" | "bank_transfer" => PaymentMethod::Transfer,
            "check" => PaymentMethod::Check,
            _ => PaymentMethod::Other,
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}
