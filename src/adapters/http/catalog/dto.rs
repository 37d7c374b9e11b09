//! Request types for catalog endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

/// Query string for `GET /api/membership-types/:code/amount`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolveAmountParams {
    /// Payment date the due date is counted from. Defaults to today.
    pub start_date: Option<NaiveDate>,
}

/// Query string for `GET /api/members`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberSearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
}

pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const MAX_SEARCH_LIMIT: u32 = 100;

impl MemberSearchParams {
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT)
    }
}
