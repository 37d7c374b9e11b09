//! Axum router configuration for report endpoints.

use axum::{routing::get, Router};

use super::handlers::{payment_status, revenue};
use crate::adapters::http::state::GymAppState;

/// Routes mounted at `/api/reports`.
pub fn report_routes() -> Router<GymAppState> {
    Router::new()
        .route("/revenue", get(revenue))
        .route("/payment-status", get(payment_status))
}
