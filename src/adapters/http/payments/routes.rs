//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{create_payment, list_payments, update_payment};
use crate::adapters::http::state::GymAppState;

/// Routes mounted at `/api/payments`.
pub fn payment_routes() -> Router<GymAppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/:id", patch(update_payment))
}
