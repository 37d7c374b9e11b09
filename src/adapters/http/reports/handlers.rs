//! HTTP handlers for report endpoints.

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;

use crate::application::Period;
use crate::domain::foundation::Timestamp;

use super::dto::{PaymentStatusParams, RevenueParams};
use crate::adapters::http::auth::Staff;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::GymAppState;

/// GET /api/reports/revenue
pub async fn revenue(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
    Query(params): Query<RevenueParams>,
) -> Result<impl IntoResponse, ApiError> {
    let period = Period::new(params.from, params.to)?;
    let comparison = state.revenue_handler().handle(period).await?;
    Ok(Json(comparison))
}

/// GET /api/reports/payment-status
pub async fn payment_status(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
    Query(params): Query<PaymentStatusParams>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .payment_status_handler()
        .handle(params.member_id, Timestamp::now())
        .await?;
    Ok(Json(summary))
}
