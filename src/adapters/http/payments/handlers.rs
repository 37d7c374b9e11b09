//! HTTP handlers for payment endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{CreatePaymentCommand, ListPaymentsQuery, UpdatePaymentCommand};
use crate::domain::foundation::PaymentId;
use crate::domain::payment::PaymentDraft;

use super::dto::{ListPaymentsParams, UpdatePaymentRequest};
use crate::adapters::http::auth::Staff;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::GymAppState;

/// GET /api/payments - One page, newest due date first
pub async fn list_payments(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
    Query(params): Query<ListPaymentsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_payments_handler();
    let result = handler
        .handle(ListPaymentsQuery::new(params.into_query()))
        .await?;
    Ok(Json(result))
}

/// POST /api/payments - Record a payment
pub async fn create_payment(
    State(state): State<GymAppState>,
    Staff(user): Staff,
    Json(draft): Json<PaymentDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_payment_handler();
    let saved = handler.handle(CreatePaymentCommand { draft, user }).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PATCH /api/payments/:id - Edit a payment
pub async fn update_payment(
    State(state): State<GymAppState>,
    Staff(user): Staff,
    Path(id): Path<PaymentId>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (patch, membership_type) = request.into_patch(id);
    let handler = state.update_payment_handler();
    let saved = handler
        .handle(UpdatePaymentCommand {
            patch,
            membership_type,
            user,
        })
        .await?;
    Ok(Json(saved))
}
