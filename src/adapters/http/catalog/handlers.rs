//! HTTP handlers for catalog, member lookup, classes and settings.

use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::ResolveMembershipAmountQuery;
use crate::domain::attendance::GymSettings;
use crate::domain::foundation::{ErrorCode, Timestamp};

use super::dto::{MemberSearchParams, ResolveAmountParams};
use crate::adapters::http::auth::Staff;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::GymAppState;

/// GET /api/membership-types
pub async fn list_membership_types(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
) -> Result<impl IntoResponse, ApiError> {
    let catalog = state.membership_types.list().await?;
    Ok(Json(catalog))
}

/// GET /api/membership-types/:code/amount - Prefill for the payment form
pub async fn resolve_amount(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
    Path(code): Path<String>,
    Query(params): Query<ResolveAmountParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ResolveMembershipAmountQuery {
        membership_type: code,
        start_date: params.start_date.unwrap_or_else(|| Timestamp::now().date()),
    };
    let resolved = state.resolve_amount_handler().handle(query).await?;
    Ok(Json(resolved))
}

/// GET /api/members?q= - Name or email search; lists everyone when `q` is blank
pub async fn search_members(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
    Query(params): Query<MemberSearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let members = if params.q.trim().is_empty() {
        state.members.list().await?
    } else {
        state.members.search(&params.q, params.limit()).await?
    };
    Ok(Json(members))
}

/// GET /api/classes
pub async fn list_classes(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
) -> Result<impl IntoResponse, ApiError> {
    let classes = state.list_classes_handler().handle().await?;
    Ok(Json(classes))
}

/// GET /api/settings - Stored settings, or the configured defaults
pub async fn get_settings(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
) -> Result<impl IntoResponse, ApiError> {
    let settings = state
        .settings
        .get()
        .await?
        .unwrap_or(state.default_settings);
    Ok(Json(settings))
}

/// PUT /api/settings (admin only)
pub async fn update_settings(
    State(state): State<GymAppState>,
    Staff(user): Staff,
    Json(settings): Json<GymSettings>,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::new(
            ErrorCode::Forbidden,
            "Only administrators can change gym settings",
        ));
    }
    settings.validate()?;
    state.settings.save(&settings).await?;
    tracing::info!(
        user_id = %user.id,
        auto_checkout_minutes = settings.auto_checkout_minutes,
        auto_checkout_enabled = settings.auto_checkout_enabled,
        "gym settings updated"
    );
    Ok(Json(settings))
}
