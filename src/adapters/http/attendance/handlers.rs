//! HTTP handlers for attendance endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    CheckOutCommand, DeleteAttendanceCommand, EditAttendanceCommand, SweepOverdueCheckinsCommand,
};
use crate::domain::foundation::{AttendanceId, Timestamp};

use super::dto::{CheckInRequest, CheckOutRequest, EditAttendanceRequest, SweepParams};
use crate::adapters::http::auth::Staff;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::GymAppState;

/// GET /api/attendance/today
pub async fn today(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .today_attendance_handler()
        .handle(Timestamp::now())
        .await?;
    Ok(Json(result))
}

/// POST /api/attendance/check-in
pub async fn check_in(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
    Json(request): Json<CheckInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = request.into_command(Timestamp::now())?;
    let session = state.check_in_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/attendance/check-out
pub async fn check_out(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
    Json(request): Json<CheckOutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .check_out_handler()
        .handle(CheckOutCommand::from(request))
        .await?;
    Ok(Json(session))
}

/// PATCH /api/attendance/:id - Correct the check-in time
pub async fn edit_attendance(
    State(state): State<GymAppState>,
    Staff(_user): Staff,
    Path(id): Path<AttendanceId>,
    Json(request): Json<EditAttendanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .edit_attendance_handler()
        .handle(EditAttendanceCommand {
            id,
            check_in_time: request.check_in_time,
        })
        .await?;
    Ok(Json(session))
}

/// DELETE /api/attendance/:id (admin only)
pub async fn delete_attendance(
    State(state): State<GymAppState>,
    Staff(user): Staff,
    Path(id): Path<AttendanceId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_attendance_handler()
        .handle(DeleteAttendanceCommand { id, user })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/attendance/sweep - Close overdue sessions now
pub async fn sweep(
    State(state): State<GymAppState>,
    Staff(user): Staff,
    Query(params): Query<SweepParams>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .sweep_handler()
        .handle(SweepOverdueCheckinsCommand::now(params.viewing_today))
        .await?;
    tracing::info!(user_id = %user.id, closed = result.closed, "manual auto check-out sweep");
    Ok(Json(result))
}
