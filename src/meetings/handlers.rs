use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{error::AppError, state::AppState};

use super::dto::{
    CreateMeetingRequest, ErrorResponse, MeetingListResponse, MeetingResponse,
    MeetingWithUserListResponse, StatusResponse, UpdateMeetingRequest,
};
use super::repo_types::parse_date;

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meetingDemo", get(get_all_demo))
        .route("/getDatafromUserAndMeeting", get(get_data_from_user_and_meeting))
        .route("/getByDate/:date", get(get_by_date))
        .route("/getAllBookingByUserID/:user_id", get(get_all_booking_by_user_id))
        .route("/getMeetingByID/:id", get(get_meeting_by_id))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/createMeeting", post(create_meeting))
        .route("/deleteMeeting/:id", delete(delete_meeting_by_id))
        .route("/UpdateMeetingByID/:id", put(update_meeting_by_id))
}

// --- handlers ---

/// Every stored meeting request.
#[utoipa::path(
    get,
    path = "/meetingDemo",
    tag = "MeetingRequests",
    responses(
        (status = 200, description = "All meeting requests", body = MeetingListResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_all_demo(
    State(state): State<AppState>,
) -> Result<Json<MeetingListResponse>, AppError> {
    let meetings = state.meetings.list_all().await?;
    Ok(Json(MeetingListResponse::success(meetings)))
}

#[utoipa::path(
    post,
    path = "/createMeeting",
    tag = "MeetingRequests",
    request_body = CreateMeetingRequest,
    responses(
        (status = 201, description = "Meeting request created successfully", body = MeetingResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_meeting(
    State(state): State<AppState>,
    payload: Result<Json<CreateMeetingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MeetingResponse>), AppError> {
    let Json(body) = payload?;
    let new = body.validate()?;
    let meeting = state.meetings.create(new).await?;

    info!(id = meeting.id, user_id = meeting.user_id, date = %meeting.date, "meeting request created");
    Ok((StatusCode::CREATED, Json(MeetingResponse::success(meeting))))
}

#[utoipa::path(
    delete,
    path = "/deleteMeeting/{id}",
    tag = "MeetingRequests",
    params(("id" = i32, Path, description = "The meeting request ID")),
    responses(
        (status = 200, description = "Meeting request deleted successfully", body = StatusResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 404, description = "No meeting request with that ID", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_meeting_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let id = parse_id("id", &id)?;
    if !state.meetings.delete(id).await? {
        return Err(AppError::NotFound(id));
    }

    info!(id, "meeting request deleted");
    Ok(Json(StatusResponse::success()))
}

/// Meeting requests joined with the requesting user's name and email.
#[utoipa::path(
    get,
    path = "/getDatafromUserAndMeeting",
    tag = "MeetingRequests",
    responses(
        (status = 200, description = "Meeting requests with their users", body = MeetingWithUserListResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_data_from_user_and_meeting(
    State(state): State<AppState>,
) -> Result<Json<MeetingWithUserListResponse>, AppError> {
    let rows = state.meetings.list_with_users().await?;
    Ok(Json(MeetingWithUserListResponse::success(rows)))
}

#[utoipa::path(
    put,
    path = "/UpdateMeetingByID/{id}",
    tag = "MeetingRequests",
    params(("id" = i32, Path, description = "The meeting request ID")),
    request_body = UpdateMeetingRequest,
    responses(
        (status = 200, description = "Meeting request updated successfully", body = MeetingResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 404, description = "No meeting request with that ID", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_meeting_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMeetingRequest>, JsonRejection>,
) -> Result<Json<MeetingResponse>, AppError> {
    let id = parse_id("id", &id)?;
    let Json(body) = payload?;
    let changes = body.validate()?;

    let meeting = state
        .meetings
        .update(id, changes)
        .await?
        .ok_or(AppError::NotFound(id))?;

    info!(id, status = %meeting.status, "meeting request updated");
    Ok(Json(MeetingResponse::success(meeting)))
}

#[utoipa::path(
    get,
    path = "/getByDate/{date}",
    tag = "MeetingRequests",
    params(("date" = String, Path, description = "The date to filter meeting requests (YYYY-MM-DD)")),
    responses(
        (status = 200, description = "List of meeting requests for the specified date", body = MeetingListResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_by_date(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<MeetingListResponse>, AppError> {
    let date = parse_date(&raw)
        .map_err(|_| AppError::bad_request(format!("date must be YYYY-MM-DD, got `{raw}`")))?;
    let meetings = state.meetings.list_by_date(date).await?;
    Ok(Json(MeetingListResponse::success(meetings)))
}

#[utoipa::path(
    get,
    path = "/getAllBookingByUserID/{user_id}",
    tag = "MeetingRequests",
    params(("user_id" = i32, Path, description = "The user ID to filter meeting requests")),
    responses(
        (status = 200, description = "List of meeting requests for the specified user", body = MeetingListResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_all_booking_by_user_id(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MeetingListResponse>, AppError> {
    let user_id = parse_id("user_id", &user_id)?;
    let meetings = state.meetings.list_by_user(user_id).await?;
    Ok(Json(MeetingListResponse::success(meetings)))
}

#[utoipa::path(
    get,
    path = "/getMeetingByID/{id}",
    tag = "MeetingRequests",
    params(("id" = i32, Path, description = "The meeting request ID")),
    responses(
        (status = 200, description = "The meeting request", body = MeetingResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 404, description = "No meeting request with that ID", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_meeting_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MeetingResponse>, AppError> {
    let id = parse_id("id", &id)?;
    let meeting = state
        .meetings
        .get(id)
        .await?
        .ok_or(AppError::NotFound(id))?;
    Ok(Json(MeetingResponse::success(meeting)))
}

fn parse_id(name: &str, raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::bad_request(format!("{name} must be an integer, got `{raw}`")))
}
