//! OpenAPI document for the meeting-request API, served at `/api-docs/openapi.json`.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::meetings::{dto, handlers, repo_types};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(title = "Meeting Requests API"),
    paths(
        handlers::get_all_demo,
        handlers::create_meeting,
        handlers::delete_meeting_by_id,
        handlers::get_data_from_user_and_meeting,
        handlers::update_meeting_by_id,
        handlers::get_by_date,
        handlers::get_all_booking_by_user_id,
        handlers::get_meeting_by_id,
    ),
    components(schemas(
        repo_types::MeetingRequest,
        repo_types::MeetingWithUser,
        dto::CreateMeetingRequest,
        dto::UpdateMeetingRequest,
        dto::StatusResponse,
        dto::ErrorResponse,
        dto::MeetingResponse,
        dto::MeetingListResponse,
        dto::MeetingWithUserListResponse,
    )),
    tags((name = "MeetingRequests", description = "API for managing meeting requests"))
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().expect("paths object");
        for p in [
            "/meetingDemo",
            "/createMeeting",
            "/deleteMeeting/{id}",
            "/getDatafromUserAndMeeting",
            "/UpdateMeetingByID/{id}",
            "/getByDate/{date}",
            "/getAllBookingByUserID/{user_id}",
            "/getMeetingByID/{id}",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        assert!(doc["paths"]["/createMeeting"]["post"]["responses"]["201"].is_object());
        assert!(doc["components"]["schemas"]["MeetingRequest"].is_object());
    }
}
