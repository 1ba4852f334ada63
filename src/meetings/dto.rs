use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::meetings::repo_types::{
    parse_date, MeetingChanges, MeetingRequest, MeetingWithUser, NewMeeting, DEFAULT_STATUS,
};

pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_FAILED: &str = "Failed";

/// Body of `POST /createMeeting`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateMeetingRequest {
    #[schema(example = 7)]
    pub user_id: Option<i32>,
    #[schema(format = Date, example = "2024-05-01")]
    pub date: Option<String>,
    #[schema(example = "10:00-10:30")]
    pub time_range: Option<String>,
    #[schema(example = "sync")]
    pub content: Option<String>,
    /// Defaults to `pending`.
    #[schema(example = "pending")]
    pub status: Option<String>,
}

impl CreateMeetingRequest {
    pub fn validate(self) -> Result<NewMeeting, AppError> {
        let user_id = self
            .user_id
            .ok_or_else(|| AppError::bad_request("user_id is required"))?;
        let raw_date = self
            .date
            .ok_or_else(|| AppError::bad_request("date is required"))?;
        let date = parse_date(&raw_date).map_err(|_| {
            AppError::bad_request(format!("date must be YYYY-MM-DD, got `{raw_date}`"))
        })?;
        let status = match self.status {
            Some(s) => non_blank_status(s)?,
            None => DEFAULT_STATUS.to_string(),
        };

        Ok(NewMeeting {
            user_id,
            date,
            time_range: self.time_range.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            status,
        })
    }
}

/// Body of `PUT /UpdateMeetingByID/{id}`. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMeetingRequest {
    #[schema(example = "approved")]
    pub status: Option<String>,
    #[schema(format = Date, example = "2024-05-02")]
    pub date: Option<String>,
    pub time_range: Option<String>,
    pub content: Option<String>,
}

impl UpdateMeetingRequest {
    pub fn validate(self) -> Result<MeetingChanges, AppError> {
        let date = self
            .date
            .map(|raw| {
                parse_date(&raw).map_err(|_| {
                    AppError::bad_request(format!("date must be YYYY-MM-DD, got `{raw}`"))
                })
            })
            .transpose()?;
        let changes = MeetingChanges {
            status: self.status.map(non_blank_status).transpose()?,
            date,
            time_range: self.time_range,
            content: self.content,
        };
        if changes.is_empty() {
            return Err(AppError::bad_request(
                "at least one of status, date, time_range, content is required",
            ));
        }
        Ok(changes)
    }
}

fn non_blank_status(raw: String) -> Result<String, AppError> {
    let status = raw.trim();
    if status.is_empty() {
        return Err(AppError::bad_request("status must not be blank"));
    }
    Ok(status.to_string())
}

/// `{"Status": "Success"}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[serde(rename = "Status")]
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
        }
    }
}

/// `{"Status": "Failed", "Error": "..."}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Error")]
    pub error: String,
}

impl ErrorResponse {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: STATUS_FAILED.into(),
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeetingResponse {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Data")]
    pub data: MeetingRequest,
}

impl MeetingResponse {
    pub fn success(data: MeetingRequest) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeetingListResponse {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Data")]
    pub data: Vec<MeetingRequest>,
}

impl MeetingListResponse {
    pub fn success(data: Vec<MeetingRequest>) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeetingWithUserListResponse {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Data")]
    pub data: Vec<MeetingWithUser>,
}

impl MeetingWithUserListResponse {
    pub fn success(data: Vec<MeetingWithUser>) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn create_body(json: serde_json::Value) -> CreateMeetingRequest {
        serde_json::from_value(json).expect("deserialize create body")
    }

    #[test]
    fn create_defaults_status_and_text_fields() {
        let new = create_body(serde_json::json!({"user_id": 7, "date": "2024-05-01"}))
            .validate()
            .expect("valid");
        assert_eq!(new.user_id, 7);
        assert_eq!(new.date, date!(2024 - 05 - 01));
        assert_eq!(new.status, "pending");
        assert_eq!(new.time_range, "");
        assert_eq!(new.content, "");
    }

    #[test]
    fn create_requires_user_id_and_date() {
        let err = create_body(serde_json::json!({"date": "2024-05-01"}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("user_id")));

        let err = create_body(serde_json::json!({"user_id": 1})).validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("date")));
    }

    #[test]
    fn create_rejects_bad_date_and_blank_status() {
        let err = create_body(serde_json::json!({"user_id": 1, "date": "tomorrow"}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = create_body(serde_json::json!({"user_id": 1, "date": "2024-05-01", "status": "  "}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("status")));
    }

    #[test]
    fn update_needs_at_least_one_field() {
        let err = UpdateMeetingRequest::default().validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let changes = UpdateMeetingRequest {
            status: Some(" approved ".into()),
            ..Default::default()
        }
        .validate()
        .expect("valid");
        assert_eq!(changes.status.as_deref(), Some("approved"));
        assert!(changes.date.is_none());
    }

    #[test]
    fn envelopes_use_capitalised_keys() {
        let ok = serde_json::to_value(StatusResponse::success()).unwrap();
        assert_eq!(ok, serde_json::json!({"Status": "Success"}));

        let failed = serde_json::to_value(ErrorResponse::failed("boom")).unwrap();
        assert_eq!(failed, serde_json::json!({"Status": "Failed", "Error": "boom"}));

        let list = serde_json::to_value(MeetingListResponse::success(vec![])).unwrap();
        assert_eq!(list, serde_json::json!({"Status": "Success", "Data": []}));
    }
}
