use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{macros::format_description, Date};
use utoipa::ToSchema;

pub const DEFAULT_STATUS: &str = "pending";

// `YYYY-MM-DD` on the wire instead of time's default tuple encoding.
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MeetingRequest {
    /// Generated id of the meeting request.
    pub id: i32,
    /// User that requested the meeting.
    pub user_id: i32,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: Date,
    #[schema(example = "10:00-10:30")]
    pub time_range: String,
    pub content: String,
    /// Lifecycle label, e.g. pending, approved, rejected.
    #[schema(example = "pending")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MeetingWithUser {
    pub id: i32,
    pub user_id: i32,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: Date,
    pub time_range: String,
    pub content: String,
    pub status: String,
    pub user_name: String,
    pub user_email: String,
}

impl MeetingWithUser {
    pub fn join(meeting: &MeetingRequest, user: &User) -> Self {
        Self {
            id: meeting.id,
            user_id: meeting.user_id,
            date: meeting.date,
            time_range: meeting.time_range.clone(),
            content: meeting.content.clone(),
            status: meeting.status.clone(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Validated input for inserting a meeting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeeting {
    pub user_id: i32,
    pub date: Date,
    pub time_range: String,
    pub content: String,
    pub status: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingChanges {
    pub status: Option<String>,
    pub date: Option<Date>,
    pub time_range: Option<String>,
    pub content: Option<String>,
}

impl MeetingChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.date.is_none()
            && self.time_range.is_none()
            && self.content.is_none()
    }

    pub fn apply(self, meeting: &mut MeetingRequest) {
        if let Some(status) = self.status {
            meeting.status = status;
        }
        if let Some(date) = self.date {
            meeting.date = date;
        }
        if let Some(time_range) = self.time_range {
            meeting.time_range = time_range;
        }
        if let Some(content) = self.content {
            meeting.content = content;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sample() -> MeetingRequest {
        MeetingRequest {
            id: 1,
            user_id: 7,
            date: date!(2024 - 05 - 01),
            time_range: "10:00-10:30".into(),
            content: "sync".into(),
            status: DEFAULT_STATUS.into(),
        }
    }

    #[test]
    fn date_serializes_as_iso_calendar_date() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["user_id"], 7);

        let back: MeetingRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn parse_date_accepts_only_calendar_dates() {
        assert_eq!(parse_date("2024-05-01").unwrap(), date!(2024 - 05 - 01));
        assert_eq!(parse_date(" 2024-12-31 ").unwrap(), date!(2024 - 12 - 31));
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("05/01/2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut m = sample();
        MeetingChanges {
            status: Some("approved".into()),
            ..Default::default()
        }
        .apply(&mut m);
        assert_eq!(m.status, "approved");
        assert_eq!(m.content, "sync");
        assert_eq!(m.date, date!(2024 - 05 - 01));
        assert!(MeetingChanges::default().is_empty());
    }
}
