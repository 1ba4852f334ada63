use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use time::Date;
use tokio::sync::RwLock;

use super::repo::MeetingStore;
use super::repo_types::{MeetingChanges, MeetingRequest, MeetingWithUser, NewMeeting, User};

#[derive(Default)]
struct Inner {
    last_id: i32,
    meetings: BTreeMap<i32, MeetingRequest>,
    users: HashMap<i32, User>,
}

/// Process-local store. Backs `APP_STORE=memory` and the test-suite.
#[derive(Default)]
pub struct InMemoryMeetingStore {
    inner: RwLock<Inner>,
}

impl InMemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the user rows consulted by `list_with_users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let inner = Inner {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            ..Default::default()
        };
        Self {
            inner: RwLock::new(inner),
        }
    }

    async fn filtered<F>(&self, keep: F) -> Vec<MeetingRequest>
    where
        F: Fn(&MeetingRequest) -> bool,
    {
        let inner = self.inner.read().await;
        inner.meetings.values().filter(|m| keep(m)).cloned().collect()
    }
}

#[async_trait]
impl MeetingStore for InMemoryMeetingStore {
    async fn list_all(&self) -> anyhow::Result<Vec<MeetingRequest>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn create(&self, new: NewMeeting) -> anyhow::Result<MeetingRequest> {
        let mut inner = self.inner.write().await;
        inner.last_id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("meeting request id space exhausted"))?;
        let meeting = MeetingRequest {
            id: inner.last_id,
            user_id: new.user_id,
            date: new.date,
            time_range: new.time_range,
            content: new.content,
            status: new.status,
        };
        inner.meetings.insert(meeting.id, meeting.clone());
        Ok(meeting)
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<MeetingRequest>> {
        Ok(self.inner.read().await.meetings.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.inner.write().await.meetings.remove(&id).is_some())
    }

    async fn update(
        &self,
        id: i32,
        changes: MeetingChanges,
    ) -> anyhow::Result<Option<MeetingRequest>> {
        let mut inner = self.inner.write().await;
        let Some(meeting) = inner.meetings.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(meeting);
        Ok(Some(meeting.clone()))
    }

    async fn list_by_date(&self, date: Date) -> anyhow::Result<Vec<MeetingRequest>> {
        Ok(self.filtered(|m| m.date == date).await)
    }

    async fn list_by_user(&self, user_id: i32) -> anyhow::Result<Vec<MeetingRequest>> {
        Ok(self.filtered(|m| m.user_id == user_id).await)
    }

    async fn list_with_users(&self) -> anyhow::Result<Vec<MeetingWithUser>> {
        let inner = self.inner.read().await;
        Ok(inner
            .meetings
            .values()
            .filter_map(|m| {
                inner
                    .users
                    .get(&m.user_id)
                    .map(|u| MeetingWithUser::join(m, u))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meetings::repo_types::DEFAULT_STATUS;
    use time::macros::date;

    fn new_meeting(user_id: i32, date: Date) -> NewMeeting {
        NewMeeting {
            user_id,
            date,
            time_range: "09:00-09:30".into(),
            content: "standup".into(),
            status: DEFAULT_STATUS.into(),
        }
    }

    #[tokio::test]
    async fn ids_are_unique_and_not_reused_after_delete() {
        let store = InMemoryMeetingStore::new();
        let a = store.create(new_meeting(1, date!(2024 - 05 - 01))).await.unwrap();
        let b = store.create(new_meeting(1, date!(2024 - 05 - 01))).await.unwrap();
        assert_ne!(a.id, b.id);

        assert!(store.delete(b.id).await.unwrap());
        let c = store.create(new_meeting(2, date!(2024 - 05 - 02))).await.unwrap();
        assert!(c.id > b.id);
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_records_alone() {
        let store = InMemoryMeetingStore::new();
        store.create(new_meeting(1, date!(2024 - 05 - 01))).await.unwrap();
        assert!(!store.delete(999).await.unwrap());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn filters_by_date_and_user() {
        let store = InMemoryMeetingStore::new();
        store.create(new_meeting(1, date!(2024 - 05 - 01))).await.unwrap();
        store.create(new_meeting(2, date!(2024 - 05 - 01))).await.unwrap();
        store.create(new_meeting(1, date!(2024 - 05 - 02))).await.unwrap();

        let by_date = store.list_by_date(date!(2024 - 05 - 01)).await.unwrap();
        assert_eq!(by_date.len(), 2);
        assert!(by_date.iter().all(|m| m.date == date!(2024 - 05 - 01)));

        let by_user = store.list_by_user(1).await.unwrap();
        assert_eq!(by_user.len(), 2);
        assert!(by_user.iter().all(|m| m.user_id == 1));

        assert!(store.list_by_user(42).await.unwrap().is_empty());
        assert!(store.list_by_date(date!(2030 - 01 - 01)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let store = InMemoryMeetingStore::new();
        let changes = MeetingChanges {
            status: Some("approved".into()),
            ..Default::default()
        };
        assert!(store.update(5, changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn join_skips_meetings_without_user() {
        let store = InMemoryMeetingStore::with_users([User {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }]);
        store.create(new_meeting(1, date!(2024 - 05 - 01))).await.unwrap();
        store.create(new_meeting(2, date!(2024 - 05 - 01))).await.unwrap();

        let joined = store.list_with_users().await.unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].user_name, "Ada");
        assert_eq!(joined[0].user_email, "ada@example.com");
    }
}
