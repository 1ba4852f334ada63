use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;

use super::repo_types::{MeetingChanges, MeetingRequest, MeetingWithUser, NewMeeting};

/// Persistence for meeting requests. Handlers only ever talk to this trait.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<MeetingRequest>>;
    async fn create(&self, new: NewMeeting) -> anyhow::Result<MeetingRequest>;
    async fn get(&self, id: i32) -> anyhow::Result<Option<MeetingRequest>>;
    /// Returns `false` when no row had that id.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
    async fn update(&self, id: i32, changes: MeetingChanges)
        -> anyhow::Result<Option<MeetingRequest>>;
    async fn list_by_date(&self, date: Date) -> anyhow::Result<Vec<MeetingRequest>>;
    async fn list_by_user(&self, user_id: i32) -> anyhow::Result<Vec<MeetingRequest>>;
    /// Meetings joined with their owning user; meetings without a user row are skipped.
    async fn list_with_users(&self) -> anyhow::Result<Vec<MeetingWithUser>>;
}

#[derive(Clone)]
pub struct PgMeetingStore {
    db: PgPool,
}

impl PgMeetingStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MeetingStore for PgMeetingStore {
    async fn list_all(&self) -> anyhow::Result<Vec<MeetingRequest>> {
        let rows = sqlx::query_as::<_, MeetingRequest>(
            r#"
            SELECT id, user_id, date, time_range, content, status
            FROM meeting_requests
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list meeting requests")?;
        Ok(rows)
    }

    async fn create(&self, new: NewMeeting) -> anyhow::Result<MeetingRequest> {
        let row = sqlx::query_as::<_, MeetingRequest>(
            r#"
            INSERT INTO meeting_requests (user_id, date, time_range, content, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, date, time_range, content, status
            "#,
        )
        .bind(new.user_id)
        .bind(new.date)
        .bind(&new.time_range)
        .bind(&new.content)
        .bind(&new.status)
        .fetch_one(&self.db)
        .await
        .context("insert meeting request")?;
        Ok(row)
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<MeetingRequest>> {
        let row = sqlx::query_as::<_, MeetingRequest>(
            r#"
            SELECT id, user_id, date, time_range, content, status
            FROM meeting_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get meeting request")?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM meeting_requests WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete meeting request")?;
        Ok(res.rows_affected() > 0)
    }

    async fn update(
        &self,
        id: i32,
        changes: MeetingChanges,
    ) -> anyhow::Result<Option<MeetingRequest>> {
        let row = sqlx::query_as::<_, MeetingRequest>(
            r#"
            UPDATE meeting_requests
            SET status = COALESCE($2, status),
                date = COALESCE($3, date),
                time_range = COALESCE($4, time_range),
                content = COALESCE($5, content)
            WHERE id = $1
            RETURNING id, user_id, date, time_range, content, status
            "#,
        )
        .bind(id)
        .bind(changes.status)
        .bind(changes.date)
        .bind(changes.time_range)
        .bind(changes.content)
        .fetch_optional(&self.db)
        .await
        .context("update meeting request")?;
        Ok(row)
    }

    async fn list_by_date(&self, date: Date) -> anyhow::Result<Vec<MeetingRequest>> {
        let rows = sqlx::query_as::<_, MeetingRequest>(
            r#"
            SELECT id, user_id, date, time_range, content, status
            FROM meeting_requests
            WHERE date = $1
            ORDER BY id
            "#,
        )
        .bind(date)
        .fetch_all(&self.db)
        .await
        .context("list meeting requests by date")?;
        Ok(rows)
    }

    async fn list_by_user(&self, user_id: i32) -> anyhow::Result<Vec<MeetingRequest>> {
        let rows = sqlx::query_as::<_, MeetingRequest>(
            r#"
            SELECT id, user_id, date, time_range, content, status
            FROM meeting_requests
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list meeting requests by user")?;
        Ok(rows)
    }

    async fn list_with_users(&self) -> anyhow::Result<Vec<MeetingWithUser>> {
        let rows = sqlx::query_as::<_, MeetingWithUser>(
            r#"
            SELECT m.id, m.user_id, m.date, m.time_range, m.content, m.status,
                   u.name AS user_name, u.email AS user_email
            FROM meeting_requests m
            JOIN users u ON u.id = m.user_id
            ORDER BY m.id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list meeting requests with users")?;
        Ok(rows)
    }
}
