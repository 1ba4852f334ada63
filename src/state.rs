use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::db;
use crate::meetings::{InMemoryMeetingStore, MeetingStore, PgMeetingStore};

#[derive(Clone)]
pub struct AppState {
    pub meetings: Arc<dyn MeetingStore>,
}

impl AppState {
    /// Picks the store named by the config; for Postgres this connects and migrates.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let meetings = match config.store {
            StoreBackend::Postgres => {
                let pool = db::connect(config).await?;
                db::migrate(&pool).await;
                Arc::new(PgMeetingStore::new(pool)) as Arc<dyn MeetingStore>
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; data is lost on restart");
                Arc::new(InMemoryMeetingStore::new()) as Arc<dyn MeetingStore>
            }
        };
        Ok(Self { meetings })
    }

    pub fn from_store(meetings: Arc<dyn MeetingStore>) -> Self {
        Self { meetings }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryMeetingStore::new()))
    }
}
