pub mod dto;
pub mod handlers;
pub mod memory;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use memory::InMemoryMeetingStore;
pub use repo::{MeetingStore, PgMeetingStore};

/// Route table for the meeting-request resource.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
