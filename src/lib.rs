//! Meeting request service: an Axum router over a pluggable `MeetingStore`.
//!
//! `main.rs` wires configuration, logging and the server; everything else lives here
//! so integration tests can drive the router directly.

pub mod app;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod meetings;
pub mod state;
