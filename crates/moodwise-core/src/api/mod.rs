//! REST API client module for the MoodWise Notes service.
//!
//! This module provides the `ApiClient` with the four raw verbs, which
//! attach the stored bearer token and force a logout on 401, plus typed
//! helpers for the notes, account and mood chat endpoints.

pub mod chat;
pub mod client;
pub mod error;
pub mod notes;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;
