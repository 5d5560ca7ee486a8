//! Core library for the MoodWise Notes client.
//!
//! - `auth`: the stored bearer token, token stores, and navigation
//! - `api`: HTTP verbs with uniform 401 handling, plus notes endpoints
//! - `presentation`: error display, date formatting, escaping, truncation
//! - `bootstrap`: one-time wiring of logout controls
//! - `config`: base URL and token store selection

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod models;
pub mod presentation;

pub use api::{ApiClient, ApiError};
pub use auth::{Destination, Navigator, RecordingNavigator, Session, TokenStore};
pub use config::{Config, StoreKind};
