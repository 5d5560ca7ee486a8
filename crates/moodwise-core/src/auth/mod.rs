//! Authentication module for managing the stored bearer token.
//!
//! This module provides:
//! - `Session`: derives authenticated state and redirects from token presence
//! - `TokenStore`: durable key-value storage for the token (file, keychain, memory)
//! - `Navigator`: the capability used to leave the current page
//!
//! Tokens carry no expiry; presence of a non-empty token is the whole signal.

pub mod credentials;
pub mod navigator;
pub mod session;
pub mod store;

pub use credentials::KeyringStore;
pub use navigator::{Destination, Navigator, RecordingNavigator};
pub use session::{Session, TOKEN_KEY};
pub use store::{FileStore, MemoryStore, StoreError, TokenStore};
