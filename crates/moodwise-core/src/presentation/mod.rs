//! Presentation helpers for error display and string formatting.
//!
//! Everything here is pure and synchronous; nothing touches the session
//! or the network.

pub mod banner;
pub mod format;

pub use banner::{hide_error, show_error, ErrorBanner, ErrorTarget};
pub use format::{escape_html, format_date, truncate, INVALID_DATE};
