use std::sync::Arc;

use tracing::{info, warn};

use super::navigator::{Destination, Navigator};
use super::store::{StoreError, TokenStore};

/// Key the bearer token is stored under
pub const TOKEN_KEY: &str = "token";

/// Authentication state derived from the stored token.
///
/// Clone is cheap; clones share the same store and navigator.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Get the bearer token if one is stored.
    /// A store that cannot be read counts as holding no token.
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read token from store");
                None
            }
        }
    }

    /// Check if a non-empty token is stored
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }

    /// Replace the stored token
    pub fn store_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token)
    }

    /// Remove the token and send the user to the login page.
    /// Navigation happens even if the store fails to remove the token.
    pub fn logout(&self) {
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove token from store");
        }
        info!("Logged out");
        self.navigator.navigate(Destination::Login);
    }

    /// Send unauthenticated users to the login page.
    /// Returns whether the session is authenticated.
    pub fn require_auth(&self) -> bool {
        let authenticated = self.is_authenticated();
        if !authenticated {
            self.navigator.navigate(Destination::Login);
        }
        authenticated
    }

    /// Send authenticated users to the dashboard, skipping the login page.
    /// Returns whether a redirect happened.
    pub fn redirect_if_authenticated(&self) -> bool {
        let authenticated = self.is_authenticated();
        if authenticated {
            self.navigator.navigate(Destination::Dashboard);
        }
        authenticated
    }
}
