//! Typed helpers for the notes and account endpoints.
//!
//! Built on the raw verbs, so a 401 still logs the session out. Unlike the
//! raw verbs these interpret the status and decode the JSON body.

use reqwest::{header, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::models::{AccessToken, Message, NewNote, NewUser, Note, NoteUpdate, User};

use super::{ApiClient, ApiError};

const LOGIN_PATH: &str = "/api/token";
const REGISTER_PATH: &str = "/api/register";
const CURRENT_USER_PATH: &str = "/api/users/me";
const FORGOT_PASSWORD_PATH: &str = "/api/auth/forgot-password";
const RESET_PASSWORD_PATH: &str = "/api/auth/reset-password";
const NOTES_PATH: &str = "/api/notes";

fn note_path(id: &str) -> String {
    format!("{}/{}", NOTES_PATH, id)
}

impl ApiClient {
    /// Check if response is successful, returning an error with body if not.
    pub(super) async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    pub(super) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Exchange username and password for a token and store it in the session.
    ///
    /// A 401 here means bad credentials, so it does not log out.
    pub async fn login(&self, username: &str, password: &str) -> Result<AccessToken, ApiError> {
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .header(header::ACCEPT, "application/json")
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::InvalidCredentials);
        }

        let token: AccessToken = Self::parse_json(response).await?;
        self.session.store_token(&token.access_token)?;
        info!(username, "Logged in");
        Ok(token)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        let response = self.post(REGISTER_PATH, user).await?;
        Self::parse_json(response).await
    }

    /// Ask the server to send a password reset link to `email`.
    /// The server answers the same way whether or not the address is known.
    pub async fn forgot_password(&self, email: &str) -> Result<Message, ApiError> {
        let response = self
            .post(FORGOT_PASSWORD_PATH, &serde_json::json!({ "email": email }))
            .await?;
        Self::parse_json(response).await
    }

    /// Set a new password using the token from a reset link
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<Message, ApiError> {
        let body = serde_json::json!({ "token": token, "password": password });
        let response = self.post(RESET_PASSWORD_PATH, &body).await?;
        Self::parse_json(response).await
    }

    /// Fetch the account the stored token belongs to
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let response = self.get(CURRENT_USER_PATH).await?;
        Self::parse_json(response).await
    }

    /// Fetch all notes for the current user
    pub async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let response = self.get(NOTES_PATH).await?;
        Self::parse_json(response).await
    }

    pub async fn note(&self, id: &str) -> Result<Note, ApiError> {
        let response = self.get(&note_path(id)).await?;
        Self::parse_json(response).await
    }

    pub async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        let response = self.post(NOTES_PATH, note).await?;
        Self::parse_json(response).await
    }

    pub async fn update_note(&self, id: &str, update: &NoteUpdate) -> Result<Note, ApiError> {
        let response = self.put(&note_path(id), update).await?;
        Self::parse_json(response).await
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), ApiError> {
        let response = self.delete(&note_path(id)).await?;
        Self::check_response(response).await?;
        Ok(())
    }
}
