//! API client for communicating with the MoodWise Notes backend.
//!
//! The four raw verbs hand the response back untouched except for 401,
//! which logs the session out and fails with `ApiError::AuthRequired`.

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::Session;

use super::ApiError;

/// Empty base URL: paths are used as given (same-origin)
pub const DEFAULT_BASE_URL: &str = "";

/// API client for the notes backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    pub(super) client: Client,
    base_url: String,
    pub(super) session: Session,
}

impl ApiClient {
    /// Create a new API client. No request timeout is configured.
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    /// Create a client around an existing reqwest client, sharing its pool
    pub fn with_client(client: Client, base_url: impl Into<String>, session: Session) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Path is appended verbatim, without validation or encoding
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.session.token().filter(|t| !t.is_empty()) {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self
            .client
            .request(method, self.url(path))
            .headers(self.auth_headers()?))
    }

    /// Send a request, turning a 401 into a logout
    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "API request completed");

        if status == StatusCode::UNAUTHORIZED {
            warn!(%method, path, "Unauthorized response, logging out");
            self.session.logout();
            return Err(ApiError::AuthRequired);
        }
        Ok(response)
    }

    /// GET `path`. No Content-Type is sent.
    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let request = self.request(Method::GET, path)?;
        self.send(Method::GET, path, request).await
    }

    /// POST `body` as JSON to `path`
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(Method::POST, path, request).await
    }

    /// PUT `body` as JSON to `path`
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send(Method::PUT, path, request).await
    }

    /// DELETE `path`. No Content-Type is sent.
    pub async fn delete(&self, path: &str) -> Result<Response, ApiError> {
        let request = self.request(Method::DELETE, path)?;
        self.send(Method::DELETE, path, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::{Destination, MemoryStore, RecordingNavigator};

    struct Harness {
        server: MockServer,
        client: ApiClient,
        navigator: Arc<RecordingNavigator>,
    }

    async fn harness(token: Option<&str>) -> Harness {
        let server = MockServer::start().await;
        let navigator = Arc::new(RecordingNavigator::new());
        let session = Session::new(Arc::new(MemoryStore::new()), navigator.clone());
        if let Some(token) = token {
            session.store_token(token).unwrap();
        }
        let client = ApiClient::new(server.uri(), session);
        Harness {
            server,
            client,
            navigator,
        }
    }

    async fn last_request(server: &MockServer) -> wiremock::Request {
        server
            .received_requests()
            .await
            .and_then(|mut r| r.pop())
            .expect("no request recorded")
    }

    #[tokio::test]
    async fn test_get_without_token_sends_no_auth_header() {
        let h = harness(None).await;
        Mock::given(method("GET"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .mount(&h.server)
            .await;

        let response = h.client.get("/notes").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!([{"id": 1}]));

        let request = last_request(&h.server).await;
        assert!(request.headers.get("authorization").is_none());
        assert!(request.headers.get("content-type").is_none());
        assert_eq!(h.client.session().token(), None);
        assert!(h.navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn test_post_with_token_sends_bearer_and_json() {
        let h = harness(Some("abc123")).await;
        Mock::given(method("POST"))
            .and(path("/notes"))
            .and(header("authorization", "Bearer abc123"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"title": "x"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&h.server)
            .await;

        let response = h.client.post("/notes", &json!({"title": "x"})).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_put_sends_json_and_delete_sends_no_content_type() {
        let h = harness(Some("abc123")).await;
        Mock::given(method("PUT"))
            .and(path("/notes/1"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"content": "y"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&h.server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/notes/1"))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&h.server)
            .await;

        h.client.put("/notes/1", &json!({"content": "y"})).await.unwrap();
        let response = h.client.delete("/notes/1").await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let request = last_request(&h.server).await;
        assert!(request.headers.get("content-type").is_none());
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_logs_out_on_every_verb() {
        let h = harness(None).await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
            .mount(&h.server)
            .await;

        for verb in ["GET", "POST", "PUT", "DELETE"] {
            h.client.session().store_token("abc123").unwrap();
            let result = match verb {
                "GET" => h.client.get("/notes").await,
                "POST" => h.client.post("/notes", &json!({})).await,
                "PUT" => h.client.put("/notes/1", &json!({})).await,
                _ => h.client.delete("/notes/1").await,
            };
            let err = result.expect_err("401 must fail");
            assert!(err.is_auth_required(), "{verb}: {err:?}");
            assert_eq!(err.to_string(), "Authentication required");
            assert_eq!(h.client.session().token(), None, "{verb}");
        }
        assert_eq!(h.navigator.visits(), vec![Destination::Login; 4]);
    }

    #[tokio::test]
    async fn test_other_error_statuses_pass_through() {
        let h = harness(Some("abc123")).await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&h.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&h.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forbidden"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&h.server)
            .await;

        assert_eq!(h.client.get("/missing").await.unwrap().status(), StatusCode::NOT_FOUND);
        assert_eq!(h.client.get("/broken").await.unwrap().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(h.client.get("/forbidden").await.unwrap().status(), StatusCode::FORBIDDEN);
        assert!(h.client.session().is_authenticated());
        assert!(h.navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let h = harness(Some("abc123")).await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(3)
            .mount(&h.server)
            .await;

        let (a, b, c) = futures::join!(h.client.get("/a"), h.client.get("/b"), h.client.get("/c"));
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let navigator = Arc::new(RecordingNavigator::new());
        let session = Session::new(Arc::new(MemoryStore::new()), navigator.clone());
        session.store_token("abc123").unwrap();
        // Empty base URL yields a relative URL that reqwest cannot send
        let client = ApiClient::new(DEFAULT_BASE_URL, session);

        let err = client.get("/notes").await.expect_err("relative URL must fail");
        assert!(matches!(err, ApiError::NetworkError(_)));
        assert!(client.session().is_authenticated());
        assert!(navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_token_header() {
        let h = harness(Some("bad\ntoken")).await;
        let err = h.client.get("/notes").await.expect_err("newline is not a valid header");
        assert!(matches!(err, ApiError::InvalidToken(_)));
    }

    #[test]
    fn test_url_is_verbatim_concatenation() {
        let session = Session::new(Arc::new(MemoryStore::new()), Arc::new(RecordingNavigator::new()));
        let client = ApiClient::new("http://localhost:8000/api", session);
        assert_eq!(client.url("/notes?q=a b"), "http://localhost:8000/api/notes?q=a b");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }
}
