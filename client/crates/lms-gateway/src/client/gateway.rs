use crate::{CourseQuery, GatewayError, GatewayResult};

use lms_config::ApiConfig;
use lms_core::{Identity, IdentityPatch, NotificationRecord};
use lms_store::{KeyValueStore, keys};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP gateway to the learning platform REST API
#[derive(Clone)]
pub struct Gateway {
    pub base_url: String,
    client: ReqwestClient,
    store: Arc<dyn KeyValueStore>,
}

impl Gateway {
    /// Create a new gateway
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "http://localhost:8000")
    /// * `timeout` - Per-request timeout
    /// * `store` - Where the bearer credential is read from on every call
    pub fn new(
        base_url: &str,
        timeout: Duration,
        store: Arc<dyn KeyValueStore>,
    ) -> GatewayResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            store,
        })
    }

    pub fn from_config(config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> GatewayResult<Self> {
        Self::new(&config.base_url, config.timeout(), store)
    }

    /// Bearer credential, if one is stored. Storage failures count as absent.
    fn bearer_token(&self) -> Option<String> {
        match self.store.get(keys::AUTH_TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read auth token: {e}");
                None
            }
        }
    }

    /// Build a request with JSON content type and optional bearer header
    ///
    /// `segments` are appended to `path` percent-encoded, so ids can never
    /// reach another endpoint.
    fn build(
        &self,
        method: Method,
        path: &str,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> GatewayResult<RequestBuilder> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url =
            Url::parse(&raw).map_err(|e| GatewayError::invalid_url(raw.clone(), e.to_string()))?;

        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| GatewayError::invalid_url(raw.clone(), "URL cannot have a path"))?
                .pop_if_empty()
                .extend(segments);
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let mut req = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.bearer_token() {
            req = req.bearer_auth(token);
        }

        Ok(req)
    }

    /// Execute request, map non-success statuses, decode the body.
    ///
    /// An empty body decodes as JSON `null`, so `T = ()` works for
    /// endpoints that answer with no content.
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> GatewayResult<T> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let reason = Self::failure_reason(&body)
                .or_else(|| status.canonical_reason().map(String::from))
                .unwrap_or_else(|| String::from("Unknown error"));
            debug!("Request failed with {status}: {reason}");
            return Err(GatewayError::request_failed(status, reason));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Pulls a message out of the common error body shapes.
    fn failure_reason(body: &[u8]) -> Option<String> {
        let value: Value = serde_json::from_slice(body).ok()?;

        value
            .get("detail")
            .and_then(Value::as_str)
            .or_else(|| {
                value
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
            })
            .map(String::from)
    }

    /// Generic request without a body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> GatewayResult<T> {
        let req = self.build(method, path, &[], &[])?;
        self.execute(req).await
    }

    /// Generic request with a JSON body.
    pub async fn request_with_body<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.build(method, path, &[], &[])?.json(body);
        self.execute(req).await
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> GatewayResult<Value> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        self.request_with_body(
            Method::POST,
            "/api/auth/login",
            &LoginRequest { email, password },
        )
        .await
    }

    pub async fn logout(&self) -> GatewayResult<Value> {
        self.request(Method::POST, "/api/auth/logout").await
    }

    /// Look up the identity behind the stored credential
    pub async fn current_user(&self) -> GatewayResult<Identity> {
        self.request(Method::GET, "/api/auth/me").await
    }

    pub async fn update_profile(&self, patch: &IdentityPatch) -> GatewayResult<Value> {
        self.request_with_body(Method::PUT, "/api/users/me", patch)
            .await
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    pub async fn notifications(&self) -> GatewayResult<Vec<NotificationRecord>> {
        self.request(Method::GET, "/api/notifications").await
    }

    pub async fn mark_notification_read(&self, id: u64) -> GatewayResult<()> {
        self.request::<Value>(Method::PUT, &format!("/api/notifications/{id}/read"))
            .await
            .map(|_| ())
    }

    pub async fn mark_all_notifications_read(&self) -> GatewayResult<()> {
        self.request::<Value>(Method::PUT, "/api/notifications/read-all")
            .await
            .map(|_| ())
    }

    // =========================================================================
    // Courses & Enrollments
    // =========================================================================

    pub async fn courses(&self, query: &CourseQuery) -> GatewayResult<Value> {
        let req = self.build(Method::GET, "/api/courses", &[], &query.pairs())?;
        self.execute(req).await
    }

    pub async fn course(&self, id: &str) -> GatewayResult<Value> {
        let req = self.build(Method::GET, "/api/courses", &[id], &[])?;
        self.execute(req).await
    }

    pub async fn enrollments(&self) -> GatewayResult<Value> {
        self.request(Method::GET, "/api/enrollments/me").await
    }

    // =========================================================================
    // Certificates & Leaderboard
    // =========================================================================

    pub async fn certificates(&self) -> GatewayResult<Value> {
        self.request(Method::GET, "/api/certificates").await
    }

    pub async fn certificate(&self, id: &str) -> GatewayResult<Value> {
        let req = self.build(Method::GET, "/api/certificates", &[id], &[])?;
        self.execute(req).await
    }

    pub async fn leaderboard(&self) -> GatewayResult<Value> {
        self.request(Method::GET, "/api/leaderboard").await
    }
}
