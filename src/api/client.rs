//! HTTP client for the health assistant backend.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{
    ChatBackend, ChatRequest, RemindersResponse, SetReminderRequest, SetReminderResponse,
    StatusResponse,
};
use crate::config::BackendConfig;
use crate::error::{Error, Result};

/// Endpoint paths, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub chat: String,
    pub reminders: String,
    pub set_reminder: String,
    pub status: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            chat: "/api/chat".to_string(),
            reminders: "/api/reminders".to_string(),
            set_reminder: "/api/set_reminder".to_string(),
            status: "/api/status".to_string(),
        }
    }
}

/// HTTP client for the backend API.
///
/// # Example
///
/// ```rust,no_run
/// use health_chat_widget::api::Client;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("http://127.0.0.1:5000")?;
/// let reminders = client.reminders().list(1).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    endpoints: Endpoints,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client with the default endpoint paths.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the backend (e.g., "http://127.0.0.1:5000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url,
            endpoints: Endpoints::default(),
            http,
        })
    }

    /// Build a client from the `backend` section of the configuration.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self::with_client(&config.base_url, http)?.with_endpoints(Endpoints {
            chat: config.chat_path.clone(),
            reminders: config.reminders_path.clone(),
            set_reminder: config.set_reminder_path.clone(),
            status: config.status_path.clone(),
        }))
    }

    /// Replace the endpoint paths.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the endpoint paths.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the Chat API.
    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi { client: self }
    }

    /// Access the Reminders API.
    pub fn reminders(&self) -> RemindersApi<'_> {
        RemindersApi { client: self }
    }

    /// Query the backend health check.
    pub async fn status(&self) -> Result<StatusResponse> {
        let response = self
            .http
            .get(self.url(&self.endpoints.status)?)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(Error::Api {
                status: status.as_u16(),
                message: error_message(body),
            })
        }
    }
}

/// Pull `error` (or `message`) out of a JSON error body, else keep the body.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            ["error", "message"]
                .iter()
                .find_map(|key| value.get(*key)?.as_str().map(str::to_string))
        })
        .unwrap_or(body)
}

// =============================================================================
// Chat API
// =============================================================================

/// Chat API client.
#[derive(Debug)]
pub struct ChatApi<'a> {
    client: &'a Client,
}

impl ChatApi<'_> {
    /// Send a chat message and return the undecoded reply body.
    pub async fn send(&self, request: &ChatRequest) -> Result<serde_json::Value> {
        let response = self
            .client
            .http
            .post(self.client.url(&self.client.endpoints.chat)?)
            .json(request)
            .send()
            .await?;
        Client::handle_response(response).await
    }
}

// =============================================================================
// Reminders API
// =============================================================================

/// Reminders API client.
#[derive(Debug)]
pub struct RemindersApi<'a> {
    client: &'a Client,
}

impl RemindersApi<'_> {
    /// List reminders for a user, in backend order.
    pub async fn list(&self, user_id: u64) -> Result<RemindersResponse> {
        let response = self
            .client
            .http
            .get(self.client.url(&self.client.endpoints.reminders)?)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        Client::handle_response(response).await
    }

    /// Create a reminder.
    pub async fn create(&self, request: &SetReminderRequest) -> Result<SetReminderResponse> {
        let response = self
            .client
            .http
            .post(self.client.url(&self.client.endpoints.set_reminder)?)
            .json(request)
            .send()
            .await?;
        Client::handle_response(response).await
    }
}

#[async_trait]
impl ChatBackend for Client {
    async fn send_chat(&self, request: &ChatRequest) -> Result<serde_json::Value> {
        self.chat().send(request).await
    }

    async fn list_reminders(&self, user_id: u64) -> Result<RemindersResponse> {
        self.reminders().list(user_id).await
    }

    async fn create_reminder(&self, request: &SetReminderRequest) -> Result<SetReminderResponse> {
        self.reminders().create(request).await
    }
}
