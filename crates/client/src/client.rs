//! `reqwest`-backed implementation of the collaborator traits.

use std::time::Duration;

use async_trait::async_trait;
use crm_core::crm::{
    Activity, ActivityService, Alert, AlertService, Contact, ContactService, DataSource, Deal,
    DealService, ServiceError, Task, TaskService,
};
use crm_shared::config::UpstreamConfig;
use crm_shared::types::{AlertId, TaskId};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ClientError, from_reqwest, from_status};

/// Header carrying the upstream API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the CRM REST services.
#[derive(Debug, Clone)]
pub struct HttpCrmClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpCrmClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let has_host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: trimmed.to_string(),
            api_key: None,
        })
    }

    /// Creates a client from the upstream configuration.
    ///
    /// Returns `Ok(None)` when no base URL is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &UpstreamConfig) -> Result<Option<Self>, ClientError> {
        let Some(base_url) = config.base_url.as_deref() else {
            return Ok(None);
        };
        let client = Self::new(base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(Some(match config.api_key.as_deref() {
            Some(key) => client.with_api_key(key),
            None => client,
        }))
    }

    /// Sets the API key sent with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The normalized base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(ref api_key) = self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }
        request
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        source: DataSource,
    ) -> Result<Vec<T>, ServiceError> {
        let response = self
            .request(Method::GET, source.as_str())
            .send()
            .await
            .map_err(|e| {
                warn!(%source, error = %e, "Upstream read failed");
                from_reqwest(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(from_status(status, source.as_str(), &body));
        }

        let items: Vec<T> = response.json().await.map_err(|e| from_reqwest(&e))?;
        debug!(%source, count = items.len(), "Fetched collection");
        Ok(items)
    }

    async fn send_command(
        &self,
        method: Method,
        path: &str,
        what: &str,
    ) -> Result<(), ServiceError> {
        let response = self
            .request(method, path)
            .send()
            .await
            .map_err(|e| from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(from_status(status, what, &body));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactService for HttpCrmClient {
    async fn get_all(&self) -> Result<Vec<Contact>, ServiceError> {
        self.get_collection(DataSource::Contacts).await
    }
}

#[async_trait]
impl DealService for HttpCrmClient {
    async fn get_all(&self) -> Result<Vec<Deal>, ServiceError> {
        self.get_collection(DataSource::Deals).await
    }
}

#[async_trait]
impl TaskService for HttpCrmClient {
    async fn get_all(&self) -> Result<Vec<Task>, ServiceError> {
        self.get_collection(DataSource::Tasks).await
    }
}

#[async_trait]
impl ActivityService for HttpCrmClient {
    async fn get_all(&self) -> Result<Vec<Activity>, ServiceError> {
        self.get_collection(DataSource::Activities).await
    }
}

#[async_trait]
impl AlertService for HttpCrmClient {
    async fn get_all(&self) -> Result<Vec<Alert>, ServiceError> {
        self.get_collection(DataSource::Alerts).await
    }

    async fn dismiss_alert(&self, alert_id: AlertId) -> Result<(), ServiceError> {
        self.send_command(
            Method::DELETE,
            &format!("alerts/{alert_id}"),
            &format!("alert {alert_id}"),
        )
        .await
    }

    async fn complete_task(&self, task_id: TaskId) -> Result<(), ServiceError> {
        self.send_command(
            Method::POST,
            &format!("alerts/tasks/{task_id}/complete"),
            &format!("task {task_id}"),
        )
        .await
    }
}
