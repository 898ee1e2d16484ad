//! Client for the inventory REST API.
//!
//! Every resource module adds its endpoints as methods on [`ApiClient`].
//! Requests run on libcurl inside `spawn_blocking`; GETs go through the retry
//! policy, mutations are sent once.

mod assets;
mod auth;
mod catalog;
mod error;
mod http;
mod incidents;
mod reports;
mod schools;
mod users;

pub use assets::AssetFilter;
pub use error::{ApiError, FieldErrors};
pub use http::{HttpOptions, Method};
pub use incidents::IncidentFilter;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::SchoolinvConfig;
use crate::retry::{self, RetryPolicy};

use http::HttpRequest;

/// Query string pairs for one request.
pub type Query = Vec<(&'static str, String)>;

#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    token: Option<String>,
    options: HttpOptions,
    retry: RetryPolicy,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(base_url.trim())?,
            token: None,
            options: HttpOptions::default(),
            retry: RetryPolicy::default(),
        })
    }

    /// Client configured with the timeouts and retry policy from `cfg`.
    pub fn from_config(cfg: &SchoolinvConfig) -> Result<Self, ApiError> {
        Ok(Self::new(&cfg.api_base_url)?
            .with_options(HttpOptions {
                connect_timeout: cfg.connect_timeout(),
                timeout: cfg.request_timeout(),
            })
            .with_retry(cfg.retry_policy()))
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_options(mut self, options: HttpOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `base_url` + `path`, keeping any path prefix of the base (e.g. `/api`).
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path, query)?;
        let policy = self.retry;
        retry::run_with_retry(&policy, || self.execute(Method::Get, url.clone(), None)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, &[])?;
        self.execute(Method::Post, url, Some(serde_json::to_vec(body)?))
            .await
    }

    /// POST without a request body (action endpoints like `/users/{id}/activate`).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path, &[])?;
        self.execute(Method::Post, url, None).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, &[])?;
        self.execute(Method::Put, url, Some(serde_json::to_vec(body)?))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path, &[])?;
        self.execute::<serde_json::Value>(Method::Delete, url, None)
            .await
            .map(|_| ())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<T, ApiError> {
        let path = url.path().to_string();
        let request = HttpRequest {
            method,
            url: url.into(),
            bearer: self.token.clone(),
            body,
        };
        let options = self.options;
        let response = tokio::task::spawn_blocking(move || http::perform(&request, options))
            .await
            .map_err(|e| ApiError::Task(e.to_string()))??;

        tracing::debug!(
            method = method.as_str(),
            path = %path,
            status = response.status,
            bytes = response.body.len(),
            "api request"
        );

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::warn!(method = method.as_str(), path = %path, "api error: {}", err);
            return Err(err);
        }
        decode(&response.body)
    }
}

/// Decode a success body; an empty body (204) decodes as JSON `null`.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    Ok(serde_json::from_slice(body)?)
}
