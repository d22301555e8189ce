//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{ErrorBody, ErrorCode};

use crate::{ClientConfig, ClientError, ClientResult};

/// Query string pairs, appended and encoded by the client
pub type Query<'a> = &'a [(&'a str, &'a str)];

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> ClientResult<T>;

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        query: Query<'_>,
        body: &B,
    ) -> ClientResult<T>;

    fn token(&self) -> Option<&str>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base url cannot carry a path: {}",
                config.base_url
            )));
        }
        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Join `path` onto the base URL, encoding each segment
    fn url(&self, path: &str, query: Query<'_>) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::Config("base url cannot carry a path".into()))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ClientResult<T> {
        let request = match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        };
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_from(status, &text));
        }

        // Status-only endpoints answer with an empty body
        let body = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(%status, error = %e, "Unreadable response body");
            ClientError::InvalidResponse(e.to_string())
        })
    }

    fn error_from(status: StatusCode, text: &str) -> ClientError {
        if status.is_server_error() {
            let message = serde_json::from_str::<ErrorBody>(text)
                .map(|b| b.message)
                .unwrap_or_else(|_| text.to_string());
            tracing::error!(%status, %message, "Server error");
            return ClientError::Server {
                status: status.as_u16(),
                message,
            };
        }

        let body = serde_json::from_str::<ErrorBody>(text).unwrap_or_else(|_| ErrorBody {
            message: text.to_string(),
            ..Default::default()
        });
        let code = body
            .error_code()
            .unwrap_or_else(|| ErrorCode::from_http_status(status));
        tracing::warn!(%status, %code, message = %body.message, "Request rejected");
        ClientError::Api {
            status: status.as_u16(),
            code,
            message: body.message,
            fields: body.form_fields,
        }
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> ClientResult<T> {
        let url = self.url(path, query)?;
        tracing::debug!(%url, "GET");
        self.send(self.client.get(url)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        query: Query<'_>,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path, query)?;
        tracing::debug!(%url, "POST");
        self.send(self.client.post(url).json(body)).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
