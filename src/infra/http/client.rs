use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::config::ApiSettings;
use crate::infra::error::InfraError;

/// Every endpoint lives under this path relative to the configured origin.
pub const API_BASE_PATH: &str = "/api/";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("request to {path} timed out")]
    Timeout { path: String },
    #[error("network error on {path}: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server returned {status} for {path}: {body}")]
    Status {
        status: StatusCode,
        path: String,
        body: String,
    },
    #[error("malformed response body from {path}: {reason}")]
    Body { path: String, reason: String },
}

impl ApiError {
    fn transport(path: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                path: path.to_string(),
            }
        } else {
            Self::Network {
                path: path.to_string(),
                source,
            }
        }
    }

    /// HTTP status of a non-success response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Thin JSON client bound to `{origin}/api/`.
///
/// Requests carry a fixed JSON content type and the configured timeout;
/// successful responses are decoded straight into their payload type.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, InfraError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, InfraError> {
        Self::new(settings.base_url.clone(), settings.timeout)
    }

    pub fn user_agent() -> &'static str {
        concat!("postdash/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL from path segments; each segment is percent-encoded.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
            path.pop_if_empty();
            path.extend(segments);
        }
        url.set_query(None);
        if !query.is_empty() {
            let mut qp = url.query_pairs_mut();
            for (k, v) in query {
                qp.append_pair(k, v);
            }
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(segments, query)?;
        self.send(Method::GET, url, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(segments, &[])?;
        self.send(Method::POST, url, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(segments, &[])?;
        self.send(Method::PUT, url, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(segments, &[])?;
        self.send(Method::PATCH, url, Some(body)).await
    }

    /// DELETE whose response body, if any, is ignored.
    pub async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        let url = self.url(segments, &[])?;
        let path = url.path().to_string();
        debug!(method = "DELETE", url = %url, "api request");
        let resp = self
            .client
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(|e| ApiError::transport(&path, e))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, path, body });
        }
        Ok(())
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let path = url.path().to_string();
        debug!(method = %method, url = %url, "api request");

        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|e| ApiError::transport(&path, e))?;
        Self::handle(path, resp).await
    }

    async fn handle<T: DeserializeOwned>(path: String, resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::transport(&path, e))?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ApiError::Status { status, path, body });
        }
        if bytes.is_empty() {
            return Err(ApiError::Body {
                path,
                reason: "empty body".to_string(),
            });
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Body {
            path,
            reason: e.to_string(),
        })
    }
}
