//! Core HTTP exchange
//!
//! One request, one response, no retry. Status and connection failures are
//! turned into `ApiError` here; decoding is left to the typed invoker.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::errors::{ApiError, ApiResult};

/// HTTP verbs the catalog service uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
}

impl std::fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// HTTP operations handler bound to a service base URL
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
    base_url: Url,
}

impl HttpHandler {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Join an endpoint path onto the base URL, keeping any base path prefix
    pub fn resolve(&self, endpoint: &str) -> ApiResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = if endpoint.starts_with('/') {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/{}", base, endpoint)
        };

        Url::parse(&joined).map_err(|e| ApiError::InvalidUrl {
            url: joined.clone(),
            error: e.to_string(),
        })
    }

    /// Perform exactly one request and return the body text of a success response
    ///
    /// # Errors
    ///
    /// - `ApiError::Transport` when the server answers with a non-success status
    /// - `ApiError::Connection` when no response arrives
    pub async fn execute(
        &self,
        endpoint: &str,
        method: ApiMethod,
        body: Option<String>,
    ) -> ApiResult<String> {
        let url = self.resolve(endpoint)?;
        tracing::debug!("Calling endpoint: {} {}", method, endpoint);

        let request = match method {
            ApiMethod::Get => {
                if body.is_some() {
                    tracing::debug!("Ignoring request body on GET {}", endpoint);
                }
                self.client.get(url)
            }
            ApiMethod::Post => {
                let request = self.client.post(url);
                match body {
                    Some(body) => request.header(CONTENT_TYPE, "application/json").body(body),
                    None => request,
                }
            }
        };

        let response = request.send().await.map_err(|source| ApiError::Connection {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} {} returned HTTP {}", method, endpoint, status);
            return Err(ApiError::Transport {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let text = response.text().await.map_err(|source| ApiError::Connection {
            endpoint: endpoint.to_string(),
            source,
        })?;
        tracing::trace!("Response text from {}: {}", endpoint, text);
        Ok(text)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
