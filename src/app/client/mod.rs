//! Typed API invoker for the catalog service
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `endpoints`: endpoint templates and placeholder substitution
//! - `http`: the single-request exchange and status handling
//!
//! `ApiClient::invoke` is the only way the rest of the crate talks to the
//! network. It performs one call and decodes the body into the shape the
//! caller names, so every endpoint gets a schema-checked response.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::errors::{ApiError, ApiResult};

pub mod config;
pub mod endpoints;
pub mod http;

pub use config::ClientConfig;
pub use endpoints::EndpointTemplates;
pub use http::ApiMethod;

use http::HttpHandler;

/// Client for the catalog service
///
/// Cloning is cheap: clones share one connection pool, so each concurrent
/// category worker can own its own handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_handler: HttpHandler,
}

impl ApiClient {
    /// Creates a new ApiClient for the given service root
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ClientBuild` if the HTTP client cannot be built
    pub fn new(base_url: Url, config: &ClientConfig) -> ApiResult<Self> {
        let client = config.build_http_client()?;
        tracing::debug!("Created API client for {}", base_url);

        Ok(Self {
            http_handler: HttpHandler::new(client, base_url),
        })
    }

    /// Performs one call and decodes the response body into `T`
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Path relative to the base URL, placeholders already substituted
    /// * `method` - GET or POST
    /// * `body` - Pre-serialized JSON body (POST only)
    ///
    /// # Errors
    ///
    /// - `ApiError::Transport` on a non-success status
    /// - `ApiError::Connection` when the request does not complete
    /// - `ApiError::Decode` when the body does not match `T`
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: ApiMethod,
        body: Option<String>,
    ) -> ApiResult<T> {
        let text = self.http_handler.execute(endpoint, method, body).await?;

        serde_json::from_str(&text).map_err(|source| {
            tracing::warn!("Unexpected response shape from {}: {}", endpoint, source);
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                source,
            }
        })
    }

    /// GET `endpoint` and decode the response
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.invoke(endpoint, ApiMethod::Get, None).await
    }

    /// Serialize `body` as JSON, POST it to `endpoint` and decode the response
    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_string(body).map_err(ApiError::Encode)?;
        self.invoke(endpoint, ApiMethod::Post, Some(payload)).await
    }

    /// Get the service base URL
    pub fn base_url(&self) -> &Url {
        self.http_handler.base_url()
    }
}
