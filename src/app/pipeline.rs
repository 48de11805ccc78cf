//! One reconciliation pass, end to end
//!
//! token → subscribers → categories → per-category magazines (concurrent)
//! → flattened catalog → coverage match → answer submission.
//!
//! The pass returns everything the caller needs to present; it prints
//! nothing itself.

use std::time::{Duration, Instant};

use url::Url;

use crate::app::catalog::Catalog;
use crate::app::client::{ApiClient, ClientConfig, EndpointTemplates};
use crate::app::fetcher::fetch_magazines_by_category;
use crate::app::matcher::qualifying_subscribers;
use crate::app::models::{
    CategoryResponse, CoverageResult, Subscriber, SubscriberId, SubscriberListResponse, Token,
    TokenResponse,
};
use crate::app::report::submit_report;
use crate::errors::Result;

/// Everything a pass needs, passed in explicitly
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    pub base_url: Url,
    pub endpoints: EndpointTemplates,
    pub client: ClientConfig,
}

/// Counters describing a completed pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassStats {
    pub categories: usize,
    pub magazines: usize,
    pub subscribers: usize,
    pub qualifying: usize,
    pub catalog_collisions: usize,
    pub duration: Duration,
}

/// Outcome of a completed pass
#[derive(Debug, Clone)]
pub struct PassResult {
    /// Qualifying subscribers in service order
    pub matching: Vec<Subscriber>,
    /// Verdict returned by the answer endpoint
    pub result: CoverageResult,
    pub stats: PassStats,
}

impl PassResult {
    pub fn matching_ids(&self) -> Vec<SubscriberId> {
        self.matching.iter().map(|s| s.id.clone()).collect()
    }
}

/// Runs reconciliation passes against one catalog service
#[derive(Debug, Clone)]
pub struct Reconciler {
    client: ApiClient,
    endpoints: EndpointTemplates,
}

impl Reconciler {
    /// Creates a reconciler from an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the HTTP client cannot be built
    pub fn new(config: ReconcilerConfig) -> Result<Self> {
        let client = ApiClient::new(config.base_url, &config.client)?;
        Ok(Self {
            client,
            endpoints: config.endpoints,
        })
    }

    /// Run one complete pass
    ///
    /// Every step re-fetches from the service. The first failed call aborts
    /// the pass and its error is returned unchanged.
    pub async fn run_pass(&self) -> Result<PassResult> {
        let start = Instant::now();
        tracing::info!("Reconciliation pass started against {}", self.client.base_url());

        let token = self.fetch_token().await?;

        let subscribers: SubscriberListResponse = self
            .client
            .get(&self.endpoints.subscribers_path(&token))
            .await?;
        let subscribers = subscribers.data;
        tracing::info!("Fetched {} subscribers", subscribers.len());

        let categories: CategoryResponse = self
            .client
            .get(&self.endpoints.categories_path(&token))
            .await?;
        let categories = categories.data;
        tracing::info!("Fetched {} categories", categories.len());

        let by_category =
            fetch_magazines_by_category(&self.client, &self.endpoints, &categories, &token)
                .await?;
        let catalog = Catalog::flatten(&by_category);

        let matching: Vec<Subscriber> = qualifying_subscribers(&subscribers, &catalog, &categories)
            .into_iter()
            .cloned()
            .collect();
        let matching_ids: Vec<SubscriberId> = matching.iter().map(|s| s.id.clone()).collect();
        tracing::info!(
            "{} of {} subscribers cover all {} categories",
            matching.len(),
            subscribers.len(),
            categories.len()
        );

        let result = submit_report(&self.client, &self.endpoints, &matching_ids, &token).await?;

        let stats = PassStats {
            categories: by_category.len(),
            magazines: catalog.len(),
            subscribers: subscribers.len(),
            qualifying: matching.len(),
            catalog_collisions: catalog.collisions(),
            duration: start.elapsed(),
        };
        tracing::info!("Reconciliation pass finished in {:?}", stats.duration);

        Ok(PassResult {
            matching,
            result,
            stats,
        })
    }

    async fn fetch_token(&self) -> Result<Token> {
        let response: TokenResponse = self.client.get(&self.endpoints.token_path()).await?;
        tracing::debug!("Obtained token {}", response.token);
        Ok(response.token)
    }
}
