//! Core application logic for the Magazine Store reconciler
//!
//! This module contains the typed API client, the response models, the
//! concurrent category fetcher, the catalog flattener, the coverage matcher,
//! the report submitter and the pass orchestration that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use magazine_store::app::{ClientConfig, EndpointTemplates, Reconciler, ReconcilerConfig};
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = Reconciler::new(ReconcilerConfig {
//!     base_url: Url::parse("http://magazinestore.azurewebsites.net")?,
//!     endpoints: EndpointTemplates::default(),
//!     client: ClientConfig::default(),
//! })?;
//!
//! let pass = reconciler.run_pass().await?;
//! println!("{} subscribers qualify", pass.matching.len());
//! println!("Answer correct: {}", pass.result.answer_correct);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod fetcher;
pub mod matcher;
pub mod models;
pub mod pipeline;
pub mod report;

// Re-export main public API
pub use catalog::{flatten, Catalog};
pub use client::{ApiClient, ApiMethod, ClientConfig, EndpointTemplates};
pub use fetcher::{fetch_magazines_by_category, CategoryMagazines};
pub use matcher::{coverage_for, match_full_coverage, qualifying_subscribers, SubscriberCoverage};
pub use models::{
    Category, CoverageResult, Magazine, MagazineId, Subscriber, SubscriberId, Token,
};
pub use pipeline::{PassResult, PassStats, Reconciler, ReconcilerConfig};
pub use report::submit_report;
