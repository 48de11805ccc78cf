//! Concurrent per-category magazine fetch
//!
//! One tokio task per category, joined by a barrier. Workers share nothing
//! mutable: each owns its category, a client handle and its endpoint path,
//! and returns its own result slot. Aggregation happens only after every
//! task has finished.

use std::collections::{BTreeMap, BTreeSet};

use futures::future::join_all;

use crate::app::client::{ApiClient, EndpointTemplates};
use crate::app::models::{Category, Magazine, MagazineListResponse, Token};
use crate::errors::{ApiError, ApiResult};

/// Magazines grouped by the category they were fetched for
pub type CategoryMagazines = BTreeMap<Category, Vec<Magazine>>;

/// Fetch every category's magazine list concurrently
///
/// Every request is launched before any is awaited, and the function returns
/// only once all of them have completed. If any request failed the whole fetch
/// fails; with several failures the error of the smallest category name is
/// returned, so the outcome does not depend on completion order.
///
/// Duplicate category names are fetched once.
///
/// # Errors
///
/// Any `ApiError` from a category request, or `ApiError::WorkerFailed` if a
/// worker task panicked.
pub async fn fetch_magazines_by_category(
    client: &ApiClient,
    endpoints: &EndpointTemplates,
    categories: &[Category],
    token: &Token,
) -> ApiResult<CategoryMagazines> {
    let distinct: BTreeSet<&Category> = categories.iter().collect();
    if distinct.is_empty() {
        tracing::debug!("No categories to fetch");
        return Ok(CategoryMagazines::new());
    }

    tracing::info!("Fetching magazines for {} categories", distinct.len());

    let workers: Vec<_> = distinct
        .into_iter()
        .map(|category| {
            let category = category.clone();
            let client = client.clone();
            let endpoint = endpoints.category_path(&category, token);
            let handle = tokio::spawn(async move {
                client.get::<MagazineListResponse>(&endpoint).await
            });
            (category, handle)
        })
        .collect();

    let (names, handles): (Vec<Category>, Vec<_>) = workers.into_iter().unzip();
    let outcomes = join_all(handles).await;

    let mut magazines = CategoryMagazines::new();
    let mut first_error: Option<ApiError> = None;

    // names are in ascending order, so the first error kept is the smallest category's
    for (category, outcome) in names.into_iter().zip(outcomes) {
        match outcome {
            Ok(Ok(response)) => {
                tracing::debug!(
                    "Category '{}' returned {} magazines",
                    category,
                    response.data.len()
                );
                magazines.insert(category, response.data);
            }
            Ok(Err(e)) => {
                tracing::error!("Fetching category '{}' failed: {}", category, e);
                first_error.get_or_insert(e);
            }
            Err(join_error) => {
                tracing::error!("Worker for category '{}' failed: {}", category, join_error);
                first_error.get_or_insert(ApiError::WorkerFailed {
                    category,
                    reason: join_error.to_string(),
                });
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(magazines),
    }
}
