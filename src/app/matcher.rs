//! Full-coverage membership test
//!
//! A subscriber qualifies when the magazines they own, resolved against the
//! catalog, touch every required category. Unknown magazine ids are treated
//! as absent. Nothing here can fail.

use std::collections::BTreeSet;

use crate::app::catalog::Catalog;
use crate::app::models::{Category, MagazineId, Subscriber, SubscriberId};

/// Per-subscriber coverage breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberCoverage<'a> {
    pub subscriber_id: &'a str,
    /// Required categories reached by at least one owned magazine
    pub covered: BTreeSet<&'a Category>,
    /// Required categories not reached
    pub missing: BTreeSet<&'a Category>,
    /// Owned ids with no catalog entry
    pub unresolved: Vec<MagazineId>,
}

impl SubscriberCoverage<'_> {
    /// True when every required category is covered
    pub fn is_full(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compute how far `subscriber` covers the `required` category set
pub fn coverage_for<'a>(
    subscriber: &'a Subscriber,
    catalog: &'a Catalog,
    required: &BTreeSet<&'a Category>,
) -> SubscriberCoverage<'a> {
    let touched = catalog.categories_of(&subscriber.magazine_ids);
    let unresolved = subscriber
        .magazine_ids
        .iter()
        .copied()
        .filter(|id| !catalog.contains(*id))
        .collect();

    let (covered, missing): (BTreeSet<&Category>, BTreeSet<&Category>) =
        required.iter().copied().partition(|category| touched.contains(category));

    SubscriberCoverage {
        subscriber_id: &subscriber.id,
        covered,
        missing,
        unresolved,
    }
}

/// Subscribers whose magazines span every category, in input order
///
/// With an empty category list every subscriber qualifies.
pub fn qualifying_subscribers<'a>(
    subscribers: &'a [Subscriber],
    catalog: &'a Catalog,
    categories: &'a [Category],
) -> Vec<&'a Subscriber> {
    let required: BTreeSet<&Category> = categories.iter().collect();

    subscribers
        .iter()
        .filter(|subscriber| {
            let coverage = coverage_for(*subscriber, catalog, &required);
            if !coverage.unresolved.is_empty() {
                tracing::debug!(
                    "Subscriber {} references unknown magazines {:?}",
                    coverage.subscriber_id,
                    coverage.unresolved
                );
            }
            if !coverage.is_full() {
                tracing::debug!(
                    "Subscriber {} misses categories {:?}",
                    coverage.subscriber_id,
                    coverage.missing
                );
            }
            coverage.is_full()
        })
        .collect()
}

/// Ids of the subscribers whose magazines span every category, in input order
pub fn match_full_coverage(
    subscribers: &[Subscriber],
    catalog: &Catalog,
    categories: &[Category],
) -> Vec<SubscriberId> {
    qualifying_subscribers(subscribers, catalog, categories)
        .into_iter()
        .map(|subscriber| subscriber.id.clone())
        .collect()
}
