//! Flattened, id-keyed magazine catalog
//!
//! Built once per pass from the per-category fetch results and read-only
//! afterwards.

use std::collections::{BTreeSet, HashMap};

use crate::app::fetcher::CategoryMagazines;
use crate::app::models::{Category, Magazine, MagazineId};

/// Every known magazine keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    magazines: HashMap<MagazineId, Magazine>,
    collisions: usize,
}

impl Catalog {
    /// Merge per-category lists into one catalog
    ///
    /// Categories are visited in ascending name order and magazines in list
    /// order. When an id appears more than once the first occurrence wins and
    /// later ones are counted as collisions.
    pub fn flatten(by_category: &CategoryMagazines) -> Self {
        let mut magazines: HashMap<MagazineId, Magazine> = HashMap::new();
        let mut collisions = 0;

        for (category, list) in by_category {
            for magazine in list {
                if let Some(existing) = magazines.get(&magazine.id) {
                    tracing::warn!(
                        "Magazine {} listed under '{}' already seen under '{}'; keeping the first",
                        magazine.id,
                        category,
                        existing.category
                    );
                    collisions += 1;
                    continue;
                }
                magazines.insert(magazine.id, magazine.clone());
            }
        }

        tracing::debug!(
            "Flattened {} categories into {} magazines ({} collisions)",
            by_category.len(),
            magazines.len(),
            collisions
        );

        Self {
            magazines,
            collisions,
        }
    }

    pub fn get(&self, id: MagazineId) -> Option<&Magazine> {
        self.magazines.get(&id)
    }

    pub fn contains(&self, id: MagazineId) -> bool {
        self.magazines.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.magazines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magazines.is_empty()
    }

    /// Number of duplicate ids dropped while flattening
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Distinct categories reachable from `ids`; unknown ids are skipped
    pub fn categories_of<'a>(&'a self, ids: &[MagazineId]) -> BTreeSet<&'a Category> {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .map(|magazine| &magazine.category)
            .collect()
    }
}

/// Free-function form of [`Catalog::flatten`]
pub fn flatten(by_category: &CategoryMagazines) -> Catalog {
    Catalog::flatten(by_category)
}
