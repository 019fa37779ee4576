use std::sync::Arc;

use crate::core::item::ItemRecord;

use super::store::CatalogCache;

/// Finds candidate items by literal substring and equality checks
///
/// These scans are the cheap, high-precision half of matching: they decide
/// which records are worth scoring, never how well they match.
pub struct CandidateFinder<'a> {
    catalog: &'a CatalogCache,
}

impl<'a> CandidateFinder<'a> {
    pub fn new(catalog: &'a CatalogCache) -> Self {
        Self { catalog }
    }

    /// Items whose normalized base name contains every needle as a substring
    ///
    /// An empty needle list matches nothing.
    pub fn base_name_contains_all<'n>(
        &self,
        needles: &'n [&'n str],
    ) -> impl Iterator<Item = &'a Arc<ItemRecord>> + 'n
    where
        'a: 'n,
    {
        let any_needles = !needles.is_empty();
        self.catalog.items().iter().filter(move |item| {
            any_needles
                && needles
                    .iter()
                    .all(|needle| item.base_normalized.contains(needle))
        })
    }

    /// Items with exactly this weapon and skin, in catalog order
    pub fn same_item<'q>(
        &self,
        weapon: &'q str,
        skin: &'q str,
    ) -> impl Iterator<Item = &'a Arc<ItemRecord>> + 'q
    where
        'a: 'q,
    {
        self.catalog
            .items()
            .iter()
            .filter(move |item| item.weapon == weapon && item.skin_name == skin)
    }
}
