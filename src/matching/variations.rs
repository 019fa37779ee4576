use std::sync::Arc;

use crate::catalog::index::CandidateFinder;
use crate::catalog::store::CatalogCache;
use crate::core::item::ItemRecord;
use crate::core::types::Wear;

/// Collects every wear tier of the same weapon and skin
pub struct WearVariationResolver<'a> {
    finder: CandidateFinder<'a>,
}

impl<'a> WearVariationResolver<'a> {
    pub fn new(catalog: &'a CatalogCache) -> Self {
        Self {
            finder: CandidateFinder::new(catalog),
        }
    }

    /// All catalog records sharing `item`'s weapon and skin, ordered from
    /// Factory New to Battle-Scarred with unknown or missing wear last.
    ///
    /// Comparison is exact on the parsed components. An item with no weapon
    /// or no skin has no meaningful siblings, so the result is just `[item]`.
    /// Records of equal rank keep catalog order.
    #[must_use]
    pub fn variations(&self, item: &Arc<ItemRecord>) -> Vec<Arc<ItemRecord>> {
        if item.weapon.is_empty() || item.skin_name.is_empty() {
            return vec![Arc::clone(item)];
        }

        let mut siblings: Vec<Arc<ItemRecord>> = self
            .finder
            .same_item(&item.weapon, &item.skin_name)
            .cloned()
            .collect();
        if siblings.is_empty() {
            // Item is not from this catalog
            return vec![Arc::clone(item)];
        }
        siblings.sort_by_key(|sibling| Wear::rank(sibling.wear.as_deref()));
        siblings
    }
}
