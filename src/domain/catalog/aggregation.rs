//! Hierarchical product-count aggregation.
//!
//! Given a flat snapshot of categories (each carrying its directly assigned
//! active product count), computes for every category the total number of
//! products assigned to it and to all of its descendants.
//!
//! The snapshot is indexed once (`id -> category` and `parent_id -> children`)
//! so each total is a walk of the subtree rather than a rescan of the list.
//! Cyclic parent links are not detected here; the store refuses updates that
//! would make a category its own ancestor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CategoryId;

use super::{Category, CategoryWithSubcategories};

// ════════════════════════════════════════════════════════════════════════════════
// Index
// ════════════════════════════════════════════════════════════════════════════════

/// Lookup structure over one immutable category snapshot.
#[derive(Debug)]
pub struct ProductCountIndex<'a> {
    by_id: HashMap<CategoryId, &'a Category>,
    children: HashMap<CategoryId, Vec<CategoryId>>,
}

impl<'a> ProductCountIndex<'a> {
    /// Indexes a flat category list.
    ///
    /// When an id appears more than once the first record wins.
    pub fn new(flat: &'a [Category]) -> Self {
        let mut by_id = HashMap::with_capacity(flat.len());
        let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();

        for category in flat {
            by_id.entry(category.id).or_insert(category);
            if let Some(parent_id) = category.parent_id {
                children.entry(parent_id).or_default().push(category.id);
            }
        }

        Self { by_id, children }
    }

    /// Own product count of `id`, or 0 when it is not in the snapshot.
    pub fn own_count(&self, id: CategoryId) -> u64 {
        self.by_id
            .get(&id)
            .map(|c| c.own_product_count())
            .unwrap_or(0)
    }

    /// Own count plus the totals of all direct children, recursively.
    ///
    /// An id missing from the snapshot contributes no products of its own,
    /// but records naming it as their parent are still counted.
    pub fn compute_total(&self, id: CategoryId) -> u64 {
        let descendants: u64 = self
            .children_of(id)
            .iter()
            .map(|child| self.compute_total(*child))
            .sum();

        self.own_count(id) + descendants
    }

    /// Direct children of `id` in snapshot order.
    pub fn children_of(&self, id: CategoryId) -> &[CategoryId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Total active products in the subtree rooted at `id`.
pub fn compute_total(id: CategoryId, flat: &[Category]) -> u64 {
    ProductCountIndex::new(flat).compute_total(id)
}

// ════════════════════════════════════════════════════════════════════════════════
// Enriched records
// ════════════════════════════════════════════════════════════════════════════════

/// A category annotated with its own and subtree product counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedCategory {
    #[serde(flatten)]
    pub category: Category,
    pub own_product_count: u64,
    pub total_product_count: u64,
}

/// A top-level category with counts; subcategories are carried unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTopLevel {
    #[serde(flatten)]
    pub category: EnrichedCategory,
    #[serde(default)]
    pub subcategories: Vec<Category>,
}

impl EnrichedTopLevel {
    pub fn id(&self) -> CategoryId {
        self.category.category.id
    }
}

/// Anything that can be annotated with product counts from a snapshot.
pub trait Enrich {
    type Output;

    fn enrich_with(&self, index: &ProductCountIndex<'_>) -> Self::Output;
}

fn counts(category: &Category, index: &ProductCountIndex<'_>) -> EnrichedCategory {
    EnrichedCategory {
        category: category.clone(),
        own_product_count: category.own_product_count(),
        total_product_count: index.compute_total(category.id),
    }
}

impl Enrich for Category {
    type Output = EnrichedCategory;

    fn enrich_with(&self, index: &ProductCountIndex<'_>) -> EnrichedCategory {
        counts(self, index)
    }
}

impl Enrich for EnrichedCategory {
    type Output = EnrichedCategory;

    fn enrich_with(&self, index: &ProductCountIndex<'_>) -> EnrichedCategory {
        counts(&self.category, index)
    }
}

impl Enrich for CategoryWithSubcategories {
    type Output = EnrichedTopLevel;

    fn enrich_with(&self, index: &ProductCountIndex<'_>) -> EnrichedTopLevel {
        EnrichedTopLevel {
            category: counts(&self.category, index),
            subcategories: self.subcategories.clone(),
        }
    }
}

impl Enrich for EnrichedTopLevel {
    type Output = EnrichedTopLevel;

    fn enrich_with(&self, index: &ProductCountIndex<'_>) -> EnrichedTopLevel {
        EnrichedTopLevel {
            category: counts(&self.category.category, index),
            subcategories: self.subcategories.clone(),
        }
    }
}

/// Attaches `own_product_count` and `total_product_count` to every item.
///
/// Totals are resolved against `flat`, not against the items themselves, so
/// the same function serves the flat list and the top-level list.
pub fn enrich<T: Enrich>(items: &[T], flat: &[Category]) -> Vec<T::Output> {
    let index = ProductCountIndex::new(flat);
    items.iter().map(|item| item.enrich_with(&index)).collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Catalog snapshot
// ════════════════════════════════════════════════════════════════════════════════

/// Both enriched collections produced from one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichedCatalog {
    pub top_level: Vec<EnrichedTopLevel>,
    pub flat: Vec<EnrichedCategory>,
}

impl EnrichedCatalog {
    /// Runs the aggregator over a top-level list and its flat snapshot.
    pub fn build(top_level: &[CategoryWithSubcategories], flat: &[Category]) -> Self {
        let index = ProductCountIndex::new(flat);
        Self {
            top_level: top_level.iter().map(|c| c.enrich_with(&index)).collect(),
            flat: flat.iter().map(|c| c.enrich_with(&index)).collect(),
        }
    }

    /// Finds a category in the enriched flat list.
    pub fn find(&self, id: CategoryId) -> Option<&EnrichedCategory> {
        self.flat.iter().find(|c| c.category.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.top_level.is_empty() && self.flat.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cat(id: i64, parent: Option<i64>, count: Option<u64>) -> Category {
        let mut c = Category::new(
            CategoryId::new(id),
            parent.map(CategoryId::new),
            format!("Category {}", id),
            format!("category-{}", id),
        );
        c.product_count = count;
        c
    }

    // ───────────────────────────────────────────────────────────────
    // compute_total
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn compute_total_sums_parent_and_children() {
        let flat = vec![cat(1, None, Some(5)), cat(2, Some(1), Some(3)), cat(3, Some(1), Some(0))];

        assert_eq!(compute_total(CategoryId::new(1), &flat), 8);
        assert_eq!(compute_total(CategoryId::new(2), &flat), 3);
        assert_eq!(compute_total(CategoryId::new(3), &flat), 0);
    }

    #[test]
    fn compute_total_returns_zero_for_unknown_id() {
        let flat = vec![cat(1, None, Some(5))];
        assert_eq!(compute_total(CategoryId::new(99), &flat), 0);
        assert_eq!(compute_total(CategoryId::new(1), &[]), 0);
    }

    #[test]
    fn compute_total_treats_missing_count_as_zero() {
        let flat = vec![cat(1, None, None), cat(2, Some(1), Some(4))];
        assert_eq!(compute_total(CategoryId::new(1), &flat), 4);
    }

    #[test]
    fn compute_total_descends_past_two_levels() {
        let flat = vec![
            cat(1, None, Some(1)),
            cat(2, Some(1), Some(2)),
            cat(3, Some(2), Some(4)),
            cat(4, Some(3), Some(8)),
        ];
        assert_eq!(compute_total(CategoryId::new(1), &flat), 15);
        assert_eq!(compute_total(CategoryId::new(3), &flat), 12);
    }

    #[test]
    fn orphan_does_not_contribute_to_unrelated_roots() {
        let flat = vec![cat(1, None, Some(1)), cat(2, Some(42), Some(7))];
        assert_eq!(compute_total(CategoryId::new(1), &flat), 1);
        assert_eq!(compute_total(CategoryId::new(2), &flat), 7);
    }

    #[test]
    fn missing_parent_still_sums_its_children() {
        let flat = vec![cat(2, Some(42), Some(7)), cat(3, Some(42), None), cat(4, Some(2), Some(1))];

        assert_eq!(compute_total(CategoryId::new(42), &flat), 8);
        assert_eq!(ProductCountIndex::new(&flat).own_count(CategoryId::new(42)), 0);
    }

    #[test]
    fn index_lists_children_in_snapshot_order() {
        let flat = vec![cat(1, None, None), cat(3, Some(1), None), cat(2, Some(1), None)];
        let index = ProductCountIndex::new(&flat);

        assert_eq!(
            index.children_of(CategoryId::new(1)),
            &[CategoryId::new(3), CategoryId::new(2)]
        );
        assert!(index.children_of(CategoryId::new(3)).is_empty());
    }

    // ───────────────────────────────────────────────────────────────
    // enrich
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn enrich_top_level_counts_subcategories_from_flat_list() {
        let parent = cat(10, None, Some(2));
        let child = cat(11, Some(10), Some(4));
        let flat = vec![parent.clone(), child.clone()];
        let top = vec![CategoryWithSubcategories::new(parent, vec![child.clone()])];

        let enriched = enrich(&top, &flat);

        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].category.own_product_count, 2);
        assert_eq!(enriched[0].category.total_product_count, 6);
        assert_eq!(enriched[0].subcategories, vec![child]);
    }

    #[test]
    fn enrich_flat_list_annotates_every_item() {
        let flat = vec![cat(1, None, Some(5)), cat(2, Some(1), Some(3)), cat(3, Some(1), None)];
        let enriched = enrich(&flat, &flat);

        let totals: Vec<u64> = enriched.iter().map(|c| c.total_product_count).collect();
        let owns: Vec<u64> = enriched.iter().map(|c| c.own_product_count).collect();
        assert_eq!(totals, vec![8, 3, 0]);
        assert_eq!(owns, vec![5, 3, 0]);
    }

    #[test]
    fn enriched_category_serializes_both_counts_alongside_fields() {
        let flat = vec![cat(1, None, Some(5)), cat(2, Some(1), Some(3))];
        let enriched = enrich(&flat[..1], &flat);

        let value = serde_json::to_value(&enriched[0]).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["product_count"], 5);
        assert_eq!(value["own_product_count"], 5);
        assert_eq!(value["total_product_count"], 8);
    }

    #[test]
    fn catalog_build_produces_both_collections() {
        let parent = cat(1, None, Some(1));
        let child = cat(2, Some(1), Some(2));
        let flat = vec![parent.clone(), child.clone()];
        let top = vec![CategoryWithSubcategories::new(parent, vec![child])];

        let catalog = EnrichedCatalog::build(&top, &flat);

        assert_eq!(catalog.top_level[0].category.total_product_count, 3);
        assert_eq!(catalog.flat.len(), 2);
        assert_eq!(
            catalog.find(CategoryId::new(2)).map(|c| c.own_product_count),
            Some(2)
        );
        assert!(catalog.find(CategoryId::new(3)).is_none());
    }

    // ───────────────────────────────────────────────────────────────
    // Properties
    // ───────────────────────────────────────────────────────────────

    /// Acyclic forests: each node may only point at an earlier node.
    fn forest() -> impl Strategy<Value = Vec<Category>> {
        prop::collection::vec(
            (any::<prop::sample::Index>(), any::<bool>(), prop::option::of(0u64..50)),
            0..40,
        )
        .prop_map(|nodes| {
            nodes
                .into_iter()
                .enumerate()
                .map(|(i, (parent_pick, has_parent, count))| {
                    let id = i as i64 + 1;
                    let parent = if has_parent && i > 0 {
                        Some(parent_pick.index(i) as i64 + 1)
                    } else {
                        None
                    };
                    cat(id, parent, count)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn total_is_own_plus_children_totals(flat in forest()) {
            let index = ProductCountIndex::new(&flat);
            for c in &flat {
                let children: u64 = flat
                    .iter()
                    .filter(|child| child.parent_id == Some(c.id))
                    .map(|child| index.compute_total(child.id))
                    .sum();
                prop_assert_eq!(index.compute_total(c.id), c.own_product_count() + children);
            }
        }

        #[test]
        fn leaves_total_their_own_count(flat in forest()) {
            let index = ProductCountIndex::new(&flat);
            for c in flat.iter().filter(|c| index.children_of(c.id).is_empty()) {
                prop_assert_eq!(index.compute_total(c.id), c.own_product_count());
            }
        }

        #[test]
        fn total_never_below_own(flat in forest()) {
            for e in enrich(&flat, &flat) {
                prop_assert!(e.total_product_count >= e.own_product_count);
            }
        }

        #[test]
        fn enrich_is_idempotent(flat in forest()) {
            let once = enrich(&flat, &flat);
            let twice = enrich(&once, &flat);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn root_totals_sum_to_all_products(flat in forest()) {
            let index = ProductCountIndex::new(&flat);
            let roots: u64 = flat
                .iter()
                .filter(|c| c.is_top_level())
                .map(|c| index.compute_total(c.id))
                .sum();
            let all: u64 = flat.iter().map(Category::own_product_count).sum();
            prop_assert_eq!(roots, all);
        }
    }
}
