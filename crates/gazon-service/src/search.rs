//! # Product Search
//!
//! Free-text search over the active catalog. Two retrievals run for each query:
//!
//! - a typo-tolerant match through a [`FuzzyIndex`], and
//! - a case-insensitive substring match on the product name.
//!
//! [`merge_matches`] combines them: fuzzy hits first, in the index's order, with a
//! substring hit replacing the fuzzy entry for the same product and new substring
//! hits appended. Only `ACTIVE` products are returned.
//!
//! Typo tolerance of [`EditDistanceIndex`] grows with the length of each query term:
//!
//! | Term length | Edits allowed |
//! |---|---|
//! | 1-2 | 0 |
//! | 3-5 | 1 |
//! | 6+ | 2 |

use crate::clients::ProductClient;
use crate::model::{Product, ProductView};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use gazon_actor::ActorClient;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Typo-tolerant retrieval.
#[async_trait]
pub trait FuzzyIndex: Send + Sync {
    /// Products matching `text`, best first. May include inactive products.
    async fn fuzzy_match(&self, text: &str) -> Result<Vec<Product>, ProductError>;
}

/// Edit-distance matching evaluated inside the product store.
///
/// A product matches when every query term is within the allowed number of edits
/// of at least one word of its name.
#[derive(Clone)]
pub struct EditDistanceIndex {
    products: ProductClient,
}

impl EditDistanceIndex {
    pub fn new(products: ProductClient) -> Self {
        Self { products }
    }
}

#[async_trait]
impl FuzzyIndex for EditDistanceIndex {
    async fn fuzzy_match(&self, text: &str) -> Result<Vec<Product>, ProductError> {
        let query = terms(text);
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.products
            .inner()
            .filter(move |product: &Product| name_matches(&query, &product.name))
            .await
            .map_err(ProductError::from_framework)
    }
}

/// Runs both retrievals and merges them.
pub struct ProductSearch<I = EditDistanceIndex> {
    index: I,
    products: ProductClient,
}

impl ProductSearch<EditDistanceIndex> {
    pub fn with_edit_distance(products: ProductClient) -> Self {
        Self::new(EditDistanceIndex::new(products.clone()), products)
    }
}

impl<I: FuzzyIndex> ProductSearch<I> {
    pub fn new(index: I, products: ProductClient) -> Self {
        Self { index, products }
    }

    /// Active products matching `text`. A blank query matches nothing.
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str) -> Result<Vec<ProductView>, ProductError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let fuzzy = self.index.fuzzy_match(text).await?;
        let substring = self.products.find_by_name_containing(text).await?;
        debug!(fuzzy = fuzzy.len(), substring = substring.len(), "Retrieved");

        Ok(merge_matches(fuzzy, substring)
            .into_iter()
            .filter(Product::is_active)
            .map(ProductView::from)
            .collect())
    }
}

/// Unions two result lists. `primary` keeps its order; an entry of `secondary`
/// for a product already present replaces it in place, the rest are appended.
pub fn merge_matches(primary: Vec<Product>, secondary: Vec<Product>) -> Vec<Product> {
    let mut merged = primary;
    let mut position: HashMap<_, _> = merged
        .iter()
        .enumerate()
        .map(|(i, product)| (product.id, i))
        .collect();

    for product in secondary {
        match position.get(&product.id) {
            Some(&i) => merged[i] = product,
            None => {
                position.insert(product.id, merged.len());
                merged.push(product);
            }
        }
    }
    merged
}

fn terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn allowed_edits(term: &str) -> usize {
    match term.chars().count() {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

fn name_matches(query: &[String], name: &str) -> bool {
    let words = terms(name);
    query.iter().all(|term| {
        let budget = allowed_edits(term);
        words.iter().any(|word| edit_distance(term, word) <= budget)
    })
}

/// Levenshtein distance over chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductId, ProductStatus};

    fn product(id: u32, name: &str) -> Product {
        Product::new(ProductId(id), name, 1.0, 1)
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("widget", "widgte"), 2);
        assert_eq!(edit_distance("mug", "mug"), 0);
        assert_eq!(edit_distance("café", "cafe"), 1);
    }

    #[test]
    fn test_typo_budget_grows_with_term_length() {
        let query = |text: &str| terms(text);
        assert!(name_matches(&query("tv"), "Smart TV"));
        assert!(!name_matches(&query("tx"), "Smart TV"));
        assert!(name_matches(&query("mugg"), "Coffee Mug"));
        assert!(!name_matches(&query("mvgg"), "Coffee Mug"));
        assert!(name_matches(&query("keybaord"), "Mechanical Keyboard"));
        assert!(name_matches(&query("cofee mug"), "Coffee Mug"));
        assert!(!name_matches(&query("coffee lamp"), "Coffee Mug"));
    }

    #[test]
    fn test_merge_keeps_fuzzy_order_and_prefers_substring_hits() {
        let fuzzy = vec![product(3, "Lamp"), product(1, "Lamb"), product(2, "Lame")];
        let mut newer = product(1, "Lamb");
        newer.stock = 99;
        let substring = vec![newer, product(4, "Lamp shade")];

        let merged = merge_matches(fuzzy, substring);
        let ids: Vec<u32> = merged.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
        assert_eq!(merged[1].stock, 99);
    }

    #[test]
    fn test_merge_with_empty_sides() {
        assert!(merge_matches(vec![], vec![]).is_empty());
        let merged = merge_matches(vec![], vec![product(1, "a"), product(2, "b")]);
        assert_eq!(merged.len(), 2);
        let mut hidden = product(5, "c");
        hidden.status = ProductStatus::Inactive;
        assert_eq!(merge_matches(vec![hidden.clone()], vec![]), vec![hidden]);
    }
}
