//! Catalog listing view model.
//!
//! Mirrors the storefront listing page: both collections are fetched once,
//! then every search keystroke and category selection re-filters the
//! in-memory arrays with no further network activity.

use crate::client::CatalogApi;
use crate::models::{Category, Product};

/// Lifecycle of the listing page. A failed fetch still reaches `Ready` —
/// that collection is simply left empty, never an error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// State of the listing view: the fetched collections plus the active
/// search text and category selection.
pub struct ListingState {
    phase: Phase,
    categories: Vec<Category>,
    products: Vec<Product>,
    search: String,
    selected_category: Option<i64>,
}

impl ListingState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            categories: Vec::new(),
            products: Vec::new(),
            search: String::new(),
            selected_category: None,
        }
    }

    /// Fetches categories and products from the API. Each fetch is awaited
    /// independently; a failure leaves that collection empty. Always ends
    /// in `Ready`.
    pub async fn load(&mut self, api: &dyn CatalogApi) {
        self.categories = api.list_categories().await.unwrap_or_default();
        self.products = api.list_products().await.unwrap_or_default();
        self.phase = Phase::Ready;
    }

    /// Seeds the state directly from already-settled fetch results. Used by
    /// tests and by callers that fetch out-of-band.
    pub fn data_loaded(&mut self, categories: Vec<Category>, products: Vec<Product>) {
        self.categories = categories;
        self.products = products;
        self.phase = Phase::Ready;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Updates the search text. Filtering is recomputed synchronously on
    /// every call; there is no debouncing.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Selects a category filter, or `None` for all categories.
    pub fn select_category(&mut self, category_id: Option<i64>) {
        self.selected_category = category_id;
    }

    /// Products matching the active filter, in fetch order.
    ///
    /// A product matches iff (no category selected OR its joined category's
    /// id equals the selection) AND (search empty OR the search text is a
    /// case-insensitive substring of its name or description).
    pub fn visible_products(&self) -> Vec<&Product> {
        let term = self.search.to_lowercase();
        self.products
            .iter()
            .filter(|product| {
                let matches_category = match self.selected_category {
                    None => true,
                    Some(id) => product.category.as_ref().map(|c| c.id) == Some(id),
                };
                let matches_search = term.is_empty()
                    || product.name.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term);
                matches_category && matches_search
            })
            .collect()
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}

/// CLI entry point — loads the listing against a running server, applies
/// the filter, and prints matching products.
pub async fn run_list(
    base_url: &str,
    search: Option<String>,
    category: Option<i64>,
) -> anyhow::Result<()> {
    let api = crate::client::HttpApi::new(base_url);
    let mut state = ListingState::new();
    state.load(&api).await;

    if let Some(term) = search {
        state.set_search(term);
    }
    state.select_category(category);

    let visible = state.visible_products();
    if visible.is_empty() {
        println!("No products match the current filter.");
        return Ok(());
    }

    println!("{} product(s):", visible.len());
    for product in visible {
        let category_name = product
            .category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        println!(
            "  #{:<4} {:<28} {:>10.2}  [{}]",
            product.id, product.name, product.price, category_name
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, description: &str, category: Option<Category>) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price: 100.0,
            category_id: category.as_ref().map(|c| c.id),
            category,
        }
    }

    fn loaded_state() -> ListingState {
        let fruit = Category {
            id: 1,
            name: "Fruit".to_string(),
        };
        let dessert = Category {
            id: 2,
            name: "Dessert".to_string(),
        };
        let mut state = ListingState::new();
        state.data_loaded(
            vec![fruit.clone(), dessert.clone()],
            vec![
                product(1, "Mango", "Ripe yellow mango", Some(fruit)),
                product(2, "Brownie", "Chocolate fudge brownie", Some(dessert)),
                product(3, "Plain Rice", "Steamed jasmine rice", None),
            ],
        );
        state
    }

    #[test]
    fn starts_loading_then_ready() {
        let mut state = ListingState::new();
        assert_eq!(state.phase(), Phase::Loading);
        state.data_loaded(Vec::new(), Vec::new());
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn empty_filter_returns_everything_in_fetch_order() {
        let state = loaded_state();
        let visible = state.visible_products();
        let ids: Vec<i64> = visible.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let mut state = loaded_state();
        state.set_search("MANGO");
        assert_eq!(state.visible_products().len(), 1);
        state.set_search("fudge");
        let visible = state.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Brownie");
    }

    #[test]
    fn category_filter_excludes_uncategorized_products() {
        let mut state = loaded_state();
        state.select_category(Some(1));
        let visible = state.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Mango");
    }

    #[test]
    fn filters_combine() {
        let mut state = loaded_state();
        state.select_category(Some(2));
        state.set_search("mango");
        assert!(state.visible_products().is_empty());
    }

    #[test]
    fn no_match_is_an_empty_result_not_an_error() {
        let mut state = loaded_state();
        state.set_search("nonexistent dish");
        assert!(state.visible_products().is_empty());
        assert_eq!(state.phase(), Phase::Ready);
    }
}
