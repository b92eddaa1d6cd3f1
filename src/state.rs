//! In-memory catalog state and the synchronous filters evaluated over it.
//!
//! The lists live only as long as a screen does. After each successful
//! mutation the screen patches them locally instead of re-fetching, so the
//! operations here are the single source of how server responses are
//! reconciled with what is already displayed.

use crate::models::{Category, Product};

/// Value of the category dropdown that means "no filter".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl CatalogState {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub fn insert_product(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Swaps in the server's version of an edited product. An id the list
    /// does not hold leaves it unchanged.
    pub fn replace_product(&mut self, updated: Product) {
        if let Some(slot) = self.products.iter_mut().find(|p| p.id == updated.id) {
            *slot = updated;
        }
    }

    pub fn remove_product(&mut self, id: &str) {
        self.products.retain(|p| p.id != id);
    }

    /// Flips the blocked flag in place and reports the new value, so the
    /// status switch updates without a reload.
    pub fn toggle_product_block(&mut self, id: &str) -> Option<bool> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        product.is_blocked = !product.is_blocked;
        Some(product.is_blocked)
    }

    pub fn insert_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn replace_category(&mut self, updated: Category) {
        if let Some(slot) = self.categories.iter_mut().find(|c| c.id == updated.id) {
            *slot = updated;
        }
    }

    pub fn remove_category(&mut self, id: &str) {
        self.categories.retain(|c| c.id != id);
    }

    /// Categories offered in the product form dropdown: blocked ones are
    /// hidden, not removed.
    pub fn selectable_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| !c.is_blocked).collect()
    }
}

/// Admin search box: case-insensitive substring match on the name.
pub fn search_by_name<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Storefront search box: matches either the name or the description.
pub fn search_listing<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Category dropdown. `None` and the literal "all" both restore the full
/// unfiltered list.
pub fn filter_by_category<'a>(
    products: &'a [Product],
    category_id: Option<&str>,
) -> Vec<&'a Product> {
    match category_id {
        None => products.iter().collect(),
        Some(id) if id == ALL_CATEGORIES => products.iter().collect(),
        Some(id) => products
            .iter()
            .filter(|p| p.category.as_ref().is_some_and(|c| c.id == id))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryRef;

    fn product(id: &str, name: &str, description: &str, category: Option<(&str, &str)>) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            image: String::new(),
            category: category.map(|(cid, cname)| CategoryRef {
                id: cid.into(),
                name: cname.into(),
            }),
            is_blocked: false,
        }
    }

    fn category(id: &str, name: &str, is_blocked: bool) -> Category {
        Category {
            id: id.into(),
            name: name.into(),
            is_blocked,
        }
    }

    fn sample() -> CatalogState {
        CatalogState::new(
            vec![
                product("p1", "Brake Pad Set", "Front axle, ceramic", Some(("c1", "Brakes"))),
                product("p2", "Oil Filter", "Spin-on cartridge", Some(("c2", "Filters"))),
                product("p3", "Brake Disc", "Vented rotor", Some(("c1", "Brakes"))),
            ],
            vec![category("c1", "Brakes", false), category("c2", "Filters", true)],
        )
    }

    #[test]
    fn test_insert_appends_once() {
        let mut state = sample();
        state.insert_product(product("p4", "Wiper Blade", "", None));
        let matches: Vec<_> = state.products.iter().filter(|p| p.id == "p4").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(state.products.len(), 4);
    }

    #[test]
    fn test_replace_swaps_by_id() {
        let mut state = sample();
        let mut edited = product("p2", "Oil Filter Pro", "Spin-on cartridge", Some(("c2", "Filters")));
        edited.is_blocked = true;
        state.replace_product(edited);
        assert_eq!(state.products.len(), 3);
        let p2 = state.products.iter().find(|p| p.id == "p2").unwrap();
        assert_eq!(p2.name, "Oil Filter Pro");
        assert!(p2.is_blocked);
    }

    #[test]
    fn test_replace_unknown_id_is_noop() {
        let mut state = sample();
        let before = state.clone();
        state.replace_product(product("p9", "Ghost", "", None));
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_filters_by_id() {
        let mut state = sample();
        state.remove_product("p1");
        assert!(state.products.iter().all(|p| p.id != "p1"));
        assert_eq!(state.products.len(), 2);
    }

    #[test]
    fn test_toggle_flips_in_place() {
        let mut state = sample();
        assert_eq!(state.toggle_product_block("p1"), Some(true));
        assert_eq!(state.toggle_product_block("p1"), Some(false));
        assert_eq!(state.toggle_product_block("missing"), None);
    }

    #[test]
    fn test_category_patching() {
        let mut state = sample();
        state.insert_category(category("c3", "Suspension", false));
        state.replace_category(category("c2", "Filtration", true));
        state.remove_category("c1");
        assert_eq!(state.categories.len(), 2);
        assert_eq!(state.categories[0].name, "Filtration");
    }

    #[test]
    fn test_selectable_categories_hides_blocked() {
        let state = sample();
        let selectable = state.selectable_categories();
        assert_eq!(selectable.len(), 1);
        assert_eq!(selectable[0].id, "c1");
    }

    #[test]
    fn test_name_search_is_case_insensitive() {
        let state = sample();
        let hits = search_by_name(&state.products, "bRaKe");
        assert_eq!(hits.len(), 2);
        assert!(search_by_name(&state.products, "").len() == 3);
    }

    #[test]
    fn test_listing_search_matches_description_too() {
        let state = sample();
        let hits = search_listing(&state.products, "SPIN-ON");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p2");
    }

    #[test]
    fn test_category_filter_all_restores_everything() {
        let state = sample();
        assert_eq!(filter_by_category(&state.products, None).len(), 3);
        assert_eq!(filter_by_category(&state.products, Some("all")).len(), 3);
        let brakes = filter_by_category(&state.products, Some("c1"));
        assert_eq!(brakes.len(), 2);
        assert!(filter_by_category(&state.products, Some("c9")).is_empty());
    }
}
