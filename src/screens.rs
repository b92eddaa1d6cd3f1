//! Screen flows: fetch on mount, dispatch a mutation, patch local state.
//!
//! Each screen owns a transient copy of the lists it renders. Mutations go
//! to the backend first; only a success touches the local list, so a failed
//! request leaves the display exactly as it was.

use std::sync::Arc;

use tracing::error;

use crate::client::CatalogBackend;
use crate::error::Result;
use crate::forms::{CategoryDraft, ProductDraft};
use crate::models::{Category, Product};
use crate::state::{self, CatalogState, ALL_CATEGORIES};

/// Admin "Manage Products" screen.
pub struct ProductsScreen {
    backend: Arc<dyn CatalogBackend>,
    pub state: CatalogState,
    pub search: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProductsScreen {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            state: CatalogState::default(),
            search: String::new(),
            loading: true,
            error: None,
        }
    }

    /// Fetch-on-mount. A failure leaves whatever was displayed untouched
    /// and records the error for the retry affordance.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.backend.fetch_catalog().await {
            Ok((products, categories)) => {
                self.state = CatalogState::new(products, categories);
                self.error = None;
            }
            Err(err) => {
                error!("failed to load products: {err}");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Rows after the search box is applied.
    pub fn visible(&self) -> Vec<&Product> {
        state::search_by_name(&self.state.products, &self.search)
    }

    /// Dropdown choices for the add/edit form.
    pub fn selectable_categories(&self) -> Vec<&Category> {
        self.state.selectable_categories()
    }

    pub async fn add(&mut self, draft: &ProductDraft) -> Result<Product> {
        let created = self.backend.add_product(draft).await?;
        self.state.insert_product(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, draft: &ProductDraft) -> Result<Product> {
        let updated = self.backend.update_product(id, draft).await?;
        self.state.replace_product(updated.clone());
        Ok(updated)
    }

    /// Sends the inverted flag, then flips the local row. No reload.
    pub async fn toggle_block(&mut self, id: &str) -> Result<bool> {
        let current = self
            .state
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.is_blocked)
            .unwrap_or(false);
        self.backend.set_product_blocked(id, !current).await?;
        Ok(self.state.toggle_product_block(id).unwrap_or(!current))
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.backend.delete_product(id).await?;
        self.state.remove_product(id);
        Ok(())
    }
}

/// Admin "Manage Categories" screen.
pub struct CategoriesScreen {
    backend: Arc<dyn CatalogBackend>,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CategoriesScreen {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            categories: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        match self.backend.categories().await {
            Ok(categories) => {
                self.categories = categories;
                self.error = None;
            }
            Err(err) => {
                error!("failed to load categories: {err}");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub async fn add(&mut self, draft: &CategoryDraft) -> Result<Category> {
        let created = self.backend.add_category(draft).await?;
        self.categories.push(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, draft: &CategoryDraft) -> Result<Category> {
        let updated = self.backend.update_category(id, draft).await?;
        if let Some(slot) = self.categories.iter_mut().find(|c| c.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// The block endpoint returns the updated record; swap it in.
    pub async fn toggle_block(&mut self, id: &str) -> Result<Category> {
        let updated = self.backend.toggle_category_block(id).await?;
        if let Some(slot) = self.categories.iter_mut().find(|c| c.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.backend.delete_category(id).await?;
        self.categories.retain(|c| c.id != id);
        Ok(())
    }
}

/// Public storefront listing: category dropdown plus a text search over
/// whatever list is currently loaded.
pub struct StorefrontScreen {
    backend: Arc<dyn CatalogBackend>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub selected_category: Option<String>,
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl StorefrontScreen {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            products: Vec::new(),
            categories: Vec::new(),
            selected_category: None,
            query: String::new(),
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        match self.backend.fetch_catalog().await {
            Ok((products, categories)) => {
                self.products = products;
                self.categories = categories;
                self.error = None;
            }
            Err(err) => {
                error!("failed to load storefront listing: {err}");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Changing the dropdown re-fetches: the full catalog for `None`/"all",
    /// otherwise the server-side category listing. An empty category is a
    /// valid empty list, not an error.
    pub async fn select_category(&mut self, category_id: Option<String>) {
        self.selected_category = category_id.clone();
        self.loading = true;
        let outcome = match category_id.as_deref() {
            None | Some(ALL_CATEGORIES) => match self.backend.fetch_catalog().await {
                Ok((products, categories)) => {
                    self.categories = categories;
                    Ok(products)
                }
                Err(err) => Err(err),
            },
            Some(id) => self.backend.products_by_category(id).await,
        };
        match outcome {
            Ok(products) => {
                self.products = products;
                self.error = None;
            }
            Err(err) => {
                error!("failed to load category products: {err}");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn visible(&self) -> Vec<&Product> {
        state::search_listing(&self.products, &self.query)
    }

    pub async fn clear_filters(&mut self) {
        self.query.clear();
        self.select_category(Some(ALL_CATEGORIES.to_string())).await;
    }
}
