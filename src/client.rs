//! HTTP client for the external admin REST API.
//!
//! Every call is an independent request/response: no retries, no caching,
//! no deduplication. Authenticated endpoints attach whatever token the
//! store currently holds (an empty bearer when logged out) and let the
//! server decide.

use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};
use validator::Validate;

use crate::auth::TokenStore;
use crate::error::{ApiError, Result};
use crate::forms::{CategoryDraft, ImageSource, LoginForm, ProductDraft};
use crate::models::{Category, Envelope, Product};

/// Operations both the storefront and admin screens run against the
/// catalog. `AdminApi` is the real implementation; tests substitute stubs.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn products(&self) -> Result<Vec<Product>>;
    async fn categories(&self) -> Result<Vec<Category>>;

    async fn add_category(&self, draft: &CategoryDraft) -> Result<Category>;
    async fn update_category(&self, id: &str, draft: &CategoryDraft) -> Result<Category>;
    async fn delete_category(&self, id: &str) -> Result<()>;
    async fn toggle_category_block(&self, id: &str) -> Result<Category>;

    async fn add_product(&self, draft: &ProductDraft) -> Result<Product>;
    async fn update_product(&self, id: &str, draft: &ProductDraft) -> Result<Product>;
    async fn set_product_blocked(&self, id: &str, blocked: bool) -> Result<()>;
    async fn delete_product(&self, id: &str) -> Result<()>;

    async fn new_arrivals(&self) -> Result<Vec<Product>>;
    async fn product_details(&self, id: &str) -> Result<Product>;
    async fn products_by_category(&self, id: &str) -> Result<Vec<Product>>;

    /// Products and categories together, fetched concurrently. Both screens
    /// mount with this pair.
    async fn fetch_catalog(&self) -> Result<(Vec<Product>, Vec<Category>)> {
        tokio::try_join!(self.products(), self.categories())
    }
}

pub struct AdminApi {
    http: reqwest::Client,
    base: String,
    tokens: TokenStore,
}

impl AdminApi {
    pub fn new(api_base: impl Into<String>, tokens: TokenStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: api_base.into(),
            tokens,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/admin/{}", self.base, path)
    }

    fn bearer(&self) -> String {
        self.tokens.load()
    }

    /// POST `/admin/login`. The endpoint signals success by the presence of
    /// `token` in the body, not by status code; a body without one carries
    /// the failure in `message`. The token is persisted on success.
    pub async fn login(&self, form: &LoginForm) -> Result<String> {
        form.validate()?;
        let resp = self
            .http
            .post(self.endpoint("login"))
            .json(form)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let env: Envelope<Value> = resp.json().await.unwrap_or_default();
        match env.token {
            Some(token) => {
                self.tokens.save(&token)?;
                debug!("admin login succeeded");
                Ok(token)
            }
            None => Err(ApiError::from_response(status, env.message, "Login failed")),
        }
    }

    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        authed: bool,
        fallback: &'static str,
    ) -> Result<T> {
        let mut req = self.http.get(self.endpoint(path));
        if authed {
            req = req.bearer_auth(self.bearer());
        }
        let resp = req.send().await?;
        let env = read_envelope::<T>(resp, fallback).await?;
        require_data(env, fallback)
    }

    async fn product_form(&self, draft: &ProductDraft) -> Result<multipart::Form> {
        let mut form = multipart::Form::new()
            .text("name", draft.name.clone())
            .text("description", draft.description.clone())
            .text("category", draft.category_id.clone());
        match &draft.image {
            ImageSource::Upload(path) => {
                let bytes = tokio::fs::read(path).await.map_err(ApiError::Image)?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string());
                form = form.part("image", multipart::Part::bytes(bytes).file_name(file_name));
            }
            ImageSource::Existing(url) if !url.is_empty() => {
                form = form.text("image", url.clone());
            }
            _ => {}
        }
        Ok(form)
    }
}

#[async_trait]
impl CatalogBackend for AdminApi {
    async fn products(&self) -> Result<Vec<Product>> {
        self.get_data("products", true, "Failed to fetch products")
            .await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        self.get_data("categories", true, "Failed to fetch categories")
            .await
    }

    async fn add_category(&self, draft: &CategoryDraft) -> Result<Category> {
        draft.validate()?;
        let resp = self
            .http
            .post(self.endpoint("category/add"))
            .bearer_auth(self.bearer())
            .json(draft)
            .send()
            .await?;
        let env = read_envelope::<Category>(resp, "Failed to add category").await?;
        require_data(env, "add category")
    }

    async fn update_category(&self, id: &str, draft: &CategoryDraft) -> Result<Category> {
        draft.validate()?;
        let resp = self
            .http
            .put(self.endpoint(&format!("category/{id}")))
            .bearer_auth(self.bearer())
            .json(draft)
            .send()
            .await?;
        let env = read_envelope::<Category>(resp, "Failed to update category").await?;
        require_data(env, "update category")
    }

    async fn delete_category(&self, id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(self.endpoint(&format!("category/{id}")))
            .bearer_auth(self.bearer())
            .send()
            .await?;
        read_ack(resp, "Failed to delete category").await
    }

    async fn toggle_category_block(&self, id: &str) -> Result<Category> {
        let resp = self
            .http
            .patch(self.endpoint(&format!("category/block/{id}")))
            .bearer_auth(self.bearer())
            .send()
            .await?;
        let env = read_envelope::<Category>(resp, "Failed to toggle category status").await?;
        require_data(env, "toggle category block")
    }

    async fn add_product(&self, draft: &ProductDraft) -> Result<Product> {
        draft.validate()?;
        let form = self.product_form(draft).await?;
        let resp = self
            .http
            .post(self.endpoint("product/add"))
            .bearer_auth(self.bearer())
            .multipart(form)
            .send()
            .await?;
        let env = read_envelope::<Product>(resp, "Failed to add product").await?;
        require_data(env, "add product")
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> Result<Product> {
        draft.validate()?;
        let form = self.product_form(draft).await?;
        let resp = self
            .http
            .put(self.endpoint(&format!("product/{id}")))
            .bearer_auth(self.bearer())
            .multipart(form)
            .send()
            .await?;
        let env = read_envelope::<Product>(resp, "Failed to update product").await?;
        require_data(env, "update product")
    }

    /// The block toggle goes through the update endpoint with a one-field
    /// JSON body; the caller patches its own list rather than re-reading.
    async fn set_product_blocked(&self, id: &str, blocked: bool) -> Result<()> {
        let resp = self
            .http
            .put(self.endpoint(&format!("product/{id}")))
            .bearer_auth(self.bearer())
            .json(&json!({ "isBlocked": blocked }))
            .send()
            .await?;
        read_ack(resp, "Failed to toggle product status").await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(self.endpoint(&format!("product/{id}")))
            .bearer_auth(self.bearer())
            .send()
            .await?;
        read_ack(resp, "Failed to delete product").await
    }

    async fn new_arrivals(&self) -> Result<Vec<Product>> {
        let resp = self
            .http
            .get(self.endpoint("product/new-arrivals"))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "new-arrivals fetch failed");
            return Err(ApiError::from_response(
                status.as_u16(),
                None,
                &format!("Failed to fetch products: {status}"),
            ));
        }
        decode_product_list(resp.json().await?, "new arrivals")
    }

    async fn product_details(&self, id: &str) -> Result<Product> {
        let resp = self
            .http
            .get(self.endpoint(&format!("product/{id}")))
            .send()
            .await?;
        let env = read_envelope::<Product>(resp, "Failed to fetch product details").await?;
        require_data(env, "product details")
    }

    async fn products_by_category(&self, id: &str) -> Result<Vec<Product>> {
        let resp = self
            .http
            .get(self.endpoint(&format!("product/category/{id}")))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::from_response(
                status.as_u16(),
                None,
                "Failed to fetch products by category",
            ));
        }
        decode_category_products(resp.json().await?)
    }
}

/// Decodes the common `{ data: ... }` wrapper. Error statuses still try to
/// read the body, because that is where the server puts `message`.
async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
    fallback: &'static str,
) -> Result<Envelope<T>> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let env: Envelope<T> = resp.json().await.unwrap_or_default();
    Err(ApiError::from_response(status.as_u16(), env.message, fallback))
}

/// For calls whose success body is ignored (delete, block toggle): only
/// failures need the body, and only for `message`.
async fn read_ack(resp: reqwest::Response, fallback: &'static str) -> Result<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let env: Envelope<Value> = resp.json().await.unwrap_or_default();
    Err(ApiError::from_response(status.as_u16(), env.message, fallback))
}

fn require_data<T>(env: Envelope<T>, context: &'static str) -> Result<T> {
    env.data.ok_or(ApiError::UnexpectedFormat(context))
}

/// The new-arrivals endpoint has returned both `{ data: [...] }` and a bare
/// array over time; tolerate either.
fn decode_product_list(body: Value, context: &'static str) -> Result<Vec<Product>> {
    if let Some(data) = body.get("data") {
        if data.is_array() {
            return serde_json::from_value(data.clone())
                .map_err(|_| ApiError::UnexpectedFormat(context));
        }
    }
    if body.is_array() {
        return serde_json::from_value(body).map_err(|_| ApiError::UnexpectedFormat(context));
    }
    Err(ApiError::UnexpectedFormat(context))
}

const NO_PRODUCTS_MESSAGE: &str = "No products found for this category.";

/// An empty category is reported as a success body with a fixed message,
/// not an empty `data` array. Map it to an empty list.
fn decode_category_products(body: Value) -> Result<Vec<Product>> {
    if body.get("status").and_then(Value::as_bool) == Some(true)
        && body.get("message").and_then(Value::as_str) == Some(NO_PRODUCTS_MESSAGE)
    {
        return Ok(Vec::new());
    }
    if let Some(data) = body.get("data") {
        return serde_json::from_value(data.clone())
            .map_err(|_| ApiError::UnexpectedFormat("products by category"));
    }
    Err(ApiError::UnexpectedFormat("products by category"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        let api = AdminApi::new(
            "https://api.harfa.example",
            TokenStore::new("/tmp/unused-token.json"),
        );
        assert_eq!(
            api.endpoint("categories"),
            "https://api.harfa.example/admin/categories"
        );
        assert_eq!(
            api.endpoint("product/category/c1"),
            "https://api.harfa.example/admin/product/category/c1"
        );
    }

    #[test]
    fn test_decode_product_list_enveloped() {
        let body = json!({ "data": [{ "_id": "p1", "name": "Brake Pad Set" }] });
        let products = decode_product_list(body, "new arrivals").unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "p1");
    }

    #[test]
    fn test_decode_product_list_bare_array() {
        let body = json!([{ "_id": "p2", "name": "Oil Filter" }]);
        let products = decode_product_list(body, "new arrivals").unwrap();
        assert_eq!(products[0].name, "Oil Filter");
    }

    #[test]
    fn test_decode_product_list_rejects_other_shapes() {
        let err = decode_product_list(json!({ "ok": true }), "new arrivals").unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedFormat("new arrivals")));
    }

    #[test]
    fn test_empty_category_maps_to_empty_list() {
        let body = json!({ "status": true, "message": NO_PRODUCTS_MESSAGE });
        assert!(decode_category_products(body).unwrap().is_empty());
    }

    #[test]
    fn test_category_products_with_data() {
        let body = json!({ "data": [{ "_id": "p3", "name": "Air Filter" }] });
        assert_eq!(decode_category_products(body).unwrap().len(), 1);
    }

    #[test]
    fn test_category_products_other_message_is_error() {
        let body = json!({ "status": false, "message": "boom" });
        assert!(decode_category_products(body).is_err());
    }

    #[test]
    fn test_require_data() {
        let env = Envelope::<Value> {
            data: None,
            message: None,
            status: None,
            token: None,
        };
        assert!(matches!(
            require_data(env, "product details"),
            Err(ApiError::UnexpectedFormat("product details"))
        ));
    }
}
