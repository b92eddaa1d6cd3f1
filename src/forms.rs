//! Form drafts and the required-field validation the screens run before
//! dispatching a request. Everything beyond "is it filled in" is the
//! server's job.

use std::path::PathBuf;

use serde::Serialize;
use validator::Validate;

use crate::models::Product;

#[derive(Clone, Debug, Serialize, Validate)]
pub struct CategoryDraft {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// What goes in the product form's image slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ImageSource {
    /// No image selected and no existing one to keep.
    #[default]
    None,
    /// Keep the URL the server already has for this product.
    Existing(String),
    /// Upload a new file as a multipart part.
    Upload(PathBuf),
}

#[derive(Clone, Debug, Default, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Select a category"))]
    pub category_id: String,
    pub image: ImageSource,
}

impl ProductDraft {
    /// Prefills the form for the edit dialog from the product being edited.
    pub fn for_edit(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category_id: product
                .category
                .as_ref()
                .map(|c| c.id.clone())
                .unwrap_or_default(),
            image: if product.image.is_empty() {
                ImageSource::None
            } else {
                ImageSource::Existing(product.image.clone())
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryRef;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Brake Pad Set".into(),
            description: "Front axle, ceramic".into(),
            category_id: "c1".into(),
            image: ImageSource::None,
        }
    }

    #[test]
    fn test_complete_product_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_each_required_field() {
        let mut d = draft();
        d.name.clear();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.description.clear();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.category_id.clear();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_category_draft() {
        assert!(CategoryDraft::new("Brakes").validate().is_ok());
        assert!(CategoryDraft::new("").validate().is_err());
    }

    #[test]
    fn test_login_form() {
        let form = LoginForm {
            email: "admin@harfa.example".into(),
            password: "hunter2".into(),
        };
        assert!(form.validate().is_ok());

        let bad = LoginForm {
            email: "not-an-email".into(),
            password: "hunter2".into(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_for_edit_prefills() {
        let p = Product {
            id: "p1".into(),
            name: "Oil Filter".into(),
            description: "Spin-on".into(),
            image: "https://cdn.example.com/oil.jpg".into(),
            category: Some(CategoryRef {
                id: "c2".into(),
                name: "Filters".into(),
            }),
            is_blocked: false,
        };
        let d = ProductDraft::for_edit(&p);
        assert_eq!(d.category_id, "c2");
        assert_eq!(d.image, ImageSource::Existing("https://cdn.example.com/oil.jpg".into()));
    }
}
