//! Wire shapes for the Harfa admin API.
//!
//! The backend owns these types; this crate only mirrors what it returns.
//! Ids are Mongo-style `_id` strings and flags are camelCase on the wire.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(rename = "isBlocked", default)]
    pub is_blocked: bool,
}

/// Denormalized category reference embedded in each product, exactly as the
/// server returns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    // older records omit the flag entirely
    #[serde(rename = "isBlocked", default)]
    pub is_blocked: bool,
}

impl Product {
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map_or("N/A", |c| c.name.as_str())
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_blocked {
            "Blocked"
        } else {
            "Active"
        }
    }
}

impl Category {
    pub fn status_label(&self) -> &'static str {
        if self.is_blocked {
            "Blocked"
        } else {
            "Active"
        }
    }
}

/// The `{ data: ... }` wrapper every admin endpoint responds with. Error
/// bodies carry `message`; the login endpoint carries `token` at the top
/// level instead of `data`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
    pub message: Option<String>,
    pub status: Option<bool>,
    pub token: Option<String>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            data: None,
            message: None,
            status: None,
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_shape() {
        let raw = r#"{
            "_id": "66aa01",
            "name": "Brake Pad Set",
            "description": "Front axle, ceramic",
            "image": "https://cdn.example.com/brake.jpg",
            "category": { "_id": "c1", "name": "Brakes" },
            "isBlocked": false
        }"#;
        let p: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(p.id, "66aa01");
        assert_eq!(p.category_name(), "Brakes");
        assert_eq!(p.status_label(), "Active");
    }

    #[test]
    fn test_category_blocked_flag_optional() {
        let c: Category = serde_json::from_str(r#"{"_id": "c2", "name": "Filters"}"#).unwrap();
        assert!(!c.is_blocked);
        assert_eq!(c.status_label(), "Active");
    }

    #[test]
    fn test_product_without_category() {
        let p: Product =
            serde_json::from_str(r#"{"_id": "p1", "name": "Oil Filter", "isBlocked": true}"#)
                .unwrap();
        assert_eq!(p.category_name(), "N/A");
        assert_eq!(p.status_label(), "Blocked");
    }

    #[test]
    fn test_envelope_with_message_only() {
        let env: Envelope<Vec<Product>> =
            serde_json::from_str(r#"{"message": "Unauthorized"}"#).unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("Unauthorized"));
    }
}
