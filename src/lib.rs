//! Harfa Trading catalog client
//!
//! Client-side library for the wholesale auto-parts storefront and its
//! admin back office. All persistence, auth, and image handling live in an
//! external REST API under `<API_BASE>/admin/...`; this crate is the thin
//! layer in front of it:
//!
//! - typed wire models and the `{ data: ... }` response envelope
//! - the HTTP operations (catalog browsing, product/category CRUD,
//!   block/unblock, multipart image upload, login)
//! - per-screen state: fetch on mount, patch the in-memory list after each
//!   successful mutation, filter synchronously over what is loaded
//! - WhatsApp enquiry deep links

pub mod auth;
pub mod client;
pub mod config;
pub mod enquiry;
pub mod error;
pub mod forms;
pub mod models;
pub mod screens;
pub mod state;

pub use auth::TokenStore;
pub use client::{AdminApi, CatalogBackend};
pub use config::AppConfig;
pub use error::{ApiError, Result};
pub use models::{Category, CategoryRef, Product};
