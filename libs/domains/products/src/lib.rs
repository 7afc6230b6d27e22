//! Products Domain
//!
//! Product catalog backed by MongoDB: paginated keyword search, top rated
//! products, admin CRUD and customer reviews.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, auth tier per route
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Pagination, review aggregation, versioned writes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_products::{CatalogConfig, MongoProductRepository, ProductService, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let repository = MongoProductRepository::new(&db);
//! let service = ProductService::new(repository, CatalogConfig::default());
//! let auth = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-32-characters!!")?);
//!
//! let router = handlers::router(service, auth);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use crate::mongodb::MongoProductRepository;
pub use config::CatalogConfig;
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateReview, MessageResponse, Product, ProductListQuery, ProductPage, Review, UpdateProduct,
};
pub use repository::ProductRepository;
pub use service::ProductService;
