//! Shared fixtures for the products handler tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum_helpers::{ADMIN_ROLE, JwtAuth, JwtConfig};
use chrono::Utc;
use domain_products::*;
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const SECRET: &str = "products-handler-tests-secret-0123456789";

/// Vec-backed repository with the same matching rules as the MongoDB one.
///
/// Clones share storage so tests can inspect what the router wrote.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<Mutex<Vec<Product>>>,
    interfere_once: Arc<AtomicBool>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
            interfere_once: Arc::default(),
        }
    }

    /// The next versioned replace loses the race against a review posted
    /// by `intruder`.
    pub fn interfere_on_next_write(&self) {
        self.interfere_once.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self, id: Uuid) -> Option<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn matching(&self, keyword: Option<&str>) -> Vec<Product> {
        let needle = keyword.map(str::to_lowercase);
        self.products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| match &needle {
                Some(needle) => p.name.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> ProductResult<()> {
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn insert_many(&self, products: &[Product]) -> ProductResult<u64> {
        self.products.lock().unwrap().extend_from_slice(products);
        Ok(products.len() as u64)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.snapshot(id))
    }

    async fn list(
        &self,
        keyword: Option<String>,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        Ok(self
            .matching(keyword.as_deref())
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, keyword: Option<String>) -> ProductResult<u64> {
        Ok(self.matching(keyword.as_deref()).len() as u64)
    }

    async fn top_rated(&self, limit: i64) -> ProductResult<Vec<Product>> {
        let mut products = self.matching(None);
        products.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        products.truncate(limit as usize);
        Ok(products)
    }

    async fn replace_versioned(
        &self,
        product: &Product,
        expected_version: i64,
    ) -> ProductResult<bool> {
        let mut products = self.products.lock().unwrap();
        let Some(stored) = products.iter_mut().find(|p| p.id == product.id) else {
            return Ok(false);
        };

        if self.interfere_once.swap(false, Ordering::SeqCst) {
            stored
                .add_review(review("intruder", "Intruder", 1))
                .unwrap();
            stored.version += 1;
            return Ok(false);
        }

        if stored.version != expected_version {
            return Ok(false);
        }
        *stored = product.clone();
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut products = self.products.lock().unwrap();
        let removed = products.len() as u64;
        products.clear();
        Ok(removed)
    }
}

pub fn product(name: &str, rating: f64) -> Product {
    let mut product = Product::sample("seed-admin");
    product.name = name.to_string();
    product.rating = rating;
    product
}

pub fn review(user: &str, name: &str, rating: i32) -> Review {
    Review {
        user: user.to_string(),
        name: name.to_string(),
        rating,
        comment: "Review comment".to_string(),
        created_at: Utc::now(),
    }
}

pub fn auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
}

pub fn app(repo: &InMemoryProductRepository) -> Router {
    let service = ProductService::new(repo.clone(), CatalogConfig::default());
    handlers::router(service, auth())
}

pub fn customer_token(user_id: &str, name: &str) -> String {
    auth()
        .create_access_token(user_id, "customer@example.com", name, &[])
        .unwrap()
}

pub fn admin_token(user_id: &str) -> String {
    auth()
        .create_access_token(
            user_id,
            "admin@example.com",
            "Admin User",
            &[ADMIN_ROLE.to_string()],
        )
        .unwrap()
}

pub async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
