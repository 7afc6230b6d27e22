use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Product;

/// Data access for the product catalog.
///
/// `keyword` arguments are raw user input; implementations match them as a
/// literal, case-insensitive substring of the product name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &Product) -> ProductResult<()>;

    async fn insert_many(&self, products: &[Product]) -> ProductResult<u64>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Products matching `keyword` in storage order, windowed by `skip`/`limit`.
    async fn list(&self, keyword: Option<String>, skip: u64, limit: i64)
    -> ProductResult<Vec<Product>>;

    async fn count(&self, keyword: Option<String>) -> ProductResult<u64>;

    /// Highest rated first, ties in storage order.
    async fn top_rated(&self, limit: i64) -> ProductResult<Vec<Product>>;

    /// Replace the stored document only if its version is still
    /// `expected_version`. The stored copy gets `product.version`.
    ///
    /// Returns `false` when nothing matched: the product was deleted or
    /// another writer got there first.
    async fn replace_versioned(&self, product: &Product, expected_version: i64)
    -> ProductResult<bool>;

    /// Returns `false` if no product had this id.
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    async fn delete_all(&self) -> ProductResult<u64>;
}
