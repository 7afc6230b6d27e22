//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::config::CatalogConfig;
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateReview, Product, ProductListQuery, ProductPage, Review, UpdateProduct};
use crate::repository::ProductRepository;

/// Catalog queries, admin mutations and review aggregation.
///
/// Every read-modify-write goes through a versioned replace and is retried
/// on conflict up to `CatalogConfig::max_write_attempts` times.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    config: CatalogConfig,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, config: CatalogConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
        }
    }

    /// One page of products, optionally filtered by name keyword
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductListQuery) -> ProductResult<ProductPage> {
        let page = query.page();
        let keyword = query.keyword().map(String::from);
        let page_size = self.config.page_size;

        let total = self.repository.count(keyword.clone()).await?;
        let pages = total.div_ceil(page_size);
        let skip = (page - 1).saturating_mul(page_size);

        // Past the last page; also keeps `skip` within what the driver can encode.
        if skip >= total {
            return Ok(ProductPage {
                items: Vec::new(),
                page,
                pages,
            });
        }

        let limit = i64::try_from(page_size).unwrap_or(i64::MAX);
        let items = self.repository.list(keyword, skip, limit).await?;

        Ok(ProductPage { items, page, pages })
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn top_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.top_rated(self.config.top_limit).await
    }

    /// Insert a placeholder product owned by `owner`
    #[instrument(skip(self))]
    pub async fn create_product(&self, owner: &str) -> ProductResult<Product> {
        let product = Product::sample(owner);
        self.repository.insert(&product).await?;
        Ok(product)
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.modify(id, |product| {
            product.apply_update(input.clone());
            Ok(())
        })
        .await
    }

    /// Post a review by `reviewer_id`. A second review from the same
    /// account is rejected and nothing is written.
    #[instrument(skip(self, input))]
    pub async fn add_review(
        &self,
        id: Uuid,
        reviewer_id: &str,
        reviewer_name: &str,
        input: CreateReview,
    ) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let review = Review::new(reviewer_id, reviewer_name, input);
        let product = self
            .modify(id, |product| product.add_review(review.clone()))
            .await?;

        tracing::info!(
            product_id = %id,
            num_reviews = product.num_reviews,
            rating = product.rating,
            "Review added"
        );
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    /// Read, mutate and write back with an optimistic version check.
    async fn modify<F>(&self, id: Uuid, mut mutate: F) -> ProductResult<Product>
    where
        F: FnMut(&mut Product) -> ProductResult<()> + Send,
    {
        for attempt in 1..=self.config.max_write_attempts {
            let mut product = self.get_product(id).await?;
            mutate(&mut product)?;

            let expected_version = product.version;
            product.version += 1;

            if self
                .repository
                .replace_versioned(&product, expected_version)
                .await?
            {
                return Ok(product);
            }

            tracing::warn!(product_id = %id, attempt, "Concurrent write detected, retrying");
        }

        Err(ProductError::WriteConflict(id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            config: self.config,
        }
    }
}
