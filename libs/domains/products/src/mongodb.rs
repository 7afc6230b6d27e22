//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Use a custom collection name (integration tests isolate on this)
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Indexes backing the name search and the top-rated sort
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "rating": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_rating".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> ProductResult<Document> {
        Ok(doc! { "_id": to_bson(&id)? })
    }

    /// Keyword filter on `name`. The keyword is regex-escaped so it matches
    /// literally.
    fn build_filter(keyword: Option<&str>) -> Document {
        match keyword.map(str::trim).filter(|k| !k.is_empty()) {
            Some(keyword) => doc! {
                "name": { "$regex": regex::escape(keyword), "$options": "i" }
            },
            None => doc! {},
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: &Product) -> ProductResult<()> {
        self.collection.insert_one(product).await?;
        tracing::info!("Product created successfully");
        Ok(())
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    async fn insert_many(&self, products: &[Product]) -> ProductResult<u64> {
        if products.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(products).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)?).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        keyword: Option<String>,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder().skip(skip).limit(limit).build();

        let cursor = self
            .collection
            .find(Self::build_filter(keyword.as_deref()))
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count(&self, keyword: Option<String>) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(keyword.as_deref()))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn top_rated(&self, limit: i64) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder()
            .sort(doc! { "rating": -1 })
            .limit(limit)
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace_versioned(
        &self,
        product: &Product,
        expected_version: i64,
    ) -> ProductResult<bool> {
        let mut filter = Self::id_filter(product.id)?;
        filter.insert("version", Bson::Int64(expected_version));

        let result = self.collection.replace_one(filter, product).await?;
        if result.matched_count == 0 {
            tracing::debug!(expected_version, "Versioned replace matched nothing");
            return Ok(false);
        }

        tracing::info!(version = product.version, "Product updated successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)?).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> ProductResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        tracing::info!(deleted = result.deleted_count, "All products deleted");
        Ok(result.deleted_count)
    }
}
