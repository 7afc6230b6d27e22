//! Sample catalog import and wipe.

use domain_products::{Product, ProductRepository, UpdateProduct};
use tracing::info;

const SAMPLE_CATALOG: &str = include_str!("../data/products.json");

/// Parse the bundled catalog into products owned by `owner`.
///
/// Seeded products start without reviews, so `rating` and `numReviews`
/// are 0.
pub fn sample_products(owner: &str) -> eyre::Result<Vec<Product>> {
    let entries: Vec<UpdateProduct> = serde_json::from_str(SAMPLE_CATALOG)?;

    Ok(entries
        .into_iter()
        .map(|entry| {
            let mut product = Product::sample(owner);
            product.apply_update(entry);
            product
        })
        .collect())
}

/// Replace the whole catalog with the bundled sample data.
pub async fn import<R: ProductRepository>(repository: &R, owner: &str) -> eyre::Result<u64> {
    let products = sample_products(owner)?;

    let removed = repository.delete_all().await?;
    info!(removed, "Existing products deleted");

    let inserted = repository.insert_many(&products).await?;
    info!(inserted, owner, "Sample catalog imported");
    Ok(inserted)
}

pub async fn destroy<R: ProductRepository>(repository: &R) -> eyre::Result<u64> {
    let removed = repository.delete_all().await?;
    info!(removed, "Catalog destroyed");
    Ok(removed)
}
