use std::num::IntErrorKind;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Customer review embedded in a product document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Account id of the reviewer (`sub` claim)
    pub user: String,
    /// Reviewer display name at the time of posting
    pub name: String,
    /// 1 to 5 stars
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Catalog product stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Account id of the admin that created the product
    pub user: String,
    pub name: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    /// Reviews in the order they were posted
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Mean of `reviews[].rating`, 0 without reviews
    #[serde(default)]
    pub rating: f64,
    /// Always equal to `reviews.len()`
    #[serde(default)]
    pub num_reviews: u32,
    pub price: f64,
    pub count_in_stock: i32,
    /// Incremented on every persisted write
    #[serde(default)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of the editable product fields.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(max = 5000))]
    pub description: String,
    #[validate(length(max = 500))]
    pub image: String,
    #[validate(length(max = 200))]
    pub brand: String,
    #[validate(length(max = 200))]
    pub category: String,
    #[validate(range(min = 0))]
    pub count_in_stock: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
}

/// Query string of the catalog listing.
///
/// `pageNumber` stays a raw string so that garbage falls back to page 1
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Case-insensitive substring of the product name
    pub keyword: Option<String>,
    /// 1-based page, defaults to 1
    pub page_number: Option<String>,
}

impl ProductListQuery {
    /// Trimmed keyword, `None` when absent or blank.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// 1-based page number. Missing, non-numeric and zero values fall back
    /// to 1; numbers beyond `u64` saturate to `u64::MAX`.
    pub fn page(&self) -> u64 {
        self.page_number
            .as_deref()
            .and_then(|p| match p.trim().parse::<u64>() {
                Ok(page) => Some(page),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
                Err(_) => None,
            })
            .filter(|&p| p >= 1)
            .unwrap_or(1)
    }
}

/// One page of the catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub items: Vec<Product>,
    /// Requested page (1-based)
    pub page: u64,
    /// `ceil(total / page_size)`, 0 for an empty result
    pub pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Review {
    pub fn new(user: impl Into<String>, name: impl Into<String>, input: CreateReview) -> Self {
        Self {
            user: user.into(),
            name: name.into(),
            rating: input.rating,
            comment: input.comment,
            created_at: Utc::now(),
        }
    }
}

impl Product {
    /// Placeholder product an admin creates before filling in the details.
    pub fn sample(owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user: owner.into(),
            name: "Sample name".to_string(),
            image: "/images/sample.jpg".to_string(),
            brand: "Sample brand".to_string(),
            category: "Sample category".to_string(),
            description: "Sample description".to_string(),
            reviews: Vec::new(),
            rating: 0.0,
            num_reviews: 0,
            price: 0.0,
            count_in_stock: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every editable field.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.price = update.price;
        self.description = update.description;
        self.image = update.image;
        self.brand = update.brand;
        self.category = update.category;
        self.count_in_stock = update.count_in_stock;
        self.updated_at = Utc::now();
    }

    pub fn has_review_from(&self, user: &str) -> bool {
        self.reviews.iter().any(|r| r.user == user)
    }

    /// Append a review and recompute `num_reviews` and `rating`.
    ///
    /// Fails with [`ProductError::AlreadyReviewed`] and leaves the product
    /// untouched when `review.user` has already reviewed it.
    pub fn add_review(&mut self, review: Review) -> ProductResult<()> {
        if self.has_review_from(&review.user) {
            return Err(ProductError::AlreadyReviewed);
        }

        self.reviews.push(review);
        self.recompute_rating();
        self.updated_at = Utc::now();
        Ok(())
    }

    fn recompute_rating(&mut self) {
        self.num_reviews = self.reviews.len() as u32;
        self.rating = if self.reviews.is_empty() {
            0.0
        } else {
            let total: i64 = self.reviews.iter().map(|r| i64::from(r.rating)).sum();
            total as f64 / self.reviews.len() as f64
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(user: &str, rating: i32) -> Review {
        Review::new(
            user,
            format!("{user} name"),
            CreateReview {
                rating,
                comment: "nice".to_string(),
            },
        )
    }

    #[test]
    fn test_sample_product_placeholders() {
        let product = Product::sample("admin-1");
        assert_eq!(product.user, "admin-1");
        assert_eq!(product.name, "Sample name");
        assert_eq!(product.image, "/images/sample.jpg");
        assert_eq!(product.brand, "Sample brand");
        assert_eq!(product.category, "Sample category");
        assert_eq!(product.description, "Sample description");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.count_in_stock, 0);
        assert_eq!(product.num_reviews, 0);
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.id.get_version_num(), 7);
    }

    #[test]
    fn test_apply_update_overwrites_all_fields() {
        let mut product = Product::sample("admin-1");
        product.apply_update(UpdateProduct {
            name: "Airpods".to_string(),
            price: 89.99,
            description: "Wireless".to_string(),
            image: "/images/airpods.jpg".to_string(),
            brand: "Apple".to_string(),
            category: "Electronics".to_string(),
            count_in_stock: 10,
        });

        assert_eq!(product.name, "Airpods");
        assert_eq!(product.price, 89.99);
        assert_eq!(product.category, "Electronics");
        assert_eq!(product.count_in_stock, 10);
    }

    #[test]
    fn test_add_review_recomputes_mean() {
        let mut product = Product::sample("admin-1");
        product.add_review(review("u1", 4)).unwrap();
        product.add_review(review("u2", 5)).unwrap();
        product.add_review(review("u3", 3)).unwrap();

        assert_eq!(product.num_reviews, 3);
        assert_eq!(product.rating, 4.0);
    }

    #[test]
    fn test_duplicate_review_leaves_product_unchanged() {
        let mut product = Product::sample("admin-1");
        product.add_review(review("u1", 5)).unwrap();
        let before = product.clone();

        let err = product.add_review(review("u1", 1)).unwrap_err();
        assert!(matches!(err, ProductError::AlreadyReviewed));
        assert_eq!(product, before);
    }

    #[test]
    fn test_page_coercion() {
        let page = |raw: Option<&str>| {
            ProductListQuery {
                keyword: None,
                page_number: raw.map(String::from),
            }
            .page()
        };

        assert_eq!(page(None), 1);
        assert_eq!(page(Some("3")), 3);
        assert_eq!(page(Some("0")), 1);
        assert_eq!(page(Some("-2")), 1);
        assert_eq!(page(Some("abc")), 1);
        assert_eq!(page(Some("99999999999999999999")), u64::MAX);
        assert_eq!(page(Some("1e3")), 1);
    }

    #[test]
    fn test_blank_keyword_is_none() {
        let query = ProductListQuery {
            keyword: Some("   ".to_string()),
            page_number: None,
        };
        assert_eq!(query.keyword(), None);

        let query = ProductListQuery {
            keyword: Some(" Shoe ".to_string()),
            page_number: None,
        };
        assert_eq!(query.keyword(), Some("Shoe"));
    }

    #[test]
    fn test_update_product_validation() {
        let update = UpdateProduct {
            name: String::new(),
            price: -1.0,
            description: String::new(),
            image: String::new(),
            brand: String::new(),
            category: String::new(),
            count_in_stock: -5,
        };
        let errors = update.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("count_in_stock"));
    }

    #[test]
    fn test_product_wire_format_is_camel_case() {
        let json = serde_json::to_value(Product::sample("admin-1")).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("countInStock").is_some());
        assert!(json.get("numReviews").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
