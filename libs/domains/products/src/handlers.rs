//! HTTP handlers for the product catalog

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AdminUser, AuthUser, JwtAuth, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ConflictResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    optional_jwt_auth_middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateReview, MessageResponse, Product, ProductListQuery, ProductPage, Review, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        top_products,
        get_product,
        create_product,
        update_product,
        delete_product,
        create_review,
    ),
    components(
        schemas(
            Product, Review, UpdateProduct, CreateReview, ProductPage, MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Catalog browsing, reviews and administration")
    )
)]
pub struct ApiDoc;

/// Catalog router. Valid tokens are attached to every request; the
/// handlers decide which tier they require.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/top", get(top_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/reviews", post(create_review))
        .with_state(shared_service)
        .layer(middleware::from_fn_with_state(
            auth,
            optional_jwt_auth_middleware,
        ))
}

/// List products, 10 per page, optionally filtered by name
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ProductListQuery>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_products(&query).await?;
    Ok(Json(page))
}

/// Highest rated products
#[utoipa::path(
    get,
    path = "/top",
    tag = "Products",
    responses(
        (status = 200, description = "Top rated products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn top_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.top_products().await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Create a placeholder product (admin)
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AdminUser(claims): AdminUser,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(&claims.sub).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace the editable fields of a product (admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AdminUser(_claims): AdminUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product removed", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AdminUser(_claims): AdminUser,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product removed")))
}

/// Review a product (any signed-in user, once per product)
#[utoipa::path(
    post,
    path = "/{id}/reviews",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review added", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_review<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AuthUser(claims): AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> ProductResult<impl IntoResponse> {
    service
        .add_review(id, &claims.sub, &claims.name, input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Review added")),
    ))
}
