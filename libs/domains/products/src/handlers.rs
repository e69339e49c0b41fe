use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use axum_helpers::{
    ErrorResponse, IdPath, ValidatedJson,
    errors::{
        error_response,
        handlers::{method_not_allowed, not_found},
        responses::{
            BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
            NotFoundResponse,
        },
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Product, ProductCreated, ProductDeleted, ProductInput, ProductUpdated};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product, update_product, delete_product),
    components(
        schemas(
            Product,
            ProductInput,
            ProductCreated,
            ProductUpdated,
            ProductDeleted,
            ErrorResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalogue")
    )
)]
pub struct ApiDoc;

type SharedService<R> = Arc<ProductService<R>>;

/// Create the product router with all HTTP endpoints
///
/// Routes are absolute (`/products...`); merge the result into the app router.
/// A trailing slash on an item path addresses the same product.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", collection::<R>())
        .route("/products/", collection::<R>())
        .route("/products/{id}", item::<R>())
        .route("/products/{id}/", item::<R>())
        .route(
            "/products/{id}/{*rest}",
            get(not_found)
                .post(create_product::<R>)
                .put(invalid_path)
                .delete(invalid_path)
                .fallback(method_not_allowed),
        )
        .with_state(shared_service)
}

fn collection<R: ProductRepository + 'static>() -> MethodRouter<SharedService<R>> {
    get(list_products::<R>)
        .post(create_product::<R>)
        .put(missing_id)
        .delete(missing_id)
        .fallback(method_not_allowed)
}

// POST creates whatever the path says; only GET/PUT/DELETE read the id.
fn item<R: ProductRepository + 'static>() -> MethodRouter<SharedService<R>> {
    get(get_product::<R>)
        .post(create_product::<R>)
        .put(update_product::<R>)
        .delete(delete_product::<R>)
        .fallback(method_not_allowed)
}

async fn missing_id() -> Response {
    error_response(StatusCode::BAD_REQUEST, "Missing id in path")
}

async fn invalid_path() -> Response {
    error_response(StatusCode::BAD_REQUEST, "Invalid path")
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    tag = TAG,
    responses(
        (status = 200, description = "All products in ascending id order", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<SharedService<R>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = TAG,
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductCreated),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let id = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductCreated { id })))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product's name and price
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductUpdated),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<Json<ProductUpdated>> {
    service.update_product(id, input).await?;
    Ok(Json(ProductUpdated { updated: true }))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ProductDeleted),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductDeleted>> {
    service.delete_product(id).await?;
    Ok(Json(ProductDeleted { deleted: true }))
}
