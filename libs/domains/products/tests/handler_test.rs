//! Handler tests for the Products domain
//!
//! These drive `handlers::router` directly with `oneshot`, over the in-memory
//! repository (or a failing mock for store errors). They check routing,
//! status codes and exact JSON bodies, not persistence.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

mockall::mock! {
    pub FailingRepo {}

    #[async_trait]
    impl ProductRepository for FailingRepo {
        async fn create(&self, name: &str, price: f64) -> ProductResult<i64>;
        async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;
        async fn update(&self, id: i64, name: &str, price: f64) -> ProductResult<bool>;
        async fn delete(&self, id: i64) -> ProductResult<bool>;
        async fn list(&self) -> ProductResult<Vec<Product>>;
    }
}

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_create_product_handler_returns_201_with_id() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"name": "Widget", "price": 9.99})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: ProductCreated = json_body(response.into_body()).await;
    assert_eq!(created.id, 1);
}

#[tokio::test]
async fn test_create_with_empty_name_is_400_naming_field() {
    let app = app();

    let (status, body) =
        send(&app, "POST", "/products/", Some(json!({"name": "", "price": 5}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "name is required"}));
}

#[tokio::test]
async fn test_create_with_empty_object_names_both_fields() {
    let app = app();

    let (status, body) = send(&app, "POST", "/products", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "name and price are required"}));
}

#[tokio::test]
async fn test_create_with_negative_price_is_400() {
    let app = app();

    let (status, body) =
        send(&app, "POST", "/products", Some(json!({"name": "Widget", "price": -1}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "price must be a non-negative number"}));
}

#[tokio::test]
async fn test_create_with_unparsable_body_is_400() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert!(body["error"].is_string());

    // Nothing was created
    let (_, list) = send(&app, "GET", "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_without_json_content_type_is_400() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .body(Body::from(json!({"name": "Widget", "price": 1}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("Content-Type"));

    let (_, list) = send(&app, "GET", "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_get_with_non_numeric_id_is_invalid_id() {
    let app = app();

    let (status, body) = send(&app, "GET", "/products/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid id"}));
}

#[tokio::test]
async fn test_get_absent_is_404() {
    let app = app();

    let (status, body) = send(&app, "GET", "/products/999999999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_get_with_extra_segments_is_404() {
    let app = app();

    let (status, body) = send(&app, "GET", "/products/1/extra", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_put_and_delete_without_id_are_400() {
    let app = app();

    for uri in ["/products", "/products/"] {
        let (status, body) = send(&app, "PUT", uri, Some(json!({"name": "x", "price": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing id in path"}));

        let (status, body) = send(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing id in path"}));
    }
}

#[tokio::test]
async fn test_put_and_delete_with_extra_segments_are_invalid_path() {
    let app = app();

    let (status, body) =
        send(&app, "PUT", "/products/1/2", Some(json!({"name": "x", "price": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid path"}));

    let (status, body) = send(&app, "DELETE", "/products/1/2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid path"}));
}

#[tokio::test]
async fn test_put_checks_id_before_body() {
    let app = app();

    let (status, body) = send(&app, "PUT", "/products/abc", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid id"}));
}

#[tokio::test]
async fn test_update_and_delete_absent_are_404() {
    let app = app();

    let (status, body) =
        send(&app, "PUT", "/products/42", Some(json!({"name": "Ghost", "price": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));

    let (status, body) = send(&app, "DELETE", "/products/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_post_on_item_path_creates() {
    let app = app();

    let (status, body) =
        send(&app, "POST", "/products/1", Some(json!({"name": "Widget", "price": 1}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1}));

    let (status, body) =
        send(&app, "POST", "/products/7/extra", Some(json!({"name": "Gadget", "price": 2}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 2}));

    let (status, body) = send(&app, "POST", "/products/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "name and price are required"}));
}

#[tokio::test]
async fn test_unrouted_method_is_405() {
    let app = app();

    for uri in ["/products", "/products/1", "/products/1/"] {
        let (status, body) = send(&app, "PATCH", uri, Some(json!({"name": "x", "price": 1}))).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }
}

#[tokio::test]
async fn test_trailing_slash_on_item_path_addresses_the_product() {
    let app = app();
    let (_, created) =
        send(&app, "POST", "/products", Some(json!({"name": "Widget", "price": 9.99}))).await;
    assert_eq!(created, json!({"id": 1}));

    let (status, product) = send(&app, "GET", "/products/1/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["name"], "Widget");

    let (status, body) =
        send(&app, "PUT", "/products/1/", Some(json!({"name": "Widget Pro", "price": 12.5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"updated": true}));

    let (status, body) = send(&app, "DELETE", "/products/1/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": true}));

    let (status, body) = send(&app, "GET", "/products/1/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));

    let (status, body) = send(&app, "DELETE", "/products/abc/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid id"}));
}

#[tokio::test]
async fn test_delete_with_non_numeric_id_is_invalid_id() {
    let app = app();

    let (status, body) = send(&app, "DELETE", "/products/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid id"}));
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = app();

    let (status, body) =
        send(&app, "POST", "/products", Some(json!({"name": "Widget", "price": 9.99}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (status, product) = send(&app, "GET", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["id"], id);
    assert_eq!(product["name"], "Widget");
    assert_eq!(product["price"], 9.99);
    assert!(product["createdAt"].is_string());

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/products/{}", id),
        Some(json!({"name": "Widget Pro", "price": 12.50})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"updated": true}));

    let (_, product) = send(&app, "GET", &format!("/products/{}", id), None).await;
    assert_eq!(product["name"], "Widget Pro");
    assert_eq!(product["price"], 12.5);

    let (status, list) = send(&app, "GET", "/products/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "DELETE", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": true}));

    let (status, _) = send(&app, "GET", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_errors_are_500_with_message() {
    let mut repo = MockFailingRepo::new();
    repo.expect_list()
        .returning(|| Err(ProductError::Store("Connection pool exhausted".to_string())));
    repo.expect_create()
        .returning(|_, _| Err(ProductError::Store("Database call timed out".to_string())));
    repo.expect_get_by_id()
        .returning(|_| Err(ProductError::Store("cursor fetch failed".to_string())));
    repo.expect_update()
        .returning(|_, _, _| Err(ProductError::Store("update_product failed".to_string())));
    repo.expect_delete()
        .returning(|_| Err(ProductError::Store("delete_product failed".to_string())));
    let app = handlers::router(ProductService::new(repo));

    let (status, body) = send(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Connection pool exhausted"}));

    let (status, body) =
        send(&app, "POST", "/products", Some(json!({"name": "Widget", "price": 1}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Database call timed out"}));

    let (status, body) = send(&app, "GET", "/products/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "cursor fetch failed"}));

    let (status, body) =
        send(&app, "PUT", "/products/1", Some(json!({"name": "Widget", "price": 1}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "update_product failed"}));

    let (status, body) = send(&app, "DELETE", "/products/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "delete_product failed"}));
}

#[tokio::test]
async fn test_openapi_document_lists_product_paths() {
    use utoipa::OpenApi;

    let doc = handlers::ApiDoc::openapi();
    assert!(doc.paths.paths.contains_key("/products"));
    assert!(doc.paths.paths.contains_key("/products/{id}"));
}
