//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ERP API",
        version = "0.1.0",
        description = "Product catalogue CRUD backed by PostgreSQL stored procedures",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    components(
        schemas(axum_helpers::ErrorResponse)
    )
)]
struct BaseDoc;

/// Combined OpenAPI documentation for ERP API
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        BaseDoc::openapi().merge_from(domain_products::handlers::ApiDoc::openapi())
    }
}
