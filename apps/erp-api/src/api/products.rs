use axum::Router;
use domain_products::{PgProductRepository, ProductService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgProductRepository::new(state.source.clone());
    let service = ProductService::new(repository);
    handlers::router(service)
}
