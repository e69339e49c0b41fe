use axum::Router;

pub mod health;
pub mod products;

/// Creates the API routes. Every sub-router has its state applied already.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().merge(products::router(state))
}

/// Creates a router with the /ready endpoint that checks the database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
