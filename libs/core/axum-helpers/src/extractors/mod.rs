//! Custom extractors for Axum handlers.
//!
//! Both reject with the shared `{"error": "..."}` body and status 400.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
