use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn validate_not_blank(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("not_blank"));
    }
    Ok(())
}

/// One row of the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier, immutable after creation
    pub id: i64,
    pub name: String,
    pub price: f64,
    /// Set by the store on insert; omitted from JSON when the stored value is NULL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for creating or replacing a product's name and price
///
/// Both fields are optional at the type level so that a missing field is a
/// validation failure naming it, not a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(required, length(min = 1), custom(function = "validate_not_blank"))]
    #[schema(example = "Widget")]
    pub name: Option<String>,

    #[validate(
        required,
        range(min = 0.0, message = "price must be a non-negative number")
    )]
    #[schema(example = 9.99)]
    pub price: Option<f64>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
        }
    }
}

/// `201` body for a created product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductCreated {
    pub id: i64,
}

/// `200` body for a successful update; `updated` is always `true`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdated {
    pub updated: bool,
}

/// `200` body for a successful delete; `deleted` is always `true`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDeleted {
    pub deleted: bool,
}
