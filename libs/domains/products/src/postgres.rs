use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::DatabaseResult;
use database::postgres::ConnectionSource;
use sqlx::postgres::{PgArguments, PgConnection, PgRow};
use sqlx::query::Query;
use sqlx::{Connection, Postgres, Row};

use crate::{error::ProductResult, models::Product, repository::ProductRepository};

/// Cursor name handed to `pkg_product.get_product`; scoped to one transaction.
const PRODUCT_CURSOR: &str = "product_cursor";

/// A `pkg_product` procedure invoked with positional parameters and one
/// `INOUT` result.
///
/// The `INOUT` slot is passed as `NULL`; PostgreSQL returns its final value as
/// a single-row result named after the parameter.
trait StoredProcedure: Send + Sync {
    type Output: Send;

    const CALL: &'static str;

    fn bind<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments>;

    fn read(row: &PgRow) -> Result<Self::Output, sqlx::Error>;
}

struct CreateProductCall<'a> {
    name: &'a str,
    price: f64,
}

impl StoredProcedure for CreateProductCall<'_> {
    type Output = i64;

    const CALL: &'static str = "CALL pkg_product.create_product($1, $2, NULL)";

    fn bind<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        query.bind(self.name).bind(self.price)
    }

    fn read(row: &PgRow) -> Result<i64, sqlx::Error> {
        row.try_get("p_id")
    }
}

struct UpdateProductCall<'a> {
    id: i64,
    name: &'a str,
    price: f64,
}

impl StoredProcedure for UpdateProductCall<'_> {
    /// Rows affected
    type Output = i32;

    const CALL: &'static str = "CALL pkg_product.update_product($1, $2, $3, NULL)";

    fn bind<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        query.bind(self.id).bind(self.name).bind(self.price)
    }

    fn read(row: &PgRow) -> Result<i32, sqlx::Error> {
        row.try_get("p_updated")
    }
}

struct DeleteProductCall {
    id: i64,
}

impl StoredProcedure for DeleteProductCall {
    /// Rows affected
    type Output = i32;

    const CALL: &'static str = "CALL pkg_product.delete_product($1, NULL)";

    fn bind<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        query.bind(self.id)
    }

    fn read(row: &PgRow) -> Result<i32, sqlx::Error> {
        row.try_get("p_deleted")
    }
}

async fn call<P: StoredProcedure>(
    conn: &mut PgConnection,
    procedure: &P,
) -> Result<P::Output, sqlx::Error> {
    let row = procedure
        .bind(sqlx::query(P::CALL))
        .fetch_one(&mut *conn)
        .await?;
    P::read(&row)
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    created_at: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            created_at: row.created_at,
        }
    }
}

/// Opens the product cursor, drains it and closes it inside one transaction.
async fn fetch_product(conn: &mut PgConnection, id: i64) -> Result<Option<Product>, sqlx::Error> {
    let mut tx = conn.begin().await?;

    sqlx::query(&format!("CALL pkg_product.get_product($1, '{}')", PRODUCT_CURSOR))
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows: Vec<ProductRow> = sqlx::query_as(&format!("FETCH ALL FROM {}", PRODUCT_CURSOR))
        .persistent(false)
        .fetch_all(&mut *tx)
        .await?;

    sqlx::query(&format!("CLOSE {}", PRODUCT_CURSOR))
        .persistent(false)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(rows.into_iter().next().map(Product::from))
}

/// Stored-procedure backed repository
///
/// Each operation checks out one pooled connection and holds it until the
/// operation ends, successfully or not. Acquisition and execution together
/// are bounded by the source's call timeout.
#[derive(Clone)]
pub struct PgProductRepository {
    source: ConnectionSource,
}

impl PgProductRepository {
    pub fn new(source: ConnectionSource) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, name: &str, price: f64) -> ProductResult<i64> {
        let id = self
            .source
            .bounded(async {
                let mut conn = self.source.acquire().await?;
                DatabaseResult::Ok(call(&mut conn, &CreateProductCall { name, price }).await?)
            })
            .await?;

        tracing::info!(product_id = id, "Created product");
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let product = self
            .source
            .bounded(async {
                let mut conn = self.source.acquire().await?;
                DatabaseResult::Ok(fetch_product(&mut conn, id).await?)
            })
            .await?;

        tracing::debug!(product_id = id, found = product.is_some(), "Fetched product");
        Ok(product)
    }

    async fn update(&self, id: i64, name: &str, price: f64) -> ProductResult<bool> {
        let rows = self
            .source
            .bounded(async {
                let mut conn = self.source.acquire().await?;
                DatabaseResult::Ok(call(&mut conn, &UpdateProductCall { id, name, price }).await?)
            })
            .await?;

        tracing::info!(product_id = id, rows, "Updated product");
        Ok(rows > 0)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let rows = self
            .source
            .bounded(async {
                let mut conn = self.source.acquire().await?;
                DatabaseResult::Ok(call(&mut conn, &DeleteProductCall { id }).await?)
            })
            .await?;

        tracing::info!(product_id = id, rows, "Deleted product");
        Ok(rows > 0)
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let rows: Vec<ProductRow> = self
            .source
            .bounded(async {
                let mut conn = self.source.acquire().await?;
                DatabaseResult::Ok(
                    sqlx::query_as("SELECT id, name, price, created_at FROM products ORDER BY id")
                        .fetch_all(&mut *conn)
                        .await?,
                )
            })
            .await?;

        tracing::debug!(rows = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
