use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::{
    config::DatabaseConfig,
    models::ExchangeRate,
    storage::{RateReader, StorageError},
};

const GET_RATE_SQL: &str = "\
    SELECT rate
    FROM exchange_rates
    WHERE from_currency = $1 AND to_currency = $2";

const LIST_RATES_SQL: &str = "\
    SELECT exchange_rate_id, from_currency, to_currency, rate, created_at, updated_at
    FROM exchange_rates
    ORDER BY created_at DESC";

/// Postgres-backed rate reader over a shared connection pool.
///
/// Expects the `exchange_rates` table maintained by the ingestion job:
/// `exchange_rate_id UUID, from_currency TEXT, to_currency TEXT,
/// rate DECIMAL(18,6), created_at TIMESTAMPTZ, updated_at TIMESTAMPTZ`.
/// Both queries are parameterized; caller-supplied values never reach
/// the SQL text.
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Builds the connection pool from config. Connection reuse and
    /// concurrency limits are the pool's concern from here on.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.connection_string())
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl RateReader for PostgresStorage {
    async fn get_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Option<Decimal>, StorageError> {
        let rate = sqlx::query_scalar::<_, Decimal>(GET_RATE_SQL)
            .bind(from_currency)
            .bind(to_currency)
            .fetch_optional(&self.pool)
            .await?;
        Ok(rate)
    }

    async fn list_rates(&self) -> Result<Vec<ExchangeRate>, StorageError> {
        let rates = sqlx::query_as::<_, ExchangeRate>(LIST_RATES_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rates)
    }
}
