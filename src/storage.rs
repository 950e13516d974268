use std::sync::RwLock;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::ExchangeRate;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Other(String),
}

/// Read access to stored exchange rates.
///
/// `get_rate` returning `None` means "no row for this pair" and is not
/// an error; `Err` is reserved for real storage faults.
#[async_trait]
pub trait RateReader: Send + Sync {
    async fn get_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Option<Decimal>, StorageError>;

    /// All stored records, most recently created first.
    async fn list_rates(&self) -> Result<Vec<ExchangeRate>, StorageError>;
}

/// In-memory rate store with the same ordering contract as the Postgres
/// backend. Used by the test suites to substitute for a live database.
pub struct InMemoryRateStorage {
    rates: RwLock<Vec<ExchangeRate>>,
}

impl Default for InMemoryRateStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRateStorage {
    pub fn new() -> Self {
        Self {
            rates: RwLock::new(Vec::new()),
        }
    }

    /// Stores a record for the pair, stamped with the current time.
    pub fn add_rate(&self, from_currency: &str, to_currency: &str, rate: Decimal) {
        let now = OffsetDateTime::now_utc();
        self.insert(ExchangeRate {
            exchange_rate_id: Uuid::new_v4(),
            from_currency: from_currency.to_string(),
            to_currency: to_currency.to_string(),
            rate,
            created_at: now,
            updated_at: now,
        });
    }

    pub fn insert(&self, record: ExchangeRate) {
        self.rates.write().unwrap().push(record);
    }
}

#[async_trait]
impl RateReader for InMemoryRateStorage {
    async fn get_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Option<Decimal>, StorageError> {
        let rates = self.rates.read().unwrap();
        Ok(rates
            .iter()
            .find(|r| r.from_currency == from_currency && r.to_currency == to_currency)
            .map(|r| r.rate))
    }

    async fn list_rates(&self) -> Result<Vec<ExchangeRate>, StorageError> {
        let mut rates = self.rates.read().unwrap().clone();
        // Stable sort: records created at the same instant keep
        // insertion order, matching ORDER BY created_at DESC.
        rates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rates)
    }
}
