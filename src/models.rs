use rust_decimal::Decimal;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A stored exchange rate fact: one directional rate between two
/// currency codes. Rows are created and updated by the ingestion job;
/// this service never mutates them.
#[derive(Debug, Clone, FromRow)]
pub struct ExchangeRate {
    pub exchange_rate_id: Uuid,
    pub from_currency: String,
    pub to_currency: String,
    /// DECIMAL(18,6) in the store; full precision is kept until the
    /// service narrows it for transport.
    pub rate: Decimal,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
