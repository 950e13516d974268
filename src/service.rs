use std::{collections::HashMap, sync::Arc};

use rust_decimal::{prelude::ToPrimitive, Decimal};
use thiserror::Error;

use crate::{
    currency,
    storage::{RateReader, StorageError},
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Business layer for rate lookups: enforces the supported-currency
/// rule, distinguishes "no rate on record" from storage faults, and
/// narrows stored decimals for transport.
pub struct ExchangeRateService {
    reader: Arc<dyn RateReader>,
}

impl ExchangeRateService {
    pub fn new(reader: Arc<dyn RateReader>) -> Self {
        Self { reader }
    }

    /// Looks up the rate for one ordered currency pair. `Ok(None)`
    /// means the pair is valid but has no rate on record; storage
    /// faults pass through unchanged.
    pub async fn get_exchange_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Option<f32>, ServiceError> {
        if !currency::is_supported(from_currency) {
            return Err(ServiceError::UnsupportedCurrency(from_currency.to_string()));
        }
        if !currency::is_supported(to_currency) {
            return Err(ServiceError::UnsupportedCurrency(to_currency.to_string()));
        }

        match self.reader.get_rate(from_currency, to_currency).await? {
            Some(rate) => Ok(Some(narrow_rate(rate))),
            None => {
                tracing::warn!(from_currency, to_currency, "No rate on record");
                Ok(None)
            }
        }
    }

    /// All known rates keyed by target currency. When several records
    /// share a target currency the record iterated last wins; the
    /// reader lists records newest first, so the oldest contested
    /// record ends up in the map.
    pub async fn get_all_exchange_rates(&self) -> Result<HashMap<String, f32>, ServiceError> {
        let records = self.reader.list_rates().await?;
        let mut rates = HashMap::with_capacity(records.len());
        for record in records {
            rates.insert(record.to_currency, narrow_rate(record.rate));
        }
        Ok(rates)
    }
}

/// Transport rates are single precision. This is the only place the
/// stored DECIMAL(18,6) value loses precision; the conversion rounds to
/// the nearest representable f32 and is total over Decimal's range.
fn narrow_rate(rate: Decimal) -> f32 {
    rate.to_f32().unwrap_or_default()
}
