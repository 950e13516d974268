//! The supported currency whitelist and the request-shape checks built
//! on it. Both the gRPC layer and the service layer consult this one
//! module, so the two layers can never disagree about which codes are
//! valid.

use thiserror::Error;

pub const USD: &str = "USD";
pub const RUB: &str = "RUB";
pub const EUR: &str = "EUR";

/// The fixed whitelist of currency codes this service accepts.
pub const SUPPORTED_CURRENCIES: [&str; 3] = [USD, RUB, EUR];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("from_currency must not be empty")]
    EmptyFromCurrency,
    #[error("to_currency must not be empty")]
    EmptyToCurrency,
    #[error("from_currency and to_currency must differ")]
    IdenticalCurrencies,
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_CURRENCIES.contains(&code)
}

/// Checks a currency pair the way requests are validated: presence of
/// both codes, distinctness, then support. The first failing check
/// decides the error.
pub fn validate_pair(from_currency: &str, to_currency: &str) -> Result<(), ValidationError> {
    if from_currency.is_empty() {
        return Err(ValidationError::EmptyFromCurrency);
    }
    if to_currency.is_empty() {
        return Err(ValidationError::EmptyToCurrency);
    }
    if from_currency == to_currency {
        return Err(ValidationError::IdenticalCurrencies);
    }
    if !is_supported(from_currency) {
        return Err(ValidationError::UnsupportedCurrency(from_currency.to_string()));
    }
    if !is_supported(to_currency) {
        return Err(ValidationError::UnsupportedCurrency(to_currency.to_string()));
    }
    Ok(())
}
