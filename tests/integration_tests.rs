use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::datetime;
use time::OffsetDateTime;
use tonic::{Code, Request};
use uuid::Uuid;

use exchanger::config::BuildInfo;
use exchanger::grpc::pb;
use exchanger::grpc::pb::exchange_service_server::ExchangeService;
use exchanger::grpc::ExchangeRateHandler;
use exchanger::models::ExchangeRate;
use exchanger::service::ExchangeRateService;
use exchanger::storage::InMemoryRateStorage;

fn setup() -> (Arc<InMemoryRateStorage>, ExchangeRateHandler) {
    let storage = Arc::new(InMemoryRateStorage::new());
    let service = Arc::new(ExchangeRateService::new(storage.clone()));
    let handler = ExchangeRateHandler::new(service, BuildInfo::from_build_env());
    (storage, handler)
}

fn record(from: &str, to: &str, rate: Decimal, created_at: OffsetDateTime) -> ExchangeRate {
    ExchangeRate {
        exchange_rate_id: Uuid::new_v4(),
        from_currency: from.to_string(),
        to_currency: to.to_string(),
        rate,
        created_at,
        updated_at: created_at,
    }
}

async fn get_rate(
    handler: &ExchangeRateHandler,
    from: &str,
    to: &str,
) -> Result<pb::ExchangeRateResponse, tonic::Status> {
    handler
        .get_exchange_rate_for_currency(Request::new(pb::CurrencyRequest {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
        }))
        .await
        .map(|r| r.into_inner())
}

#[tokio::test]
async fn point_lookup_through_all_layers() {
    let (storage, handler) = setup();
    storage.add_rate("USD", "RUB", dec!(92.354821));
    storage.add_rate("RUB", "USD", dec!(0.010828));

    let resp = get_rate(&handler, "USD", "RUB").await.unwrap();
    assert_eq!(resp.from_currency, "USD");
    assert_eq!(resp.to_currency, "RUB");
    assert_eq!(resp.rate, Some(92.354821f32));

    let resp = get_rate(&handler, "RUB", "USD").await.unwrap();
    assert_eq!(resp.rate, Some(0.010828f32));
}

#[tokio::test]
async fn absent_rate_is_success_with_unset_rate() {
    let (storage, handler) = setup();
    storage.add_rate("USD", "RUB", dec!(92.35));

    // Supported pair, no row: OK response, rate unset. Callers can tell
    // this apart from an invalid pair, which fails with a status.
    let resp = get_rate(&handler, "USD", "EUR").await.unwrap();
    assert_eq!(resp.rate, None);

    let status = get_rate(&handler, "USD", "USD").await.unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn listing_keys_rates_by_target_currency() {
    let (storage, handler) = setup();
    storage.insert(record("USD", "EUR", dec!(1.23), datetime!(2024-03-01 12:00 UTC)));
    storage.insert(record("EUR", "USD", dec!(0.81), datetime!(2024-03-02 12:00 UTC)));

    let resp = handler
        .get_exchange_rates(Request::new(pb::Empty {}))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(resp.rates.len(), 2);
    assert_eq!(resp.rates["EUR"], 1.23f32);
    assert_eq!(resp.rates["USD"], 0.81f32);
}

#[tokio::test]
async fn listing_on_empty_store_is_empty_map() {
    let (_storage, handler) = setup();

    let resp = handler
        .get_exchange_rates(Request::new(pb::Empty {}))
        .await
        .unwrap()
        .into_inner();
    assert!(resp.rates.is_empty());
}

#[tokio::test]
async fn repeated_lookups_are_idempotent() {
    let (storage, handler) = setup();
    storage.add_rate("EUR", "RUB", dec!(100.123456));

    let first = get_rate(&handler, "EUR", "RUB").await.unwrap();
    let second = get_rate(&handler, "EUR", "RUB").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn unsupported_code_rejected_before_touching_the_store() {
    let (_storage, handler) = setup();

    for (from, to) in [("GBP", "USD"), ("USD", "GBP")] {
        let status = get_rate(&handler, from, to).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("GBP"));
    }
}

#[tokio::test]
async fn health_is_serving() {
    let (_storage, handler) = setup();

    let resp = handler
        .health(Request::new(pb::HealthRequest {}))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(resp.status, "ok");
}
