use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::{
    config::BuildInfo,
    currency,
    service::{ExchangeRateService, ServiceError},
};

pub mod pb {
    tonic::include_proto!("exchange.v1");
}

use pb::exchange_service_server::ExchangeService;

/// gRPC-facing layer: request-shape validation and translation of
/// service results onto the wire contract. Stateless per call.
pub struct ExchangeRateHandler {
    service: Arc<ExchangeRateService>,
    build: BuildInfo,
}

impl ExchangeRateHandler {
    pub fn new(service: Arc<ExchangeRateService>, build: BuildInfo) -> Self {
        Self { service, build }
    }
}

fn to_status(err: ServiceError) -> Status {
    match err {
        // The service re-checks currency support behind the shared
        // whitelist; surface it the same way the shape checks do.
        ServiceError::UnsupportedCurrency(_) => Status::invalid_argument(err.to_string()),
        ServiceError::Storage(_) => Status::internal(err.to_string()),
    }
}

#[tonic::async_trait]
impl ExchangeService for ExchangeRateHandler {
    async fn get_exchange_rate_for_currency(
        &self,
        request: Request<pb::CurrencyRequest>,
    ) -> Result<Response<pb::ExchangeRateResponse>, Status> {
        let req = request.into_inner();
        tracing::info!(
            from_currency = %req.from_currency,
            to_currency = %req.to_currency,
            "GetExchangeRateForCurrency"
        );

        if let Err(e) = currency::validate_pair(&req.from_currency, &req.to_currency) {
            tracing::warn!(error = %e, "Rejected currency pair");
            return Err(Status::invalid_argument(e.to_string()));
        }

        let rate = self
            .service
            .get_exchange_rate(&req.from_currency, &req.to_currency)
            .await
            .map_err(|e| {
                match &e {
                    ServiceError::Storage(cause) => {
                        tracing::error!(error = %cause, "Rate lookup failed")
                    }
                    ServiceError::UnsupportedCurrency(code) => {
                        tracing::warn!(currency = %code, "Unsupported currency")
                    }
                }
                to_status(e)
            })?;

        // An unset rate means "valid pair, nothing on record" and is a
        // successful response, not an error.
        Ok(Response::new(pb::ExchangeRateResponse {
            from_currency: req.from_currency,
            to_currency: req.to_currency,
            rate,
        }))
    }

    async fn get_exchange_rates(
        &self,
        _request: Request<pb::Empty>,
    ) -> Result<Response<pb::ExchangeRatesResponse>, Status> {
        tracing::info!("GetExchangeRates");

        let rates = self.service.get_all_exchange_rates().await.map_err(|e| {
            if let ServiceError::Storage(cause) = &e {
                tracing::error!(error = %cause, "Rate listing failed");
            }
            to_status(e)
        })?;

        Ok(Response::new(pb::ExchangeRatesResponse { rates }))
    }

    async fn health(
        &self,
        _request: Request<pb::HealthRequest>,
    ) -> Result<Response<pb::HealthResponse>, Status> {
        Ok(Response::new(pb::HealthResponse {
            status: "ok".to_string(),
            version: self.build.version.to_string(),
        }))
    }
}
