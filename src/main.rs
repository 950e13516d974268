use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

use exchanger::{
    config::{BuildInfo, CliArgs, Config},
    grpc::{pb::exchange_service_server::ExchangeServiceServer, ExchangeRateHandler},
    postgres_storage::PostgresStorage,
    service::ExchangeRateService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();
    let config = Config::load(&cli);

    init_tracing(&config);

    let build = BuildInfo::from_build_env();
    tracing::info!(
        version = build.version,
        commit = build.commit,
        date = build.date,
        "Starting exchanger"
    );

    let storage = PostgresStorage::connect(&config.database)
        .await
        .context("failed to connect to PostgreSQL")?;
    tracing::info!(
        host = %config.database.host,
        port = config.database.port,
        max_connections = config.database.max_connections,
        min_connections = config.database.min_connections,
        "PostgreSQL pool ready"
    );

    let service = Arc::new(ExchangeRateService::new(Arc::new(storage)));
    let handler = ExchangeRateHandler::new(service, build);

    let addr = config.listen_addr();
    tracing::info!(%addr, "gRPC server listening");

    Server::builder()
        .add_service(ExchangeServiceServer::new(handler))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server error")?;

    tracing::info!("gRPC server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping gRPC server");
}
