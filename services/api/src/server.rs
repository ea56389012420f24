use crate::cli::ServeArgs;
use crate::infra::{load_reference_catalog, AppState, InMemoryVerificationRepository};
use crate::routes::with_verification_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use transfer_verifier::config::AppConfig;
use transfer_verifier::error::AppError;
use transfer_verifier::telemetry;
use transfer_verifier::verification::TransferVerificationService;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_reference_catalog(&config.reference)?);
    let repository = Arc::new(InMemoryVerificationRepository::default());
    let verification_service = Arc::new(
        TransferVerificationService::new(repository, catalog)
            .with_default_target(config.reference.default_target.clone()),
    );

    let app = with_verification_routes(Arc::clone(&verification_service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_target = verification_service.default_target(),
        "transfer verifier ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
