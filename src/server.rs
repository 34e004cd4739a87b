use crate::api::{router, AppState};
use crate::catalog::Catalog;
use crate::cli::ServeArgs;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::registration::{InMemoryStudentRepository, RegistrationService, TracingNotifier};
use crate::telemetry;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(Catalog::load_or_fallback(&config.catalog)?);
    let registrations = Arc::new(RegistrationService::new(
        Arc::new(InMemoryStudentRepository::default()),
        Arc::new(TracingNotifier),
        &config.notifications,
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(catalog.clone(), registrations).with_metrics(prometheus_handle);
    let readiness_flag = app_state.readiness.clone();

    let app = router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        catalog_source = catalog.source().label(),
        degrees = catalog.degrees().len(),
        colleges = catalog.colleges().len(),
        "edu pathfinder api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
