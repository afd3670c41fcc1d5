use crate::cli::ServeArgs;
use crate::infra::{demo_stores, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use care_licensing::config::AppConfig;
use care_licensing::error::AppError;
use care_licensing::licensing::LicensingState;
use care_licensing::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let stores = demo_stores();
    let licensing_state = LicensingState::new(
        stores.applications.clone(),
        stores.identities.clone(),
        stores.profiles.clone(),
        stores.notifications.clone(),
    );

    let app = with_service_routes(licensing_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.stage, %addr, "care licensing dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
