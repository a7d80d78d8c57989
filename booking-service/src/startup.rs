//! Router assembly and server lifecycle.

use std::net::SocketAddr;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::handlers::{
    bookings::{
        checkout, create_booking, get_booking, next_step, previous_step, update_booking,
    },
    catalog::{compare_payment_methods, list_services},
    health_check, metrics,
    payments::{apply_action, get_confirmation, get_payment},
    readiness_check,
};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .route("/services", get(list_services))
        .route(
            "/countries/:code/payment-methods",
            get(compare_payment_methods),
        )
        .route("/bookings", post(create_booking))
        .route("/bookings/:id", get(get_booking).patch(update_booking))
        .route("/bookings/:id/next", post(next_step))
        .route("/bookings/:id/back", post(previous_step))
        .route("/bookings/:id/checkout", post(checkout))
        .route("/payments/:id", get(get_payment))
        .route("/payments/:id/actions", post(apply_action))
        .route("/confirmations/:transaction_id", get(get_confirmation))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Bind the listener. Port 0 picks a random port.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let addr: SocketAddr = address.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Invalid server address {}: {}", address, e))
        })?;

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            catalog_size = settings.catalog.len(),
            default_country = %settings.payment.default_country,
            "Booking service listening"
        );

        Ok(Self {
            port,
            listener,
            state: AppState::new(settings),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
