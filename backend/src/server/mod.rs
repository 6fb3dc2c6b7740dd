//! Server construction and middleware wiring.

mod app;
mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

use app::{AppDependencies, build_app};
pub use config::{ServerConfig, ServerSettings};
#[cfg(feature = "metrics")]
pub(crate) use metrics::make_metrics;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServerHandle};
use actix_web::{HttpServer, web};

use recipe_service::inbound::http::health::HealthState;

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The returned [`Server`] must be awaited to drive the listener. Readiness
/// is reported as soon as the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config.db_pool);
    let ServerConfig {
        session,
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness checks, then stop the server once in-flight requests finish.
pub async fn drain(health_state: &HealthState, handle: ServerHandle) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse};

    #[actix_web::test]
    async fn drain_fails_liveness_and_stops_server() {
        let health_state = HealthState::new();
        health_state.mark_ready();
        let server = HttpServer::new(|| {
            App::new().route("/", web::get().to(|| async { HttpResponse::Ok().finish() }))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind ephemeral port")
        .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain(&health_state, handle).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
