//! Optional Prometheus metrics: request counters and latency histograms
//! exposed at `/metrics` when the `metrics` feature is enabled.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;
use tracing::warn;

const METRICS_NAMESPACE: &str = "recipes";
const METRICS_ENDPOINT: &str = "/metrics";

/// Build the Prometheus middleware, or `None` when registration fails.
///
/// Metrics are best effort: a registry error is logged and the server runs
/// without them.
pub(crate) fn make_metrics() -> Option<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .endpoint(METRICS_ENDPOINT)
        .build()
        .map_err(|error| warn!(%error, "Prometheus metrics disabled"))
        .ok()
}

/// Wraps the app with Prometheus middleware when metrics were built, or
/// with a pass-through otherwise, so both cases share one app type.
#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            Self::Enabled(metrics) => {
                let fut = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(fut.await?)) })
            }
            Self::Disabled => Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn enabled_layer_counts_requests_under_recipes_namespace() {
        let layer = MetricsLayer::from_option(make_metrics());
        assert!(matches!(layer, MetricsLayer::Enabled(_)));
        let app = test::init_service(
            App::new()
                .wrap(layer)
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(METRICS_ENDPOINT).to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body = test::read_body(res).await;
        let text = std::str::from_utf8(&body).expect("utf8 metrics");
        assert!(text.contains("recipes_http_requests_total"));
    }

    #[actix_web::test]
    async fn disabled_layer_passes_responses_through() {
        let app = test::init_service(
            App::new()
                .wrap(MetricsLayer::from_option(None))
                .route("/ping", web::get().to(HttpResponse::NoContent)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(res.status().as_u16(), 204);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(METRICS_ENDPOINT).to_request(),
        )
        .await;
        assert_eq!(res.status().as_u16(), 404);
    }
}
