use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

impl Metrics {
    /// Install the Prometheus recorder once per process and describe the page series.
    /// Returns `None` if another recorder already owns the global slot.
    pub fn init() -> Option<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new().install_recorder()?;
                describe_series();
                Ok::<_, metrics_exporter_prometheus::BuildError>(handle)
            })
            .map_err(|e| tracing::warn!(error = %e, "prometheus recorder not installed"))
            .ok()?
            .clone();
        Some(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe_series() {
    describe_counter!(
        "newslite_page_requests_total",
        "Page requests by outcome (prompt, no_data, articles, error)."
    );
    describe_counter!("newslite_store_errors_total", "Failed key-value store reads.");
    describe_counter!(
        "newslite_payload_decode_errors_total",
        "Stored payloads that were not a valid article array."
    );
    describe_histogram!(
        "newslite_page_render_ms",
        "Time to build a page, store read included, in milliseconds."
    );
}
