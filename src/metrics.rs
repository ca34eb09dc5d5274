use axum::{routing::get, Router};
use metrics::{describe_counter, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// The recorder is process-global; installing it twice is an error, so keep one handle.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process) and describe our series.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new().install_recorder()?;
                describe();
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();
        Ok(Self { handle })
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

fn describe() {
    describe_counter!(
        "gateway_requests_total",
        Unit::Count,
        "Requests relayed to the news provider, by endpoint."
    );
    describe_counter!(
        "gateway_upstream_failures_total",
        Unit::Count,
        "Provider calls that ended in a normalized 500, by endpoint."
    );
    describe_counter!(
        "classifier_verdicts_total",
        Unit::Count,
        "Classifications, by verdict (real/fake)."
    );
    describe_counter!(
        "headline_filter_kept_total",
        Unit::Count,
        "Articles that made it into the credible feed."
    );
    describe_counter!(
        "headline_filter_dropped_total",
        Unit::Count,
        "Articles dropped as incomplete, suspicious, or over the cap."
    );
}
