//! Telemetry setup and per-request database query counting.
//!
//! [`crate::store::PgStore`] wraps every query in a `db.query` span.
//! [`DbQueryCountingLayer`] counts those spans into a task-local counter that
//! [`query_counting_middleware`] installs for each request.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, LazyLock,
};
use std::time::Duration;
use tracing::{span::Id, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::Context, registry::LookupSpan, EnvFilter, Layer};

tokio::task_local! {
    /// Task-local counter for database queries in the current request.
    /// This follows the async task across await points and thread migrations.
    static DB_QUERY_COUNTER: Arc<AtomicU32>;
}

/// Add an X-DB-Query-Count header to responses when TRACK_DB_QUERY_COUNT=1.
static EXPOSE_QUERY_COUNT: LazyLock<bool> = LazyLock::new(|| {
    env::var("TRACK_DB_QUERY_COUNT")
        .map(|v| v == "1")
        .unwrap_or(false)
});

/// Get the current database query count for this request, if available.
pub fn get_query_count() -> Option<u32> {
    DB_QUERY_COUNTER
        .try_with(|counter| counter.load(Ordering::Relaxed))
        .ok()
}

/// A tracing Layer that counts db.query spans per HTTP request.
pub struct DbQueryCountingLayer;

impl<S> Layer<S> for DbQueryCountingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, _attrs: &tracing::span::Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };

        if span.name() == "db.query" {
            let _ = DB_QUERY_COUNTER.try_with(|counter| {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
    }
}

/// Middleware that initializes the per-request database query counter.
///
/// This must be added to the router AFTER the TraceLayer (so it runs BEFORE
/// the trace span is created, wrapping the entire request lifecycle).
pub async fn query_counting_middleware(request: Request<Body>, next: Next) -> Response {
    let counter = Arc::new(AtomicU32::new(0));
    DB_QUERY_COUNTER
        .scope(counter.clone(), async move {
            let mut response = next.run(request).await;

            if *EXPOSE_QUERY_COUNT {
                let count = counter.load(Ordering::Relaxed);
                if let Ok(value) = axum::http::HeaderValue::from_str(&count.to_string()) {
                    response.headers_mut().insert("X-DB-Query-Count", value);
                }
            }

            response
        })
        .await
}

/// `RUST_LOG`, or "info" when unset or invalid.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Registry with console output filtered by `filter`.
///
/// The filter is attached to the output layer only. The query counter sees
/// every `db.query` span whatever the log level.
fn console_subscriber(
    filter: EnvFilter,
) -> impl Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(DbQueryCountingLayer)
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
}

/// Initialize telemetry with optional OpenTelemetry export.
/// If OTEL_EXPORTER_OTLP_ENDPOINT is set and reachable, traces and logs are
/// sent to the collector. Otherwise, only console logging is used.
pub fn init_telemetry() {
    let registry = console_subscriber(env_filter());

    let Some(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok() else {
        registry.init();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return;
    };

    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://");

    // Quick TCP check to see if the collector is up (resolve hostname first)
    let is_reachable = host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false);

    if !is_reachable {
        registry.init();
        tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        );
        return;
    }

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "kitchen-server".to_string());

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.clone())
        .build();

    let exporters = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
        .and_then(|spans| {
            opentelemetry_otlp::LogExporter::builder()
                .with_tonic()
                .with_endpoint(&endpoint)
                .build()
                .map(|logs| (spans, logs))
        });

    let (trace_exporter, log_exporter) = match exporters {
        Ok(exporters) => exporters,
        Err(e) => {
            registry.init();
            tracing::warn!(error = %e, "Failed to create OTLP exporters, using console logging only");
            return;
        }
    };

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let tracer = trace_provider.tracer("kitchen-server");
    opentelemetry::global::set_tracer_provider(trace_provider);

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    registry
        .with(
            tracing_opentelemetry::layer()
                .with_tracer(tracer)
                .with_filter(env_filter()),
        )
        .with(OpenTelemetryTracingBridge::new(&log_provider).with_filter(env_filter()))
        .init();

    tracing::info!(
        "OpenTelemetry enabled, exporting traces and logs to {} as {}",
        endpoint,
        service_name
    );
}
