//! OpenTelemetry-based observability with file-based trace export.
//!
//! # Architecture
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - Traces go to `<data_dir>/football-search-otlp.json`
//! - The file rotates at 10 MB, keeping three backups
//! - Each line is one OTLP JSON document
//!
//! # Configuration
//!
//! The filter comes from `RUST_LOG` when set, then the `trace_level` config
//! option, then `"info"`.
//!
//! # Modules
//!
//! - `exporter`: span exporter and OTLP JSON formatting
//! - `rotating_file`: size-rotated line writer

mod exporter;
mod rotating_file;

use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "football-search";

/// Installs the global tracing subscriber.
///
/// Observability is optional: if the data directory cannot be created or a
/// subscriber is already installed, this returns without doing anything.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let data_dir = config.resolved_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::create_tracer_provider(crate::infrastructure::trace_file(&data_dir), resource);
    let tracer = provider.tracer(exporter::SCOPE_NAME);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
