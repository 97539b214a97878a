//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use std::path::{Path, PathBuf};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported on every exported span.
pub const SERVICE_NAME: &str = "gallery-admin";

/// File name of the span export inside the data directory.
pub const TRACE_FILE_NAME: &str = "gallery-admin-otlp.json";

/// Resolves the filter directive: `RUST_LOG`, then `trace_level`, then `info`.
fn filter_directive(env: Option<String>, trace_level: Option<&str>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| trace_level.map(String::from))
        .unwrap_or_else(|| "info".to_string())
}

/// Where spans are exported for a given data directory.
#[must_use]
pub fn trace_file(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE_NAME)
}

/// Installs the global subscriber.
///
/// Events go to stderr through a compact `fmt` layer. Spans are additionally
/// exported as JSON lines to [`TRACE_FILE_NAME`] in the data directory, unless
/// that directory cannot be created, in which case only stderr logging is set
/// up. Calling this more than once is harmless; only the first call wins.
pub fn init_tracing(config: &Config) {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), config.trace_level.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let data_dir = crate::infrastructure::get_data_dir();
    let otel_layer = std::fs::create_dir_all(&data_dir).ok().map(|()| {
        let provider = exporter::tracer_provider(trace_file(&data_dir), SERVICE_NAME);
        OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_wins_over_config() {
        assert_eq!(filter_directive(Some("debug".into()), Some("warn")), "debug");
    }

    #[test]
    fn blank_rust_log_falls_back_to_config_then_info() {
        assert_eq!(filter_directive(Some("  ".into()), Some("warn")), "warn");
        assert_eq!(filter_directive(None, None), "info");
    }

    #[test]
    fn trace_file_lives_in_data_dir() {
        assert_eq!(
            trace_file(Path::new("/data")),
            PathBuf::from("/data/gallery-admin-otlp.json")
        );
    }
}
