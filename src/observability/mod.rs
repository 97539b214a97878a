//! Structured logging and span export.
//!
//! `tracing` events are printed to stderr; spans are also bridged through
//! OpenTelemetry to a local JSON-lines file:
//!
//! ```text
//! tracing → tracing-opentelemetry → TracerProvider → JsonFileExporter → RotatingFile
//!         ↘ fmt layer → stderr
//! ```
//!
//! The trace file lives at `<data dir>/gallery-admin-otlp.json` and rotates at
//! 10 MB, keeping three numbered backups.
//!
//! Verbosity comes from `RUST_LOG`, then the `trace_level` config option, then
//! defaults to `info`.
//!
//! # Modules
//!
//! - `init`: subscriber installation
//! - `exporter`: span-to-JSON exporter and tracer provider
//! - `rotation`: size-bounded file with numbered backups

mod exporter;
mod init;
mod rotation;

pub use exporter::tracer_provider;
pub use init::{init_tracing, trace_file, SERVICE_NAME, TRACE_FILE_NAME};
pub use rotation::RotatingFile;
