//! gallery-admin: an admin client for a collection of gallery entries.
//!
//! Each entry is a dated post with tags, an optional source and a list of
//! image or video references. The crate provides:
//! - Canonical ordering (newest first, then by id) and substring search
//! - Mapping between entries and a raw edit form, with validation
//! - Create/update/delete against a REST gallery service
//! - Multipart media upload
//! - An in-memory service for offline use and tests
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI Shim (main.rs)                                 │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and status line                   │
//! │  - Store: collection, selection, form, search       │
//! │  - In-flight guard                                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Form Layer    │   │ Service Layer │
//! │ (ui/)         │   │ (form/)       │   │ (service/)    │
//! │ - List view   │   │ - Form state  │   │ - REST client │
//! │ - Text render │   │ - Validation  │   │ - In-memory   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Paths and URLs (infrastructure/)                 │
//! │  - Entry model, wire format, sort, filter (domain/) │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing to stderr                                │
//! │  - OpenTelemetry spans to a local JSON file         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Store, events and status line
//! - [`domain`]: Entry model, errors, sort and filter
//! - [`form`]: Edit form state and entry mapping
//! - [`infrastructure`]: Data directory and URL helpers
//! - [`service`]: Remote and in-memory gallery services
//! - [`ui`]: List view model and text rendering
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! ```toml
//! # gallery-admin.toml
//! api_base = "https://example.com/api/gallery"
//! upload_endpoint = "https://example.com/api/upload"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```
//! use gallery_admin::form::FormField;
//! use gallery_admin::{handle_event, initialize, Config, Event};
//!
//! # let runtime = tokio::runtime::Runtime::new()?;
//! # runtime.block_on(async {
//! let config = Config {
//!     mock: true,
//!     ..Config::default()
//! };
//! let mut store = initialize(&config)?;
//!
//! handle_event(&mut store, Event::Load).await?;
//! handle_event(&mut store, Event::NewEntry).await?;
//! handle_event(&mut store, Event::EditField(FormField::Id, "first".into())).await?;
//! handle_event(&mut store, Event::Submit).await?;
//!
//! assert_eq!(store.entries().len(), 1);
//! # Ok::<(), gallery_admin::GalleryError>(())
//! # })?;
//! # Ok::<(), gallery_admin::GalleryError>(())
//! ```

pub mod app;
pub mod domain;
pub mod form;
pub mod infrastructure;
pub mod service;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Event, SharedStore, Status, Store};
pub use domain::{Entry, GalleryError, MediaItem, MediaKind, Result, Source};

use serde::Deserialize;
use service::{GalleryService, HttpGallery, MemoryGallery};
use std::collections::BTreeMap;
use std::path::Path;

/// Default collection URL of the gallery service.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api/gallery";

/// Default multipart upload URL.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "http://localhost:3000/api/upload";

/// Runtime configuration.
///
/// Layered from lowest to highest precedence: [`Config::default`], a TOML
/// file ([`Config::from_toml_file`]), a key/value map ([`Config::merge_map`])
/// and finally command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Collection URL: `GET` lists, `POST` upserts, `DELETE <base>/<id>` deletes.
    pub api_base: String,

    /// Multipart upload URL. `None` disables uploads.
    pub upload_endpoint: Option<String>,

    /// Origin used to resolve relative media paths for display.
    ///
    /// Derived from `api_base` when not set.
    pub server_origin: Option<String>,

    /// Use the in-memory service instead of HTTP.
    pub mock: bool,

    /// JSON array of entries used to seed the in-memory service.
    pub seed_file: Option<String>,

    /// Tracing filter directive. Options: `trace`, `debug`, `info`, `warn`,
    /// `error`, or any `EnvFilter` syntax. `RUST_LOG` takes precedence.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            upload_endpoint: Some(DEFAULT_UPLOAD_ENDPOINT.to_string()),
            server_origin: None,
            mock: false,
            seed_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads a TOML file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Io`] if the file cannot be read and
    /// [`GalleryError::Config`] if it is not valid configuration.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| GalleryError::Config(format!("{}: {e}", path.display())))
    }

    /// Builds a configuration from defaults plus a key/value map.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use gallery_admin::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base".to_string(), "https://example.com/api/gallery".to_string());
    /// map.insert("mock".to_string(), "yes".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert!(config.mock);
    /// assert_eq!(config.server_origin().as_deref(), Some("https://example.com"));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merge_map(map)
    }

    /// Overrides fields with the values present in `map`.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base`, `trace_level`: taken as-is
    /// - `upload_endpoint`, `server_origin`, `seed_file`: an empty value unsets
    /// - `mock`: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`, otherwise ignored
    /// - unknown keys are ignored
    #[must_use]
    pub fn merge_map(mut self, map: &BTreeMap<String, String>) -> Self {
        let optional = |value: &String| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        for (key, value) in map {
            match key.as_str() {
                "api_base" => self.api_base = value.trim().to_string(),
                "upload_endpoint" => self.upload_endpoint = optional(value),
                "server_origin" => self.server_origin = optional(value),
                "seed_file" => self.seed_file = optional(value),
                "trace_level" => self.trace_level = optional(value),
                "mock" => match parse_flag(value) {
                    Some(flag) => self.mock = flag,
                    None => tracing::debug!(value = %value, "ignoring unparsable mock flag"),
                },
                other => tracing::debug!(key = %other, "ignoring unknown config key"),
            }
        }
        self
    }

    /// The configured origin, or the origin of `api_base`.
    #[must_use]
    pub fn server_origin(&self) -> Option<String> {
        self.server_origin
            .clone()
            .filter(|origin| !origin.trim().is_empty())
            .or_else(|| infrastructure::origin_of(&self.api_base))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Constructs the service selected by `config`.
///
/// # Errors
///
/// Returns [`GalleryError::Config`] if `api_base` is not a URL (live mode),
/// or the seed file's error (mock mode).
pub fn build_service(config: &Config) -> Result<Box<dyn GalleryService>> {
    if config.mock {
        let gallery = match &config.seed_file {
            Some(seed) => MemoryGallery::from_seed_file(infrastructure::expand_tilde(seed))?,
            None => MemoryGallery::new(),
        };
        tracing::debug!(seeded = config.seed_file.is_some(), "using in-memory gallery");
        return Ok(Box::new(gallery));
    }

    url::Url::parse(&config.api_base)
        .map_err(|e| GalleryError::Config(format!("invalid api_base {:?}: {e}", config.api_base)))?;

    tracing::debug!(api_base = %config.api_base, "using remote gallery");
    Ok(Box::new(HttpGallery::new(
        config.api_base.clone(),
        config.upload_endpoint.clone(),
    )))
}

/// Creates a store wired to the configured service.
///
/// Nothing is fetched; send [`Event::Load`] to populate the collection.
///
/// # Errors
///
/// See [`build_service`].
pub fn initialize(config: &Config) -> Result<Store> {
    let _span = tracing::debug_span!("initialize", mock = config.mock).entered();

    let service = build_service(config)?;
    let origin = config.server_origin().unwrap_or_default();
    tracing::debug!(origin = %origin, "store initialized");

    Ok(Store::new(service).with_server_origin(origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.upload_endpoint.as_deref(), Some(DEFAULT_UPLOAD_ENDPOINT));
        assert_eq!(config.server_origin().as_deref(), Some("http://localhost:3000"));
        assert!(!config.mock);
    }

    #[test]
    fn map_overrides_and_unsets() {
        let config = Config::from_map(&map(&[
            ("upload_endpoint", ""),
            ("server_origin", "https://cdn.example.com"),
            ("mock", "off"),
            ("colour", "blue"),
        ]));

        assert_eq!(config.upload_endpoint, None);
        assert_eq!(config.server_origin().as_deref(), Some("https://cdn.example.com"));
        assert!(!config.mock);
    }

    #[test]
    fn unparsable_mock_flag_keeps_previous_value() {
        let config = Config {
            mock: true,
            ..Config::default()
        }
        .merge_map(&map(&[("mock", "maybe")]));
        assert!(config.mock);
    }

    #[test]
    fn toml_file_then_map_layering() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_base = \"https://gallery.example.com/api/gallery\"\ntrace_level = \"debug\""
        )
        .unwrap();

        let config = Config::from_toml_file(file.path())
            .unwrap()
            .merge_map(&map(&[("trace_level", "warn")]));

        assert_eq!(config.api_base, "https://gallery.example.com/api/gallery");
        assert_eq!(config.upload_endpoint.as_deref(), Some(DEFAULT_UPLOAD_ENDPOINT));
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mock = \"not a bool\"").unwrap();

        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }

    #[test]
    fn live_mode_rejects_bad_api_base() {
        let config = Config {
            api_base: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(build_service(&config), Err(GalleryError::Config(_))));
    }

    #[tokio::test]
    async fn mock_mode_store_loads_seed_file() {
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        write!(
            seed,
            r#"[{{"id":"old","date":"2020-01-01"}},{{"id":"new","date":"2024-01-01","images":["/a.jpg"]}}]"#
        )
        .unwrap();

        let config = Config {
            mock: true,
            seed_file: Some(seed.path().display().to_string()),
            ..Config::default()
        };
        let mut store = initialize(&config).unwrap();

        handle_event(&mut store, Event::Load).await.unwrap();

        let view = store.compute_list_view();
        assert_eq!(view.items[0].id, "new");
        assert_eq!(view.items[0].thumbnail.as_deref(), Some("http://localhost:3000/a.jpg"));
    }
}
