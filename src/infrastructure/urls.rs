//! URL helpers for the gallery service.
//!
//! Media sources are stored either as absolute URLs or as paths relative to
//! the server that hosts the gallery (`/galleryimg/a.jpg`). These helpers
//! resolve such paths for display and build per-entry resource URLs.

use url::Url;

/// Derives the `scheme://host[:port]` origin of a URL.
///
/// Returns `None` for unparsable input or URLs without a host.
///
/// ```
/// use gallery_admin::infrastructure::urls::origin_of;
///
/// assert_eq!(
///     origin_of("https://gallery.example.com/api/gallery").as_deref(),
///     Some("https://gallery.example.com")
/// );
/// assert_eq!(origin_of("not a url"), None);
/// ```
#[must_use]
pub fn origin_of(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    parsed.host_str()?;
    let origin = parsed.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Resolves a media source against the server origin.
///
/// - `http://` / `https://` sources are returned unchanged
/// - `/path` becomes `origin + /path`
/// - `path` becomes `origin + / + path`
/// - an empty source resolves to `None`
#[must_use]
pub fn resolve_media_src(origin: &str, src: &str) -> Option<String> {
    if src.is_empty() {
        return None;
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        return Some(src.to_string());
    }

    let origin = origin.trim_end_matches('/');
    if src.starts_with('/') {
        Some(format!("{origin}{src}"))
    } else {
        Some(format!("{origin}/{src}"))
    }
}

/// Builds the resource URL of one entry: `<base>/<percent-encoded id>`.
#[must_use]
pub fn entry_url(api_base: &str, id: &str) -> String {
    format!("{}/{}", api_base.trim_end_matches('/'), urlencoding::encode(id))
}
