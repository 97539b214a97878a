//! Filesystem locations used by gallery-admin.
//!
//! Trace files live under the platform data directory
//! (`~/.local/share/gallery-admin` on Linux); the default configuration file
//! under the platform config directory (`~/.config/gallery-admin/config.toml`).
//! Paths given on the command line or
//! in configuration may start with `~`, which is expanded against the home
//! directory.

use std::path::PathBuf;

/// Directory name under the platform data directory.
const APP_DIR: &str = "gallery-admin";

/// Returns the data directory for gallery-admin.
///
/// Falls back to `./.gallery-admin` when the platform has no data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")), |dir| dir.join(APP_DIR))
}

/// Returns the default configuration file path, whether or not it exists.
#[must_use]
pub fn get_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when no home directory is
/// known, are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
