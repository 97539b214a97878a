//! Infrastructure layer for filesystem and URL handling.
//!
//! - [`paths`]: data and config locations, `~` expansion
//! - [`urls`]: origin derivation, media source resolution, entry URLs

pub mod paths;
pub mod urls;

pub use paths::{expand_tilde, get_config_file, get_data_dir};
pub use urls::{entry_url, origin_of, resolve_media_src};
