//! Domain layer for gallery administration.
//!
//! This module contains the gallery entry model and the rules that operate on
//! it, independent of HTTP, the terminal, or any storage backend.
//!
//! # Organization
//!
//! - [`entry`]: `Entry`, `MediaItem`, `MediaKind`, `Source`
//! - [`error`]: Error types and result alias
//! - [`filter`]: Case-insensitive substring search
//! - [`sort`]: Canonical date-descending, id-ascending order
//! - [`wire`]: Serde shape that bridges legacy `images` and current `media`

pub mod entry;
pub mod error;
pub mod filter;
pub mod sort;
pub mod wire;

pub use entry::{Entry, MediaItem, MediaKind, Source};
pub use error::{GalleryError, Result};
pub use filter::filter_entries;
pub use sort::sort_entries;
