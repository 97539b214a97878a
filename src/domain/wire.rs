//! Wire shape of a gallery entry.
//!
//! The gallery service stores records written by several generations of
//! clients. Older records only carry `images` (a list of image URLs), newer
//! ones carry `media` (typed items), and some media items still name their
//! location `url` instead of `src`. [`WireEntry`] accepts all of these and
//! always writes both `images` and `media`, so [`Entry`] only ever deals with
//! one canonical media list.
//!
//! Written records look like:
//!
//! ```json
//! {
//!   "id": "250913post1",
//!   "date": "2025-09-13",
//!   "tags": ["sunset", "beach"],
//!   "images": ["/galleryimg/250913post1.jpg"],
//!   "media": [
//!     { "type": "image", "src": "/galleryimg/250913post1.jpg" },
//!     { "type": "video", "src": "/galleryimg/250913post1.mp4" }
//!   ],
//!   "source": { "type": "post", "label": "Weekly post" }
//! }
//! ```

use super::entry::{Entry, MediaItem, MediaKind, Source};
use serde::{Deserialize, Serialize};

/// Serde representation of a media item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMedia {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing)]
    pub url: Option<String>,
}

/// Serde representation of an entry, legacy and current fields side by side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub media: Option<Vec<WireMedia>>,
    #[serde(default)]
    pub source: Option<Source>,
}

impl From<WireMedia> for MediaItem {
    fn from(wire: WireMedia) -> Self {
        let src = wire
            .src
            .filter(|src| !src.is_empty())
            .or(wire.url)
            .unwrap_or_default();
        Self {
            kind: wire.kind.as_deref().map_or(MediaKind::Image, MediaKind::parse_lenient),
            src,
        }
    }
}

impl From<MediaItem> for WireMedia {
    fn from(item: MediaItem) -> Self {
        Self {
            kind: Some(item.kind.as_str().to_string()),
            src: Some(item.src),
            url: None,
        }
    }
}

impl From<WireEntry> for Entry {
    fn from(wire: WireEntry) -> Self {
        let media = match wire.media {
            Some(media) if !media.is_empty() => media.into_iter().map(MediaItem::from).collect(),
            _ => wire
                .images
                .unwrap_or_default()
                .into_iter()
                .map(MediaItem::image)
                .collect(),
        };

        Self {
            id: wire.id.unwrap_or_default(),
            date: wire.date.unwrap_or_default(),
            tags: wire.tags.unwrap_or_default(),
            source: wire.source.filter(|source| !source.is_empty()),
            media,
        }
    }
}

impl From<Entry> for WireEntry {
    fn from(entry: Entry) -> Self {
        let images = entry.images().into_iter().map(String::from).collect();
        let source = entry.source.map(|source| Source {
            kind: source.kind.filter(|kind| !kind.is_empty()),
            label: source.label.filter(|label| !label.is_empty()),
        });

        Self {
            id: Some(entry.id),
            date: Some(entry.date),
            tags: Some(entry.tags),
            images: Some(images),
            media: Some(entry.media.into_iter().map(WireMedia::from).collect()),
            // the service expects an object here even when nothing is set
            source: Some(source.unwrap_or_default()),
        }
    }
}
