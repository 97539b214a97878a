//! Gallery entry domain model.
//!
//! An [`Entry`] is one gallery record: a user-supplied id, a free-form date,
//! tags, optional source metadata and an ordered list of media items. The
//! legacy `images` list that older records carry is not stored separately; it
//! is derived from the image items of [`Entry::media`] and produced on the wire
//! by the adapter in [`crate::domain::wire`].

use serde::{Deserialize, Serialize};

/// Kind of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Parses a raw type string, falling back to [`MediaKind::Image`].
    ///
    /// Absent, blank or unrecognized values are never rejected.
    ///
    /// ```
    /// use gallery_admin::domain::MediaKind;
    ///
    /// assert_eq!(MediaKind::parse_lenient(" video "), MediaKind::Video);
    /// assert_eq!(MediaKind::parse_lenient("gif"), MediaKind::Image);
    /// assert_eq!(MediaKind::parse_lenient(""), MediaKind::Image);
    /// ```
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim() {
            "video" => Self::Video,
            _ => Self::Image,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One image or video reference attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub kind: MediaKind,
    /// Location of the media, absolute URL or server-relative path.
    pub src: String,
}

impl MediaItem {
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            src: src.into(),
        }
    }

    pub fn video(src: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            src: src.into(),
        }
    }
}

/// Where an entry comes from (e.g. a post or an exhibition).
///
/// Each field is `None` rather than empty; a source with neither field set
/// is represented as `Option::<Source>::None` on the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Source {
    /// Returns `true` when neither field carries a non-empty value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let blank = |field: &Option<String>| field.as_deref().map_or(true, str::is_empty);
        blank(&self.kind) && blank(&self.label)
    }
}

/// A gallery record.
///
/// Serialization goes through [`crate::domain::wire::WireEntry`], which reads
/// both the legacy `images` shape and the current `media` shape and always
/// writes both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "super::wire::WireEntry", into = "super::wire::WireEntry")]
pub struct Entry {
    /// Stable key. May be empty for malformed records loaded from the service.
    pub id: String,
    /// Free-form date; only parsed for ordering. Empty when absent.
    pub date: String,
    pub tags: Vec<String>,
    pub source: Option<Source>,
    pub media: Vec<MediaItem>,
}

impl Entry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_media(mut self, media: Vec<MediaItem>) -> Self {
        self.media = media;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = (!source.is_empty()).then_some(source);
        self
    }

    /// Legacy image list: the `src` of every image item, in media order.
    #[must_use]
    pub fn images(&self) -> Vec<&str> {
        self.media
            .iter()
            .filter(|item| item.kind == MediaKind::Image)
            .map(|item| item.src.as_str())
            .collect()
    }

    /// Source label, if one is set and non-empty.
    #[must_use]
    pub fn source_label(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|source| source.label.as_deref())
            .filter(|label| !label.is_empty())
    }

    /// Media item used as the list thumbnail.
    ///
    /// The first image wins; entries with only videos fall back to the first
    /// video.
    #[must_use]
    pub fn cover(&self) -> Option<&MediaItem> {
        self.media
            .iter()
            .find(|item| item.kind == MediaKind::Image)
            .or_else(|| self.media.iter().find(|item| item.kind == MediaKind::Video))
    }
}
