//! Edit-form state and its mapping to and from [`Entry`].
//!
//! The form holds raw strings exactly as a presentation layer would capture
//! them. [`entry_to_form`] projects an entry into that shape; [`form_to_entry`]
//! normalizes it back, trimming fields, splitting tags, dropping empty media
//! rows and deciding whether a source is present. The two are not exact
//! inverses: whitespace and empty rows do not survive a round trip.

use crate::domain::error::{GalleryError, Result};
use crate::domain::{Entry, MediaItem, MediaKind, Source};

/// Message used when the id field is blank.
pub const ID_REQUIRED: &str = "ID is required.";

/// One editable media row.
///
/// `kind` is kept as the raw selector value; it is interpreted leniently when
/// the form is read back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRow {
    pub kind: String,
    pub src: String,
}

impl MediaRow {
    pub fn new(kind: MediaKind, src: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            src: src.into(),
        }
    }

    /// Reads the row as a media item. Returns `None` when `src` is blank.
    #[must_use]
    pub fn to_media(&self) -> Option<MediaItem> {
        let src = self.src.trim();
        if src.is_empty() {
            return None;
        }
        Some(MediaItem {
            kind: MediaKind::parse_lenient(&self.kind),
            src: src.to_string(),
        })
    }
}

/// Single-line text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    Date,
    SourceType,
    SourceLabel,
    Tags,
}

/// Raw contents of the entry edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub id: String,
    pub date: String,
    pub source_type: String,
    pub source_label: String,
    /// Comma-separated tags.
    pub tags: String,
    pub media: Vec<MediaRow>,
}

impl FormState {
    /// Projects an entry into form fields. See [`entry_to_form`].
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Self {
        let source = entry.source.as_ref();
        Self {
            id: entry.id.clone(),
            date: entry.date.clone(),
            source_type: source.and_then(|s| s.kind.clone()).unwrap_or_default(),
            source_label: source.and_then(|s| s.label.clone()).unwrap_or_default(),
            tags: entry.tags.join(", "),
            media: entry
                .media
                .iter()
                .map(|item| MediaRow::new(item.kind, item.src.clone()))
                .collect(),
        }
    }

    /// Reads the form back into an entry. See [`form_to_entry`].
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Validation`] when the id is blank.
    pub fn to_entry(&self) -> Result<Entry> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(GalleryError::Validation(ID_REQUIRED.to_string()));
        }

        let tags = self
            .tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect();

        let media = self.media.iter().filter_map(MediaRow::to_media).collect();

        let non_empty = |raw: &str| {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Ok(Entry {
            id: id.to_string(),
            date: self.date.trim().to_string(),
            tags,
            source: Some(Source {
                kind: non_empty(&self.source_type),
                label: non_empty(&self.source_label),
            })
            .filter(|source| !source.is_empty()),
            media,
        })
    }

    /// Empties every field and removes all media rows.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Id => self.id = value,
            FormField::Date => self.date = value,
            FormField::SourceType => self.source_type = value,
            FormField::SourceLabel => self.source_label = value,
            FormField::Tags => self.tags = value,
        }
    }

    /// Appends an empty row of the given kind and returns its index.
    pub fn add_media_row(&mut self, kind: MediaKind) -> usize {
        self.media.push(MediaRow::new(kind, ""));
        self.media.len() - 1
    }

    /// Removes a row. Returns `false` if `index` is out of range.
    pub fn remove_media_row(&mut self, index: usize) -> bool {
        if index < self.media.len() {
            self.media.remove(index);
            true
        } else {
            false
        }
    }

    /// Replaces a row's source. Returns `false` if `index` is out of range.
    pub fn set_media_src(&mut self, index: usize, src: impl Into<String>) -> bool {
        self.media.get_mut(index).map_or(false, |row| {
            row.src = src.into();
            true
        })
    }

    /// Replaces a row's kind. Returns `false` if `index` is out of range.
    pub fn set_media_kind(&mut self, index: usize, kind: MediaKind) -> bool {
        self.media.get_mut(index).map_or(false, |row| {
            row.kind = kind.as_str().to_string();
            true
        })
    }
}

/// Projects an entry into form state.
///
/// Text fields are copied as-is (empty when absent), tags are joined with
/// `", "`, and one media row is produced per media item. Entries that only
/// carried the legacy `images` list already have those folded into `media`
/// when they were deserialized.
#[must_use]
pub fn entry_to_form(entry: &Entry) -> FormState {
    FormState::from_entry(entry)
}

/// Normalizes form state into an entry.
///
/// ```
/// use gallery_admin::form::{form_to_entry, FormState};
///
/// let form = FormState {
///     id: "  beach-day ".into(),
///     tags: "sunset, , beach,".into(),
///     ..FormState::default()
/// };
///
/// let entry = form_to_entry(&form)?;
/// assert_eq!(entry.id, "beach-day");
/// assert_eq!(entry.tags, ["sunset", "beach"]);
/// assert!(entry.source.is_none());
/// # Ok::<(), gallery_admin::GalleryError>(())
/// ```
///
/// # Errors
///
/// Returns [`GalleryError::Validation`] when the id is blank after trimming.
pub fn form_to_entry(form: &FormState) -> Result<Entry> {
    form.to_entry()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_entry() -> Entry {
        Entry::new("250913post1")
            .with_date("2025-09-13")
            .with_tags(["sunset", "beach"])
            .with_source(Source {
                kind: Some("post".into()),
                label: Some("Weekly".into()),
            })
            .with_media(vec![
                MediaItem::image("/galleryimg/1.jpg"),
                MediaItem::video("/galleryimg/2.mp4"),
                MediaItem::image("/galleryimg/3.jpg"),
            ])
    }

    #[test]
    fn entry_projects_into_plain_strings() {
        let form = entry_to_form(&full_entry());

        assert_eq!(form.id, "250913post1");
        assert_eq!(form.date, "2025-09-13");
        assert_eq!(form.source_type, "post");
        assert_eq!(form.source_label, "Weekly");
        assert_eq!(form.tags, "sunset, beach");
        assert_eq!(
            form.media,
            vec![
                MediaRow::new(MediaKind::Image, "/galleryimg/1.jpg"),
                MediaRow::new(MediaKind::Video, "/galleryimg/2.mp4"),
                MediaRow::new(MediaKind::Image, "/galleryimg/3.jpg"),
            ]
        );
    }

    #[test]
    fn entry_without_optional_fields_projects_to_blanks() {
        let form = entry_to_form(&Entry::new("bare"));

        assert_eq!(form.source_type, "");
        assert_eq!(form.source_label, "");
        assert_eq!(form.tags, "");
        assert!(form.media.is_empty());
    }

    #[test]
    fn legacy_images_produce_image_rows() {
        let entry: Entry =
            serde_json::from_str(r#"{"id":"old","images":["/a.jpg","/b.jpg"]}"#).unwrap();

        let form = entry_to_form(&entry);

        assert_eq!(
            form.media,
            vec![
                MediaRow::new(MediaKind::Image, "/a.jpg"),
                MediaRow::new(MediaKind::Image, "/b.jpg"),
            ]
        );
    }

    #[test]
    fn blank_id_is_rejected() {
        for id in ["", "   ", "\t\n"] {
            let form = FormState {
                id: id.to_string(),
                date: "2024-01-01".into(),
                ..FormState::default()
            };
            let err = form_to_entry(&form).unwrap_err();
            assert!(matches!(err, GalleryError::Validation(ref msg) if msg == ID_REQUIRED));
        }
    }

    #[test]
    fn tags_are_split_trimmed_and_compacted() {
        let form = FormState {
            id: "x".into(),
            tags: "sunset, , beach,".into(),
            ..FormState::default()
        };

        assert_eq!(form_to_entry(&form).unwrap().tags, ["sunset", "beach"]);
    }

    #[test]
    fn fields_are_trimmed() {
        let form = FormState {
            id: "  x ".into(),
            date: " 2024-01-01 ".into(),
            source_type: "  ".into(),
            source_label: " Label ".into(),
            ..FormState::default()
        };

        let entry = form_to_entry(&form).unwrap();

        assert_eq!(entry.id, "x");
        assert_eq!(entry.date, "2024-01-01");
        assert_eq!(
            entry.source,
            Some(Source {
                kind: None,
                label: Some("Label".into()),
            })
        );
    }

    #[test]
    fn source_is_omitted_when_both_fields_blank() {
        let form = FormState {
            id: "x".into(),
            source_type: "   ".into(),
            source_label: String::new(),
            ..FormState::default()
        };

        assert!(form_to_entry(&form).unwrap().source.is_none());
    }

    #[test]
    fn empty_rows_are_dropped_and_unknown_kinds_read_as_image() {
        let form = FormState {
            id: "x".into(),
            media: vec![
                MediaRow {
                    kind: "video".into(),
                    src: " /clip.mp4 ".into(),
                },
                MediaRow {
                    kind: "image".into(),
                    src: "   ".into(),
                },
                MediaRow {
                    kind: String::new(),
                    src: "/a.jpg".into(),
                },
                MediaRow {
                    kind: "sticker".into(),
                    src: "/b.png".into(),
                },
            ],
            ..FormState::default()
        };

        let entry = form_to_entry(&form).unwrap();

        assert_eq!(
            entry.media,
            vec![
                MediaItem::video("/clip.mp4"),
                MediaItem::image("/a.jpg"),
                MediaItem::image("/b.png"),
            ]
        );
        assert_eq!(entry.images(), vec!["/a.jpg", "/b.png"]);
    }

    #[test]
    fn round_trip_keeps_content_and_drops_empty_rows() {
        let original = full_entry();
        let mut form = entry_to_form(&original);
        form.add_media_row(MediaKind::Video);

        let back = form_to_entry(&form).unwrap();

        assert_eq!(back, original);
    }

    #[test]
    fn round_trip_normalizes_tag_whitespace() {
        let original = Entry::new("t").with_tags([" padded ", "", "ok"]);

        let back = form_to_entry(&entry_to_form(&original)).unwrap();

        assert_eq!(back.tags, ["padded", "ok"]);
    }

    #[test]
    fn row_editing_respects_bounds() {
        let mut form = FormState::default();
        let first = form.add_media_row(MediaKind::Image);
        let second = form.add_media_row(MediaKind::Video);

        assert_eq!((first, second), (0, 1));
        assert!(form.set_media_src(1, "/v.mp4"));
        assert!(form.set_media_kind(0, MediaKind::Video));
        assert!(!form.set_media_src(5, "/nope"));
        assert!(form.remove_media_row(0));
        assert!(!form.remove_media_row(3));
        assert_eq!(form.media, vec![MediaRow::new(MediaKind::Video, "/v.mp4")]);

        form.set_field(FormField::Tags, "a, b");
        assert_eq!(form.tags, "a, b");

        form.clear();
        assert!(form.is_blank());
    }
}
