//! Plain-text rendering of list, form and status.
//!
//! The command-line front end prints these strings as-is. Each function is pure
//! so its output can be asserted in tests.

use crate::app::Status;
use crate::form::FormState;
use crate::ui::viewmodel::ListView;
use std::fmt::Write as _;

/// Renders the list view, one line per entry.
///
/// The active row is marked with `*`, and the thumbnail URL (if any) is
/// printed on an indented second line.
#[must_use]
pub fn render_list(view: &ListView) -> String {
    let mut out = String::new();

    let _ = match &view.query {
        Some(query) => writeln!(out, "Entries ({} of {}) matching \"{query}\"", view.items.len(), view.total),
        None => writeln!(out, "Entries ({})", view.total),
    };

    if let Some(empty) = &view.empty_state {
        let _ = writeln!(out, "  {empty}");
        return out;
    }

    for item in &view.items {
        let marker = if item.is_active { '*' } else { ' ' };
        if item.meta.is_empty() {
            let _ = writeln!(out, "{marker} {}", item.label);
        } else {
            let _ = writeln!(out, "{marker} {}  {}", item.label, item.meta);
        }
        if let Some(thumbnail) = &item.thumbnail {
            let _ = writeln!(out, "    {thumbnail}");
        }
    }

    out
}

/// Renders the edit form as labelled fields followed by numbered media rows.
#[must_use]
pub fn render_form(form: &FormState) -> String {
    let mut out = String::new();

    for (label, value) in [
        ("id", &form.id),
        ("date", &form.date),
        ("source type", &form.source_type),
        ("source label", &form.source_label),
        ("tags", &form.tags),
    ] {
        let _ = writeln!(out, "{label:>12}: {value}");
    }

    if form.media.is_empty() {
        let _ = writeln!(out, "{:>12}: (none)", "media");
    } else {
        for (index, row) in form.media.iter().enumerate() {
            let _ = writeln!(out, "{:>12}: [{index}] {} {}", "media", row.kind, row.src);
        }
    }

    out
}

/// Renders the status line, prefixing errors.
#[must_use]
pub fn render_status(status: &Status) -> String {
    if status.is_error {
        format!("error: {}", status.message)
    } else {
        status.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaKind;
    use crate::form::MediaRow;
    use crate::ui::viewmodel::ListItem;

    fn item(id: &str, meta: &str, thumbnail: Option<&str>, is_active: bool) -> ListItem {
        ListItem {
            id: id.to_string(),
            label: id.to_string(),
            meta: meta.to_string(),
            thumbnail: thumbnail.map(String::from),
            is_active,
        }
    }

    #[test]
    fn list_marks_active_row_and_prints_thumbnails() {
        let view = ListView {
            items: vec![
                item("c", "2024-06-01 · Show", Some("https://h/c.jpg"), true),
                item("a", "", None, false),
            ],
            total: 2,
            query: None,
            empty_state: None,
        };

        assert_eq!(
            render_list(&view),
            "Entries (2)\n* c  2024-06-01 · Show\n    https://h/c.jpg\n  a\n"
        );
    }

    #[test]
    fn list_shows_empty_state_with_query() {
        let view = ListView {
            items: vec![],
            total: 3,
            query: Some("zzz".to_string()),
            empty_state: Some("No matching entries.".to_string()),
        };

        assert_eq!(
            render_list(&view),
            "Entries (0 of 3) matching \"zzz\"\n  No matching entries.\n"
        );
    }

    #[test]
    fn form_lists_fields_and_rows() {
        let form = FormState {
            id: "x".into(),
            tags: "a, b".into(),
            media: vec![MediaRow::new(MediaKind::Video, "/v.mp4")],
            ..FormState::default()
        };

        let out = render_form(&form);

        assert!(out.contains("          id: x\n"));
        assert!(out.contains("        tags: a, b\n"));
        assert!(out.contains("       media: [0] video /v.mp4\n"));
    }

    #[test]
    fn status_prefixes_errors() {
        assert_eq!(render_status(&Status::info("Saved.")), "Saved.");
        assert_eq!(render_status(&Status::error("Upload failed.")), "error: Upload failed.");
    }
}
