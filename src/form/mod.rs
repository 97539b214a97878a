//! Edit-form layer.
//!
//! - [`state`]: `FormState`, `MediaRow`, `FormField` and the entry⇄form mapping

pub mod state;

pub use state::{entry_to_form, form_to_entry, FormField, FormState, MediaRow};
