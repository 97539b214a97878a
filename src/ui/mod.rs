//! Presentation support for the command-line front end.
//!
//! ```text
//! Store → compute_list_view → ListView → render_list → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: List view model types
//! - [`renderer`]: Plain-text rendering of list, form and status

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_form, render_list, render_status};
pub use viewmodel::{ListItem, ListView};
