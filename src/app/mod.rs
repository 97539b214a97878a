//! Application layer coordinating state, events and status.
//!
//! This module sits between the front end (main.rs) and the domain/service
//! layers. Every user intent becomes an [`Event`]:
//!
//! ```text
//! CLI → Event → handle_event → Store → GalleryService
//!                    ↓
//!              Status line
//! ```
//!
//! # Modules
//!
//! - [`handler`]: Event type and its dispatch onto the store
//! - [`shared`]: In-flight guard for multiple event producers
//! - [`state`]: The store: collection, selection, form, search, status
//! - [`status`]: Status line messages

pub mod handler;
pub mod shared;
pub mod state;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use handler::{handle_event, Event};
pub use shared::SharedStore;
pub use state::Store;
pub use status::Status;
