//! Service layer: where gallery entries are read from and written to.
//!
//! # Modules
//!
//! - `backend`: [`GalleryService`] trait, [`WriteSync`] and [`UploadFile`]
//! - `http`: REST client for the remote gallery API
//! - `memory`: in-process collection used as the mock mode

pub mod backend;
pub mod http;
pub mod memory;

pub use backend::{GalleryService, UploadFile, WriteSync};
pub use http::HttpGallery;
pub use memory::MemoryGallery;
