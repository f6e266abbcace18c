//! # Image Upload Sidecar
//!
//! Stores uploaded image files beside the registry and serves them back.

pub mod errors;
pub mod local;

pub use errors::{MediaError, MediaResult};
pub use local::{ImageStore, IMAGE_URL_PREFIX};
