//! # Record Store
//!
//! Durable, whole-collection persistence of Animal records. The JSON file
//! store is the production backend; the in-memory store backs tests and
//! ephemeral serving.

pub mod backend;
pub mod errors;
pub mod json_file;
pub mod memory;

pub use backend::RecordStore;
pub use errors::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
