//! # Record Store Trait
//!
//! Seam between the repository and its persistence backend. Handlers only
//! ever see the repository, so the backend (JSON file, in-memory, or a
//! future database) is swappable without touching handler logic.

use crate::registry::Animal;

use super::errors::StoreResult;

/// Whole-collection persistence of Animal records.
///
/// The backing store is authoritative: `load` returns the full ordered
/// collection, `save` replaces it wholesale. There is no partial update.
pub trait RecordStore: Send + Sync {
    /// Read the full collection, in persisted (insertion) order.
    fn load(&self) -> StoreResult<Vec<Animal>>;

    /// Replace the persisted collection with the given one.
    fn save(&self, animals: &[Animal]) -> StoreResult<()>;
}
