//! # In-Memory Record Store
//!
//! Backing store for tests and ephemeral serving. Same whole-collection
//! semantics as the file store, minus the disk.

use std::sync::RwLock;

use crate::registry::Animal;

use super::backend::RecordStore;
use super::errors::{StoreError, StoreResult};

/// In-memory record store
#[derive(Debug, Default)]
pub struct MemoryStore {
    animals: RwLock<Vec<Animal>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an initial collection.
    pub fn with_animals(animals: Vec<Animal>) -> Self {
        Self {
            animals: RwLock::new(animals),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> StoreResult<Vec<Animal>> {
        let animals = self
            .animals
            .read()
            .map_err(|_| StoreError::ReadFailed("Lock poisoned".to_string()))?;
        Ok(animals.clone())
    }

    fn save(&self, animals: &[Animal]) -> StoreResult<()> {
        let mut guard = self
            .animals
            .write()
            .map_err(|_| StoreError::WriteFailed("Lock poisoned".to_string()))?;
        *guard = animals.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_collection() {
        let store = MemoryStore::new();
        let animal = Animal {
            key: 1,
            nom: "Rex".to_string(),
            kind: "chien".to_string(),
            couleur: "noir".to_string(),
            pattes: 4,
            image: String::new(),
        };

        store.save(&[animal.clone()]).unwrap();
        assert_eq!(store.load().unwrap(), vec![animal]);

        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
