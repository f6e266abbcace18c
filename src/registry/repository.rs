//! # Animal Repository
//!
//! CRUD semantics keyed by `key`, built on a [`RecordStore`]. Every
//! operation is a full load-mutate-save cycle against the backing store:
//! reads are always fresh at the cost of one I/O round trip per call, which
//! is acceptable at registry scale.
//!
//! Mutations run under a process-local mutex so two requests in the same
//! process cannot interleave their load and save and truncate the file.
//! Across processes (or across the two calls of the fetch-then-`save_all`
//! update protocol) the last save still wins; that lost-update window is a
//! known limitation of the whole-file design.

use std::sync::Mutex;

use crate::observability::Logger;
use crate::store::RecordStore;

use super::animal::{validate, Animal, AnimalDraft};
use super::errors::{EditError, RegistryError, RegistryResult};

/// Repository exposing CRUD operations over a record store.
pub struct AnimalRepository<S: RecordStore> {
    store: S,
    write_guard: Mutex<()>,
}

impl<S: RecordStore> AnimalRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_guard: Mutex::new(()),
        }
    }

    /// Return the full collection, re-read from the store on every call.
    pub fn get_all(&self) -> RegistryResult<Vec<Animal>> {
        Ok(self.store.load()?)
    }

    /// Look up a single animal by key.
    pub fn find(&self, key: u64) -> RegistryResult<Option<Animal>> {
        Ok(self.store.load()?.into_iter().find(|a| a.key == key))
    }

    /// Validate and append a new animal.
    ///
    /// Key policy: a nonzero key requested in the draft is honored when no
    /// existing record holds it. Otherwise the key is max existing + 1, or 1
    /// for an empty collection, saturating at `u64::MAX`. The assigned key is
    /// unique among all keys present at the time of the call. Returns the
    /// stored record.
    pub fn add(&self, draft: AnimalDraft) -> RegistryResult<Animal> {
        validate(&draft).map_err(RegistryError::Validation)?;

        let _guard = self.lock();
        let mut animals = self.store.load()?;

        let key = match draft.key {
            Some(k) if k != 0 && animals.iter().all(|a| a.key != k) => k,
            _ => animals
                .iter()
                .map(|a| a.key)
                .max()
                .unwrap_or(0)
                .saturating_add(1),
        };
        let animal = draft.into_animal(key);
        animals.push(animal.clone());
        self.store.save(&animals)?;

        Logger::info(
            "ANIMAL_ADDED",
            &[("key", &key.to_string()), ("nom", &animal.nom)],
        );
        Ok(animal)
    }

    /// Remove the animal with the given key.
    ///
    /// A missing key is a silent no-op: the call succeeds and returns
    /// `false`, leaving the collection untouched. Existence is only reported
    /// on the lookup paths (`find`), not re-checked here.
    pub fn delete(&self, key: u64) -> RegistryResult<bool> {
        let _guard = self.lock();
        let mut animals = self.store.load()?;

        let len_before = animals.len();
        animals.retain(|a| a.key != key);
        if animals.len() == len_before {
            return Ok(false);
        }

        self.store.save(&animals)?;
        Logger::info("ANIMAL_DELETED", &[("key", &key.to_string())]);
        Ok(true)
    }

    /// Persist an already-mutated collection wholesale.
    ///
    /// This is the save half of the fetch-then-save update protocol: the
    /// caller fetched with `get_all`, mutated a record in place, and hands
    /// the entire collection back. The two calls are not atomic together;
    /// prefer [`AnimalRepository::update`] when the mutation is an edit by
    /// key.
    pub fn save_all(&self, animals: &[Animal]) -> RegistryResult<()> {
        let _guard = self.lock();
        Ok(self.store.save(animals)?)
    }

    /// Overwrite all non-key fields of the animal with the given key, as a
    /// single load-mutate-save under the repository guard.
    pub fn update(&self, key: u64, draft: AnimalDraft) -> Result<Animal, EditError> {
        validate(&draft).map_err(EditError::Validation)?;

        let _guard = self.lock();
        let mut animals = self.store.load()?;

        let slot = animals
            .iter_mut()
            .find(|a| a.key == key)
            .ok_or(EditError::NotFound(key))?;
        *slot = draft.into_animal(key);
        let updated = slot.clone();

        self.store.save(&animals)?;
        Logger::info("ANIMAL_UPDATED", &[("key", &key.to_string())]);
        Ok(updated)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned guard only means another mutation panicked mid-flight;
        // the store itself is still consistent (saves are atomic renames).
        self.write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
