//! # Animal Registry
//!
//! Domain model, validation, CRUD repository, and the pagination helper for
//! listing pages.

pub mod animal;
pub mod errors;
pub mod pagination;
pub mod repository;

pub use animal::{validate, Animal, AnimalDraft, FieldError};
pub use errors::{EditError, RegistryError, RegistryResult};
pub use pagination::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use repository::AnimalRepository;
