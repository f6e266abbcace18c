//! # Animal Model
//!
//! The sole domain entity. Wire field names (`nom`, `type`, `couleur`,
//! `pattes`, `imageF`) are fixed so the backing file round-trips exactly.

use serde::{Deserialize, Serialize};

/// An animal record.
///
/// `key` is the unique integer identifier, assigned at creation and immutable
/// afterwards. All other fields may be overwritten by an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub key: u64,

    /// Display name
    pub nom: String,

    /// Category label
    #[serde(rename = "type")]
    pub kind: String,

    pub couleur: String,

    /// Leg count
    pub pattes: u32,

    /// Relative URL of the associated image, empty when none was supplied
    #[serde(rename = "imageF", default)]
    pub image: String,
}

/// Animal fields as submitted by a create or edit form.
///
/// `key` is only consulted on create: a caller may ask for a specific
/// nonzero key, and the repository honors it when it is free. On edit the
/// key comes from the request path and this field is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<u64>,
    pub nom: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub couleur: String,
    pub pattes: u32,
    #[serde(rename = "imageF", default)]
    pub image: String,
}

impl AnimalDraft {
    /// Materialize the draft into a record with the given key, discarding
    /// any key the draft itself carried.
    pub fn into_animal(self, key: u64) -> Animal {
        Animal {
            key,
            nom: self.nom,
            kind: self.kind,
            couleur: self.couleur,
            pattes: self.pattes,
            image: self.image,
        }
    }
}

/// A single validation failure, reported back to the form unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Required-field checks, performed before storage is touched.
pub fn validate(draft: &AnimalDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if draft.nom.trim().is_empty() {
        errors.push(FieldError::new("nom", "Le nom est requis"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
