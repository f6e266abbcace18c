//! Animal HTTP Routes
//!
//! CRUD endpoints over the animal registry: paged listing, single-record
//! lookup, and multipart create/edit that accept an optional image upload.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::media::{ImageStore, MediaError};
use crate::registry::{
    paginate, Animal, AnimalDraft, AnimalRepository, EditError, FieldError, RegistryError,
    DEFAULT_PAGE_SIZE,
};
use crate::store::JsonFileStore;

// ==================
// Shared State
// ==================

/// Animal state shared across handlers
pub struct AnimalState {
    pub repository: AnimalRepository<JsonFileStore>,
    pub images: ImageStore,
}

impl AnimalState {
    pub fn new(data_file: PathBuf, images_dir: PathBuf) -> Self {
        Self {
            repository: AnimalRepository::new(JsonFileStore::new(data_file)),
            images: ImageStore::new(images_dir),
        }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct ListAnimalsQuery {
    #[serde(default)]
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AnimalsListResponse {
    pub animals: Vec<Animal>,
    pub current_page: i64,
    pub total_pages: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(code: u16, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            fields: Vec::new(),
        }
    }

    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self {
            error: "Validation failed".to_string(),
            code: 422,
            fields,
        }
    }
}

/// Edit failure body: the submitted values ride along so the client form
/// stays populated instead of losing the user's input.
#[derive(Debug, Serialize)]
pub struct EditFailureResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
    pub submitted: Animal,
}

// ==================
// Animal Routes
// ==================

/// Create animal routes
pub fn animal_routes(state: Arc<AnimalState>) -> Router {
    Router::new()
        .route("/", get(list_animals_handler))
        .route("/", post(create_animal_handler))
        .route("/:key", get(get_animal_handler))
        .route("/:key", put(update_animal_handler))
        .route("/:key", delete(delete_animal_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn registry_error(e: RegistryError) -> (StatusCode, Json<ErrorResponse>) {
    let code = e.status_code();
    let body = match e {
        RegistryError::Validation(fields) => ErrorResponse::validation(fields),
        other => ErrorResponse::new(code, other.to_string()),
    };
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(body),
    )
}

/// Form decode failures, separated from domain validation.
enum FormError {
    /// Multipart body could not be read
    Malformed(String),
    /// Image sidecar rejected or failed the upload
    Media(MediaError),
    /// Field-level problems, with the best-effort draft for echoing back
    Invalid(Vec<FieldError>, AnimalDraft),
}

/// Read the animal form fields out of a multipart body.
///
/// Accepted parts: `key` (optional requested key on create, ignored on
/// edit where the path key wins), `nom`, `type`, `couleur`, `pattes`,
/// `imageF` (the current image URL as plain text) and `image` (an optional
/// file upload). A non-empty upload is written through the image store and
/// its URL replaces whatever `imageF` carried. Unknown or unparsable `key`
/// parts and unknown part names are ignored.
async fn read_animal_form(
    mut multipart: Multipart,
    images: &ImageStore,
) -> Result<AnimalDraft, FormError> {
    let mut key: Option<u64> = None;
    let mut nom = String::new();
    let mut kind = String::new();
    let mut couleur = String::new();
    let mut pattes_raw: Option<String> = None;
    let mut image = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FormError::Malformed(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "key" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| FormError::Malformed(e.to_string()))?;
                key = raw.trim().parse().ok();
            }
            "nom" => {
                nom = field
                    .text()
                    .await
                    .map_err(|e| FormError::Malformed(e.to_string()))?;
            }
            "type" => {
                kind = field
                    .text()
                    .await
                    .map_err(|e| FormError::Malformed(e.to_string()))?;
            }
            "couleur" => {
                couleur = field
                    .text()
                    .await
                    .map_err(|e| FormError::Malformed(e.to_string()))?;
            }
            "pattes" => {
                pattes_raw = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| FormError::Malformed(e.to_string()))?,
                );
            }
            "imageF" => {
                image = field
                    .text()
                    .await
                    .map_err(|e| FormError::Malformed(e.to_string()))?;
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Malformed(e.to_string()))?;
                // An empty file part means the form's picker was left blank.
                if !data.is_empty() {
                    image = images.store(&file_name, &data).map_err(FormError::Media)?;
                }
            }
            _ => {}
        }
    }

    let mut errors = Vec::new();
    let pattes = match pattes_raw.as_deref().map(str::trim) {
        None | Some("") => 0,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            errors.push(FieldError::new(
                "pattes",
                "Le nombre de pattes doit etre un entier positif",
            ));
            0
        }),
    };

    let draft = AnimalDraft {
        key,
        nom,
        kind,
        couleur,
        pattes,
        image,
    };

    if errors.is_empty() {
        Ok(draft)
    } else {
        Err(FormError::Invalid(errors, draft))
    }
}

fn empty_draft() -> AnimalDraft {
    AnimalDraft {
        key: None,
        nom: String::new(),
        kind: String::new(),
        couleur: String::new(),
        pattes: 0,
        image: String::new(),
    }
}

// ==================
// Handlers
// ==================

async fn list_animals_handler(
    State(state): State<Arc<AnimalState>>,
    Query(query): Query<ListAnimalsQuery>,
) -> Result<Json<AnimalsListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let animals = state.repository.get_all().map_err(registry_error)?;
    let page = paginate(&animals, query.page.unwrap_or(1), DEFAULT_PAGE_SIZE);

    Ok(Json(AnimalsListResponse {
        current_page: page.current_page,
        total_pages: page.total_pages,
        total: page.total,
        animals: page.items.to_vec(),
    }))
}

async fn get_animal_handler(
    State(state): State<Arc<AnimalState>>,
    Path(key): Path<u64>,
) -> Result<Json<Animal>, (StatusCode, Json<ErrorResponse>)> {
    let animal = state
        .repository
        .find(key)
        .map_err(registry_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(404, format!("No animal with key {}", key))),
            )
        })?;

    Ok(Json(animal))
}

async fn create_animal_handler(
    State(state): State<Arc<AnimalState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Animal>), (StatusCode, Json<ErrorResponse>)> {
    let draft = match read_animal_form(multipart, &state.images).await {
        Ok(draft) => draft,
        Err(FormError::Malformed(msg)) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(400, msg)),
            ));
        }
        Err(FormError::Media(e)) => {
            let code = e.status_code();
            return Err((
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                Json(ErrorResponse::new(code, e.to_string())),
            ));
        }
        Err(FormError::Invalid(fields, _)) => {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::validation(fields)),
            ));
        }
    };

    let animal = state.repository.add(draft).map_err(registry_error)?;
    Ok((StatusCode::CREATED, Json(animal)))
}

async fn update_animal_handler(
    State(state): State<Arc<AnimalState>>,
    Path(key): Path<u64>,
    multipart: Multipart,
) -> Result<Json<Animal>, (StatusCode, Json<EditFailureResponse>)> {
    let draft = match read_animal_form(multipart, &state.images).await {
        Ok(draft) => draft,
        Err(FormError::Malformed(msg)) => {
            return Err(edit_failure(400, msg, Vec::new(), empty_draft(), key));
        }
        Err(FormError::Media(e)) => {
            return Err(edit_failure(
                e.status_code(),
                e.to_string(),
                Vec::new(),
                empty_draft(),
                key,
            ));
        }
        Err(FormError::Invalid(fields, draft)) => {
            return Err(edit_failure(
                422,
                "Validation failed",
                fields,
                draft,
                key,
            ));
        }
    };

    match state.repository.update(key, draft.clone()) {
        Ok(animal) => Ok(Json(animal)),
        Err(EditError::Validation(fields)) => {
            Err(edit_failure(422, "Validation failed", fields, draft, key))
        }
        Err(e @ EditError::NotFound(_)) => {
            Err(edit_failure(404, e.to_string(), Vec::new(), draft, key))
        }
        Err(EditError::Storage(e)) => Err(edit_failure(
            e.status_code(),
            e.to_string(),
            Vec::new(),
            draft,
            key,
        )),
    }
}

fn edit_failure(
    code: u16,
    error: impl Into<String>,
    fields: Vec<FieldError>,
    draft: AnimalDraft,
    key: u64,
) -> (StatusCode, Json<EditFailureResponse>) {
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(EditFailureResponse {
            error: error.into(),
            code,
            fields,
            submitted: draft.into_animal(key),
        }),
    )
}

async fn delete_animal_handler(
    State(state): State<Arc<AnimalState>>,
    Path(key): Path<u64>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    // Absence is tolerated: deleting an unknown key succeeds with no effect.
    state.repository.delete(key).map_err(registry_error)?;
    Ok(StatusCode::NO_CONTENT)
}
