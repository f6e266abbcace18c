//! Session Demo Routes
//!
//! Session-scoped cart string and page-visit counter. The opaque session id
//! travels in the `x-session-id` header; a request without one gets a fresh
//! id, echoed back in the response body so the client can carry it forward.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::session::{MemorySessionStore, SessionStore};

/// Header carrying the opaque session id
pub const SESSION_HEADER: &str = "x-session-id";

const CART_KEY: &str = "panier";
const VISITS_KEY: &str = "Nombre_Pages_Visitees";
const EMPTY_CART: &str = "Le panier est vide";

/// Session state shared across handlers
pub struct SessionState {
    pub sessions: Arc<dyn SessionStore>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(MemorySessionStore::new()),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub session_id: String,
    pub panier: String,
    pub pages_visitees: i64,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub session_id: String,
    pub panier: String,
}

#[derive(Debug, Serialize)]
pub struct VisitCountResponse {
    pub session_id: String,
    pub pages_visitees: i64,
}

// ==================
// Session Routes
// ==================

/// Create session demo routes
pub fn session_routes(state: Arc<SessionState>) -> Router {
    Router::new()
        .route("/visit", post(visit_handler))
        .route("/panier", get(cart_handler))
        .route("/visites", get(visit_count_handler))
        .with_state(state)
}

fn session_id_from(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Record a visit: writes the demo cart string and bumps the visit counter,
/// initializing it to 1 on the session's first visit.
async fn visit_handler(
    State(state): State<Arc<SessionState>>,
    headers: HeaderMap,
) -> Json<VisitResponse> {
    let session_id = session_id_from(&headers);

    state.sessions.set_string(&session_id, CART_KEY, "blabla");

    let visits = state.sessions.get_int(&session_id, VISITS_KEY).unwrap_or(0) + 1;
    state.sessions.set_int(&session_id, VISITS_KEY, visits);

    let panier = state
        .sessions
        .get_string(&session_id, CART_KEY)
        .unwrap_or_else(|| EMPTY_CART.to_string());

    Json(VisitResponse {
        session_id,
        panier,
        pages_visitees: visits,
    })
}

async fn cart_handler(
    State(state): State<Arc<SessionState>>,
    headers: HeaderMap,
) -> Json<CartResponse> {
    let session_id = session_id_from(&headers);
    let panier = state
        .sessions
        .get_string(&session_id, CART_KEY)
        .unwrap_or_else(|| EMPTY_CART.to_string());

    Json(CartResponse { session_id, panier })
}

async fn visit_count_handler(
    State(state): State<Arc<SessionState>>,
    headers: HeaderMap,
) -> Json<VisitCountResponse> {
    let session_id = session_id_from(&headers);
    let pages_visitees = state.sessions.get_int(&session_id, VISITS_KEY).unwrap_or(0);

    Json(VisitCountResponse {
        session_id,
        pages_visitees,
    })
}
