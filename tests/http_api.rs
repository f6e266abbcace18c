//! HTTP API tests
//!
//! Drives the assembled router with in-process requests against a
//! TempDir-backed store.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use menagerie::http_server::{HttpServer, HttpServerConfig};

const BOUNDARY: &str = "test-boundary";

fn test_router(temp: &TempDir) -> Router {
    let config = HttpServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: Vec::new(),
        data_file: temp.path().join("animals.json"),
        images_dir: temp.path().join("images"),
    };
    HttpServer::with_config(config).router()
}

fn text_part(name: &str, value: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    )
}

fn animal_form(nom: &str, kind: &str, couleur: &str, pattes: &str) -> String {
    format!(
        "{}{}{}{}--{BOUNDARY}--\r\n",
        text_part("nom", nom),
        text_part("type", kind),
        text_part("couleur", couleur),
        text_part("pattes", pattes),
    )
}

fn multipart_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_responds_ok() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn create_honors_requested_key_part() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    let body = format!(
        "{}{}{}{}{}--{BOUNDARY}--\r\n",
        text_part("key", "7"),
        text_part("nom", "Rex"),
        text_part("type", "chien"),
        text_part("couleur", "noir"),
        text_part("pattes", "4"),
    );
    let response = router
        .clone()
        .oneshot(multipart_request("POST", "/animals", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["key"], 7);

    // The next generated key continues above the requested one.
    let response = router
        .oneshot(multipart_request(
            "POST",
            "/animals",
            animal_form("Mia", "chat", "gris", "4"),
        ))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["key"], 8);
}

#[tokio::test]
async fn empty_registry_lists_no_pages() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    let response = router
        .oneshot(Request::get("/animals").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["animals"], serde_json::json!([]));
    assert_eq!(body["total_pages"], 0);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn create_get_delete_flow() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    // Create
    let response = router
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/animals",
            animal_form("Rex", "chien", "noir", "4"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["key"], 1);
    assert_eq!(created["nom"], "Rex");
    assert_eq!(created["type"], "chien");
    assert_eq!(created["pattes"], 4);

    // Get
    let response = router
        .clone()
        .oneshot(Request::get("/animals/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete
    let response = router
        .clone()
        .oneshot(
            Request::delete("/animals/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let response = router
        .oneshot(Request::get("/animals/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_unknown_key_still_succeeds() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    let response = router
        .oneshot(
            Request::delete("/animals/99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn create_without_nom_is_rejected_with_field_errors() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    let response = router
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/animals",
            animal_form("", "chien", "noir", "4"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["fields"][0]["field"], "nom");

    // Nothing was stored.
    let response = router
        .oneshot(Request::get("/animals").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(json_body(response).await["total"], 0);
}

#[tokio::test]
async fn update_changes_couleur_and_echoes_on_failure() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    let response = router
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/animals",
            animal_form("Rex", "chien", "noir", "4"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Successful edit
    let response = router
        .clone()
        .oneshot(multipart_request(
            "PUT",
            "/animals/1",
            animal_form("Rex", "chien", "roux", "4"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["key"], 1);
    assert_eq!(updated["couleur"], "roux");

    // Edit of a missing key: 404, submitted values echoed back
    let response = router
        .oneshot(multipart_request(
            "PUT",
            "/animals/42",
            animal_form("Ghost", "chat", "blanc", "4"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["submitted"]["nom"], "Ghost");
    assert_eq!(body["submitted"]["key"], 42);
}

#[tokio::test]
async fn listing_is_paged_five_per_page() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    for i in 0..12 {
        let response = router
            .clone()
            .oneshot(multipart_request(
                "POST",
                "/animals",
                animal_form(&format!("animal-{i}"), "chien", "noir", "4"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = router
        .clone()
        .oneshot(
            Request::get("/animals?page=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["animals"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["current_page"], 3);
    assert_eq!(body["total"], 12);

    // Beyond the last page: empty list, totals unchanged
    let response = router
        .oneshot(
            Request::get("/animals?page=99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["animals"].as_array().unwrap().len(), 0);
    assert_eq!(body["total_pages"], 3);
}

#[tokio::test]
async fn image_upload_round_trips_through_the_sidecar() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    let file_part = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
         filename=\"rex.png\"\r\nContent-Type: image/png\r\n\r\nfake png bytes\r\n"
    );
    let body = format!(
        "{}{}{}{}--{BOUNDARY}--\r\n",
        text_part("nom", "Rex"),
        text_part("type", "chien"),
        text_part("couleur", "noir"),
        file_part,
    );

    let response = router
        .clone()
        .oneshot(multipart_request("POST", "/animals", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    let image_url = created["imageF"].as_str().unwrap().to_string();
    assert!(image_url.starts_with("/images/"));
    assert!(image_url.ends_with("_rex.png"));

    // The persisted URL serves the uploaded bytes back.
    let response = router
        .oneshot(Request::get(image_url.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"fake png bytes");
}

#[tokio::test]
async fn session_counter_increments_per_visit() {
    let temp = TempDir::new().unwrap();
    let router = test_router(&temp);

    // No visit yet: cart empty, counter zero
    let response = router
        .clone()
        .oneshot(
            Request::get("/session/panier")
                .header("x-session-id", "s1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(json_body(response).await["panier"], "Le panier est vide");

    // First and second visit
    for expected in 1..=2 {
        let response = router
            .clone()
            .oneshot(
                Request::post("/session/visit")
                    .header("x-session-id", "s1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["pages_visitees"], expected);
        assert_eq!(body["panier"], "blabla");
        assert_eq!(body["session_id"], "s1");
    }

    // Another session is unaffected
    let response = router
        .oneshot(
            Request::get("/session/visites")
                .header("x-session-id", "s2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(json_body(response).await["pages_visitees"], 0);
}
