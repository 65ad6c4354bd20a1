//! API integration tests.
//!
//! Exercises the read endpoints through the router against a mock NAS.

mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use common::{body_json, mount_probe, unreachable_router, TestHarness};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// ---------------------------------------------------------------------------
// Info and health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_200() {
    let h = TestHarness::bare().await;
    let resp = h.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_root_reports_name_and_version() {
    let h = TestHarness::bare().await;

    for uri in ["/api", "/api/"] {
        let resp = h.get(uri).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "NAS Movie Streamer API");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}

#[tokio::test]
async fn folders_is_the_static_list() {
    let h = TestHarness::bare().await;
    let resp = h.get("/api/folders").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["folders"], serde_json::json!(["Films", "Movies", "Videos"]));

    // Never touches the NAS.
    assert!(h.nas.received_requests().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Connection test
// ---------------------------------------------------------------------------

#[tokio::test]
async fn connection_test_when_nas_answers() {
    let h = TestHarness::new().await;
    let json = body_json(h.get("/api/connection/test").await).await;

    assert_eq!(json["connected"], true);
    assert_eq!(json["message"], "Connected to NAS");
    assert!(h.ctx.nas.session().is_some());
}

#[tokio::test]
async fn connection_test_when_nas_errors() {
    let h = TestHarness::bare().await;
    mount_probe(&h.nas, 500).await;

    let resp = h.get("/api/connection/test").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["connected"], false);
    assert_eq!(json["message"], "Failed to connect to NAS");
    assert!(h.ctx.nas.session().is_none());
}

#[tokio::test]
async fn connection_test_when_nas_unreachable() {
    let resp = unreachable_router()
        .oneshot(
            Request::get("/api/connection/test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["connected"], false);
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn movies_defaults_to_films_folder() {
    let h = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/func.cgi"))
        .and(query_param("FUNC", "dir"))
        .and(query_param("PATH", "/Films"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/share/Films/Heat.mkv"></a><input name="Alien.avi">"#,
        ))
        .expect(1)
        .mount(&h.nas)
        .await;

    let resp = h.get("/api/movies").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["source"], "listing");
    assert_eq!(json["movies"][0]["name"], "Heat.mkv");
    assert_eq!(json["movies"][0]["path"], "/Films/Heat.mkv");
    assert_eq!(json["movies"][0]["format"], "mkv");
    assert!(json["movies"][0]["id"].is_string());
    assert!(json["movies"][0]["size"].is_null());
    assert!(json["movies"][0]["thumbnail"].is_null());
    assert_eq!(json["movies"][1]["format"], "avi");
}

#[tokio::test]
async fn movies_uses_requested_folder() {
    let h = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/share/Videos"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="clip.webm">"#))
        .mount(&h.nas)
        .await;

    let json = body_json(h.get("/api/movies?folder=Videos").await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["movies"][0]["path"], "/Videos/clip.webm");
}

#[tokio::test]
async fn movies_repeated_folder_uses_the_last_one() {
    let h = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/share/Videos"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="clip.webm">"#))
        .mount(&h.nas)
        .await;

    let resp = h.get("/api/movies?folder=Films&folder=Videos").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["source"], "listing");
    assert_eq!(json["movies"][0]["path"], "/Videos/clip.webm");
}

#[tokio::test]
async fn movies_repeated_folder_still_degrades_with_200() {
    let resp = unreachable_router()
        .oneshot(
            Request::get("/api/movies?folder=Films&folder=Videos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["source"], "placeholder");
}

#[tokio::test]
async fn movies_ids_change_between_requests() {
    let h = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/share/Films"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="a.mp4">"#))
        .mount(&h.nas)
        .await;

    let first = body_json(h.get("/api/movies").await).await;
    let second = body_json(h.get("/api/movies").await).await;

    assert_eq!(first["movies"][0]["path"], second["movies"][0]["path"]);
    assert_ne!(first["movies"][0]["id"], second["movies"][0]["id"]);
}

#[tokio::test]
async fn movies_degrades_to_placeholder_when_unreachable() {
    let resp = unreachable_router()
        .oneshot(Request::get("/api/movies").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["source"], "placeholder");
    assert_eq!(json["movies"][0]["name"], "Example Movie 1.mp4");
    assert_eq!(json["movies"][2]["path"], "/Films/Example Movie 3.avi");
}

#[tokio::test]
async fn movies_degrades_to_placeholder_when_everything_refuses() {
    // The probe answers but every listing and the login are 404.
    let h = TestHarness::new().await;

    let resp = h.get("/api/movies?folder=Movies").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["source"], "placeholder");
    assert_eq!(json["total"], 3);
}
