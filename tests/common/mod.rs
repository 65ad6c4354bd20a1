//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which starts a mock NAS and builds a full
//! [`AppContext`] pointed at it. Tests drive the router with
//! `tower::ServiceExt::oneshot` and script the NAS with wiremock.

#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use nas_cinema::config::{Config, NasConfig};
use nas_cinema::server::{create_router, AppContext};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const NAS_USER: &str = "admin";
pub const NAS_PASS: &str = "hunter2";

/// Base URL nothing listens on.
pub const UNREACHABLE_NAS: &str = "http://127.0.0.1:1";

/// Test harness wrapping a mock NAS and an [`AppContext`] that talks to it.
pub struct TestHarness {
    pub nas: MockServer,
    pub ctx: AppContext,
}

impl TestHarness {
    /// Start a mock NAS whose base URL answers 200.
    pub async fn new() -> Self {
        let nas = MockServer::start().await;
        mount_probe(&nas, 200).await;
        Self::with_mock(nas)
    }

    /// Start a mock NAS with nothing mounted.
    pub async fn bare() -> Self {
        Self::with_mock(MockServer::start().await)
    }

    fn with_mock(nas: MockServer) -> Self {
        let ctx = AppContext::new(config_for(&nas.uri()));
        Self { nas, ctx }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone(), None)
    }

    /// Send a GET through the router.
    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router().oneshot(request).await.unwrap()
    }
}

/// Config pointing at `base_url` with short timeouts.
pub fn config_for(base_url: &str) -> Config {
    Config {
        nas: NasConfig {
            base_url: base_url.to_string(),
            username: NAS_USER.to_string(),
            password: NAS_PASS.to_string(),
            probe_timeout_secs: 2,
            listing_timeout_secs: 1,
            stream_setup_timeout_secs: 2,
            ..NasConfig::default()
        },
        ..Config::default()
    }
}

/// Router for a NAS that cannot be reached at all.
pub fn unreachable_router() -> Router {
    create_router(AppContext::new(config_for(UNREACHABLE_NAS)), None)
}

pub async fn mount_probe(nas: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(status))
        .mount(nas)
        .await;
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Start a bare TCP NAS that answers one request per connection.
///
/// `respond` gets the request target (e.g. `/share/Films/a.mp4`) and returns
/// the raw bytes written back before the connection is closed. Lets tests
/// send bodies shorter than their advertised `Content-Length`.
pub async fn spawn_raw_nas<F>(respond: F) -> String
where
    F: Fn(&str) -> Vec<u8> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let respond = respond.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&head);
                let target = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let _ = socket.write_all(&respond(&target)).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Raw HTTP/1.1 response advertising `content_length` but carrying `body`.
pub fn raw_response(status: u16, body: &[u8], content_length: usize) -> Vec<u8> {
    let mut bytes = format!(
        "HTTP/1.1 {} OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status, content_length
    )
    .into_bytes();
    bytes.extend_from_slice(body);
    bytes
}
