use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use intake_backend::{
    build_router, config::Config, database::memory::MemoryApplicationStore,
    database::store::ApplicationStore, AppState,
};
use serde_json::Value as JsonValue;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryApplicationStore>,
    pub media: TempDir,
}

#[allow(dead_code)]
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        data: &'a [u8],
    },
}

pub fn config_for(media: &TempDir) -> Config {
    Config {
        media_root: media.path().to_path_buf(),
        debug: true,
        ..Config::default()
    }
}

pub fn setup_app() -> TestApp {
    let media = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(MemoryApplicationStore::new());
    let state = AppState::new(config_for(&media), store.clone());
    TestApp {
        router: build_router(state),
        store,
        media,
    }
}

#[allow(dead_code)]
pub fn setup_with_store(store: Arc<dyn ApplicationStore>) -> (Router, TempDir) {
    let media = tempfile::tempdir().expect("tempdir");
    let state = AppState::new(config_for(&media), store);
    (build_router(state), media)
}

pub async fn send(router: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = router.clone().oneshot(req).await.expect("infallible response");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

#[allow(dead_code)]
pub fn json_request(uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let boundary = "intake-test-boundary";
    let mut body = Vec::new();
    for part in parts {
        body.extend(format!("--{boundary}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                data,
            } => {
                body.extend(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    )
                    .as_bytes(),
                );
                body.extend(b"Content-Type: application/octet-stream\r\n\r\n");
                body.extend(*data);
            }
        }
        body.extend(b"\r\n");
    }
    body.extend(format!("--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
