// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod schedule_tests;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use harbour_api::{AdminCredentials, ExportWriter, UploadStore};
use harbour_persistence::Persistence;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "harbour-pass";

/// A router over fresh storage, plus handles for inspecting that storage.
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    /// Keeps the upload and export directories alive for the test.
    pub dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir: TempDir = TempDir::new().unwrap();
        let uploads_dir = dir.path().join("uploads");
        std::fs::create_dir_all(&uploads_dir).unwrap();

        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        let credentials: AdminCredentials =
            AdminCredentials::with_cost(TEST_USERNAME, TEST_PASSWORD, 4).unwrap();

        let state: AppState = AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            credentials: Arc::new(credentials),
            uploads: UploadStore::new(uploads_dir),
            exports: ExportWriter::new(dir.path()),
        };
        let app: Router = build_router(state.clone(), false);

        Self { app, state, dir }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Logs in as the configured admin and returns the session cookie.
    pub async fn login(&self) -> String {
        let body: String = format!("username={TEST_USERNAME}&password={TEST_PASSWORD}");
        let response = self.post_form("/login", &body, None).await;
        assert_eq!(location(&response), "/");
        session_cookie(&response).expect("login should set a session cookie")
    }

    /// Fetches a page as JSON.
    pub async fn page(&self, uri: &str, cookie: Option<&str>) -> Value {
        let response = self.get(uri, cookie).await;
        assert_eq!(response.status(), 200, "GET {uri}");
        body_json(response).await
    }

    pub async fn ship_count(&self) -> usize {
        self.state.persistence.lock().await.count_ships().unwrap()
    }

    pub async fn invoice_count(&self) -> usize {
        self.state.persistence.lock().await.count_invoices().unwrap()
    }
}

/// The `name=value` part of the response's session cookie.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(ToString::to_string)
}

pub fn location(response: &Response<Body>) -> String {
    assert_eq!(response.status(), 303, "expected a redirect");
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// The messages of every flash in a page, in order.
pub fn flash_messages(page: &Value) -> Vec<String> {
    page["flashes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|flash| flash["message"].as_str().unwrap().to_string())
        .collect()
}
