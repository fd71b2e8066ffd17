//! Shared utilities for integration tests: an in-process mock controller.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use clash_dash::Server;

pub const SECRET: &str = "test-secret";

/// One request as seen by the mock controller.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    config: Value,
    rules: Value,
    providers: Value,
    requests: Vec<RecordedRequest>,
    fail_status: Option<u16>,
    malformed: bool,
}

type Shared = Arc<Mutex<MockState>>;

/// Programmable stand-in for a proxy-core controller.
#[derive(Clone)]
pub struct MockController {
    addr: SocketAddr,
    state: Shared,
}

impl MockController {
    /// Start on an ephemeral localhost port serving `config` at `/configs`.
    pub async fn start(config: Value) -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            config,
            rules: json!([]),
            providers: json!({}),
            ..Default::default()
        }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(state.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn server(&self) -> Server {
        Server::new("127.0.0.1", self.addr.port().to_string(), SECRET).with_name("mock")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn config(&self) -> Value {
        self.state.lock().unwrap().config.clone()
    }

    /// Answer every request with `status`.
    pub fn fail_with(&self, status: u16) {
        self.state.lock().unwrap().fail_status = Some(status);
    }

    pub fn recover(&self) {
        self.state.lock().unwrap().fail_status = None;
    }

    /// Answer `GET /configs` with a body that is not JSON.
    pub fn serve_malformed(&self) {
        self.state.lock().unwrap().malformed = true;
    }

    pub fn set_rules(&self, rules: Value, providers: Value) {
        let mut state = self.state.lock().unwrap();
        state.rules = rules;
        state.providers = providers;
    }

    /// Poll until at least `count` requests arrived.
    pub async fn wait_for_requests(&self, count: usize) -> Vec<RecordedRequest> {
        for _ in 0..300 {
            let requests = self.requests();
            if requests.len() >= count {
                return requests;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {} requests, got {:?}", count, self.requests());
    }
}

/// Fully populated configuration document.
pub fn sample_config() -> Value {
    json!({
        "mode": "rule",
        "log-level": "info",
        "allow-lan": true,
        "sniffing": false,
        "tun": {
            "enable": false,
            "device": "utun",
            "stack": "gVisor",
            "auto-route": true,
            "auto-detect-interface": true
        },
        "interface-name": "en0",
        "port": 7890,
        "socks-port": 7891,
        "mixed-port": 7893,
        "redir-port": 0,
        "tproxy-port": 0
    })
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };

    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_owned),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: body.clone(),
    });

    if let Some(status) = state.fail_status {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, "mock failure").into_response();
    }

    match (method.as_str(), uri.path()) {
        ("GET", "/configs") if state.malformed => (StatusCode::OK, "{\"mode\": ").into_response(),
        ("GET", "/configs") => Json(state.config.clone()).into_response(),
        ("PATCH", "/configs") => {
            apply_patch(&mut state.config, &body);
            StatusCode::NO_CONTENT.into_response()
        }
        ("PUT", "/configs")
        | ("POST", "/configs/geo")
        | ("POST", "/cache/fakeip/flush")
        | ("POST", "/upgrade") => StatusCode::NO_CONTENT.into_response(),
        ("POST", "/restart") => Json(json!({ "status": "ok" })).into_response(),
        ("GET", "/rules") => Json(json!({ "rules": state.rules.clone() })).into_response(),
        ("GET", "/providers/rules") => {
            Json(json!({ "providers": state.providers.clone() })).into_response()
        }
        ("PUT", path) if path.starts_with("/providers/rules/") => {
            let raw = &path["/providers/rules/".len()..];
            let name = percent_decode_str(raw).decode_utf8_lossy().into_owned();
            match state.providers.get_mut(&name) {
                Some(provider) => {
                    provider["updatedAt"] = json!("refreshed");
                    StatusCode::NO_CONTENT.into_response()
                }
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Apply `{ "a.b": v }` by walking nested objects.
fn apply_patch(config: &mut Value, body: &Value) {
    let Some(fields) = body.as_object() else {
        return;
    };

    for (path, value) in fields {
        let segments: Vec<&str> = path.split('.').collect();
        set_path(config, &segments, value.clone());
    }
}

fn set_path(target: &mut Value, segments: &[&str], value: Value) {
    if !target.is_object() {
        *target = json!({});
    }
    let Some(object) = target.as_object_mut() else {
        return;
    };

    match segments {
        [] => {}
        [last] => {
            object.insert(last.to_string(), value);
        }
        [head, rest @ ..] => {
            let child = object.entry(head.to_string()).or_insert_with(|| json!({}));
            set_path(child, rest, value);
        }
    }
}
