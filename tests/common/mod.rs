//! Shared harness for the integration tests: a stub CodeGram backend that
//! records every request it receives and answers with canned JSON, plus a
//! real web server spawned on a free port and wired to it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::json;

use codegram_web::config::WebConfig;
use codegram_web::{routes, AppContext};

/// Cookie header the tests send. The proxy must forward it byte for byte,
/// sibling cookies included.
pub const SESSION_COOKIE: &str = "cg_session=tok-123; theme=dark";

/// One request as seen by the stub backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path plus query string, exactly as received.
    pub path: String,
    pub cookie: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: String,
    set_cookies: Vec<String>,
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<String, Canned>>>,
}

/// In-process stand-in for the backend API. Canned responses are keyed by
/// `"METHOD /path"` (query string ignored); anything unregistered answers
/// 404 so tests notice unexpected traffic.
pub struct StubBackend {
    pub url: String,
    state: StubState,
}

impl StubBackend {
    pub async fn spawn() -> Self {
        let state = StubState::default();
        let router = Router::new()
            .fallback(record_and_answer)
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    /// Register a canned response, e.g. `respond("GET /api/bugs", 200, "[]")`.
    pub fn respond(&self, route: &str, status: u16, body: &str) {
        self.respond_with_cookies(route, status, body, &[]);
    }

    /// Like [`StubBackend::respond`] but with `Set-Cookie` headers attached.
    pub fn respond_with_cookies(&self, route: &str, status: u16, body: &str, cookies: &[&str]) {
        self.state.responses.lock().unwrap().insert(
            route.to_string(),
            Canned {
                status,
                body: body.to_string(),
                set_cookies: cookies.iter().map(|c| c.to_string()).collect(),
            },
        );
    }

    /// Everything the stub has received so far, in order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests whose path starts with `prefix`.
    pub fn requests_to(&self, prefix: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(prefix))
            .collect()
    }
}

async fn record_and_answer(
    State(stub): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    stub.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        cookie,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let key = format!("{} {}", method, uri.path());
    let canned = stub.responses.lock().unwrap().get(&key).cloned();
    match canned {
        Some(c) => {
            let status = StatusCode::from_u16(c.status).unwrap_or(StatusCode::OK);
            let mut resp = (status, c.body).into_response();
            resp.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            for cookie in c.set_cookies {
                resp.headers_mut()
                    .append(header::SET_COOKIE, HeaderValue::try_from(cookie).unwrap());
            }
            resp
        }
        None => (
            StatusCode::NOT_FOUND,
            r#"{"error":"no canned response"}"#.to_string(),
        )
            .into_response(),
    }
}

/// Find a free local port by binding to port 0.
pub fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// A running web server plus its stub backend. The client never follows
/// redirects; the `Location` headers are what the tests assert on.
pub struct TestApp {
    pub url: String,
    pub backend: StubBackend,
    pub client: reqwest::Client,
}

pub async fn spawn_app() -> TestApp {
    let backend = StubBackend::spawn().await;
    let port = find_free_port();
    let config = WebConfig {
        port,
        bind_address: "127.0.0.1".to_string(),
        backend_url: backend.url.clone(),
        session_cookie: "cg_session".to_string(),
        static_dir: PathBuf::from("static"),
        assets_max_age: 3600,
        request_timeout_secs: 2,
        log: "error".to_string(),
        log_format: "pretty".to_string(),
        external_login: None,
    };
    let ctx = Arc::new(AppContext::new(config).unwrap());
    tokio::spawn(async move {
        let _ = routes::serve(ctx).await;
    });

    let url = format!("http://127.0.0.1:{port}");
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    // Poll until the spawned server accepts connections.
    for _ in 0..50 {
        if client.get(format!("{url}/healthz")).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    TestApp {
        url,
        backend,
        client,
    }
}

impl TestApp {
    /// Can the session lookup so requests carrying [`SESSION_COOKIE`] resolve
    /// to this signed-in user.
    pub fn login_as(&self, username: &str) {
        self.backend
            .respond("GET /api/auth/me", 200, &me_json(username));
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.url))
            .header("Cookie", SESSION_COOKIE)
            .send()
            .await
            .unwrap()
    }

    pub async fn get_anon(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.url))
            .send()
            .await
            .unwrap()
    }

    /// Form POST the way a browser submits one: expects a 303 back.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.url))
            .header("Cookie", SESSION_COOKIE)
            .form(fields)
            .send()
            .await
            .unwrap()
    }

    /// Form POST the way `app.js` submits one: `Accept: application/json`.
    pub async fn post_json_mode(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.url))
            .header("Cookie", SESSION_COOKIE)
            .header("Accept", "application/json")
            .form(fields)
            .send()
            .await
            .unwrap()
    }
}

// ─── Canned payloads ──────────────────────────────────────────────────────────

pub fn me_json(username: &str) -> String {
    json!({
        "id": format!("u-{username}"),
        "username": username,
        "displayName": username,
        "bio": "ships code",
        "onboarded": true,
    })
    .to_string()
}

pub fn snippet_json(id: &str, title: &str, author: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "Walks a directory tree without recursion.",
        "language": "rust",
        "code": "fn main() {\n    println!(\"hello\");\n}\n",
        "author": { "username": author, "displayName": author },
        "createdAt": "2026-08-20T10:00:00Z",
        "likeCount": 3,
        "commentCount": 1,
        "liked": false,
        "bookmarked": false,
        "comments": [
            {
                "id": "c-1",
                "author": { "username": "sam" },
                "content": "Neat trick.",
                "createdAt": "2026-08-20T11:00:00Z"
            }
        ]
    })
}

pub fn doc_json(id: &str, title: &str, author: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "summary": "How the retry queue drains.",
        "content": "# Overview\n\nRequests land in a queue.",
        "tags": ["internals", "queues"],
        "author": { "username": author },
        "createdAt": "2026-08-19T09:00:00Z",
        "likeCount": 5,
        "commentCount": 0,
        "liked": false,
        "bookmarked": false,
        "comments": []
    })
}

pub fn bug_json(id: &str, title: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "Steps:\n\n1. open the page\n2. watch it fail",
        "status": status,
        "severity": "high",
        "author": { "username": "mara" },
        "assignee": null,
        "createdAt": "2026-08-18T15:00:00Z",
        "likeCount": 2,
        "commentCount": 0,
        "liked": false,
        "comments": []
    })
}

pub fn story_json(id: &str, author: &str) -> serde_json::Value {
    json!({
        "id": id,
        "author": { "username": author },
        "caption": "shipping a fix",
        "language": "rust",
        "code": "let fixed = true;",
        "createdAt": "2026-08-25T08:00:00Z",
        "expiresAt": "2026-08-26T08:00:00Z",
        "viewed": false
    })
}
