// routes/mod.rs — HTTP surface of the web frontend.
//
// Every handler is either a loader (GET: fetch from the backend, render a
// page) or an action (POST: forward one write to the backend, then redirect
// or answer JSON). No state lives here; the backend owns all of it.
//
// Endpoints:
//   GET  /                       feed
//   GET  /snippets               browse (?lang= filter)
//   GET|POST /snippets/new       editor / create
//   GET|POST /snippets/{id}      detail / interactions
//   GET|POST /snippets/{id}/edit editor / update
//   GET  /docs                   browse (?tag= filter)
//   GET|POST /docs/new           editor / create
//   GET|POST /docs/{id}          detail / interactions
//   GET|POST /docs/{id}/edit     editor / update
//   POST /markdown/preview       markdown → HTML fragment
//   GET  /bugs                   board
//   GET|POST /bugs/new           form / create
//   GET|POST /bugs/{id}          detail / interactions
//   GET|POST /stories/new        composer / create
//   GET  /stories/{id}           viewer
//   GET|POST /u/{username}       profile / follow toggle
//   GET  /login                  sign-in screen
//   POST /logout                 cookie teardown relay
//   GET  /auth/github            OAuth start redirect
//   GET  /auth/callback          OAuth finish, Set-Cookie relay
//   GET|POST /onboarding         first-run profile form
//   GET  /healthz                liveness JSON
//   GET  /static/*               css / js / favicon

pub mod auth;
pub mod bugs;
pub mod docs;
pub mod feed;
pub mod health;
pub mod profiles;
pub mod snippets;
pub mod stories;

use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};
use tracing::{info, warn};

use crate::backend::BackendError;
use crate::error::WebError;
use crate::pages;
use crate::session::encode_component;
use crate::AppContext;

pub async fn serve(ctx: Arc<AppContext>) -> anyhow::Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let router = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!("codegram-web listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let cache_control = HeaderValue::try_from(format!(
        "public, max-age={}",
        ctx.config.assets_max_age
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("public, max-age=3600"));
    let assets = Router::new()
        .fallback_service(ServeDir::new(&ctx.config.static_dir))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            cache_control,
        ));

    Router::new()
        // Feed
        .route("/", get(feed::index))
        // Snippets
        .route("/snippets", get(snippets::browse))
        .route(
            "/snippets/new",
            get(snippets::new_form).post(snippets::create),
        )
        .route(
            "/snippets/{id}",
            get(snippets::detail).post(snippets::interact),
        )
        .route(
            "/snippets/{id}/edit",
            get(snippets::edit_form).post(snippets::update),
        )
        // Docs
        .route("/docs", get(docs::browse))
        .route("/docs/new", get(docs::new_form).post(docs::create))
        .route("/docs/{id}", get(docs::detail).post(docs::interact))
        .route("/docs/{id}/edit", get(docs::edit_form).post(docs::update))
        .route("/markdown/preview", post(docs::preview))
        // Bugs
        .route("/bugs", get(bugs::board))
        .route("/bugs/new", get(bugs::new_form).post(bugs::create))
        .route("/bugs/{id}", get(bugs::detail).post(bugs::interact))
        // Stories
        .route("/stories/new", get(stories::new_form).post(stories::create))
        .route("/stories/{id}", get(stories::view))
        // Profiles
        .route("/u/{username}", get(profiles::show).post(profiles::interact))
        // Auth
        .route("/login", get(auth::login))
        .route("/logout", post(auth::logout))
        .route("/auth/github", get(auth::github_start))
        .route("/auth/callback", get(auth::callback))
        .route(
            "/onboarding",
            get(auth::onboarding_form).post(auth::onboarding_submit),
        )
        // Ops
        .route("/healthz", get(health::healthz))
        .nest("/static", assets)
        .fallback(not_found)
        .with_state(ctx)
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(pages::render_error(404, "This page does not exist.")),
    )
        .into_response()
}

// ─── Shared loader / action plumbing ─────────────────────────────────────────

/// Form body shared by every interaction route. `intent` picks the verb;
/// the optional fields only matter to the intents that read them.
#[derive(Debug, Deserialize)]
pub struct InteractForm {
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Listing loaders never take a page down with them: a backend failure logs
/// and renders as an empty list.
pub(crate) fn or_empty<T>(result: Result<Vec<T>, BackendError>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!("failed to load {what}: {err}");
            Vec::new()
        }
    }
}

pub(crate) fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

pub(crate) fn ok_response(headers: &HeaderMap, to: &str) -> Response {
    if wants_json(headers) {
        Json(json!({ "ok": true })).into_response()
    } else {
        Redirect::to(to).into_response()
    }
}

/// Terminates an action in both content-negotiation modes. Success answers
/// `{"ok":true}` or a 303 to `ok_to`; failure answers `{"error":...}` or a
/// 303 back to `err_back` with the message in the `error` query parameter.
pub(crate) fn interaction_response(
    headers: &HeaderMap,
    result: Result<(), WebError>,
    ok_to: &str,
    err_back: &str,
) -> Response {
    match result {
        Ok(()) => ok_response(headers, ok_to),
        Err(err) => {
            let (status, message) = err.status_and_message();
            if wants_json(headers) {
                (status, Json(json!({ "error": message }))).into_response()
            } else {
                let target = format!("{err_back}?error={}", encode_component(&message));
                Redirect::to(&target).into_response()
            }
        }
    }
}

/// Non-empty trimmed comment body, or the client-side-mirror rejection.
pub(crate) fn comment_body(form: &InteractForm) -> Result<String, WebError> {
    let content = form.content.as_deref().unwrap_or("").trim();
    if content.is_empty() {
        return Err(WebError::BadRequest("Comment cannot be empty.".into()));
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wants_json_reads_accept() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers));
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        assert!(!wants_json(&headers));
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain"),
        );
        assert!(wants_json(&headers));
    }

    #[test]
    fn comment_body_trims_and_rejects_blank() {
        let form = InteractForm {
            intent: "comment".into(),
            content: Some("  hi there  ".into()),
            assignee: None,
            status: None,
        };
        assert_eq!(comment_body(&form).unwrap(), "hi there");

        let blank = InteractForm {
            intent: "comment".into(),
            content: Some("   ".into()),
            assignee: None,
            status: None,
        };
        assert!(comment_body(&blank).is_err());

        let missing = InteractForm {
            intent: "comment".into(),
            content: None,
            assignee: None,
            status: None,
        };
        assert!(comment_body(&missing).is_err());
    }
}
