//! Profile page loader and the follow toggle action.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, Response};
use axum::Form;
use serde::Deserialize;

use crate::error::WebError;
use crate::pages::{self, profile::ProfileContent};
use crate::session::Viewer;
use crate::AppContext;

use super::{interaction_response, or_empty, InteractForm};

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub tab: Option<String>,
    pub error: Option<String>,
}

pub async fn show(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(username): Path<String>,
    Query(query): Query<ProfileQuery>,
) -> Result<Html<String>, WebError> {
    let cookie = viewer.cookie();
    let profile = ctx.backend.profile(cookie, &username).await?;
    let content = match query.tab.as_deref() {
        Some("docs") => ProfileContent::Docs(or_empty(
            ctx.backend.user_docs(cookie, &username).await,
            "profile docs",
        )),
        Some("bugs") => ProfileContent::Bugs(or_empty(
            ctx.backend.user_bugs(cookie, &username).await,
            "profile bugs",
        )),
        _ => ProfileContent::Snippets(or_empty(
            ctx.backend.user_snippets(cookie, &username).await,
            "profile snippets",
        )),
    };
    Ok(Html(pages::profile::profile_page(
        viewer.profile,
        profile,
        content,
        query.error,
    )))
}

pub async fn interact(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(username): Path<String>,
    headers: HeaderMap,
    Form(form): Form<InteractForm>,
) -> Response {
    let back = format!("/u/{username}");
    let cookie = viewer.cookie();
    let result = match form.intent.as_str() {
        "follow" => ctx
            .backend
            .follow(cookie, &username)
            .await
            .map_err(WebError::from),
        "unfollow" => ctx
            .backend
            .unfollow(cookie, &username)
            .await
            .map_err(WebError::from),
        other => Err(WebError::BadRequest(format!("Unknown intent '{other}'."))),
    };
    interaction_response(&headers, result, &back, &back)
}
