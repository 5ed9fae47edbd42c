//! Bug board loaders and actions.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, Response};
use axum::Form;
use serde::Deserialize;

use crate::error::WebError;
use crate::pages;
use crate::session::Viewer;
use crate::AppContext;

use super::{comment_body, interaction_response, ok_response, or_empty, InteractForm};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BugBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: String,
}

pub async fn board(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let bugs = or_empty(ctx.backend.bugs(viewer.cookie()).await, "bugs");
    Html(pages::bugs::board_page(viewer.profile, bugs, query.error))
}

pub async fn detail(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let bug = ctx.backend.bug(viewer.cookie(), &id).await?;
    Ok(Html(pages::bugs::detail_page(
        viewer.profile,
        bug,
        query.error,
    )))
}

pub async fn new_form(viewer: Viewer, Query(query): Query<PageQuery>) -> Html<String> {
    Html(pages::bugs::form_page(viewer.profile, query.error))
}

pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    headers: HeaderMap,
    Form(body): Form<BugBody>,
) -> Response {
    if body.title.trim().is_empty() || body.description.trim().is_empty() {
        let err = WebError::BadRequest("Title and description are required.".into());
        return interaction_response(&headers, Err(err), "/bugs", "/bugs/new");
    }
    match ctx
        .backend
        .create_bug(
            viewer.cookie(),
            body.title.trim(),
            &body.description,
            &body.severity,
        )
        .await
    {
        Ok(bug) => ok_response(&headers, &format!("/bugs/{}", bug.id)),
        Err(err) => interaction_response(&headers, Err(err.into()), "/bugs", "/bugs/new"),
    }
}

pub async fn interact(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<InteractForm>,
) -> Response {
    let back = format!("/bugs/{id}");
    let cookie = viewer.cookie();
    match form.intent.as_str() {
        // The backend's like endpoint toggles, so both intents land there.
        "like" | "unlike" => {
            let result = ctx.backend.bug_like(cookie, &id).await.map_err(WebError::from);
            interaction_response(&headers, result, &back, &back)
        }
        "comment" => {
            let result = match comment_body(&form) {
                Ok(content) => ctx
                    .backend
                    .bug_comment(cookie, &id, &content)
                    .await
                    .map_err(WebError::from),
                Err(err) => Err(err),
            };
            let anchor = format!("{back}#comments");
            interaction_response(&headers, result, &anchor, &back)
        }
        "assign" => {
            // Blank assignee clears the assignment; the backend decides what
            // usernames are valid.
            let assignee = form.assignee.as_deref().unwrap_or("").trim().to_string();
            let result = ctx
                .backend
                .bug_assign(cookie, &id, &assignee)
                .await
                .map_err(WebError::from);
            interaction_response(&headers, result, &back, &back)
        }
        "status" => {
            let status = form.status.as_deref().unwrap_or("").trim().to_string();
            let result = if status.is_empty() {
                Err(WebError::BadRequest("Pick a status.".into()))
            } else {
                ctx.backend
                    .bug_status(cookie, &id, &status)
                    .await
                    .map_err(WebError::from)
            };
            interaction_response(&headers, result, &back, &back)
        }
        "delete" => {
            let result = ctx.backend.delete_bug(cookie, &id).await.map_err(WebError::from);
            interaction_response(&headers, result, "/bugs", &back)
        }
        other => {
            let err = WebError::BadRequest(format!("Unknown intent '{other}'."));
            interaction_response(&headers, Err(err), &back, &back)
        }
    }
}
