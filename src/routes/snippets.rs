//! Snippet loaders and actions.

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
pub struct BrowseQuery {
    pub lang: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SnippetBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub code: String,
}

impl SnippetBody {
    fn validate(&self) -> Result<(), WebError> {
        if self.title.trim().is_empty() || self.code.trim().is_empty() {
            return Err(WebError::BadRequest("Title and code are required.".into()));
        }
        Ok(())
    }
}

pub async fn browse(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Query(query): Query<BrowseQuery>,
) -> Html<String> {
    let lang = query.lang.filter(|l| !l.trim().is_empty());
    let snippets = or_empty(
        ctx.backend.snippets(viewer.cookie(), lang.as_deref()).await,
        "snippets",
    );
    Html(pages::snippets::browse_page(
        viewer.profile,
        snippets,
        lang,
        query.error,
    ))
}

pub async fn detail(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let snippet = ctx.backend.snippet(viewer.cookie(), &id).await?;
    Ok(Html(pages::snippets::detail_page(
        viewer.profile,
        snippet,
        query.error,
    )))
}

pub async fn new_form(viewer: Viewer, Query(query): Query<PageQuery>) -> Html<String> {
    Html(pages::snippets::form_page(viewer.profile, None, query.error))
}

pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    headers: HeaderMap,
    Form(body): Form<SnippetBody>,
) -> Response {
    if let Err(err) = body.validate() {
        return interaction_response(&headers, Err(err), "/snippets", "/snippets/new");
    }
    match ctx
        .backend
        .create_snippet(
            viewer.cookie(),
            body.title.trim(),
            &body.description,
            &body.language,
            &body.code,
        )
        .await
    {
        Ok(snippet) => ok_response(&headers, &format!("/snippets/{}", snippet.id)),
        Err(err) => interaction_response(&headers, Err(err.into()), "/snippets", "/snippets/new"),
    }
}

pub async fn edit_form(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let snippet = ctx.backend.snippet(viewer.cookie(), &id).await?;
    Ok(Html(pages::snippets::form_page(
        viewer.profile,
        Some(snippet),
        query.error,
    )))
}

pub async fn update(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(body): Form<SnippetBody>,
) -> Response {
    let detail = format!("/snippets/{id}");
    let edit = format!("/snippets/{id}/edit");
    if let Err(err) = body.validate() {
        return interaction_response(&headers, Err(err), &detail, &edit);
    }
    let result = ctx
        .backend
        .update_snippet(
            viewer.cookie(),
            &id,
            body.title.trim(),
            &body.description,
            &body.language,
            &body.code,
        )
        .await
        .map(|_| ())
        .map_err(WebError::from);
    interaction_response(&headers, result, &detail, &edit)
}

/// Intent dispatch for a single snippet. The form's `intent` field picks the
/// backend write; everything else about the request is forwarded as-is.
pub async fn interact(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<InteractForm>,
) -> Response {
    let back = format!("/snippets/{id}");
    let cookie = viewer.cookie();
    match form.intent.as_str() {
        "like" | "unlike" | "bookmark" | "unbookmark" => {
            let result = ctx
                .backend
                .snippet_react(cookie, &id, &form.intent)
                .await
                .map_err(WebError::from);
            interaction_response(&headers, result, &back, &back)
        }
        "comment" => {
            let result = match comment_body(&form) {
                Ok(content) => ctx
                    .backend
                    .snippet_comment(cookie, &id, &content)
                    .await
                    .map_err(WebError::from),
                Err(err) => Err(err),
            };
            let anchor = format!("{back}#comments");
            interaction_response(&headers, result, &anchor, &back)
        }
        "delete" => {
            let result = ctx
                .backend
                .delete_snippet(cookie, &id)
                .await
                .map_err(WebError::from);
            interaction_response(&headers, result, "/snippets", &back)
        }
        other => {
            let err = WebError::BadRequest(format!("Unknown intent '{other}'."));
            interaction_response(&headers, Err(err), &back, &back)
        }
    }
}
