//! Doc loaders and actions, plus the markdown preview endpoint the editor's
//! preview pane posts to.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, Response};
use axum::Form;
use serde::Deserialize;

use crate::error::WebError;
use crate::pages;
use crate::render::markdown_to_html;
use crate::session::Viewer;
use crate::AppContext;

use super::{comment_body, interaction_response, ok_response, or_empty, InteractForm};

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub tag: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DocBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub content: String,
}

impl DocBody {
    fn validate(&self) -> Result<(), WebError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(WebError::BadRequest(
                "Title and content are required.".into(),
            ));
        }
        Ok(())
    }

    fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

pub async fn browse(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Query(query): Query<BrowseQuery>,
) -> Html<String> {
    let tag = query.tag.filter(|t| !t.trim().is_empty());
    let docs = or_empty(ctx.backend.docs(viewer.cookie(), tag.as_deref()).await, "docs");
    Html(pages::docs::browse_page(
        viewer.profile,
        docs,
        tag,
        query.error,
    ))
}

pub async fn detail(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let doc = ctx.backend.doc(viewer.cookie(), &id).await?;
    Ok(Html(pages::docs::detail_page(
        viewer.profile,
        doc,
        query.error,
    )))
}

pub async fn new_form(viewer: Viewer, Query(query): Query<PageQuery>) -> Html<String> {
    Html(pages::docs::form_page(viewer.profile, None, query.error))
}

pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    headers: HeaderMap,
    Form(body): Form<DocBody>,
) -> Response {
    if let Err(err) = body.validate() {
        return interaction_response(&headers, Err(err), "/docs", "/docs/new");
    }
    let tags = body.tag_list();
    match ctx
        .backend
        .create_doc(
            viewer.cookie(),
            body.title.trim(),
            &body.summary,
            &tags,
            &body.content,
        )
        .await
    {
        Ok(doc) => ok_response(&headers, &format!("/docs/{}", doc.id)),
        Err(err) => interaction_response(&headers, Err(err.into()), "/docs", "/docs/new"),
    }
}

pub async fn edit_form(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let doc = ctx.backend.doc(viewer.cookie(), &id).await?;
    Ok(Html(pages::docs::form_page(
        viewer.profile,
        Some(doc),
        query.error,
    )))
}

pub async fn update(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(body): Form<DocBody>,
) -> Response {
    let detail = format!("/docs/{id}");
    let edit = format!("/docs/{id}/edit");
    if let Err(err) = body.validate() {
        return interaction_response(&headers, Err(err), &detail, &edit);
    }
    let tags = body.tag_list();
    let result = ctx
        .backend
        .update_doc(
            viewer.cookie(),
            &id,
            body.title.trim(),
            &body.summary,
            &tags,
            &body.content,
        )
        .await
        .map(|_| ())
        .map_err(WebError::from);
    interaction_response(&headers, result, &detail, &edit)
}

pub async fn interact(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<InteractForm>,
) -> Response {
    let back = format!("/docs/{id}");
    let cookie = viewer.cookie();
    match form.intent.as_str() {
        "like" | "unlike" | "bookmark" | "unbookmark" => {
            let result = ctx
                .backend
                .doc_react(cookie, &id, &form.intent)
                .await
                .map_err(WebError::from);
            interaction_response(&headers, result, &back, &back)
        }
        "comment" => {
            let result = match comment_body(&form) {
                Ok(content) => ctx
                    .backend
                    .doc_comment(cookie, &id, &content)
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
                .delete_doc(cookie, &id)
                .await
                .map_err(WebError::from);
            interaction_response(&headers, result, "/docs", &back)
        }
        other => {
            let err = WebError::BadRequest(format!("Unknown intent '{other}'."));
            interaction_response(&headers, Err(err), &back, &back)
        }
    }
}

/// Renders posted markdown for the editor preview pane. Gated like every
/// other content route; the body is the raw markdown text.
pub async fn preview(_viewer: Viewer, body: String) -> Html<String> {
    Html(markdown_to_html(&body))
}
