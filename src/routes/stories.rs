//! Story viewer and composer.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, Response};
use axum::Form;
use serde::Deserialize;

use crate::backend::Story;
use crate::error::WebError;
use crate::pages;
use crate::session::Viewer;
use crate::AppContext;

use super::{interaction_response, ok_response, or_empty};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoryBody {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub code: String,
}

pub async fn view(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let cookie = viewer.cookie();
    let (story, strip) = tokio::join!(ctx.backend.story(cookie, &id), ctx.backend.stories(cookie));
    let story = story?;
    let strip = or_empty(strip, "story strip");
    let (prev, next) = neighbors(&strip, &id);
    Ok(Html(pages::stories::viewer_page(story, prev, next)))
}

pub async fn new_form(viewer: Viewer, Query(query): Query<PageQuery>) -> Html<String> {
    Html(pages::stories::form_page(viewer.profile, query.error))
}

pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    headers: HeaderMap,
    Form(body): Form<StoryBody>,
) -> Response {
    if body.code.trim().is_empty() {
        let err = WebError::BadRequest("Code is required.".into());
        return interaction_response(&headers, Err(err), "/", "/stories/new");
    }
    match ctx
        .backend
        .create_story(viewer.cookie(), &body.caption, &body.language, &body.code)
        .await
    {
        Ok(story) => ok_response(&headers, &format!("/stories/{}", story.id)),
        Err(err) => interaction_response(&headers, Err(err.into()), "/", "/stories/new"),
    }
}

/// Previous / next story ids in strip order, for the viewer's arrows.
fn neighbors(strip: &[Story], id: &str) -> (Option<String>, Option<String>) {
    match strip.iter().position(|s| s.id == id) {
        Some(pos) => {
            let prev = pos.checked_sub(1).map(|p| strip[p].id.clone());
            let next = strip.get(pos + 1).map(|s| s.id.clone());
            (prev, next)
        }
        None => (None, None),
    }
}
