//! Home feed loader. Fans out to three backend lists; each one degrades to
//! empty on its own, so a dead backend still yields a 200 with empty states.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::pages;
use crate::session::Viewer;
use crate::AppContext;

use super::or_empty;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub error: Option<String>,
}

pub async fn index(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    Query(query): Query<FeedQuery>,
) -> Html<String> {
    let cookie = viewer.cookie();
    let (snippets, stories, suggestions) = tokio::join!(
        ctx.backend.feed(cookie),
        ctx.backend.stories(cookie),
        ctx.backend.suggestions(cookie),
    );
    Html(pages::feed::feed_page(
        viewer.profile,
        or_empty(snippets, "feed"),
        or_empty(stories, "stories"),
        or_empty(suggestions, "follow suggestions"),
        query.error,
    ))
}
