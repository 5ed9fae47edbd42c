//! Sign-in, OAuth relay, logout, and onboarding.
//!
//! The GitHub dance belongs to the backend; this side only starts it with a
//! redirect and finishes it by forwarding the callback query and relaying the
//! backend's Set-Cookie headers onto our own 303.

use std::sync::Arc;

use axum::extract::{Query, RawQuery, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::warn;

use crate::error::WebError;
use crate::pages;
use crate::session::{encode_component, query_param, sanitize_next, CookieHeader, MaybeViewer, Viewer};
use crate::AppContext;

use super::interaction_response;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OnboardingBody {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub skills: String,
}

/// Sign-in screen. An already-authenticated viewer has no business here and
/// goes straight to the feed.
pub async fn login(
    MaybeViewer(viewer): MaybeViewer,
    Query(query): Query<LoginQuery>,
) -> Response {
    if viewer.is_some() {
        return Redirect::to("/").into_response();
    }
    Html(pages::auth::login_page(query.next, query.error)).into_response()
}

/// Hands the browser to the backend's OAuth start URL, carrying `next` along
/// so the callback can land the user back where they started.
pub async fn github_start(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<StartQuery>,
) -> Redirect {
    let mut target = ctx.config.login_start_url();
    if let Some(next) = query.next.filter(|n| !n.is_empty()) {
        let sep = if target.contains('?') { '&' } else { '?' };
        target = format!("{target}{sep}next={}", encode_component(&next));
    }
    Redirect::to(&target)
}

/// OAuth callback. The query string goes to the backend verbatim; whatever
/// Set-Cookie headers come back ride our redirect so the browser ends up with
/// the backend's session.
pub async fn callback(
    State(ctx): State<Arc<AppContext>>,
    RawQuery(query): RawQuery,
) -> Result<Response, WebError> {
    let auth = ctx.backend.callback(query.as_deref()).await?;

    let dest = if auth.onboarded == Some(false) {
        "/onboarding".to_string()
    } else {
        let next = query_param(query.as_deref(), "next");
        sanitize_next(next.as_deref())
    };
    Ok(with_cookies(
        Redirect::to(&dest).into_response(),
        auth.set_cookies,
    ))
}

/// Tears the session down. If the backend is unreachable the browser still
/// loses our session cookie.
pub async fn logout(
    State(ctx): State<Arc<AppContext>>,
    CookieHeader(cookie): CookieHeader,
) -> Response {
    let mut cookies = match ctx.backend.logout(cookie.as_deref()).await {
        Ok(cookies) => cookies,
        Err(err) => {
            warn!("backend logout failed: {err}");
            Vec::new()
        }
    };
    if cookies.is_empty() {
        cookies.push(format!(
            "{}=; Path=/; Max-Age=0",
            ctx.config.session_cookie
        ));
    }
    with_cookies(Redirect::to("/login").into_response(), cookies)
}

pub async fn onboarding_form(viewer: Viewer, Query(query): Query<PageQuery>) -> Html<String> {
    Html(pages::auth::onboarding_page(viewer.profile, query.error))
}

pub async fn onboarding_submit(
    State(ctx): State<Arc<AppContext>>,
    viewer: Viewer,
    headers: HeaderMap,
    Form(body): Form<OnboardingBody>,
) -> Response {
    if body.bio.trim().is_empty() {
        let err = WebError::BadRequest("A short bio is required.".into());
        return interaction_response(&headers, Err(err), "/", "/onboarding");
    }
    let skills: Vec<String> = body
        .skills
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let result = ctx
        .backend
        .onboarding(
            viewer.cookie(),
            body.display_name.trim(),
            body.bio.trim(),
            body.avatar_url.trim(),
            &skills,
        )
        .await
        .map_err(WebError::from);
    interaction_response(&headers, result, "/", "/onboarding")
}

fn with_cookies(mut response: Response, cookies: Vec<String>) -> Response {
    for cookie in cookies {
        match HeaderValue::try_from(cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(_) => warn!("dropping malformed Set-Cookie from backend"),
        }
    }
    response
}
