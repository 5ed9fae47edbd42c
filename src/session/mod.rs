//! The auth gate: extractors that resolve the browser session.
//!
//! This layer owns no authentication logic. A request is "signed in" exactly
//! when the backend's `/api/auth/me` says so for the cookie the browser sent.
//! The extractors here only decide between rendering and redirecting to
//! /login — token issuance, refresh, and expiry are backend concerns.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, Uri};
use axum::response::Redirect;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::warn;

use crate::backend::Profile;
use crate::AppContext;

/// The raw inbound `Cookie` header, forwarded verbatim to every backend call.
///
/// Never parsed beyond the presence check in [`has_session_cookie`] — the
/// backend owns the cookie's meaning.
pub struct CookieHeader(pub Option<String>);

impl<S> FromRequestParts<S> for CookieHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(raw_cookie(&parts.headers)))
    }
}

/// A signed-in viewer. Extracting this on a route makes it protected: requests
/// without a live session are redirected to `/login?next=<original path>`.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub profile: Profile,
    /// The inbound `Cookie` header, kept for forwarding to follow-up calls.
    pub cookie: Option<String>,
}

impl Viewer {
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }
}

impl FromRequestParts<Arc<AppContext>> for Viewer {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let cookie = raw_cookie(&parts.headers);
        match lookup(ctx, cookie.as_deref()).await {
            Some(profile) => Ok(Viewer { profile, cookie }),
            None => Err(login_redirect(&parts.uri)),
        }
    }
}

/// Same lookup as [`Viewer`] but never rejects — for public pages and layout
/// chrome that render either way.
pub struct MaybeViewer(pub Option<Viewer>);

impl FromRequestParts<Arc<AppContext>> for MaybeViewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let cookie = raw_cookie(&parts.headers);
        let viewer = lookup(ctx, cookie.as_deref()).await.map(|profile| Viewer {
            profile,
            cookie: cookie.clone(),
        });
        Ok(Self(viewer))
    }
}

/// Resolve the session, degrading every failure to "not signed in". A dead
/// backend must produce login redirects and empty pages, never a 500.
async fn lookup(ctx: &AppContext, cookie: Option<&str>) -> Option<Profile> {
    let cookie = cookie?;
    // Skip the backend roundtrip when the session cookie is plainly absent.
    if !has_session_cookie(cookie, &ctx.config.session_cookie) {
        return None;
    }
    match ctx.backend.me(Some(cookie)).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!(err = %e, "session lookup failed — treating request as anonymous");
            None
        }
    }
}

fn raw_cookie(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Whether the `Cookie` header carries a cookie with the given name.
pub fn has_session_cookie(cookie_header: &str, name: &str) -> bool {
    cookie_header.split(';').any(|pair| {
        pair.trim_start()
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with('='))
    })
}

fn login_redirect(uri: &Uri) -> Redirect {
    let original = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Redirect::to(&format!("/login?next={}", encode_component(original)))
}

/// Percent-encode a value for use inside a query string.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Decode then restrict a `next` redirect target to site-local paths.
/// Anything absolute (or protocol-relative) falls back to `/`.
pub fn sanitize_next(raw: Option<&str>) -> String {
    let decoded = match raw {
        Some(raw) => match percent_decode_str(raw).decode_utf8() {
            Ok(s) => s.into_owned(),
            Err(_) => return "/".to_string(),
        },
        None => return "/".to_string(),
    };
    if decoded.starts_with('/') && !decoded.starts_with("//") {
        decoded
    } else {
        "/".to_string()
    }
}

/// Pull one parameter out of a raw query string, percent-decoded.
///
/// Used where the full query is forwarded verbatim (OAuth callback) but this
/// layer still needs to peek at `next`.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != name {
            return None;
        }
        percent_decode_str(value)
            .decode_utf8()
            .ok()
            .map(|s| s.into_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_detection_handles_siblings() {
        assert!(has_session_cookie("cg_session=abc", "cg_session"));
        assert!(has_session_cookie("theme=dark; cg_session=abc", "cg_session"));
        assert!(has_session_cookie("theme=dark;cg_session=abc", "cg_session"));
        assert!(!has_session_cookie("theme=dark", "cg_session"));
        // A prefix of the name must not match.
        assert!(!has_session_cookie("cg_session_old=abc", "cg_session"));
    }

    #[test]
    fn next_parameter_is_percent_encoded() {
        assert_eq!(encode_component("/snippets/new"), "%2Fsnippets%2Fnew");
        assert_eq!(encode_component("/?tab=docs"), "%2F%3Ftab%3Ddocs");
    }

    #[test]
    fn sanitize_next_keeps_local_paths() {
        assert_eq!(sanitize_next(Some("%2Fsnippets%2F42")), "/snippets/42");
        assert_eq!(sanitize_next(Some("/docs")), "/docs");
    }

    #[test]
    fn sanitize_next_rejects_absolute_urls() {
        assert_eq!(sanitize_next(Some("https://evil.example/")), "/");
        assert_eq!(sanitize_next(Some("//evil.example")), "/");
        assert_eq!(sanitize_next(Some("javascript:alert(1)")), "/");
        assert_eq!(sanitize_next(None), "/");
    }

    #[test]
    fn query_param_extracts_and_decodes() {
        let q = Some("code=xyz&state=abc&next=%2Fonboarding");
        assert_eq!(query_param(q, "next").as_deref(), Some("/onboarding"));
        assert_eq!(query_param(q, "code").as_deref(), Some("xyz"));
        assert_eq!(query_param(q, "missing"), None);
        assert_eq!(query_param(None, "next"), None);
    }
}
