//! Backend API proxy client.
//!
//! Every data operation this server performs goes through here: one
//! `reqwest::Client` pointed at the configured backend base URL, with the
//! browser's `Cookie` header forwarded verbatim on each call. Nothing is
//! cached, nothing is retried, and no cookie store exists — session semantics
//! belong entirely to the backend, this client only relays them.

pub mod types;

pub use types::{AuthCallback, Author, Bug, Comment, Doc, Profile, Snippet, Story};

use anyhow::Context as _;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::WebConfig;
use types::CallbackBody;

/// How a backend call failed. There is deliberately no finer taxonomy — the
/// caller either degrades to fallback data or surfaces one generic message.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend returned {status} for {path}")]
    Status { status: u16, path: String },
    #[error("backend request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend sent malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Backend {
    client: reqwest::Client,
    base_url: String,
}

impl Backend {
    /// Build the proxy client from config.
    ///
    /// Redirects are never followed: a backend 3xx (OAuth callback, logout)
    /// is relayed to the browser together with its `Set-Cookie` headers, and
    /// following it here would silently drop them.
    pub fn new(config: &WebConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    // ─── Session ──────────────────────────────────────────────────────────────

    /// `GET /api/auth/me` — the session lookup behind the auth gate.
    ///
    /// `Ok(None)` means the backend answered and said "not signed in"
    /// (401/403). Errors mean the backend could not answer at all; the gate
    /// treats those as anonymous too, but logs them.
    pub async fn me(&self, cookie: Option<&str>) -> Result<Option<Profile>, BackendError> {
        let path = "/api/auth/me";
        let resp = self.request(Method::GET, path, cookie).send().await?;
        match resp.status().as_u16() {
            200..=299 => {
                let text = resp.text().await?;
                Ok(Some(serde_json::from_str(&text)?))
            }
            401 | 403 => Ok(None),
            status => Err(BackendError::Status {
                status,
                path: path.to_string(),
            }),
        }
    }

    // ─── Feed fan-out ─────────────────────────────────────────────────────────

    pub async fn feed(&self, cookie: Option<&str>) -> Result<Vec<Snippet>, BackendError> {
        self.get_json("/api/snippets/feed", cookie).await
    }

    pub async fn stories(&self, cookie: Option<&str>) -> Result<Vec<Story>, BackendError> {
        self.get_json("/api/bugs/stories", cookie).await
    }

    pub async fn suggestions(&self, cookie: Option<&str>) -> Result<Vec<Profile>, BackendError> {
        self.get_json("/api/users/suggestions", cookie).await
    }

    // ─── Snippets ─────────────────────────────────────────────────────────────

    pub async fn snippets(
        &self,
        cookie: Option<&str>,
        lang: Option<&str>,
    ) -> Result<Vec<Snippet>, BackendError> {
        let path = match lang {
            Some(lang) if !lang.is_empty() => {
                format!("/api/snippets?lang={}", encode_query(lang))
            }
            _ => "/api/snippets".to_string(),
        };
        self.get_json(&path, cookie).await
    }

    pub async fn snippet(&self, cookie: Option<&str>, id: &str) -> Result<Snippet, BackendError> {
        self.get_json(&format!("/api/snippets/{id}"), cookie).await
    }

    pub async fn create_snippet(
        &self,
        cookie: Option<&str>,
        title: &str,
        description: &str,
        language: &str,
        code: &str,
    ) -> Result<Snippet, BackendError> {
        let body = json!({
            "title": title,
            "description": description,
            "language": language,
            "code": code,
        });
        self.post_json("/api/snippets", cookie, &body).await
    }

    pub async fn update_snippet(
        &self,
        cookie: Option<&str>,
        id: &str,
        title: &str,
        description: &str,
        language: &str,
        code: &str,
    ) -> Result<Snippet, BackendError> {
        let body = json!({
            "title": title,
            "description": description,
            "language": language,
            "code": code,
        });
        self.put_json(&format!("/api/snippets/{id}"), cookie, &body)
            .await
    }

    pub async fn delete_snippet(
        &self,
        cookie: Option<&str>,
        id: &str,
    ) -> Result<(), BackendError> {
        self.delete(&format!("/api/snippets/{id}"), cookie).await
    }

    /// `POST /api/snippets/{id}/{verb}` for like / unlike / bookmark /
    /// unbookmark. The verb string is the intent name, relayed as-is.
    pub async fn snippet_react(
        &self,
        cookie: Option<&str>,
        id: &str,
        verb: &str,
    ) -> Result<(), BackendError> {
        self.post_unit(&format!("/api/snippets/{id}/{verb}"), cookie, None)
            .await
    }

    pub async fn snippet_comment(
        &self,
        cookie: Option<&str>,
        id: &str,
        content: &str,
    ) -> Result<(), BackendError> {
        let body = json!({ "content": content });
        self.post_unit(&format!("/api/snippets/{id}/comments"), cookie, Some(&body))
            .await
    }

    // ─── Docs ─────────────────────────────────────────────────────────────────

    pub async fn docs(
        &self,
        cookie: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Vec<Doc>, BackendError> {
        let path = match tag {
            Some(tag) if !tag.is_empty() => format!("/api/docs?tag={}", encode_query(tag)),
            _ => "/api/docs".to_string(),
        };
        self.get_json(&path, cookie).await
    }

    pub async fn doc(&self, cookie: Option<&str>, id: &str) -> Result<Doc, BackendError> {
        self.get_json(&format!("/api/docs/{id}"), cookie).await
    }

    pub async fn create_doc(
        &self,
        cookie: Option<&str>,
        title: &str,
        summary: &str,
        tags: &[String],
        content: &str,
    ) -> Result<Doc, BackendError> {
        let body = json!({
            "title": title,
            "summary": summary,
            "tags": tags,
            "content": content,
        });
        self.post_json("/api/docs", cookie, &body).await
    }

    pub async fn update_doc(
        &self,
        cookie: Option<&str>,
        id: &str,
        title: &str,
        summary: &str,
        tags: &[String],
        content: &str,
    ) -> Result<Doc, BackendError> {
        let body = json!({
            "title": title,
            "summary": summary,
            "tags": tags,
            "content": content,
        });
        self.put_json(&format!("/api/docs/{id}"), cookie, &body).await
    }

    pub async fn delete_doc(&self, cookie: Option<&str>, id: &str) -> Result<(), BackendError> {
        self.delete(&format!("/api/docs/{id}"), cookie).await
    }

    pub async fn doc_react(
        &self,
        cookie: Option<&str>,
        id: &str,
        verb: &str,
    ) -> Result<(), BackendError> {
        self.post_unit(&format!("/api/docs/{id}/{verb}"), cookie, None)
            .await
    }

    pub async fn doc_comment(
        &self,
        cookie: Option<&str>,
        id: &str,
        content: &str,
    ) -> Result<(), BackendError> {
        let body = json!({ "content": content });
        self.post_unit(&format!("/api/docs/{id}/comments"), cookie, Some(&body))
            .await
    }

    // ─── Bugs & stories ───────────────────────────────────────────────────────

    pub async fn bugs(&self, cookie: Option<&str>) -> Result<Vec<Bug>, BackendError> {
        self.get_json("/api/bugs", cookie).await
    }

    pub async fn bug(&self, cookie: Option<&str>, id: &str) -> Result<Bug, BackendError> {
        self.get_json(&format!("/api/bugs/{id}"), cookie).await
    }

    pub async fn create_bug(
        &self,
        cookie: Option<&str>,
        title: &str,
        description: &str,
        severity: &str,
    ) -> Result<Bug, BackendError> {
        let body = json!({
            "title": title,
            "description": description,
            "severity": severity,
        });
        self.post_json("/api/bugs", cookie, &body).await
    }

    pub async fn bug_like(&self, cookie: Option<&str>, id: &str) -> Result<(), BackendError> {
        self.post_unit(&format!("/api/bugs/{id}/like"), cookie, None)
            .await
    }

    pub async fn bug_comment(
        &self,
        cookie: Option<&str>,
        id: &str,
        content: &str,
    ) -> Result<(), BackendError> {
        let body = json!({ "content": content });
        self.post_unit(&format!("/api/bugs/{id}/comments"), cookie, Some(&body))
            .await
    }

    /// Assignee username is relayed verbatim — whether that user exists or may
    /// be assigned is the backend's call.
    pub async fn bug_assign(
        &self,
        cookie: Option<&str>,
        id: &str,
        assignee: &str,
    ) -> Result<(), BackendError> {
        let body = json!({ "assignee": assignee });
        self.post_unit(&format!("/api/bugs/{id}/assign"), cookie, Some(&body))
            .await
    }

    pub async fn bug_status(
        &self,
        cookie: Option<&str>,
        id: &str,
        status: &str,
    ) -> Result<(), BackendError> {
        let body = json!({ "status": status });
        self.post_unit(&format!("/api/bugs/{id}/status"), cookie, Some(&body))
            .await
    }

    pub async fn delete_bug(&self, cookie: Option<&str>, id: &str) -> Result<(), BackendError> {
        self.delete(&format!("/api/bugs/{id}"), cookie).await
    }

    /// `GET /api/bugs/stories/{id}` — fetches one story and marks it viewed
    /// for this session on the backend side.
    pub async fn story(&self, cookie: Option<&str>, id: &str) -> Result<Story, BackendError> {
        self.get_json(&format!("/api/bugs/stories/{id}"), cookie)
            .await
    }

    pub async fn create_story(
        &self,
        cookie: Option<&str>,
        caption: &str,
        language: &str,
        code: &str,
    ) -> Result<Story, BackendError> {
        let body = json!({
            "caption": caption,
            "language": language,
            "code": code,
        });
        self.post_json("/api/bugs/stories", cookie, &body).await
    }

    // ─── Users & follow graph ─────────────────────────────────────────────────

    pub async fn profile(
        &self,
        cookie: Option<&str>,
        username: &str,
    ) -> Result<Profile, BackendError> {
        self.get_json(&format!("/api/users/{username}"), cookie)
            .await
    }

    pub async fn user_snippets(
        &self,
        cookie: Option<&str>,
        username: &str,
    ) -> Result<Vec<Snippet>, BackendError> {
        self.get_json(&format!("/api/users/{username}/snippets"), cookie)
            .await
    }

    pub async fn user_docs(
        &self,
        cookie: Option<&str>,
        username: &str,
    ) -> Result<Vec<Doc>, BackendError> {
        self.get_json(&format!("/api/users/{username}/docs"), cookie)
            .await
    }

    pub async fn user_bugs(
        &self,
        cookie: Option<&str>,
        username: &str,
    ) -> Result<Vec<Bug>, BackendError> {
        self.get_json(&format!("/api/users/{username}/bugs"), cookie)
            .await
    }

    pub async fn follow(&self, cookie: Option<&str>, username: &str) -> Result<(), BackendError> {
        self.post_unit(&format!("/api/users/{username}/follow"), cookie, None)
            .await
    }

    pub async fn unfollow(
        &self,
        cookie: Option<&str>,
        username: &str,
    ) -> Result<(), BackendError> {
        self.post_unit(&format!("/api/users/{username}/unfollow"), cookie, None)
            .await
    }

    pub async fn onboarding(
        &self,
        cookie: Option<&str>,
        display_name: &str,
        bio: &str,
        avatar_url: &str,
        skills: &[String],
    ) -> Result<(), BackendError> {
        let body = json!({
            "displayName": display_name,
            "bio": bio,
            "avatarUrl": avatar_url,
            "skills": skills,
        });
        self.post_unit("/api/users/onboarding", cookie, Some(&body))
            .await
    }

    // ─── OAuth passthrough ────────────────────────────────────────────────────

    /// Forward the provider's callback query string to the backend and collect
    /// whatever `Set-Cookie` headers it answers with. A 3xx from the backend
    /// counts as success — it is establishing the session and bouncing.
    pub async fn callback(&self, query: Option<&str>) -> Result<AuthCallback, BackendError> {
        let path = match query {
            Some(q) if !q.is_empty() => format!("/api/auth/callback?{q}"),
            _ => "/api/auth/callback".to_string(),
        };
        let resp = self.request(Method::GET, &path, None).send().await?;
        let status = resp.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(BackendError::Status {
                status: status.as_u16(),
                path: "/api/auth/callback".to_string(),
            });
        }

        let set_cookies = collect_set_cookies(resp.headers());
        let onboarded = if status.is_success() {
            resp.text()
                .await
                .ok()
                .and_then(|t| serde_json::from_str::<CallbackBody>(&t).ok())
                .and_then(|b| b.onboarded)
        } else {
            None
        };

        Ok(AuthCallback {
            set_cookies,
            onboarded,
        })
    }

    /// `POST /api/auth/logout` — returns the `Set-Cookie` headers that clear
    /// the session, for the handler to relay.
    pub async fn logout(&self, cookie: Option<&str>) -> Result<Vec<String>, BackendError> {
        let path = "/api/auth/logout";
        let resp = self.request(Method::POST, path, cookie).send().await?;
        let status = resp.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(BackendError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(collect_set_cookies(resp.headers()))
    }

    // ─── Health probe (`codegram-web check`) ──────────────────────────────────

    pub async fn health(&self) -> Result<(), BackendError> {
        let path = "/api/health";
        let resp = self.request(Method::GET, path, None).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(())
    }

    // ─── Plumbing ─────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, cookie: Option<&str>) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if let Some(cookie) = cookie {
            req = req.header(COOKIE, cookie);
        }
        req
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        cookie: Option<&str>,
    ) -> Result<T, BackendError> {
        let resp = self.request(Method::GET, path, cookie).send().await?;
        self.decode(path, resp).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        cookie: Option<&str>,
        body: &Value,
    ) -> Result<T, BackendError> {
        let resp = self
            .request(Method::POST, path, cookie)
            .json(body)
            .send()
            .await?;
        self.decode(path, resp).await
    }

    async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        cookie: Option<&str>,
        body: &Value,
    ) -> Result<T, BackendError> {
        let resp = self
            .request(Method::PUT, path, cookie)
            .json(body)
            .send()
            .await?;
        self.decode(path, resp).await
    }

    /// POST where only success matters; the response body is discarded.
    async fn post_unit(
        &self,
        path: &str,
        cookie: Option<&str>,
        body: Option<&Value>,
    ) -> Result<(), BackendError> {
        let mut req = self.request(Method::POST, path, cookie);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        self.check_status(path, &resp)
    }

    async fn delete(&self, path: &str, cookie: Option<&str>) -> Result<(), BackendError> {
        let resp = self.request(Method::DELETE, path, cookie).send().await?;
        self.check_status(path, &resp)
    }

    fn check_status(&self, path: &str, resp: &reqwest::Response) -> Result<(), BackendError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, BackendError> {
        self.check_status(path, &resp)?;
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn collect_set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_owned)
        .collect()
}

fn encode_query(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, percent_encoding::NON_ALPHANUMERIC).to_string()
}
