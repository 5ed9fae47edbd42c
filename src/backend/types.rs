//! Serde models for backend payloads.
//!
//! Every entity here is owned and validated by the backend; these structs are
//! deliberately lenient decodes of whatever it sends. Fields default when
//! absent and unknown keys are ignored, so a missing count renders as 0 and
//! a missing avatar falls back to the generated one. Nothing in this layer
//! rejects a payload the backend accepted.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The signed-in user as reported by `GET /api/auth/me`, and the shape of
/// `GET /api/users/{username}` / `/api/users/suggestions` entries.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: String,
    pub skills: Vec<String>,
    pub followers: i64,
    pub following: i64,
    pub snippet_count: i64,
    /// Whether the signed-in viewer follows this user.
    pub is_following: bool,
    /// False until the onboarding form has been submitted.
    pub onboarded: bool,
}

impl Profile {
    /// Display name when set, username otherwise.
    pub fn display(&self) -> &str {
        match &self.display_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

/// Content author as embedded in snippets, docs, bugs, and comments.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl Author {
    pub fn display(&self) -> &str {
        match &self.display_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub code: String,
    pub author: Author,
    pub created_at: Option<DateTime<Utc>>,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked: bool,
    pub bookmarked: bool,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Doc {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Markdown body, rendered server-side on the detail page.
    pub content: String,
    pub tags: Vec<String>,
    pub author: Author,
    pub created_at: Option<DateTime<Utc>>,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked: bool,
    pub bookmarked: bool,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Bug {
    pub id: String,
    pub title: String,
    /// Markdown body, rendered server-side on the detail page.
    pub description: String,
    /// "open" | "in-progress" | "resolved" — anything else lands in the open
    /// column. The backend owns the transition rules.
    pub status: String,
    /// "low" | "medium" | "high" | "critical", display only.
    pub severity: String,
    pub author: Author,
    /// Username of the assignee, if any.
    pub assignee: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked: bool,
    pub comments: Vec<Comment>,
}

/// A short-lived (24-hour) update post. Expiry is backend-owned — stories the
/// backend still returns are rendered, full stop.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Story {
    pub id: String,
    pub author: Author,
    pub caption: String,
    pub language: String,
    pub code: String,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the signed-in viewer has already opened this story.
    pub viewed: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub id: String,
    pub author: Author,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Outcome of the OAuth callback passthrough: the raw `Set-Cookie` headers to
/// relay to the browser, plus the backend's onboarding flag when it sent one.
#[derive(Debug, Clone, Default)]
pub struct AuthCallback {
    pub set_cookies: Vec<String>,
    /// `Some(false)` means the backend flagged the profile incomplete and the
    /// browser should land on /onboarding. `None` means the backend did not
    /// say either way.
    pub onboarded: Option<bool>,
}

/// Lenient decode of the callback response body.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CallbackBody {
    pub onboarded: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_decodes_from_sparse_payload() {
        // The backend owns the schema; anything missing must default cleanly.
        let s: Snippet = serde_json::from_str(r#"{"id":"s1","title":"Hello"}"#).unwrap();
        assert_eq!(s.id, "s1");
        assert_eq!(s.title, "Hello");
        assert_eq!(s.like_count, 0);
        assert!(!s.liked);
        assert!(s.comments.is_empty());
        assert!(s.created_at.is_none());
    }

    #[test]
    fn snippet_ignores_unknown_keys() {
        let s: Snippet =
            serde_json::from_str(r#"{"id":"s1","trendingScore":99,"visibility":"public"}"#)
                .unwrap();
        assert_eq!(s.id, "s1");
    }

    #[test]
    fn profile_display_prefers_display_name() {
        let p = Profile {
            username: "octocat".into(),
            display_name: Some("The Octocat".into()),
            ..Default::default()
        };
        assert_eq!(p.display(), "The Octocat");

        let bare = Profile {
            username: "octocat".into(),
            display_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(bare.display(), "octocat");
    }

    #[test]
    fn camel_case_fields_map_onto_snake_case() {
        let s: Snippet = serde_json::from_str(
            r#"{"id":"s1","likeCount":7,"commentCount":2,"createdAt":"2026-08-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(s.like_count, 7);
        assert_eq!(s.comment_count, 2);
        assert!(s.created_at.is_some());
    }
}
