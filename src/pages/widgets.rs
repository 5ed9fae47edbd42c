//! Small presentational pieces shared across pages.

use leptos::prelude::*;

use crate::backend::Comment;
use crate::render::{avatar_color, avatar_initial, relative_time};

/// Avatar image, or the deterministic color + initial fallback when the
/// backend has no URL for this user.
#[component]
pub fn Avatar(
    #[prop(into)] username: String,
    avatar_url: Option<String>,
    #[prop(default = false)] large: bool,
) -> impl IntoView {
    let class = if large { "avatar avatar-lg" } else { "avatar" };
    match avatar_url {
        Some(url) if !url.is_empty() => {
            view! { <img class=class src=url alt=username loading="lazy"/> }.into_any()
        }
        _ => {
            let color = avatar_color(&username);
            let initial = avatar_initial(&username);
            view! {
                <span class=class style=format!("background:{color}")>{initial}</span>
            }
            .into_any()
        }
    }
}

/// One-line error banner shown after a failed action.
#[component]
pub fn Flash(error: Option<String>) -> impl IntoView {
    error
        .filter(|e| !e.is_empty())
        .map(|e| view! { <div class="flash flash-error" role="alert">{e}</div> })
}

#[component]
pub fn EmptyState(
    #[prop(into)] message: String,
    #[prop(optional, into)] hint: String,
) -> impl IntoView {
    let hint = (!hint.is_empty()).then(|| view! { <p class="empty-hint">{hint}</p> });
    view! {
        <div class="empty-state">
            <p class="empty-message">{message}</p>
            {hint}
        </div>
    }
}

#[component]
pub fn LangChip(#[prop(into)] language: String) -> impl IntoView {
    let label = if language.is_empty() {
        "text".to_string()
    } else {
        language
    };
    view! { <span class="chip lang-chip">{label}</span> }
}

/// Like / bookmark buttons plus the comment count, as plain forms posting an
/// `intent` back to `action`. app.js upgrades these to optimistic
/// fire-and-forget fetches; without it they still work as form posts.
#[component]
pub fn ReactionBar(
    #[prop(into)] action: String,
    like_count: i64,
    liked: bool,
    bookmark: Option<bool>,
    comment_count: i64,
) -> impl IntoView {
    let like_value = if liked { "unlike" } else { "like" };
    let like_class = if liked {
        "reaction like liked"
    } else {
        "reaction like"
    };
    let bookmark_form = bookmark.map(|bookmarked| {
        let value = if bookmarked { "unbookmark" } else { "bookmark" };
        let class = if bookmarked {
            "reaction bookmark bookmarked"
        } else {
            "reaction bookmark"
        };
        view! {
            <form method="post" action=action.clone() class="react-form" data-optimistic="bookmark">
                <button class=class type="submit" name="intent" value=value>
                    <span class="icon">"★"</span>
                </button>
            </form>
        }
    });

    view! {
        <div class="reactions">
            <form method="post" action=action.clone() class="react-form" data-optimistic="like">
                <button class=like_class type="submit" name="intent" value=like_value>
                    <span class="icon">"♥"</span>
                    <span class="count" data-count="like">{like_count}</span>
                </button>
            </form>
            {bookmark_form}
            <a class="reaction comment-link" href=format!("{action}#comments")>
                <span class="icon">"💬"</span>
                <span class="count">{comment_count}</span>
            </a>
        </div>
    }
}

/// Comment list plus the submit form. The blank-content guard exists twice:
/// the `required` attribute + app.js client-side, and the action's server-side
/// check before any backend call.
#[component]
pub fn CommentSection(comments: Vec<Comment>, #[prop(into)] action: String) -> impl IntoView {
    let count = comments.len();
    let empty = comments
        .is_empty()
        .then(|| view! { <p class="empty-note">"No comments yet. Start the thread."</p> });
    view! {
        <section class="comments" id="comments">
            <h2 class="section-title">{format!("Comments ({count})")}</h2>
            {empty}
            <ul class="comment-list">
                {comments
                    .into_iter()
                    .map(|comment| {
                        let username = comment.author.username.clone();
                        let display = comment.author.display().to_string();
                        view! {
                            <li class="comment">
                                <Avatar
                                    username=comment.author.username.clone()
                                    avatar_url=comment.author.avatar_url.clone()
                                />
                                <div class="comment-body">
                                    <div class="comment-head">
                                        <a class="author" href=format!("/u/{username}")>{display}</a>
                                        <span class="when">{relative_time(comment.created_at)}</span>
                                    </div>
                                    <p class="comment-text">{comment.content}</p>
                                </div>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <form class="comment-form" method="post" action=action data-validate="comment">
                <textarea name="content" rows="3" placeholder="Add a comment..." required=true></textarea>
                <p class="form-error" data-comment-error=true hidden=true>"Comment cannot be empty."</p>
                <button class="button" type="submit" name="intent" value="comment">"Comment"</button>
            </form>
        </section>
    }
}

/// Follow / unfollow toggle posting to the profile's interaction route.
#[component]
pub fn FollowButton(#[prop(into)] username: String, following: bool) -> impl IntoView {
    let (value, label, class) = if following {
        ("unfollow", "Following", "button ghost follow-button")
    } else {
        ("follow", "Follow", "button follow-button")
    };
    view! {
        <form method="post" action=format!("/u/{username}")>
            <button class=class type="submit" name="intent" value=value>{label}</button>
        </form>
    }
}

/// Standalone error page body.
#[component]
pub fn ErrorCard(status: u16, #[prop(into)] message: String) -> impl IntoView {
    view! {
        <main class="error-screen">
            <div class="error-card">
                <p class="error-status">{status.to_string()}</p>
                <h1 class="error-message">{message}</h1>
                <a class="button" href="/">"Back to the feed"</a>
            </div>
        </main>
    }
}
