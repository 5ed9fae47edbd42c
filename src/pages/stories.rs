//! Code stories: the full-screen viewer and the composer.

use chrono::Duration;
use leptos::prelude::*;

use crate::backend::{Profile, Story};
use crate::render::{expires_label, highlight_code, relative_time};

use super::layout::Nav;
use super::widgets::{Avatar, Flash};
use super::{render_bare, render_page};

/// Full-screen viewer. Stories without an explicit expiry fall back to
/// 24 hours after posting.
pub fn viewer_page(story: Story, prev: Option<String>, next: Option<String>) -> String {
    let title = format!("{}'s story", story.author.display());
    render_bare(&title, move || view! { <StoryViewer story=story prev=prev next=next/> })
}

pub fn form_page(viewer: Profile, error: Option<String>) -> String {
    render_page("New story", Some(viewer), Nav::None, move || {
        view! { <StoryForm error=error/> }
    })
}

#[component]
fn StoryViewer(story: Story, prev: Option<String>, next: Option<String>) -> impl IntoView {
    let code = highlight_code(&story.language, &story.code);
    let deadline = story
        .expires_at
        .or_else(|| story.created_at.map(|c| c + Duration::hours(24)));
    let expires = expires_label(deadline);
    let expires = (!expires.is_empty()).then(|| view! { <span class="expiry">{expires}</span> });
    let author_name = story.author.display().to_string();
    let author_href = format!("/u/{}", story.author.username);
    let caption = (!story.caption.is_empty())
        .then(|| view! { <p class="story-caption">{story.caption.clone()}</p> });
    let prev_link = prev.map(|id| {
        view! {
            <a class="story-nav prev" href=format!("/stories/{id}") data-story-prev=true
                aria-label="Previous story">"‹"</a>
        }
    });
    let next_link = next.map(|id| {
        view! {
            <a class="story-nav next" href=format!("/stories/{id}") data-story-next=true
                aria-label="Next story">"›"</a>
        }
    });
    view! {
        <main class="story-screen" data-story-viewer=true>
            <header class="story-head">
                <Avatar
                    username=story.author.username.clone()
                    avatar_url=story.author.avatar_url.clone()
                />
                <div class="card-byline">
                    <a class="author" href=author_href>{author_name}</a>
                    <span class="when">{relative_time(story.created_at)}</span>
                    {expires}
                </div>
                <a class="story-close" href="/" aria-label="Close">"×"</a>
            </header>
            {prev_link}
            <div class="story-body">
                <div class="code-block story-code" inner_html=code></div>
                {caption}
            </div>
            {next_link}
        </main>
    }
}

#[component]
fn StoryForm(error: Option<String>) -> impl IntoView {
    view! {
        <div class="page-head">
            <h1>"New story"</h1>
            <p class="muted">"Stories disappear after 24 hours."</p>
        </div>
        <Flash error=error/>
        <form class="editor-form" method="post" action="/stories/new">
            <label>
                "Caption"
                <input
                    type="text"
                    name="caption"
                    maxlength="140"
                    placeholder="What's this about?"
                    autocomplete="off"
                />
            </label>
            <label>
                "Language"
                <input type="text" name="language" placeholder="rust" required=true/>
            </label>
            <label class="editor-label">
                "Code"
                <textarea
                    name="code"
                    rows="12"
                    class="code-editor"
                    data-editor=true
                    spellcheck="false"
                    required=true
                ></textarea>
            </label>
            <div class="form-actions">
                <button class="button" type="submit">"Share story"</button>
            </div>
        </form>
    }
}
