//! Home feed: story strip, followed-author snippets, suggestion rail.

use leptos::prelude::*;

use crate::backend::{Profile, Snippet, Story};

use super::layout::Nav;
use super::snippets::SnippetCard;
use super::widgets::{Avatar, EmptyState, Flash, FollowButton};
use super::render_page;

pub fn feed_page(
    viewer: Profile,
    snippets: Vec<Snippet>,
    stories: Vec<Story>,
    suggestions: Vec<Profile>,
    error: Option<String>,
) -> String {
    render_page("Feed", Some(viewer), Nav::Feed, move || {
        view! {
            <FeedPage snippets=snippets stories=stories suggestions=suggestions error=error/>
        }
    })
}

#[component]
fn FeedPage(
    snippets: Vec<Snippet>,
    stories: Vec<Story>,
    suggestions: Vec<Profile>,
    error: Option<String>,
) -> impl IntoView {
    let empty = snippets.is_empty().then(|| {
        view! {
            <EmptyState
                message="Your feed is empty."
                hint="Follow a few people, or browse all snippets to find them."
            />
        }
    });
    view! {
        <div class="feed-layout">
            <div class="feed-main">
                <StoryStrip stories=stories/>
                <Flash error=error/>
                {empty}
                <div class="card-stack">
                    {snippets
                        .into_iter()
                        .map(|snippet| view! { <SnippetCard snippet=snippet/> })
                        .collect_view()}
                </div>
            </div>
            <SuggestionRail suggestions=suggestions/>
        </div>
    }
}

/// Horizontal scroller of story bubbles. The leading bubble always links to
/// the story composer.
#[component]
fn StoryStrip(stories: Vec<Story>) -> impl IntoView {
    view! {
        <div class="story-strip" data-story-strip=true>
            <a class="story-bubble new-story" href="/stories/new">
                <span class="avatar story-add">"+"</span>
                <span class="story-name">"Your story"</span>
            </a>
            {stories
                .into_iter()
                .map(|story| {
                    let class = if story.viewed {
                        "story-bubble viewed"
                    } else {
                        "story-bubble unseen"
                    };
                    let name = story.author.display().to_string();
                    view! {
                        <a class=class href=format!("/stories/{}", story.id)>
                            <Avatar
                                username=story.author.username.clone()
                                avatar_url=story.author.avatar_url.clone()
                            />
                            <span class="story-name">{name}</span>
                        </a>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn SuggestionRail(suggestions: Vec<Profile>) -> impl IntoView {
    let body = if suggestions.is_empty() {
        view! { <p class="empty-note">"No suggestions right now."</p> }.into_any()
    } else {
        view! {
            <ul class="suggestion-list">
                {suggestions
                    .into_iter()
                    .map(|profile| {
                        let username = profile.username.clone();
                        let display = profile.display().to_string();
                        view! {
                            <li class="suggestion">
                                <Avatar
                                    username=profile.username.clone()
                                    avatar_url=profile.avatar_url.clone()
                                />
                                <div class="suggestion-names">
                                    <a class="author" href=format!("/u/{username}")>{display}</a>
                                    <span class="muted">{format!("@{}", profile.username)}</span>
                                </div>
                                <FollowButton
                                    username=profile.username.clone()
                                    following=profile.is_following
                                />
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };
    view! {
        <aside class="rail">
            <h2 class="rail-title">"Who to follow"</h2>
            {body}
        </aside>
    }
}
