//! Public profile page with tabbed snippet / doc / bug listings.

use leptos::prelude::*;

use crate::backend::{Bug, Doc, Profile, Snippet};

use super::bugs::BugCard;
use super::docs::DocCard;
use super::layout::Nav;
use super::snippets::SnippetCard;
use super::widgets::{Avatar, EmptyState, Flash, FollowButton};
use super::render_page;

const TABS: [(&str, &str); 3] = [("snippets", "Snippets"), ("docs", "Docs"), ("bugs", "Bugs")];

/// Which tab's listing the loader fetched.
pub enum ProfileContent {
    Snippets(Vec<Snippet>),
    Docs(Vec<Doc>),
    Bugs(Vec<Bug>),
}

impl ProfileContent {
    fn tab(&self) -> &'static str {
        match self {
            ProfileContent::Snippets(_) => "snippets",
            ProfileContent::Docs(_) => "docs",
            ProfileContent::Bugs(_) => "bugs",
        }
    }
}

pub fn profile_page(
    viewer: Profile,
    profile: Profile,
    content: ProfileContent,
    error: Option<String>,
) -> String {
    let is_self = viewer.username == profile.username;
    let nav = if is_self { Nav::Profile } else { Nav::None };
    let title = profile.display().to_string();
    render_page(&title, Some(viewer), nav, move || {
        view! { <ProfilePage profile=profile content=content is_self=is_self error=error/> }
    })
}

#[component]
fn ProfilePage(
    profile: Profile,
    content: ProfileContent,
    is_self: bool,
    error: Option<String>,
) -> impl IntoView {
    let username = profile.username.clone();
    let display = profile.display().to_string();
    let bio = (!profile.bio.is_empty())
        .then(|| view! { <p class="profile-bio">{profile.bio.clone()}</p> });
    let skills = (!profile.skills.is_empty()).then(|| {
        view! {
            <div class="tags">
                {profile
                    .skills
                    .iter()
                    .map(|skill| view! { <span class="chip">{skill.clone()}</span> })
                    .collect_view()}
            </div>
        }
    });
    let follow = (!is_self).then(|| {
        view! {
            <FollowButton username=profile.username.clone() following=profile.is_following/>
        }
    });
    let stats = format!(
        "{} snippets · {} followers · {} following",
        profile.snippet_count, profile.followers, profile.following
    );
    let active = content.tab();
    let tabs = TABS
        .iter()
        .map(|(value, label)| {
            let class = if *value == active { "tab active" } else { "tab" };
            let href = format!("/u/{username}?tab={value}");
            view! { <a class=class href=href>{*label}</a> }
        })
        .collect_view();
    view! {
        <Flash error=error/>
        <header class="profile-head">
            <Avatar
                username=profile.username.clone()
                avatar_url=profile.avatar_url.clone()
                large=true
            />
            <div class="profile-names">
                <h1>{display}</h1>
                <p class="muted">{format!("@{}", profile.username)}</p>
                {bio}
                {skills}
                <p class="profile-stats">{stats}</p>
            </div>
            {follow}
        </header>
        <nav class="tab-bar">{tabs}</nav>
        <TabContent content=content/>
    }
}

#[component]
fn TabContent(content: ProfileContent) -> impl IntoView {
    match content {
        ProfileContent::Snippets(snippets) => {
            if snippets.is_empty() {
                view! { <EmptyState message="No snippets yet."/> }.into_any()
            } else {
                view! {
                    <div class="card-grid">
                        {snippets
                            .into_iter()
                            .map(|snippet| view! { <SnippetCard snippet=snippet/> })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
        }
        ProfileContent::Docs(docs) => {
            if docs.is_empty() {
                view! { <EmptyState message="No docs yet."/> }.into_any()
            } else {
                view! {
                    <div class="card-stack">
                        {docs.into_iter().map(|doc| view! { <DocCard doc=doc/> }).collect_view()}
                    </div>
                }
                .into_any()
            }
        }
        ProfileContent::Bugs(bugs) => {
            if bugs.is_empty() {
                view! { <EmptyState message="No bugs filed yet."/> }.into_any()
            } else {
                view! {
                    <div class="card-stack">
                        {bugs.into_iter().map(|bug| view! { <BugCard bug=bug/> }).collect_view()}
                    </div>
                }
                .into_any()
            }
        }
    }
}
