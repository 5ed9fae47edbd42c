//! Document shell and sidebar layout.

use leptos::prelude::*;

use crate::backend::Profile;

use super::widgets::Avatar;

/// Which sidebar entry is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Feed,
    Snippets,
    Docs,
    Bugs,
    Profile,
    None,
}

#[component]
pub fn Document(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="/static/favicon.svg" type="image/svg+xml"/>
                <link rel="stylesheet" href="/static/app.css"/>
                <title>{title}</title>
            </head>
            <body>
                {children()}
                <script src="/static/app.js"></script>
            </body>
        </html>
    }
}

#[component]
pub fn Shell(viewer: Option<Profile>, active: Nav, children: Children) -> impl IntoView {
    view! {
        <div class="app">
            <Sidebar viewer=viewer active=active/>
            <main class="content">{children()}</main>
        </div>
    }
}

#[component]
fn Sidebar(viewer: Option<Profile>, active: Nav) -> impl IntoView {
    let profile_href = viewer
        .as_ref()
        .map(|v| format!("/u/{}", v.username))
        .unwrap_or_else(|| "/login".to_string());

    view! {
        <aside class="sidebar" id="sidebar">
            <a class="brand" href="/">
                <span class="brand-mark">"{ }"</span>
                <span class="brand-name">"CodeGram"</span>
            </a>
            <nav class="nav">
                <NavLink href="/" label="Feed" current={active == Nav::Feed}/>
                <NavLink href="/snippets" label="Snippets" current={active == Nav::Snippets}/>
                <NavLink href="/docs" label="Docs" current={active == Nav::Docs}/>
                <NavLink href="/bugs" label="Bugs" current={active == Nav::Bugs}/>
                <NavLink href=profile_href label="Profile" current={active == Nav::Profile}/>
            </nav>
            <div class="sidebar-actions">
                <a class="button" href="/snippets/new">"New snippet"</a>
                <a class="button ghost" href="/stories/new">"New story"</a>
            </div>
            <ViewerCard viewer=viewer/>
        </aside>
    }
}

#[component]
fn NavLink(#[prop(into)] href: String, #[prop(into)] label: String, current: bool) -> impl IntoView {
    let class = if current { "nav-link active" } else { "nav-link" };
    view! { <a class=class href=href>{label}</a> }
}

#[component]
fn ViewerCard(viewer: Option<Profile>) -> impl IntoView {
    match viewer {
        Some(profile) => {
            let username = profile.username.clone();
            let display = profile.display().to_string();
            view! {
                <div class="viewer-card">
                    <Avatar username=profile.username.clone() avatar_url=profile.avatar_url.clone()/>
                    <div class="viewer-meta">
                        <a class="viewer-name" href=format!("/u/{username}")>{display}</a>
                        <span class="viewer-handle">{format!("@{}", profile.username)}</span>
                    </div>
                    <form method="post" action="/logout">
                        <button class="icon-button" type="submit" title="Sign out">"Sign out"</button>
                    </form>
                </div>
            }
            .into_any()
        }
        None => view! {
            <div class="viewer-card signin-prompt">
                <p>"Sign in to post, like, and follow."</p>
                <a class="button" href="/login">"Sign in"</a>
            </div>
        }
        .into_any(),
    }
}
