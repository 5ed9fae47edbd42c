//! Doc browse, reading, and editor pages.

use leptos::prelude::*;

use crate::backend::{Doc, Profile};
use crate::render::{markdown_to_html, relative_time};

use super::layout::Nav;
use super::widgets::{Avatar, CommentSection, EmptyState, Flash, ReactionBar};
use super::render_page;

pub fn browse_page(
    viewer: Profile,
    docs: Vec<Doc>,
    tag: Option<String>,
    error: Option<String>,
) -> String {
    render_page("Docs", Some(viewer), Nav::Docs, move || {
        view! { <BrowsePage docs=docs tag=tag error=error/> }
    })
}

pub fn detail_page(viewer: Profile, doc: Doc, error: Option<String>) -> String {
    let me = viewer.username.clone();
    let title = doc.title.clone();
    render_page(&title, Some(viewer), Nav::Docs, move || {
        view! { <DetailPage doc=doc viewer_username=me error=error/> }
    })
}

pub fn form_page(viewer: Profile, doc: Option<Doc>, error: Option<String>) -> String {
    let title = if doc.is_some() { "Edit doc" } else { "New doc" };
    render_page(title, Some(viewer), Nav::Docs, move || {
        view! { <DocForm doc=doc error=error/> }
    })
}

#[component]
fn TagChips(tags: Vec<String>) -> impl IntoView {
    view! {
        <div class="tags">
            {tags
                .into_iter()
                .map(|tag| {
                    let href = format!("/docs?tag={tag}");
                    view! { <a class="chip tag-chip" href=href>{format!("#{tag}")}</a> }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn DocCard(doc: Doc) -> impl IntoView {
    let href = format!("/docs/{}", doc.id);
    let author_name = doc.author.display().to_string();
    let author_href = format!("/u/{}", doc.author.username);
    let summary = (!doc.summary.is_empty())
        .then(|| view! { <p class="card-description">{doc.summary.clone()}</p> });
    view! {
        <article class="card doc-card">
            <header class="card-head">
                <Avatar username=doc.author.username.clone() avatar_url=doc.author.avatar_url.clone()/>
                <div class="card-byline">
                    <a class="author" href=author_href>{author_name}</a>
                    <span class="when">{relative_time(doc.created_at)}</span>
                </div>
            </header>
            <h2 class="card-title">
                <a href=href.clone()>{doc.title.clone()}</a>
            </h2>
            {summary}
            <TagChips tags=doc.tags.clone()/>
            <ReactionBar
                action=href
                like_count=doc.like_count
                liked=doc.liked
                bookmark=Some(doc.bookmarked)
                comment_count=doc.comment_count
            />
        </article>
    }
}

#[component]
fn BrowsePage(docs: Vec<Doc>, tag: Option<String>, error: Option<String>) -> impl IntoView {
    let tag = tag.unwrap_or_default();
    let empty = docs.is_empty().then(|| {
        view! {
            <EmptyState
                message="No docs here yet."
                hint="Write one, or clear the tag filter."
            />
        }
    });
    view! {
        <div class="page-head">
            <h1>"Docs"</h1>
            <a class="button" href="/docs/new">"New doc"</a>
        </div>
        <Flash error=error/>
        <form class="filter" method="get" action="/docs">
            <input
                type="search"
                name="tag"
                value=tag
                placeholder="Filter by tag"
                autocomplete="off"
            />
            <button class="button ghost" type="submit">"Filter"</button>
        </form>
        {empty}
        <div class="card-stack">
            {docs.into_iter().map(|doc| view! { <DocCard doc=doc/> }).collect_view()}
        </div>
    }
}

#[component]
fn DetailPage(doc: Doc, viewer_username: String, error: Option<String>) -> impl IntoView {
    let href = format!("/docs/{}", doc.id);
    let body = markdown_to_html(&doc.content);
    let author_name = doc.author.display().to_string();
    let author_href = format!("/u/{}", doc.author.username);
    let owner_actions = (doc.author.username == viewer_username).then(|| {
        view! {
            <div class="owner-actions">
                <a class="button ghost" href=format!("/docs/{}/edit", doc.id)>"Edit"</a>
                <form method="post" action=href.clone() data-confirm="Delete this doc?">
                    <button class="button danger" type="submit" name="intent" value="delete">
                        "Delete"
                    </button>
                </form>
            </div>
        }
    });
    view! {
        <Flash error=error/>
        <article class="detail doc-detail">
            <header class="card-head">
                <Avatar username=doc.author.username.clone() avatar_url=doc.author.avatar_url.clone()/>
                <div class="card-byline">
                    <a class="author" href=author_href>{author_name}</a>
                    <span class="when">{relative_time(doc.created_at)}</span>
                </div>
                {owner_actions}
            </header>
            <h1 class="detail-title">{doc.title.clone()}</h1>
            <TagChips tags=doc.tags.clone()/>
            <div class="markdown-body" inner_html=body></div>
            <ReactionBar
                action=href.clone()
                like_count=doc.like_count
                liked=doc.liked
                bookmark=Some(doc.bookmarked)
                comment_count=doc.comment_count
            />
        </article>
        <CommentSection comments=doc.comments action=href/>
    }
}

#[component]
fn DocForm(doc: Option<Doc>, error: Option<String>) -> impl IntoView {
    let (action, heading, submit) = match &doc {
        Some(d) => (format!("/docs/{}/edit", d.id), "Edit doc", "Save changes"),
        None => ("/docs/new".to_string(), "New doc", "Publish"),
    };
    let (title, summary, tags, content) = match doc {
        Some(d) => (d.title, d.summary, d.tags.join(", "), d.content),
        None => Default::default(),
    };
    view! {
        <div class="page-head">
            <h1>{heading}</h1>
        </div>
        <Flash error=error/>
        <form class="editor-form" method="post" action=action>
            <label>
                "Title"
                <input type="text" name="title" value=title maxlength="160" required=true/>
            </label>
            <label>
                "Summary"
                <textarea name="summary" rows="2" placeholder="One-paragraph pitch">
                    {summary}
                </textarea>
            </label>
            <label>
                "Tags"
                <input
                    type="text"
                    name="tags"
                    value=tags
                    placeholder="rust, async, tokio"
                    autocomplete="off"
                />
            </label>
            <label class="editor-label">
                "Content"
                <textarea
                    name="content"
                    rows="18"
                    class="code-editor"
                    data-markdown-source=true
                    spellcheck="false"
                    required=true
                >
                    {content}
                </textarea>
            </label>
            <div class="preview-head">
                <button class="button ghost" type="button" data-preview-toggle=true>
                    "Preview"
                </button>
            </div>
            <div class="markdown-body preview-pane" data-preview-pane=true hidden=true></div>
            <div class="form-actions">
                <button class="button" type="submit">{submit}</button>
            </div>
        </form>
    }
}
