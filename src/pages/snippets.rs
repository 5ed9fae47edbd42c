//! Snippet browse, detail, and editor pages.

use leptos::prelude::*;

use crate::backend::{Profile, Snippet};
use crate::render::{highlight_code, relative_time};

use super::layout::Nav;
use super::widgets::{Avatar, CommentSection, EmptyState, Flash, LangChip, ReactionBar};
use super::render_page;

pub fn browse_page(
    viewer: Profile,
    snippets: Vec<Snippet>,
    lang: Option<String>,
    error: Option<String>,
) -> String {
    render_page("Snippets", Some(viewer), Nav::Snippets, move || {
        view! { <BrowsePage snippets=snippets lang=lang error=error/> }
    })
}

pub fn detail_page(viewer: Profile, snippet: Snippet, error: Option<String>) -> String {
    let me = viewer.username.clone();
    let title = snippet.title.clone();
    render_page(&title, Some(viewer), Nav::Snippets, move || {
        view! { <DetailPage snippet=snippet viewer_username=me error=error/> }
    })
}

pub fn form_page(viewer: Profile, snippet: Option<Snippet>, error: Option<String>) -> String {
    let title = if snippet.is_some() {
        "Edit snippet"
    } else {
        "New snippet"
    };
    render_page(title, Some(viewer), Nav::Snippets, move || {
        view! { <SnippetForm snippet=snippet error=error/> }
    })
}

/// Card used on the feed and the browse grid.
#[component]
pub fn SnippetCard(snippet: Snippet) -> impl IntoView {
    let href = format!("/snippets/{}", snippet.id);
    let code = highlight_code(&snippet.language, &snippet.code);
    let author_name = snippet.author.display().to_string();
    let author_href = format!("/u/{}", snippet.author.username);
    let description = (!snippet.description.is_empty())
        .then(|| view! { <p class="card-description">{snippet.description.clone()}</p> });
    view! {
        <article class="card snippet-card">
            <header class="card-head">
                <Avatar
                    username=snippet.author.username.clone()
                    avatar_url=snippet.author.avatar_url.clone()
                />
                <div class="card-byline">
                    <a class="author" href=author_href>{author_name}</a>
                    <span class="when">{relative_time(snippet.created_at)}</span>
                </div>
                <LangChip language=snippet.language.clone()/>
            </header>
            <h2 class="card-title">
                <a href=href.clone()>{snippet.title.clone()}</a>
            </h2>
            {description}
            <div class="code-block" inner_html=code></div>
            <ReactionBar
                action=href
                like_count=snippet.like_count
                liked=snippet.liked
                bookmark=Some(snippet.bookmarked)
                comment_count=snippet.comment_count
            />
        </article>
    }
}

#[component]
fn BrowsePage(
    snippets: Vec<Snippet>,
    lang: Option<String>,
    error: Option<String>,
) -> impl IntoView {
    let lang = lang.unwrap_or_default();
    let empty = snippets.is_empty().then(|| {
        view! {
            <EmptyState
                message="No snippets here yet."
                hint="Publish one, or clear the language filter."
            />
        }
    });
    view! {
        <div class="page-head">
            <h1>"Snippets"</h1>
            <a class="button" href="/snippets/new">"New snippet"</a>
        </div>
        <Flash error=error/>
        <form class="filter" method="get" action="/snippets">
            <input
                type="search"
                name="lang"
                value=lang
                placeholder="Filter by language"
                autocomplete="off"
            />
            <button class="button ghost" type="submit">"Filter"</button>
        </form>
        {empty}
        <div class="card-grid">
            {snippets
                .into_iter()
                .map(|snippet| view! { <SnippetCard snippet=snippet/> })
                .collect_view()}
        </div>
    }
}

#[component]
fn DetailPage(snippet: Snippet, viewer_username: String, error: Option<String>) -> impl IntoView {
    let href = format!("/snippets/{}", snippet.id);
    let code = highlight_code(&snippet.language, &snippet.code);
    let author_name = snippet.author.display().to_string();
    let author_href = format!("/u/{}", snippet.author.username);
    let description = (!snippet.description.is_empty())
        .then(|| view! { <p class="detail-description">{snippet.description.clone()}</p> });
    let owner_actions = (snippet.author.username == viewer_username).then(|| {
        view! {
            <div class="owner-actions">
                <a class="button ghost" href=format!("/snippets/{}/edit", snippet.id)>"Edit"</a>
                <form method="post" action=href.clone() data-confirm="Delete this snippet?">
                    <button class="button danger" type="submit" name="intent" value="delete">
                        "Delete"
                    </button>
                </form>
            </div>
        }
    });
    view! {
        <Flash error=error/>
        <article class="detail snippet-detail">
            <header class="card-head">
                <Avatar
                    username=snippet.author.username.clone()
                    avatar_url=snippet.author.avatar_url.clone()
                />
                <div class="card-byline">
                    <a class="author" href=author_href>{author_name}</a>
                    <span class="when">{relative_time(snippet.created_at)}</span>
                </div>
                <LangChip language=snippet.language.clone()/>
                {owner_actions}
            </header>
            <h1 class="detail-title">{snippet.title.clone()}</h1>
            {description}
            <div class="code-block" inner_html=code></div>
            <ReactionBar
                action=href.clone()
                like_count=snippet.like_count
                liked=snippet.liked
                bookmark=Some(snippet.bookmarked)
                comment_count=snippet.comment_count
            />
        </article>
        <CommentSection comments=snippet.comments action=href/>
    }
}

#[component]
fn SnippetForm(snippet: Option<Snippet>, error: Option<String>) -> impl IntoView {
    let (action, heading, submit) = match &snippet {
        Some(s) => (
            format!("/snippets/{}/edit", s.id),
            "Edit snippet",
            "Save changes",
        ),
        None => ("/snippets/new".to_string(), "New snippet", "Publish"),
    };
    let (title, description, language, code) = match snippet {
        Some(s) => (s.title, s.description, s.language, s.code),
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
                <input type="text" name="title" value=title maxlength="120" required=true/>
            </label>
            <label>
                "Description"
                <textarea name="description" rows="2" placeholder="What does it do?">
                    {description}
                </textarea>
            </label>
            <label>
                "Language"
                <input type="text" name="language" value=language placeholder="rust" required=true/>
            </label>
            <label class="editor-label">
                "Code"
                <textarea
                    name="code"
                    rows="14"
                    class="code-editor"
                    data-editor=true
                    spellcheck="false"
                    required=true
                >
                    {code}
                </textarea>
            </label>
            <div class="form-actions">
                <button class="button" type="submit">{submit}</button>
            </div>
        </form>
    }
}
