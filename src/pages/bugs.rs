//! Bug board, bug detail, and the report form.

use leptos::prelude::*;

use crate::backend::{Bug, Profile};
use crate::render::{markdown_to_html, relative_time};

use super::layout::Nav;
use super::widgets::{Avatar, CommentSection, EmptyState, Flash, ReactionBar};
use super::render_page;

const STATUSES: [(&str, &str); 3] = [
    ("open", "Open"),
    ("in-progress", "In progress"),
    ("resolved", "Resolved"),
];

const SEVERITIES: [&str; 4] = ["low", "medium", "high", "critical"];

pub fn board_page(viewer: Profile, bugs: Vec<Bug>, error: Option<String>) -> String {
    render_page("Bugs", Some(viewer), Nav::Bugs, move || {
        view! { <BoardPage bugs=bugs error=error/> }
    })
}

pub fn detail_page(viewer: Profile, bug: Bug, error: Option<String>) -> String {
    let me = viewer.username.clone();
    let title = bug.title.clone();
    render_page(&title, Some(viewer), Nav::Bugs, move || {
        view! { <DetailPage bug=bug viewer_username=me error=error/> }
    })
}

pub fn form_page(viewer: Profile, error: Option<String>) -> String {
    render_page("Report a bug", Some(viewer), Nav::Bugs, move || {
        view! { <BugForm error=error/> }
    })
}

/// Buckets unknown statuses into the open column so nothing drops off the
/// board.
fn partition(bugs: Vec<Bug>) -> (Vec<Bug>, Vec<Bug>, Vec<Bug>) {
    let mut open = Vec::new();
    let mut in_progress = Vec::new();
    let mut resolved = Vec::new();
    for bug in bugs {
        match bug.status.as_str() {
            "resolved" | "closed" => resolved.push(bug),
            "in-progress" | "in_progress" => in_progress.push(bug),
            _ => open.push(bug),
        }
    }
    (open, in_progress, resolved)
}

#[component]
fn SeverityChip(#[prop(into)] severity: String) -> impl IntoView {
    let severity = if severity.is_empty() {
        "medium".to_string()
    } else {
        severity
    };
    let class = format!("chip severity-chip severity-{severity}");
    view! { <span class=class>{severity.clone()}</span> }
}

#[component]
pub fn BugCard(bug: Bug) -> impl IntoView {
    let href = format!("/bugs/{}", bug.id);
    let author_name = bug.author.display().to_string();
    let assignee = bug
        .assignee
        .filter(|a| !a.is_empty())
        .map(|a| view! { <span class="assignee">{format!("→ @{a}")}</span> });
    view! {
        <article class="card bug-card">
            <header class="bug-card-head">
                <SeverityChip severity=bug.severity.clone()/>
                <span class="when">{relative_time(bug.created_at)}</span>
            </header>
            <h3 class="card-title">
                <a href=href>{bug.title.clone()}</a>
            </h3>
            <footer class="bug-card-foot">
                <span class="author">{author_name}</span>
                {assignee}
                <span class="counts">
                    {format!("♥ {} · 💬 {}", bug.like_count, bug.comment_count)}
                </span>
            </footer>
        </article>
    }
}

#[component]
fn BugColumn(#[prop(into)] title: String, bugs: Vec<Bug>) -> impl IntoView {
    let count = bugs.len();
    view! {
        <section class="bug-column">
            <h2 class="column-title">{title} <span class="count">{count}</span></h2>
            <div class="column-cards">
                {bugs.into_iter().map(|bug| view! { <BugCard bug=bug/> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn BoardPage(bugs: Vec<Bug>, error: Option<String>) -> impl IntoView {
    let empty = bugs.is_empty().then(|| {
        view! { <EmptyState message="No bugs reported." hint="A rare and suspicious state."/> }
    });
    let (open, in_progress, resolved) = partition(bugs);
    view! {
        <div class="page-head">
            <h1>"Bugs"</h1>
            <a class="button" href="/bugs/new">"Report a bug"</a>
        </div>
        <Flash error=error/>
        {empty}
        <div class="bug-board">
            <BugColumn title="Open" bugs=open/>
            <BugColumn title="In progress" bugs=in_progress/>
            <BugColumn title="Resolved" bugs=resolved/>
        </div>
    }
}

#[component]
fn DetailPage(bug: Bug, viewer_username: String, error: Option<String>) -> impl IntoView {
    let href = format!("/bugs/{}", bug.id);
    let body = markdown_to_html(&bug.description);
    let author_name = bug.author.display().to_string();
    let author_href = format!("/u/{}", bug.author.username);
    let assignee = bug.assignee.clone().unwrap_or_default();
    let status = bug.status.clone();
    let delete = (bug.author.username == viewer_username).then(|| {
        view! {
            <form method="post" action=href.clone() data-confirm="Delete this bug?">
                <button class="button danger" type="submit" name="intent" value="delete">
                    "Delete"
                </button>
            </form>
        }
    });
    view! {
        <Flash error=error/>
        <article class="detail bug-detail">
            <header class="card-head">
                <Avatar username=bug.author.username.clone() avatar_url=bug.author.avatar_url.clone()/>
                <div class="card-byline">
                    <a class="author" href=author_href>{author_name}</a>
                    <span class="when">{relative_time(bug.created_at)}</span>
                </div>
                <SeverityChip severity=bug.severity.clone()/>
                {delete}
            </header>
            <h1 class="detail-title">{bug.title.clone()}</h1>
            <div class="markdown-body" inner_html=body></div>
            <div class="bug-controls">
                <form class="inline-form" method="post" action=href.clone()>
                    <label>
                        "Status"
                        <select name="status">
                            {STATUSES
                                .iter()
                                .map(|(value, label)| {
                                    let selected = *value == status;
                                    view! {
                                        <option value=*value selected=selected>{*label}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <button class="button ghost" type="submit" name="intent" value="status">
                        "Update"
                    </button>
                </form>
                <form class="inline-form" method="post" action=href.clone()>
                    <label>
                        "Assignee"
                        <input
                            type="text"
                            name="assignee"
                            value=assignee
                            placeholder="username"
                            autocomplete="off"
                        />
                    </label>
                    <button class="button ghost" type="submit" name="intent" value="assign">
                        "Assign"
                    </button>
                </form>
            </div>
            <ReactionBar
                action=href.clone()
                like_count=bug.like_count
                liked=bug.liked
                bookmark=None
                comment_count=bug.comment_count
            />
        </article>
        <CommentSection comments=bug.comments action=href/>
    }
}

#[component]
fn BugForm(error: Option<String>) -> impl IntoView {
    view! {
        <div class="page-head">
            <h1>"Report a bug"</h1>
        </div>
        <Flash error=error/>
        <form class="editor-form" method="post" action="/bugs/new">
            <label>
                "Title"
                <input type="text" name="title" maxlength="160" required=true/>
            </label>
            <label>
                "Severity"
                <select name="severity">
                    {SEVERITIES
                        .iter()
                        .map(|severity| {
                            let selected = *severity == "medium";
                            view! {
                                <option value=*severity selected=selected>{*severity}</option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <label class="editor-label">
                "Description"
                <textarea
                    name="description"
                    rows="12"
                    class="code-editor"
                    data-markdown-source=true
                    placeholder="What happened? What did you expect? Markdown works."
                    spellcheck="false"
                    required=true
                ></textarea>
            </label>
            <div class="form-actions">
                <button class="button" type="submit">"File bug"</button>
            </div>
        </form>
    }
}
