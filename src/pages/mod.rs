//! Server-rendered pages.
//!
//! Every page is a tree of plain Leptos components rendered to a string in
//! one shot, with no signals and no hydration. Interactivity ships
//! separately as `static/app.js`; these components only lay out the data
//! their route handler fetched.

pub mod auth;
pub mod bugs;
pub mod docs;
pub mod feed;
pub mod layout;
pub mod profile;
pub mod snippets;
pub mod stories;
pub mod widgets;

use leptos::prelude::*;

use crate::backend::Profile;
use layout::{Document, Nav, Shell};
use widgets::ErrorCard;

/// Render a full document with the sidebar shell around `body`.
pub fn render_page<F, V>(title: &str, viewer: Option<Profile>, active: Nav, body: F) -> String
where
    F: FnOnce() -> V + Send + 'static,
    V: IntoView + 'static,
{
    let title = format!("{title} · CodeGram");
    let owner = Owner::new_root(None);
    owner.with(move || {
        view! {
            <Document title=title>
                <Shell viewer=viewer active=active>{body()}</Shell>
            </Document>
        }
        .to_html()
    })
}

/// Render a full document without the shell (login, story viewer, errors).
pub fn render_bare<F, V>(title: &str, body: F) -> String
where
    F: FnOnce() -> V + Send + 'static,
    V: IntoView + 'static,
{
    let title = format!("{title} · CodeGram");
    let owner = Owner::new_root(None);
    owner.with(move || {
        view! { <Document title=title>{body()}</Document> }.to_html()
    })
}

/// The standalone error page used by `WebError::into_response`.
pub fn render_error(status: u16, message: &str) -> String {
    let message = message.to_string();
    render_bare("Error", move || {
        view! { <ErrorCard status=status message=message/> }
    })
}
