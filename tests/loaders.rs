//! Integration tests for the page loaders: what renders when the backend
//! answers, and what degrades when it does not. Listing pages must survive a
//! dead backend with empty states; detail pages surface a proper error page.

mod common;

use common::{bug_json, doc_json, snippet_json, spawn_app, story_json};
use serde_json::json;

#[tokio::test]
async fn feed_renders_snippets_stories_and_suggestions() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond(
        "GET /api/snippets/feed",
        200,
        &json!([
            snippet_json("s-1", "Iterator adapters", "tobi"),
            snippet_json("s-2", "Lock-free queue", "ada"),
        ])
        .to_string(),
    );
    app.backend.respond(
        "GET /api/bugs/stories",
        200,
        &json!([story_json("st-1", "tobi")]).to_string(),
    );
    app.backend.respond(
        "GET /api/users/suggestions",
        200,
        &json!([{
            "id": "u-ada",
            "username": "ada",
            "displayName": "Ada",
            "isFollowing": false,
        }])
        .to_string(),
    );

    let resp = app.get("/").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Iterator adapters"));
    assert!(html.contains("Lock-free queue"));
    assert!(html.contains("Who to follow"));
    assert!(html.contains("/u/ada"), "suggestions link to the profile");
    assert!(html.contains("/stories/st-1"), "story bubbles link the viewer");
}

#[tokio::test]
async fn feed_degrades_to_empty_states_when_the_backend_fails() {
    let app = spawn_app().await;
    app.login_as("mara");
    // Feed, stories, and suggestions all answer 404 from the stub.

    let resp = app.get("/").await;
    assert_eq!(resp.status(), 200, "listing pages never die with the backend");
    let html = resp.text().await.unwrap();
    assert!(html.contains("Your feed is empty."));
}

#[tokio::test]
async fn feed_fans_out_three_backend_reads() {
    let app = spawn_app().await;
    app.login_as("mara");

    app.get("/").await;

    assert_eq!(app.backend.requests_to("/api/snippets/feed").len(), 1);
    assert_eq!(app.backend.requests_to("/api/bugs/stories").len(), 1);
    assert_eq!(app.backend.requests_to("/api/users/suggestions").len(), 1);
}

#[tokio::test]
async fn snippet_browse_forwards_the_language_filter() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond("GET /api/snippets", 200, "[]");

    let resp = app.get("/snippets?lang=rust").await;
    assert_eq!(resp.status(), 200);

    let forwarded = app.backend.requests_to("/api/snippets?lang=rust");
    assert_eq!(forwarded.len(), 1, "?lang must reach the backend");
}

#[tokio::test]
async fn snippet_detail_renders_code_and_comments() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond(
        "GET /api/snippets/s-1",
        200,
        &snippet_json("s-1", "Iterator adapters", "tobi").to_string(),
    );

    let resp = app.get("/snippets/s-1").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Iterator adapters"));
    assert!(html.contains("<pre"), "code renders highlighted in a <pre>");
    assert!(html.contains("Neat trick."), "comments render under the code");
    assert!(html.contains("id=\"comments\""));
}

#[tokio::test]
async fn missing_snippet_is_a_404_page() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend
        .respond("GET /api/snippets/nope", 404, r#"{"error":"not found"}"#);

    let resp = app.get("/snippets/nope").await;
    assert_eq!(resp.status(), 404);
    let html = resp.text().await.unwrap();
    assert!(html.contains("This page does not exist."));
}

#[tokio::test]
async fn broken_backend_on_a_detail_page_is_a_bad_gateway() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend
        .respond("GET /api/snippets/s-1", 503, r#"{"error":"overloaded"}"#);

    let resp = app.get("/snippets/s-1").await;
    assert_eq!(resp.status(), 502);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Something went wrong. Please try again."));
}

#[tokio::test]
async fn doc_detail_renders_markdown_and_escapes_html() {
    let app = spawn_app().await;
    app.login_as("mara");
    let mut doc = doc_json("d-1", "Queue internals", "ada");
    doc["content"] = json!("# Draining\n\n<script>alert(1)</script>");
    app.backend
        .respond("GET /api/docs/d-1", 200, &doc.to_string());

    let resp = app.get("/docs/d-1").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("<h1>Draining</h1>"), "markdown heading renders");
    assert!(
        !html.contains("<script>alert(1)</script>"),
        "raw HTML in markdown must not reach the page"
    );
}

#[tokio::test]
async fn markdown_preview_returns_a_fragment() {
    let app = spawn_app().await;
    app.login_as("mara");

    let resp = app
        .client
        .post(format!("{}/markdown/preview", app.url))
        .header("Cookie", common::SESSION_COOKIE)
        .body("## Heads up\n\nSome *emphasis*.")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("<h2>Heads up</h2>"));
    assert!(html.contains("<em>emphasis</em>"));
    assert!(
        !html.contains("<!DOCTYPE html>"),
        "preview is a fragment, not a document"
    );
}

#[tokio::test]
async fn bug_board_buckets_bugs_into_columns() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond(
        "GET /api/bugs",
        200,
        &json!([
            bug_json("b-1", "Panic on empty input", "open"),
            bug_json("b-2", "Slow cold start", "in-progress"),
            bug_json("b-3", "Flaky redirect", "resolved"),
            bug_json("b-4", "Weird status", "triaged"),
        ])
        .to_string(),
    );

    let resp = app.get("/bugs").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Panic on empty input"));
    assert!(html.contains("Slow cold start"));
    assert!(html.contains("Flaky redirect"));
    assert!(html.contains("Weird status"), "unknown statuses still render");
    assert!(html.contains("In progress"));
    assert!(html.contains("Resolved"));
}

#[tokio::test]
async fn story_viewer_renders_with_neighbor_navigation() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond(
        "GET /api/bugs/stories/st-2",
        200,
        &story_json("st-2", "ada").to_string(),
    );
    app.backend.respond(
        "GET /api/bugs/stories",
        200,
        &json!([
            story_json("st-1", "tobi"),
            story_json("st-2", "ada"),
            story_json("st-3", "sam"),
        ])
        .to_string(),
    );

    let resp = app.get("/stories/st-2").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("shipping a fix"));
    assert!(
        html.contains("/stories/st-1") && html.contains("/stories/st-3"),
        "prev/next arrows walk the strip order"
    );
}

#[tokio::test]
async fn story_viewer_without_a_strip_still_renders() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond(
        "GET /api/bugs/stories/st-9",
        200,
        &story_json("st-9", "ada").to_string(),
    );
    // The strip listing is not canned; neighbors degrade to none.

    let resp = app.get("/stories/st-9").await;
    assert_eq!(resp.status(), 200);
}
