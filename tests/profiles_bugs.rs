//! Integration tests for profile pages, the follow toggle, and the bug
//! workflow actions (status, assignment, toggle-like).

mod common;

use common::{bug_json, doc_json, spawn_app};
use serde_json::json;

fn profile_json(username: &str, followers: i64) -> String {
    json!({
        "id": format!("u-{username}"),
        "username": username,
        "displayName": username,
        "bio": "keeps the build green",
        "skills": ["rust", "ci"],
        "followers": followers,
        "following": 4,
        "snippetCount": 3,
        "isFollowing": false,
        "onboarded": true,
    })
    .to_string()
}

#[tokio::test]
async fn profile_page_shows_stats_and_defaults_to_snippets() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend
        .respond("GET /api/users/tobi", 200, &profile_json("tobi", 9));
    app.backend.respond("GET /api/users/tobi/snippets", 200, "[]");

    let resp = app.get("/u/tobi").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("3 snippets · 9 followers · 4 following"));
    assert!(html.contains("keeps the build green"));

    assert_eq!(
        app.backend.requests_to("/api/users/tobi/snippets").len(),
        1,
        "the default tab loads snippets"
    );
}

#[tokio::test]
async fn profile_tab_switches_the_backend_read() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend
        .respond("GET /api/users/tobi", 200, &profile_json("tobi", 9));
    app.backend.respond(
        "GET /api/users/tobi/docs",
        200,
        &json!([doc_json("d-5", "Queue internals", "tobi")]).to_string(),
    );

    let resp = app.get("/u/tobi?tab=docs").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Queue internals"));
    assert!(
        app.backend.requests_to("/api/users/tobi/snippets").is_empty(),
        "only the selected tab's list is fetched"
    );
}

#[tokio::test]
async fn unknown_profile_is_a_404_page() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend
        .respond("GET /api/users/ghost", 404, r#"{"error":"no such user"}"#);

    let resp = app.get("/u/ghost").await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn follow_intent_forwards_to_the_backend() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend
        .respond("POST /api/users/tobi/follow", 200, "{}");

    let resp = app.post_form("/u/tobi", &[("intent", "follow")]).await;
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("location").unwrap(), "/u/tobi");
    assert_eq!(app.backend.requests_to("/api/users/tobi/follow").len(), 1);
}

#[tokio::test]
async fn unfollow_intent_uses_the_unfollow_route() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend
        .respond("POST /api/users/tobi/unfollow", 200, "{}");

    let resp = app
        .post_json_mode("/u/tobi", &[("intent", "unfollow")])
        .await;
    assert_eq!(resp.status(), 200);
    assert_eq!(app.backend.requests_to("/api/users/tobi/unfollow").len(), 1);
}

#[tokio::test]
async fn bug_status_intent_posts_the_new_status() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond("POST /api/bugs/b-9/status", 200, "{}");

    let resp = app
        .post_form("/bugs/b-9", &[("intent", "status"), ("status", "resolved")])
        .await;
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("location").unwrap(), "/bugs/b-9");

    let forwarded = app.backend.requests_to("/api/bugs/b-9/status");
    assert_eq!(forwarded.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&forwarded[0].body).unwrap();
    assert_eq!(body["status"], "resolved");
}

#[tokio::test]
async fn bug_status_intent_requires_a_status() {
    let app = spawn_app().await;
    app.login_as("mara");

    let resp = app
        .post_json_mode("/bugs/b-9", &[("intent", "status"), ("status", "  ")])
        .await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Pick a status.");
    assert!(app.backend.requests_to("/api/bugs/b-9").is_empty());
}

#[tokio::test]
async fn bug_assign_intent_relays_the_username() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond("POST /api/bugs/b-9/assign", 200, "{}");

    app.post_form("/bugs/b-9", &[("intent", "assign"), ("assignee", " tobi ")])
        .await;

    let forwarded = app.backend.requests_to("/api/bugs/b-9/assign");
    assert_eq!(forwarded.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&forwarded[0].body).unwrap();
    assert_eq!(body["assignee"], "tobi", "the assignee arrives trimmed");
}

#[tokio::test]
async fn blank_assignee_clears_the_assignment() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond("POST /api/bugs/b-9/assign", 200, "{}");

    app.post_form("/bugs/b-9", &[("intent", "assign"), ("assignee", "")])
        .await;

    let forwarded = app.backend.requests_to("/api/bugs/b-9/assign");
    assert_eq!(forwarded.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&forwarded[0].body).unwrap();
    assert_eq!(body["assignee"], "");
}

#[tokio::test]
async fn bug_like_and_unlike_both_hit_the_toggle_endpoint() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond("POST /api/bugs/b-9/like", 200, "{}");

    app.post_json_mode("/bugs/b-9", &[("intent", "like")]).await;
    app.post_json_mode("/bugs/b-9", &[("intent", "unlike")]).await;

    assert_eq!(
        app.backend.requests_to("/api/bugs/b-9/like").len(),
        2,
        "the backend toggles likes; both intents land on the same route"
    );
}

#[tokio::test]
async fn bug_create_requires_title_and_description() {
    let app = spawn_app().await;
    app.login_as("mara");

    let resp = app
        .post_json_mode("/bugs/new", &[("title", "Crash"), ("description", " ")])
        .await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Title and description are required.");
}

#[tokio::test]
async fn bug_create_lands_on_the_new_bug() {
    let app = spawn_app().await;
    app.login_as("mara");
    app.backend.respond(
        "POST /api/bugs",
        201,
        &bug_json("b-31", "Crash on save", "open").to_string(),
    );

    let resp = app
        .post_form(
            "/bugs/new",
            &[
                ("title", "Crash on save"),
                ("description", "Repro: save twice."),
                ("severity", "high"),
            ],
        )
        .await;
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("location").unwrap(), "/bugs/b-31");
}
