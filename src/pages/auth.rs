//! Sign-in and onboarding screens. Both render without the app shell.

use leptos::prelude::*;

use crate::backend::Profile;
use crate::session::encode_component;

use super::widgets::Flash;
use super::render_bare;

pub fn login_page(next: Option<String>, error: Option<String>) -> String {
    render_bare("Sign in", move || view! { <LoginPage next=next error=error/> })
}

pub fn onboarding_page(profile: Profile, error: Option<String>) -> String {
    render_bare("Welcome", move || {
        view! { <OnboardingPage profile=profile error=error/> }
    })
}

#[component]
fn LoginPage(next: Option<String>, error: Option<String>) -> impl IntoView {
    let start = match next.filter(|n| !n.is_empty()) {
        Some(n) => format!("/auth/github?next={}", encode_component(&n)),
        None => "/auth/github".to_string(),
    };
    view! {
        <main class="auth-screen">
            <div class="auth-card">
                <p class="brand-mark">"{ }"</p>
                <h1>"CodeGram"</h1>
                <p class="muted">"Share snippets, write docs, squash bugs."</p>
                <Flash error=error/>
                <a class="button github-button" href=start>"Sign in with GitHub"</a>
            </div>
        </main>
    }
}

#[component]
fn OnboardingPage(profile: Profile, error: Option<String>) -> impl IntoView {
    let heading = format!("Welcome, @{}", profile.username);
    let skills = profile.skills.join(", ");
    view! {
        <main class="auth-screen">
            <div class="auth-card onboarding-card">
                <h1>{heading}</h1>
                <p class="muted">"Tell people what you work on. The bio is the one thing we insist on."</p>
                <Flash error=error/>
                <form class="editor-form" method="post" action="/onboarding">
                    <label>
                        "Display name"
                        <input
                            type="text"
                            name="display_name"
                            value=profile.display_name.clone()
                            maxlength="80"
                            autocomplete="off"
                        />
                    </label>
                    <label>
                        "Bio"
                        <textarea
                            name="bio"
                            rows="3"
                            placeholder="Rust by day, Rust by night."
                            required=true
                        >
                            {profile.bio.clone()}
                        </textarea>
                    </label>
                    <label>
                        "Avatar URL"
                        <input
                            type="url"
                            name="avatar_url"
                            value=profile.avatar_url.clone().unwrap_or_default()
                            placeholder="https://example.com/you.png"
                            autocomplete="off"
                        />
                    </label>
                    <label>
                        "Skills"
                        <input
                            type="text"
                            name="skills"
                            value=skills
                            placeholder="rust, sql, wasm"
                            autocomplete="off"
                        />
                    </label>
                    <div class="form-actions">
                        <button class="button" type="submit">"Finish setup"</button>
                    </div>
                </form>
            </div>
        </main>
    }
}
