//! Markdown rendering for docs, bug reports, and the editor preview pane.
//!
//! pulldown-cmark with tables, strikethrough, and task lists, plus two
//! rewrites on the event stream:
//! - fenced code blocks go through syntect and come back as highlighted HTML;
//! - raw HTML (block and inline) is demoted to escaped text, because every
//!   body rendered here is untrusted backend content.

use once_cell::sync::Lazy;
use pulldown_cmark::{html::push_html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

static THEME: Lazy<Theme> = Lazy::new(|| {
    ThemeSet::load_defaults()
        .themes
        .remove("InspiredGitHub")
        .unwrap_or_default()
});

/// Render a markdown body to HTML.
pub fn markdown_to_html(input: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(input, options);
    let events = rewrite_events(parser);
    let mut out = String::new();
    push_html(&mut out, events.into_iter());
    out
}

/// Highlight a standalone code block (snippet cards, story viewer).
///
/// Unknown languages fall back to plain text through syntect; a highlighting
/// failure falls all the way back to an escaped `<pre>`.
pub fn highlight_code(lang: &str, source: &str) -> String {
    let ss = &*SYNTAX_SET;
    let syntax = Some(lang)
        .filter(|l| !l.is_empty())
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());
    highlighted_html_for_string(source, ss, syntax, &THEME)
        .unwrap_or_else(|_| format!("<pre><code>{}</code></pre>", escape_text(source)))
}

enum State {
    Normal,
    InCodeBlock { lang: Option<String>, buf: String },
}

fn rewrite_events(parser: Parser<'_>) -> Vec<Event<'_>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock {
                        lang,
                        buf: String::new(),
                    };
                }
                // Raw HTML becomes text; push_html escapes text events.
                Event::Html(raw) => events.push(Event::Text(raw)),
                Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },
            State::InCodeBlock {
                ref lang,
                ref mut buf,
            } => match event {
                Event::Text(t) => buf.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(lang.as_deref().unwrap_or(""), buf);
                    events.push(Event::Html(html.into()));
                    state = State::Normal;
                }
                _ => {}
            },
        }
    }

    events
}

pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = markdown_to_html("# Title\n\nSome *emphasis* here.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn renders_tables_and_task_lists() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n- [ ] todo\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn fenced_code_is_highlighted() {
        let html = markdown_to_html("```rust\nfn main() {}\n```");
        // syntect output wraps the block in a styled <pre>.
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
        // and the raw fence marker is gone
        assert!(!html.contains("```"));
    }

    #[test]
    fn unknown_language_still_renders_pre() {
        let html = markdown_to_html("```nosuchlang\nhello\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn raw_html_is_escaped_not_passed_through() {
        let html = markdown_to_html("hello <script>alert(1)</script> world");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn raw_block_html_is_escaped() {
        let html = markdown_to_html("<div onclick=\"x()\">block</div>");
        assert!(!html.contains("<div onclick"));
        assert!(html.contains("&lt;div"));
    }

    #[test]
    fn highlight_code_falls_back_to_plain_text() {
        let html = highlight_code("definitely-not-a-language", "let x = 1;");
        assert!(html.contains("let x = 1;"));
    }

    #[test]
    fn escape_text_covers_the_dangerous_five() {
        assert_eq!(
            escape_text(r#"<a href="x" title='y'> & </a>"#),
            "&lt;a href=&quot;x&quot; title=&#39;y&#39;&gt; &amp; &lt;/a&gt;"
        );
    }
}
