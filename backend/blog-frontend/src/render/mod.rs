//! Server-side HTML rendering
//!
//! Pages are composed with maud; all interpolated text is HTML-escaped.
//! Per-request state (signed-in user, theme) travels in [`PageContext`].

use chrono::{DateTime, NaiveDateTime};
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::interaction::ThemePreference;
use crate::models::User;

pub mod pages;

pub const SITE_NAME: &str = "BlogHub";

const WORDS_PER_MINUTE: usize = 200;
const EXCERPT_CHARS: usize = 160;

/// Request-scoped render inputs
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub user: Option<User>,
    pub theme: ThemePreference,
}

impl PageContext {
    pub fn new(user: Option<User>, theme: ThemePreference) -> Self {
        Self { user, theme }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

pub fn layout(ctx: &PageContext, title: &str, description: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class=(ctx.theme.root_class()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                style { (PreEscaped(STYLESHEET)) }
            }
            body {
                (navbar(ctx))
                main { (body) }
            }
        }
    }
}

fn navbar(ctx: &PageContext) -> Markup {
    let links = html! {
        a href="/" { "Discover" }
        @if let Some(user) = &ctx.user {
            a href="/create" { "✍️ Create Blog" }
            span class="nav-user" {
                span class="avatar small" { (user.initial()) }
                (user.display_name())
            }
            form method="post" action="/logout" class="inline" {
                button type="submit" class="link" { "Logout" }
            }
        } @else {
            a href="/login" { "Sign In" }
            a href="/register" class="button" { "Get Started" }
        }
    };

    html! {
        nav class="navbar" {
            a href="/" class="brand" { (SITE_NAME) }
            div class="nav-links" { (links) }
            (theme_toggle(ctx.theme))
            details class="mobile-menu" {
                summary aria-label="Toggle menu" { "☰" }
                div class="mobile-links" { (links) }
            }
        }
    }
}

fn theme_toggle(theme: ThemePreference) -> Markup {
    html! {
        form method="post" action="/theme" class="inline" {
            button type="submit" class="theme-toggle"
                title={ "Theme: " (theme.as_str()) " (switch to " (theme.next().as_str()) ")" } {
                (theme.icon())
            }
        }
    }
}

/// "N min read", at least one minute.
pub fn reading_time(content: &str) -> String {
    let words = content.split_whitespace().count().max(1);
    format!("{} min read", words.div_ceil(WORDS_PER_MINUTE))
}

/// First 160 characters followed by "..." when the content is longer.
pub fn excerpt(content: &str) -> String {
    if content.chars().count() > EXCERPT_CHARS {
        let head: String = content.chars().take(EXCERPT_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

/// "Jan 5, 2024"
pub fn format_date_short(raw: &str) -> String {
    format_date(raw, "%b %-d, %Y")
}

/// "January 5, 2024"
pub fn format_date_long(raw: &str) -> String {
    format_date(raw, "%B %-d, %Y")
}

fn format_date(raw: &str, fmt: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(fmt).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format(fmt).to_string(),
        Err(_) => raw.to_string(),
    }
}

const STYLESHEET: &str = r#"
:root { --bg: #f9fafb; --fg: #111827; --muted: #6b7280; --card: #ffffff; --accent: #2563eb; --border: #e5e7eb; }
html.dark { --bg: #111827; --fg: #f3f4f6; --muted: #9ca3af; --card: #1f2937; --accent: #60a5fa; --border: #374151; }
@media (prefers-color-scheme: dark) {
  html.system { --bg: #111827; --fg: #f3f4f6; --muted: #9ca3af; --card: #1f2937; --accent: #60a5fa; --border: #374151; }
}
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--fg); }
a { color: var(--accent); text-decoration: none; }
main { max-width: 64rem; margin: 0 auto; padding: 1.5rem; }
.navbar { display: flex; align-items: center; gap: 1rem; padding: 0.75rem 1.5rem; border-bottom: 1px solid var(--border); background: var(--card); }
.brand { font-weight: 700; font-size: 1.25rem; margin-right: auto; }
.nav-links { display: flex; align-items: center; gap: 1rem; }
.mobile-menu { display: none; }
@media (max-width: 768px) { .nav-links { display: none; } .mobile-menu { display: block; } .mobile-links { display: flex; flex-direction: column; gap: 0.5rem; } }
.inline { display: inline; }
button, .button { cursor: pointer; border: 0; border-radius: 0.5rem; padding: 0.5rem 1rem; background: var(--accent); color: #fff; }
button.link, button.theme-toggle { background: none; color: var(--fg); padding: 0.25rem; }
button:disabled { opacity: 0.5; cursor: not-allowed; }
.card { background: var(--card); border: 1px solid var(--border); border-radius: 1rem; padding: 1.5rem; margin-bottom: 1rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }
.muted { color: var(--muted); font-size: 0.875rem; }
.badge { display: inline-block; padding: 0.125rem 0.625rem; border-radius: 999px; background: var(--border); font-size: 0.75rem; }
.avatar { display: inline-flex; align-items: center; justify-content: center; width: 2.5rem; height: 2.5rem; border-radius: 50%; background: var(--accent); color: #fff; font-weight: 700; }
.avatar.small { width: 1.75rem; height: 1.75rem; font-size: 0.8rem; margin-right: 0.25rem; }
.alert { border: 1px solid #fca5a5; background: #fef2f2; color: #991b1b; border-radius: 0.5rem; padding: 0.75rem 1rem; margin-bottom: 1rem; }
.empty { text-align: center; padding: 4rem 0; }
.content { white-space: pre-wrap; line-height: 1.8; font-size: 1.125rem; }
.stats { display: flex; gap: 1rem; align-items: center; }
label { display: block; font-weight: 600; margin: 1rem 0 0.25rem; }
input, select, textarea { width: 100%; box-sizing: border-box; padding: 0.5rem; border: 1px solid var(--border); border-radius: 0.5rem; background: var(--card); color: var(--fg); }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_time_rounds_up_with_minimum() {
        assert_eq!(reading_time(""), "1 min read");
        assert_eq!(reading_time("word"), "1 min read");
        assert_eq!(reading_time(&"word ".repeat(200)), "1 min read");
        assert_eq!(reading_time(&"word ".repeat(201)), "2 min read");
    }

    #[test]
    fn test_excerpt_truncates_on_characters() {
        assert_eq!(excerpt("short"), "short");
        let long = "é".repeat(200);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 163);
    }

    #[test]
    fn test_format_dates() {
        assert_eq!(format_date_short("2024-01-05T10:00:00"), "Jan 5, 2024");
        assert_eq!(format_date_long("2024-01-05T10:00:00.123456"), "January 5, 2024");
        assert_eq!(format_date_long("2024-03-09T10:00:00+02:00"), "March 9, 2024");
        assert_eq!(format_date_short("yesterday"), "yesterday");
    }

    #[test]
    fn test_layout_escapes_and_applies_theme() {
        let ctx = PageContext::new(None, ThemePreference::Dark);
        let page = layout(&ctx, "<Title>", "desc", html! { p { "body" } }).into_string();
        assert!(page.contains(r#"<html lang="en" class="dark">"#));
        assert!(page.contains("&lt;Title&gt;"));
        assert!(page.contains("Sign In"));
    }
}
