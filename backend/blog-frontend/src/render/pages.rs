//! Page bodies

use maud::{html, Markup, PreEscaped};

use super::{
    excerpt, format_date_long, format_date_short, layout, reading_time, PageContext, SITE_NAME,
};
use crate::actions::{CreateBlogForm, RegisterForm, LIKE_FAILED, SHARE_FAILED};
use crate::interaction::ClipboardOutcome;
use crate::models::{Blog, Comment};

const HOME_TITLE: &str = "BlogHub - Discover Amazing Stories & Insights";
const HOME_DESCRIPTION: &str =
    "Join our community of expert writers and discover thought-provoking content from around the world";

fn error_alert(error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = error {
            div class="alert" role="alert" { (error) }
        }
    }
}

// ============================================================================
// Feed
// ============================================================================

pub struct FeedPage<'a> {
    pub blogs: &'a [Blog],
    pub page: u32,
    pub has_more: bool,
}

pub fn home(ctx: &PageContext, feed: &FeedPage<'_>) -> Markup {
    let body = html! {
        section class="card" {
            h1 { "Discover Amazing Stories & Insights" }
            p class="muted" {
                "Join our community of expert writers and thought leaders sharing knowledge from around the globe"
            }
            p {
                a href="/create" class="button" { "✍️ Start Writing" }
                " "
                a href="#blogs" { "📖 Explore Blogs" }
            }
            p class="muted" { (feed.blogs.len()) "+ Expert Articles" }
        }

        section id="blogs" {
            h2 { "Latest Stories" }
            @if feed.blogs.is_empty() {
                div class="empty" {
                    h3 { "No stories yet" }
                    p class="muted" { "Be the first to share your expertise with the community!" }
                    a href="/create" class="button" { "✍️ Create First Blog" }
                }
            } @else {
                div class="grid" {
                    @for blog in feed.blogs {
                        (blog_card(blog))
                    }
                }
            }
            p class="stats" {
                @if feed.page > 0 {
                    a href={ "/?page=" (feed.page - 1) } { "← Newer stories" }
                }
                @if feed.has_more {
                    a href={ "/?page=" (feed.page + 1) } { "Older stories →" }
                }
            }
        }

        section class="card" {
            h2 { "Ready to Share Your Story?" }
            a href="/register" class="button" { "🚀 Get Started Today" }
        }
    };

    layout(ctx, HOME_TITLE, HOME_DESCRIPTION, body)
}

fn blog_card(blog: &Blog) -> Markup {
    html! {
        a href={ "/blog/" (blog.id) } {
            article class="card" {
                p class="muted" {
                    span class="badge" { (blog.author.specialization.as_deref().unwrap_or("General")) }
                    " • " (reading_time(&blog.content))
                }
                h3 { (blog.title) }
                p { (excerpt(&blog.content)) }
                p {
                    span class="avatar" { (blog.author.initial()) }
                    " " (blog.author.display_name())
                    span class="muted" { " 📍 " (blog.author.country) }
                }
                p class="stats muted" {
                    span { "♥ " (blog.likes) }
                    span { "↗ " (blog.shares) }
                    span { "💬 " (blog.comments.len()) }
                    time { (format_date_short(&blog.created_at)) }
                }
            }
        }
    }
}

// ============================================================================
// Blog detail
// ============================================================================

/// Messages shown on the detail page after a failed submission
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailNotices<'a> {
    /// Shown above the comment form
    pub comment_error: Option<&'a str>,
    /// Shown above the like/share buttons
    pub interaction_error: Option<&'a str>,
}

pub fn blog_detail(ctx: &PageContext, blog: &Blog, notices: DetailNotices<'_>) -> Markup {
    let title = format!("{} | {}", blog.title, SITE_NAME);
    let description = blog.content.chars().take(160).collect::<String>();

    let body = html! {
        p { a href="/" { "← Back" } }
        article class="card" {
            p class="muted" {
                span class="badge" { (blog.author.specialization.as_deref().unwrap_or("Article")) }
                " • " (reading_time(&blog.content))
            }
            h1 { (blog.title) }
            p {
                span class="avatar" { (blog.author.initial()) }
                " " strong { (blog.author.display_name()) }
                @if let Some(specialization) = &blog.author.specialization {
                    br; span class="muted" { (specialization) }
                }
                br;
                span class="muted" {
                    "📍 " (blog.author.country) " • Published " (format_date_long(&blog.created_at))
                }
            }
            div class="content" { (blog.content) }
            (error_alert(notices.interaction_error))
            (interaction_buttons(blog))
        }

        section class="card" id="comments" {
            h2 { "💬 Comments (" (blog.comments.len()) ")" }
            (comment_form(ctx, blog.id, notices.comment_error))
            @if blog.comments.is_empty() {
                div class="empty" {
                    p { "No comments yet" }
                    p class="muted" { "Be the first to share your thoughts!" }
                }
            } @else {
                @for comment in &blog.comments {
                    (comment_item(comment))
                }
            }
        }
    };

    layout(ctx, &title, &description, body)
}

fn interaction_buttons(blog: &Blog) -> Markup {
    html! {
        div class="stats" {
            form method="post" action={ "/blog/" (blog.id) "/like" } data-counter="likes" class="inline" {
                button type="submit" { "👍 Like (" span data-count { (blog.likes) } ")" }
            }
            form method="post" action={ "/blog/" (blog.id) "/share" } data-counter="shares" class="inline" {
                button type="submit" { "🔗 Share (" span data-count { (blog.shares) } ")" }
            }
        }
        script { (PreEscaped(interaction_script())) }
    }
}

/// Enhances the like/share forms: one request in flight per button, the
/// counter shows the server's returned value, and copying the current page
/// link is reported separately from the share itself.
fn interaction_script() -> String {
    let messages: serde_json::Map<String, serde_json::Value> = ClipboardOutcome::ALL
        .iter()
        .map(|o| (o.key().to_string(), serde_json::Value::from(o.message())))
        .collect();

    format!(
        r#"(function () {{
  var messages = {messages};
  var failures = {failures};
  function copyLink(url) {{
    if (!navigator.clipboard) return Promise.resolve("unavailable");
    return navigator.clipboard.writeText(url).then(
      function () {{ return "copied"; }},
      function () {{ return "failed"; }});
  }}
  document.querySelectorAll("form[data-counter]").forEach(function (form) {{
    var busy = false;
    form.addEventListener("submit", function (event) {{
      event.preventDefault();
      if (busy) return;
      busy = true;
      var kind = form.dataset.counter;
      var button = form.querySelector("button");
      button.disabled = true;
      fetch(form.action, {{ method: "POST", headers: {{ "Accept": "application/json" }} }})
        .then(function (res) {{
          if (!res.ok) throw new Error("HTTP " + res.status);
          return res.json();
        }})
        .then(function (data) {{
          form.querySelector("[data-count]").textContent = data[kind];
          if (kind === "shares") {{
            return copyLink(window.location.href).then(function (outcome) {{ alert(messages[outcome]); }});
          }}
        }}, function () {{
          alert(failures[kind]);
        }})
        .finally(function () {{ busy = false; button.disabled = false; }});
    }});
  }});
}})();"#,
        messages = serde_json::Value::Object(messages),
        failures = serde_json::json!({ "likes": LIKE_FAILED, "shares": SHARE_FAILED }),
    )
}

fn comment_form(ctx: &PageContext, blog_id: i64, error: Option<&str>) -> Markup {
    html! {
        @if ctx.is_logged_in() {
            form method="post" action={ "/blog/" (blog_id) "/comments" } {
                (error_alert(error))
                textarea name="content" rows="3" placeholder="Write a comment..." required {}
                p { button type="submit" { "Post Comment" } }
            }
        } @else {
            (error_alert(error))
            div class="card empty" { p class="muted" { "Please login to comment" } }
        }
    }
}

fn comment_item(comment: &Comment) -> Markup {
    html! {
        div class="card" {
            p {
                span class="avatar small" { (comment.author.initial()) }
                strong { (comment.author.display_name()) }
                span class="muted" { " • " time { (format_date_long(&comment.created_at)) } }
            }
            p { (comment.content) }
        }
    }
}

// ============================================================================
// Forms
// ============================================================================

pub fn login(ctx: &PageContext, error: Option<&str>, email: &str) -> Markup {
    let body = html! {
        section class="card" {
            h1 { "Welcome back" }
            form method="post" action="/login" {
                (error_alert(error))
                label for="email" { "Email Address" }
                input type="email" id="email" name="email" value=(email)
                    placeholder="Enter your email address" required;
                label for="password" { "Password" }
                input type="password" id="password" name="password"
                    placeholder="Enter your password" required;
                p { button type="submit" { "Sign In" } }
            }
            p class="muted" { "No account yet? " a href="/register" { "Create one" } }
        }
    };

    layout(ctx, &format!("Sign In | {SITE_NAME}"), "Sign in to BlogHub", body)
}

const TITLES: &[&str] = &["Dr", "Prof", "Eng", "Mr", "Ms", "Mrs"];

pub fn register(ctx: &PageContext, error: Option<&str>, form: &RegisterForm) -> Markup {
    let selected_title = form.title.as_deref().unwrap_or("");
    let specialization = form.specialization.as_deref().unwrap_or("");

    let body = html! {
        section class="card" {
            h1 { "Join BlogHub" }
            form method="post" action="/register" {
                (error_alert(error))
                label for="email" { "Email Address *" }
                input type="email" id="email" name="email" value=(form.email)
                    placeholder="your@email.com" required;
                label for="password" { "Password *" }
                input type="password" id="password" name="password"
                    placeholder="Create a strong password" required;
                label for="name" { "Full Name *" }
                input type="text" id="name" name="name" value=(form.name)
                    placeholder="John Doe" required;
                label for="country" { "Country *" }
                input type="text" id="country" name="country" value=(form.country)
                    placeholder="United States" required;
                label for="title" { "Professional Title" }
                select id="title" name="title" {
                    option value="" { "Select title (optional)" }
                    @for title in TITLES {
                        option value=(title) selected[*title == selected_title] { (title) }
                    }
                }
                label for="specialization" { "Specialization" }
                input type="text" id="specialization" name="specialization" value=(specialization)
                    placeholder="e.g., Physics, AI, Mathematics";
                p { button type="submit" { "🎉 Create Account" } }
            }
            p class="muted" { "Already have an account? " a href="/login" { "Sign in" } }
        }
    };

    layout(ctx, &format!("Register | {SITE_NAME}"), "Create a BlogHub account", body)
}

pub fn create(ctx: &PageContext, error: Option<&str>, form: &CreateBlogForm) -> Markup {
    let body = html! {
        section class="card" {
            h1 { "Write a new story" }
            form method="post" action="/create" {
                (error_alert(error))
                label for="title" { "Blog Title" }
                input type="text" id="title" name="title" value=(form.title)
                    placeholder="Write a compelling title that captures your reader's attention..." required;
                label for="content" { "Your Story" }
                textarea id="content" name="content" rows="20"
                    placeholder="Start writing your blog content here..." required { (form.content) }
                p class="muted" { "Minimum 100 words recommended" }
                p { button type="submit" { "🚀 Publish Blog" } }
            }
        }
    };

    layout(ctx, &format!("Create Blog | {SITE_NAME}"), "Publish a new story", body)
}

// ============================================================================
// Errors
// ============================================================================

pub fn not_found() -> Markup {
    let body = html! {
        div class="empty" {
            h1 { "404" }
            p { "The page you are looking for does not exist." }
            a href="/" class="button" { "Back to home" }
        }
    };

    layout(&PageContext::default(), &format!("Not Found | {SITE_NAME}"), "Page not found", body)
}

pub fn unavailable(message: &str) -> Markup {
    let body = html! {
        div class="empty" {
            h1 { "Service Temporarily Unavailable" }
            p { "Unable to load this page. Please check back later." }
            p class="muted" { (message) }
            a href="/" class="button" { "Back to home" }
        }
    };

    layout(&PageContext::default(), &format!("Unavailable | {SITE_NAME}"), "Service unavailable", body)
}
