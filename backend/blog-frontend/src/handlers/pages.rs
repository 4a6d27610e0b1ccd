//! Read-only pages
//!
//! GET / - Feed
//! GET /blog/{id} - Post with comments
//! GET /login, /register, /create - Forms

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, warn};

use super::{html, page_context, parse_blog_id, see_other};
use crate::actions::{CreateBlogForm, RegisterForm};
use crate::error::{AppError, Result};
use crate::interaction::ThemePreference;
use crate::render::{
    self,
    pages::{DetailNotices, FeedPage},
};
use crate::session::SessionStore;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub page: Option<String>,
}

impl FeedQuery {
    /// Zero-based page; anything that is not a page number means the first page.
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// GET /
///
/// The listing fails open: a backend outage renders the empty feed.
pub async fn home(
    state: web::Data<AppState>,
    session: SessionStore,
    theme: ThemePreference,
    query: web::Query<FeedQuery>,
) -> HttpResponse {
    let page_size = state.config.site.page_size;
    let page = query.page();
    let skip = page.saturating_mul(page_size);

    let (ctx, blogs) = tokio::join!(
        page_context(&state.api, &session, theme),
        state.api.list_blogs(skip, page_size),
    );

    let feed = FeedPage {
        has_more: blogs.len() as u32 >= page_size,
        blogs: &blogs,
        page,
    };

    html(StatusCode::OK, render::pages::home(&ctx, &feed))
}

/// GET /blog/{id}
///
/// Unlike the feed, a missing or unreachable post is reported.
pub async fn blog_detail(
    state: web::Data<AppState>,
    session: SessionStore,
    theme: ThemePreference,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_blog_id(&path).ok_or(AppError::NotFound)?;

    let (ctx, blog) = tokio::join!(
        page_context(&state.api, &session, theme),
        state.api.get_blog(id),
    );

    let blog = blog.map_err(|e| {
        warn!(blog_id = id, status = e.status(), error = %e, "Failed to load blog");
        e
    })?;

    Ok(html(StatusCode::OK, render::pages::blog_detail(&ctx, &blog, DetailNotices::default())))
}

/// GET /login
pub async fn login_form(
    state: web::Data<AppState>,
    session: SessionStore,
    theme: ThemePreference,
) -> HttpResponse {
    let ctx = page_context(&state.api, &session, theme).await;
    html(StatusCode::OK, render::pages::login(&ctx, None, ""))
}

/// GET /register
pub async fn register_form(
    state: web::Data<AppState>,
    session: SessionStore,
    theme: ThemePreference,
) -> HttpResponse {
    let ctx = page_context(&state.api, &session, theme).await;
    html(
        StatusCode::OK,
        render::pages::register(&ctx, None, &RegisterForm::default()),
    )
}

/// GET /create
///
/// Anonymous visitors are sent to the login page.
pub async fn create_form(
    state: web::Data<AppState>,
    session: SessionStore,
    theme: ThemePreference,
) -> HttpResponse {
    if !session.is_authenticated() {
        info!("Anonymous visit to /create, redirecting to login");
        return see_other("/login", None);
    }

    let ctx = page_context(&state.api, &session, theme).await;
    html(
        StatusCode::OK,
        render::pages::create(&ctx, None, &CreateBlogForm::default()),
    )
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpResponse {
    html(StatusCode::NOT_FOUND, render::pages::not_found())
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
