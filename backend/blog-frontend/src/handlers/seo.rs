//! Crawler endpoints: GET /robots.txt and GET /sitemap.xml

use actix_web::http::header::CACHE_CONTROL;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use tracing::debug;

use crate::seo::{self, ROBOTS_CACHE_CONTROL, SITEMAP_CACHE_CONTROL};
use crate::AppState;

/// GET /robots.txt
pub async fn robots(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((CACHE_CONTROL, ROBOTS_CACHE_CONTROL))
        .body(seo::robots_txt(&state.config.site.url))
}

/// GET /sitemap.xml
///
/// A backend outage still yields a valid sitemap with just the home page.
pub async fn sitemap(state: web::Data<AppState>) -> HttpResponse {
    let blogs = state.api.list_blogs(0, state.config.site.sitemap_limit).await;
    debug!(count = blogs.len(), "Rendering sitemap");

    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .insert_header((CACHE_CONTROL, SITEMAP_CACHE_CONTROL))
        .body(seo::sitemap_xml(&state.config.site.url, &blogs, Utc::now()))
}
