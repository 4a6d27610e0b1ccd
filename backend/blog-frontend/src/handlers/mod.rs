/// HTTP handlers
///
/// Binds pages and form submissions to server actions:
/// ```text
/// Browser (HTML forms / fetch)
///     ↓
/// Handler (this module)
///     ↓
/// Server action → ApiClient → Blog backend
/// ```
use actix_web::http::header::{ACCEPT, LOCATION, REFERER};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use maud::Markup;

use crate::clients::ApiClient;
use crate::interaction::ThemePreference;
use crate::render::PageContext;
use crate::session::SessionStore;

pub mod auth;
pub mod blogs;
pub mod pages;
pub mod seo;
pub mod theme;

/// Status used when a form is shown again with an error message.
pub(crate) const FORM_ERROR_STATUS: StatusCode = StatusCode::UNPROCESSABLE_ENTITY;

pub(crate) fn html(status: StatusCode, page: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(page.into_string())
}

/// 303 so the browser follows with a GET, carrying any session change.
pub(crate) fn see_other(location: &str, session: Option<&SessionStore>) -> HttpResponse {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((LOCATION, location));
    if let Some(session) = session {
        session.apply_to(&mut builder);
    }
    builder.finish()
}

pub(crate) async fn page_context(
    api: &ApiClient,
    session: &SessionStore,
    theme: ThemePreference,
) -> PageContext {
    PageContext::new(session.current_user(api).await, theme)
}

pub(crate) fn wants_json(req: &HttpRequest) -> bool {
    req.headers()
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// Path (and query) of the referring page, so redirects stay on this site.
///
/// A path starting with `//` or `/\` would be read by the browser as another
/// host, so those fall back to `/`.
pub(crate) fn referer_path(req: &HttpRequest) -> String {
    req.headers()
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| reqwest::Url::parse(v).ok())
        .filter(|url| !url.path().starts_with("//") && !url.path().starts_with("/\\"))
        .map(|url| match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        })
        .unwrap_or_else(|| "/".to_string())
}

/// Post ids are numeric; anything else is a missing page.
pub(crate) fn parse_blog_id(raw: &str) -> Option<i64> {
    raw.parse().ok().filter(|id: &i64| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_referer_path_drops_foreign_origin() {
        let req = TestRequest::default()
            .insert_header((REFERER, "https://evil.example/blog/3?x=1"))
            .to_http_request();
        assert_eq!(referer_path(&req), "/blog/3?x=1");

        let req = TestRequest::default().to_http_request();
        assert_eq!(referer_path(&req), "/");
    }

    #[test]
    fn test_referer_path_rejects_protocol_relative_path() {
        let req = TestRequest::default()
            .insert_header((REFERER, "https://attacker.example//evil.example/phish"))
            .to_http_request();
        assert_eq!(referer_path(&req), "/");
    }

    #[test]
    fn test_parse_blog_id() {
        assert_eq!(parse_blog_id("42"), Some(42));
        assert_eq!(parse_blog_id("0"), None);
        assert_eq!(parse_blog_id("abc"), None);
    }

    #[test]
    fn test_wants_json() {
        let req = TestRequest::default()
            .insert_header((ACCEPT, "application/json"))
            .to_http_request();
        assert!(wants_json(&req));
        assert!(!wants_json(&TestRequest::default().to_http_request()));
    }
}
