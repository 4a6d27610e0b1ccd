//! Session store backed by the `token` cookie
//!
//! The bearer token is opaque to this service. It is read from the request
//! cookie, attached to backend calls, and written back as a pending cookie
//! change that the handler applies to its response.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest, HttpResponseBuilder};
use std::future::{ready, Ready};
use tracing::debug;

use crate::clients::ApiClient;
use crate::models::User;
use crate::AppState;

pub const TOKEN_COOKIE: &str = "token";

/// Session lifetime; never refreshed by this service.
pub const SESSION_MAX_AGE_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
enum PendingChange {
    Set(String),
    Clear,
}

/// Request-scoped view of the session cookie
#[derive(Debug, Clone)]
pub struct SessionStore {
    token: Option<String>,
    secure: bool,
    pending: Option<PendingChange>,
}

impl SessionStore {
    pub fn new(token: Option<String>, secure: bool) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            secure,
            pending: None,
        }
    }

    pub fn from_request(req: &HttpRequest, secure: bool) -> Self {
        Self::new(req.cookie(TOKEN_COOKIE).map(|c| c.value().to_string()), secure)
    }

    /// Token if the browser sent one. Expired cookies are dropped by the browser.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.pending = Some(PendingChange::Set(token.clone()));
        self.token = Some(token);
    }

    /// Clearing an absent token still emits a removal cookie.
    pub fn clear_token(&mut self) {
        self.token = None;
        self.pending = Some(PendingChange::Clear);
    }

    /// Resolve the signed-in user. Fails open: no token, a rejected token, or an
    /// unreachable backend all mean anonymous.
    pub async fn current_user(&self, api: &ApiClient) -> Option<User> {
        let token = self.get_token()?;

        match api.current_user(token).await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(status = e.status(), error = %e, "Session lookup failed, treating as anonymous");
                None
            }
        }
    }

    /// Cookie to send back, if the session changed during this request.
    pub fn pending_cookie(&self) -> Option<Cookie<'static>> {
        match self.pending.as_ref()? {
            PendingChange::Set(token) => Some(
                Cookie::build(TOKEN_COOKIE, token.clone())
                    .path("/")
                    .http_only(true)
                    .secure(self.secure)
                    .same_site(SameSite::Lax)
                    .max_age(CookieDuration::days(SESSION_MAX_AGE_DAYS))
                    .finish(),
            ),
            PendingChange::Clear => Some(
                Cookie::build(TOKEN_COOKIE, "")
                    .path("/")
                    .http_only(true)
                    .secure(self.secure)
                    .same_site(SameSite::Lax)
                    .max_age(CookieDuration::ZERO)
                    .finish(),
            ),
        }
    }

    pub fn apply_to(&self, builder: &mut HttpResponseBuilder) {
        if let Some(cookie) = self.pending_cookie() {
            builder.cookie(cookie);
        }
    }
}

impl FromRequest for SessionStore {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let secure = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.config.site.secure_cookies)
            .unwrap_or(false);

        ready(Ok(SessionStore::from_request(req, secure)))
    }
}
