//! Page-local interaction state
//!
//! Values the browser owns (theme preference, comment draft, share result) are
//! parsed into explicit types here and handed to handlers and the render tree
//! per request.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{dev::Payload, Error, FromRequest, HttpRequest};
use serde::Serialize;
use std::future::{ready, Ready};
use thiserror::Error;

pub const THEME_COOKIE: &str = "theme";

// ============================================================================
// Theme
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Toggle order: light → dark → system → light
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☀️",
            Self::Dark => "🌙",
            Self::System => "💻",
        }
    }

    /// Class for the root element. `System` defers to the stylesheet's
    /// `prefers-color-scheme` query, so nothing flashes before scripts run.
    pub fn root_class(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn from_request(req: &HttpRequest) -> Self {
        req.cookie(THEME_COOKIE)
            .and_then(|c| Self::parse(c.value()))
            .unwrap_or_default()
    }

    /// Readable by page scripts; kept for a year.
    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build(THEME_COOKIE, self.as_str())
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::days(365))
            .finish()
    }
}

impl FromRequest for ThemePreference {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(ThemePreference::from_request(req)))
    }
}

// ============================================================================
// Comment draft
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Comment cannot be empty")]
    Empty,
}

/// Comment content that passed the pre-submit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft(String);

impl CommentDraft {
    pub fn parse(raw: &str) -> Result<Self, DraftError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DraftError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Like / share
// ============================================================================

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LikeReport {
    pub likes: u64,
}

/// Network result of a share. The browser then copies the page it is on; the
/// copy result is reported separately through [`ClipboardOutcome`].
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ShareReport {
    pub shares: u64,
}

/// Result of the browser-side clipboard copy after a successful share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOutcome {
    Copied,
    Unavailable,
    Failed,
}

impl ClipboardOutcome {
    pub const ALL: [ClipboardOutcome; 3] = [Self::Copied, Self::Unavailable, Self::Failed];

    pub fn key(self) -> &'static str {
        match self {
            Self::Copied => "copied",
            Self::Unavailable => "unavailable",
            Self::Failed => "failed",
        }
    }

    /// Every message confirms the share itself succeeded.
    pub fn message(self) -> &'static str {
        match self {
            Self::Copied => "Blog link copied to clipboard!",
            Self::Unavailable => "Blog shared successfully!",
            Self::Failed => "Blog shared, but the link could not be copied.",
        }
    }
}
