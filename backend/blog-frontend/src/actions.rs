//! Server actions
//!
//! Mutating operations run on form submission. Each is single-shot: it calls
//! the backend once (twice for register), never retries, and reports failure
//! as a value instead of an error so the submitting form can show it.
//!
//! ```text
//! idle → in-flight → { redirect | done | failed }
//! ```

use serde::Deserialize;
use tracing::{info, warn};

use crate::clients::ApiClient;
use crate::error::ApiError;
use crate::interaction::{CommentDraft, LikeReport, ShareReport};
use crate::models::{CreateBlogRequest, RegisterRequest};
use crate::session::SessionStore;

pub const LOGIN_FAILED: &str = "Invalid credentials or server connection failed";
pub const REGISTRATION_FAILED: &str = "Registration failed or server connection failed";
pub const REGISTERED_SIGN_IN_MANUALLY: &str = "Registration successful, please sign in manually";
pub const CREATE_BLOG_FAILED: &str = "Failed to create blog";
pub const LOGIN_REQUIRED_TO_COMMENT: &str = "Please login to comment";
pub const COMMENT_FAILED: &str = "Failed to create comment";
pub const LIKE_FAILED: &str = "Failed to like blog. Please try again.";
pub const SHARE_FAILED: &str = "Failed to share blog. Please try again.";

/// Terminal state of a server action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Succeeded (or needs a session); navigate away
    Redirect(String),
    /// Succeeded; the caller refreshes its own view
    Done,
    /// Failed; show `error` on the submitting form
    Failed { error: String },
}

impl ActionOutcome {
    fn redirect(location: &str) -> Self {
        ActionOutcome::Redirect(location.to_string())
    }

    fn failed(error: impl Into<String>) -> Self {
        ActionOutcome::Failed {
            error: error.into(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }
}

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

impl RegisterForm {
    /// Empty optional fields are omitted from the payload.
    pub fn to_request(&self) -> RegisterRequest {
        fn non_empty(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
            title: non_empty(&self.title),
            specialization: non_empty(&self.specialization),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBlogForm {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
}

// ============================================================================
// Authentication
// ============================================================================

/// Exchange credentials for a session, then go home.
pub async fn login(api: &ApiClient, session: &mut SessionStore, form: &LoginForm) -> ActionOutcome {
    match api.exchange_token(form.email.trim(), &form.password).await {
        Ok(token) => {
            session.set_token(token);
            info!(email = %form.email, "User logged in");
            ActionOutcome::redirect("/")
        }
        Err(e) => {
            warn!(email = %form.email, status = e.status(), error = %e, "Login failed");
            ActionOutcome::failed(LOGIN_FAILED)
        }
    }
}

/// Create the account, then sign in with the password just submitted.
pub async fn register(api: &ApiClient, session: &mut SessionStore, form: &RegisterForm) -> ActionOutcome {
    let payload = form.to_request();

    if let Err(e) = api.register(&payload).await {
        warn!(email = %payload.email, status = e.status(), error = %e, "Registration failed");
        return ActionOutcome::failed(REGISTRATION_FAILED);
    }

    info!(email = %payload.email, "User registered");

    match api.exchange_token(&payload.email, &payload.password).await {
        Ok(token) => {
            session.set_token(token);
            ActionOutcome::redirect("/")
        }
        Err(e) => {
            warn!(
                email = %payload.email,
                status = e.status(),
                error = %e,
                "Automatic login after registration failed"
            );
            ActionOutcome::failed(REGISTERED_SIGN_IN_MANUALLY)
        }
    }
}

/// Always succeeds, with or without a session.
pub fn logout(session: &mut SessionStore) -> ActionOutcome {
    session.clear_token();
    ActionOutcome::redirect("/")
}

// ============================================================================
// Publishing
// ============================================================================

/// Publish a post. Anonymous callers are sent to the login page.
pub async fn create_blog(api: &ApiClient, session: &SessionStore, form: &CreateBlogForm) -> ActionOutcome {
    let Some(token) = session.get_token() else {
        return ActionOutcome::redirect("/login");
    };

    let payload = CreateBlogRequest {
        title: form.title.trim().to_string(),
        content: form.content.clone(),
    };

    match api.create_blog(token, &payload).await {
        Ok(()) => {
            info!(title = %payload.title, "Blog created");
            ActionOutcome::redirect("/")
        }
        Err(e) => {
            warn!(status = e.status(), error = %e, "Blog creation failed");
            ActionOutcome::failed(CREATE_BLOG_FAILED)
        }
    }
}

/// Post a comment. Anonymous callers get an error instead of a redirect so the
/// page they are reading stays put.
pub async fn create_comment(
    api: &ApiClient,
    session: &SessionStore,
    blog_id: i64,
    draft: &CommentDraft,
) -> ActionOutcome {
    let Some(token) = session.get_token() else {
        return ActionOutcome::failed(LOGIN_REQUIRED_TO_COMMENT);
    };

    match api.create_comment(token, blog_id, draft.as_str()).await {
        Ok(()) => {
            info!(blog_id, "Comment created");
            ActionOutcome::Done
        }
        Err(e) => {
            warn!(blog_id, status = e.status(), error = %e, "Comment creation failed");
            ActionOutcome::failed(e.detail().unwrap_or(COMMENT_FAILED))
        }
    }
}

// ============================================================================
// Interactions
// ============================================================================

/// Like a post. The returned count is the backend's, verbatim.
pub async fn like(api: &ApiClient, session: &SessionStore, blog_id: i64) -> Result<LikeReport, ApiError> {
    let likes = api.like(blog_id, session.get_token()).await?;
    Ok(LikeReport { likes })
}

/// Share a post. The returned count is the backend's, verbatim.
pub async fn share(api: &ApiClient, session: &SessionStore, blog_id: i64) -> Result<ShareReport, ApiError> {
    let shares = api.share(blog_id, session.get_token()).await?;
    Ok(ShareReport { shares })
}
