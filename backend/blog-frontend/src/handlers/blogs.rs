/// Blog write endpoints
///
/// POST /create - Publish a post
/// POST /blog/{id}/comments - Comment on a post
/// POST /blog/{id}/like - Like a post (JSON with `Accept: application/json`)
/// POST /blog/{id}/share - Share a post (JSON with `Accept: application/json`)
///
/// Without JSON, like/share redirect back to the post on success and show the
/// post again with an error on failure.
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{debug, warn};

use super::{html, page_context, parse_blog_id, see_other, wants_json, FORM_ERROR_STATUS};
use crate::actions::{self, ActionOutcome, CommentForm, CreateBlogForm, LIKE_FAILED, SHARE_FAILED};
use crate::error::{ApiError, AppError, Result};
use crate::interaction::{CommentDraft, ThemePreference};
use crate::render::{self, pages::DetailNotices};
use crate::session::SessionStore;
use crate::AppState;

/// POST /create
///
/// On failure the form is shown again with the submitted title and content.
pub async fn create_blog(
    state: web::Data<AppState>,
    session: SessionStore,
    theme: ThemePreference,
    form: web::Form<CreateBlogForm>,
) -> HttpResponse {
    match actions::create_blog(&state.api, &session, &form).await {
        ActionOutcome::Redirect(location) => see_other(&location, None),
        ActionOutcome::Done => see_other("/", None),
        ActionOutcome::Failed { error } => {
            let ctx = page_context(&state.api, &session, theme).await;
            html(FORM_ERROR_STATUS, render::pages::create(&ctx, Some(error.as_str()), &form))
        }
    }
}

/// POST /blog/{id}/comments
///
/// Blank comments are rejected here without contacting the backend. Success
/// sends the browser back to the post so it shows the new comment.
pub async fn create_comment(
    state: web::Data<AppState>,
    session: SessionStore,
    theme: ThemePreference,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let blog_id = parse_blog_id(&path).ok_or(AppError::NotFound)?;

    let outcome = match CommentDraft::parse(&form.content) {
        Ok(draft) => actions::create_comment(&state.api, &session, blog_id, &draft).await,
        Err(e) => {
            debug!(blog_id, "Rejected blank comment");
            ActionOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    match outcome {
        ActionOutcome::Failed { error } => {
            let (ctx, blog) = tokio::join!(
                page_context(&state.api, &session, theme),
                state.api.get_blog(blog_id),
            );
            let notices = DetailNotices {
                comment_error: Some(error.as_str()),
                ..Default::default()
            };
            Ok(html(
                FORM_ERROR_STATUS,
                render::pages::blog_detail(&ctx, &blog?, notices),
            ))
        }
        ActionOutcome::Done => Ok(see_other(&format!("/blog/{blog_id}#comments"), None)),
        ActionOutcome::Redirect(location) => Ok(see_other(&location, None)),
    }
}

/// POST /blog/{id}/like
pub async fn like(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: SessionStore,
    theme: ThemePreference,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let blog_id = parse_blog_id(&path).ok_or(AppError::NotFound)?;

    match actions::like(&state.api, &session, blog_id).await {
        Ok(report) if wants_json(&req) => Ok(HttpResponse::Ok().json(report)),
        Ok(_) => Ok(see_other(&format!("/blog/{blog_id}"), None)),
        Err(e) => {
            warn!(blog_id, status = e.status(), error = %e, "Like failed");
            interaction_failed(&req, &state, &session, theme, blog_id, &e, LIKE_FAILED).await
        }
    }
}

/// POST /blog/{id}/share
pub async fn share(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: SessionStore,
    theme: ThemePreference,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let blog_id = parse_blog_id(&path).ok_or(AppError::NotFound)?;

    match actions::share(&state.api, &session, blog_id).await {
        Ok(report) if wants_json(&req) => Ok(HttpResponse::Ok().json(report)),
        Ok(_) => Ok(see_other(&format!("/blog/{blog_id}"), None)),
        Err(e) => {
            warn!(blog_id, status = e.status(), error = %e, "Share failed");
            interaction_failed(&req, &state, &session, theme, blog_id, &e, SHARE_FAILED).await
        }
    }
}

/// Script callers get `{"error": ..}`; plain form posts get the post again
/// with the message above the buttons.
async fn interaction_failed(
    req: &HttpRequest,
    state: &AppState,
    session: &SessionStore,
    theme: ThemePreference,
    blog_id: i64,
    err: &ApiError,
    message: &str,
) -> Result<HttpResponse> {
    let status = failure_status(err);

    if wants_json(req) {
        return Ok(HttpResponse::build(status).json(serde_json::json!({ "error": err.to_string() })));
    }

    let (ctx, blog) = tokio::join!(
        page_context(&state.api, session, theme),
        state.api.get_blog(blog_id),
    );
    let notices = DetailNotices {
        interaction_error: Some(message),
        ..Default::default()
    };

    Ok(html(status, render::pages::blog_detail(&ctx, &blog?, notices)))
}

/// Backend rejections keep their 4xx status; everything else is a bad gateway.
fn failure_status(err: &ApiError) -> StatusCode {
    StatusCode::from_u16(err.status())
        .ok()
        .filter(StatusCode::is_client_error)
        .unwrap_or(StatusCode::BAD_GATEWAY)
}
