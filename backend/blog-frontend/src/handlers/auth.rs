/// Authentication endpoints
///
/// POST /login - Exchange credentials for a session cookie
/// POST /register - Create account, then sign in
/// POST /logout - Drop the session cookie
use actix_web::{web, HttpResponse};

use super::{html, page_context, see_other, FORM_ERROR_STATUS};
use crate::actions::{self, ActionOutcome, LoginForm, RegisterForm};
use crate::interaction::ThemePreference;
use crate::render;
use crate::session::SessionStore;
use crate::AppState;

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    mut session: SessionStore,
    theme: ThemePreference,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    match actions::login(&state.api, &mut session, &form).await {
        ActionOutcome::Redirect(location) => see_other(&location, Some(&session)),
        ActionOutcome::Done => see_other("/", Some(&session)),
        ActionOutcome::Failed { error } => {
            let ctx = page_context(&state.api, &session, theme).await;
            html(
                FORM_ERROR_STATUS,
                render::pages::login(&ctx, Some(error.as_str()), &form.email),
            )
        }
    }
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    mut session: SessionStore,
    theme: ThemePreference,
    form: web::Form<RegisterForm>,
) -> HttpResponse {
    match actions::register(&state.api, &mut session, &form).await {
        ActionOutcome::Redirect(location) => see_other(&location, Some(&session)),
        ActionOutcome::Done => see_other("/", Some(&session)),
        ActionOutcome::Failed { error } => {
            let ctx = page_context(&state.api, &session, theme).await;
            html(
                FORM_ERROR_STATUS,
                render::pages::register(&ctx, Some(error.as_str()), &form),
            )
        }
    }
}

/// POST /logout
pub async fn logout(mut session: SessionStore) -> HttpResponse {
    match actions::logout(&mut session) {
        ActionOutcome::Redirect(location) => see_other(&location, Some(&session)),
        _ => see_other("/", Some(&session)),
    }
}
