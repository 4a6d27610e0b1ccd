//! POST /theme - Cycle the color theme (light → dark → system)

use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse};

use super::referer_path;
use crate::interaction::ThemePreference;

pub async fn toggle(req: HttpRequest, current: ThemePreference) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, referer_path(&req)))
        .cookie(current.next().cookie())
        .finish()
}
