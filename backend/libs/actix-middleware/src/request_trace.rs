//! Request tracing middleware
//!
//! Tags every request with an `x-request-id` (taken from the caller or a new
//! UUID v4), stores it in the request extensions, echoes it on the response
//! and logs start/completion with timing.
//!
//! ## Example
//! ```rust,no_run
//! use actix_middleware::RequestTrace;
//! use actix_web::App;
//!
//! let app = App::new().wrap(RequestTrace);
//! ```

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is echoed back; longer ones are replaced.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request id stored in the request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Middleware that assigns request ids and logs request timing
#[derive(Clone, Copy, Default)]
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceService { service }))
    }
}

pub struct RequestTraceService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let request_id = incoming_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
        let method = req.method().clone();
        let path = req.path().to_string();

        req.extensions_mut().insert(RequestId(request_id.clone()));

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "HTTP request started"
        );

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let status = res.status();
            let duration_ms = start.elapsed().as_millis() as u64;

            if status.is_server_error() {
                tracing::warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    duration_ms,
                    "HTTP request failed"
                );
            } else {
                tracing::info!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    duration_ms,
                    "HTTP request completed"
                );
            }

            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            Ok(res)
        })
    }
}

fn incoming_request_id(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
}

/// Request id assigned by [`RequestTrace`], if the middleware ran.
pub fn request_id(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<RequestId>().map(|id| id.0.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn echo_id(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(request_id(&req).unwrap_or_default())
    }

    #[actix_web::test]
    async fn test_generates_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestTrace)
                .route("/", web::get().to(echo_id)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(header.len(), 36); // UUID v4 string length

        let body = test::read_body(resp).await;
        assert_eq!(body, header.as_bytes());
    }

    #[actix_web::test]
    async fn test_keeps_caller_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestTrace)
                .route("/", web::get().to(echo_id)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "abc-123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");
    }

    #[actix_web::test]
    async fn test_replaces_oversized_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestTrace)
                .route("/", web::get().to(echo_id)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "x".repeat(MAX_REQUEST_ID_LEN + 1)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap().len(), 36);
    }
}
