//! HTTP client for the blog backend API
//!
//! Single chokepoint for outbound calls:
//! - JSON content type on every request, bearer token when a session exists
//! - Request timeout from configuration (10s default)
//! - Every failure normalized into [`ApiError`]
//!
//! Listing degrades to an empty result on failure so a backend outage never
//! breaks the feed. Fetching a single post propagates the error.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{
    Blog, CreateBlogRequest, CreateCommentRequest, ErrorBody, LikeResponse, RegisterRequest,
    ShareResponse, TokenRequest, TokenResponse, User,
};

/// Backend API client with a pooled connection
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|e| {
            let err = ApiError::from_transport(e);
            debug!(path = %path, error = %err, "Backend request failed");
            err
        })?;

        let status = response.status();
        debug!(path = %path, status = status.as_u16(), "Backend responded");

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message())
                .unwrap_or_else(|| format!("Server error (HTTP {})", status.as_u16()));

            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(ApiError::from_transport)?;
        let body: &[u8] = if body.is_empty() { b"null" } else { &body };

        serde_json::from_slice(body).map_err(|e| {
            warn!(path = %path, status = status.as_u16(), error = %e, "Unexpected response shape");
            ApiError::InvalidResponse {
                status: status.as_u16(),
            }
        })
    }

    // ========================================================================
    // Read path
    // ========================================================================

    /// GET /blogs?skip=&limit=
    ///
    /// Never fails: any error is logged and yields an empty list.
    pub async fn list_blogs(&self, skip: u32, limit: u32) -> Vec<Blog> {
        let path = format!("/blogs?skip={skip}&limit={limit}");

        match self.send(&path, self.request(Method::GET, &path, None)).await {
            Ok(blogs) => blogs,
            Err(e) => {
                warn!(skip, limit, status = e.status(), error = %e, "Failed to fetch blogs");
                Vec::new()
            }
        }
    }

    /// GET /blogs/{id}
    pub async fn get_blog(&self, id: i64) -> Result<Blog, ApiError> {
        let path = format!("/blogs/{id}");
        self.send(&path, self.request(Method::GET, &path, None)).await
    }

    /// GET /users/me
    pub async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let path = "/users/me";
        self.send(path, self.request(Method::GET, path, Some(token))).await
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// POST /token (form-encoded); returns the bearer token
    pub async fn exchange_token(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let path = "/token";
        // OAuth2 password flow: form-encoded body instead of JSON
        let builder = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json")
            .form(&TokenRequest {
                username: email,
                password,
            });

        let response: TokenResponse = self.send(path, builder).await?;
        if response.access_token.is_empty() {
            return Err(ApiError::InvalidResponse { status: 200 });
        }
        Ok(response.access_token)
    }

    /// POST /register
    pub async fn register(&self, payload: &RegisterRequest) -> Result<(), ApiError> {
        let path = "/register";
        let builder = self.request(Method::POST, path, None).json(payload);
        self.send::<IgnoredAny>(path, builder).await.map(|_| ())
    }

    // ========================================================================
    // Write path
    // ========================================================================

    /// POST /blogs
    pub async fn create_blog(&self, token: &str, payload: &CreateBlogRequest) -> Result<(), ApiError> {
        let path = "/blogs";
        let builder = self.request(Method::POST, path, Some(token)).json(payload);
        self.send::<IgnoredAny>(path, builder).await.map(|_| ())
    }

    /// POST /blogs/{id}/comments
    pub async fn create_comment(&self, token: &str, blog_id: i64, content: &str) -> Result<(), ApiError> {
        let path = format!("/blogs/{blog_id}/comments");
        let builder = self
            .request(Method::POST, &path, Some(token))
            .json(&CreateCommentRequest { content });
        self.send::<IgnoredAny>(&path, builder).await.map(|_| ())
    }

    /// POST /blogs/{id}/like; returns the backend's like count
    pub async fn like(&self, blog_id: i64, token: Option<&str>) -> Result<u64, ApiError> {
        let path = format!("/blogs/{blog_id}/like");
        let response: LikeResponse = self.send(&path, self.request(Method::POST, &path, token)).await?;
        Ok(response.likes)
    }

    /// POST /blogs/{id}/share; returns the backend's share count
    pub async fn share(&self, blog_id: i64, token: Option<&str>) -> Result<u64, ApiError> {
        let path = format!("/blogs/{blog_id}/share");
        let response: ShareResponse = self.send(&path, self.request(Method::POST, &path, token)).await?;
        Ok(response.shares)
    }
}
