//! BlogHub web frontend
//!
//! Server-rendered blog site in front of the blog backend API. Pages are
//! rendered with maud; every backend call goes through [`clients::ApiClient`].

use actix_web::web;
use anyhow::Context;

pub mod actions;
pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod interaction;
pub mod models;
pub mod render;
pub mod seo;
pub mod session;

use clients::ApiClient;
use config::Config;

/// Shared state handed to every handler
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let api = ApiClient::new(&config.api).context("Failed to build backend API client")?;
        Ok(Self { config, api })
    }
}

/// Register every route of the site
pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::{auth, blogs, pages, seo, theme};

    cfg.route("/", web::get().to(pages::home))
        .route("/blog/{id}", web::get().to(pages::blog_detail))
        .route("/blog/{id}/comments", web::post().to(blogs::create_comment))
        .route("/blog/{id}/like", web::post().to(blogs::like))
        .route("/blog/{id}/share", web::post().to(blogs::share))
        .route("/login", web::get().to(pages::login_form))
        .route("/login", web::post().to(auth::login))
        .route("/register", web::get().to(pages::register_form))
        .route("/register", web::post().to(auth::register))
        .route("/logout", web::post().to(auth::logout))
        .route("/create", web::get().to(pages::create_form))
        .route("/create", web::post().to(blogs::create_blog))
        .route("/theme", web::post().to(theme::toggle))
        .route("/robots.txt", web::get().to(seo::robots))
        .route("/sitemap.xml", web::get().to(seo::sitemap))
        .route("/health", web::get().to(pages::health))
        .default_service(web::to(pages::not_found));
}
