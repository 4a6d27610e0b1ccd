use actix_middleware::{RequestTrace, SecurityHeaders};
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::prelude::*;

use blog_frontend::config::Config;
use blog_frontend::{configure, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // JSON logs for aggregation; override the filter with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blog_frontend=debug,actix_middleware=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true),
        )
        .init();

    info!("Starting blog frontend...");

    let config = Config::from_env()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e:#}")))?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let workers = config.server.workers;

    let state = web::Data::new(
        AppState::new(config).map_err(|e| std::io::Error::other(format!("{e:#}")))?,
    );

    info!(
        api_url = %state.api.base_url(),
        workers,
        "Blog frontend starting on http://{}",
        bind_addr
    );

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders)
            .wrap(RequestTrace)
            .app_data(state.clone())
            .configure(configure)
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
