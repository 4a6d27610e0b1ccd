//! Shared fixtures for integration tests

#![allow(dead_code)]

use blog_frontend::clients::ApiClient;
use blog_frontend::config::Config;
use blog_frontend::AppState;
use serde_json::{json, Value};
use std::time::Duration;

/// Nothing listens on port 1, so connections are refused immediately.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:1";

pub fn config_for(api_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = api_url.to_string();
    config.api.timeout = Duration::from_secs(2);
    config.site.url = "https://blog.example.com".to_string();
    config
}

pub fn api_client(api_url: &str) -> ApiClient {
    ApiClient::new(&config_for(api_url).api).expect("client should build")
}

pub fn app_state(api_url: &str) -> AppState {
    AppState::new(config_for(api_url)).expect("state should build")
}

pub fn user_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}@example.com", name.to_lowercase()),
        "name": name,
        "country": "UK",
        "created_at": "2024-01-05T10:00:00Z"
    })
}

pub fn blog_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "Difference engines and the analytical engine.",
        "likes": 3,
        "shares": 1,
        "author": user_json(1, "Ada"),
        "created_at": "2024-01-05T10:00:00Z",
        "comments": []
    })
}
