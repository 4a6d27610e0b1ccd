//! Backend API request/response models
//!
//! These models match the blog backend's JSON structure. Responses are parsed
//! into these types at the client boundary; nothing downstream inspects raw JSON.

use serde::{Deserialize, Serialize};

// ============================================================================
// User Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_filename: Option<String>,
    pub created_at: String,
}

impl User {
    /// Name as shown in bylines: "Dr. Ada Lovelace" when a title is set.
    pub fn display_name(&self) -> String {
        match self.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) => format!("{}. {}", title, self.name),
            None => self.name.clone(),
        }
    }

    /// Uppercased first character of the name, used as the avatar glyph.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Blog Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: User,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
    pub author: User,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Blog {
    /// Timestamp reported as the post's last modification.
    pub fn last_modified(&self) -> &str {
        self.updated_at
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.created_at)
    }
}

// ============================================================================
// Authentication Models
// ============================================================================

/// Form-encoded body of `POST /token`. The backend calls the email `username`.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

// ============================================================================
// Write Models
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CreateCommentRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LikeResponse {
    pub likes: u64,
}

#[derive(Debug, Deserialize)]
pub struct ShareResponse {
    pub shares: u64,
}

// ============================================================================
// Error Response
// ============================================================================

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail. Validation errors arrive as arrays/objects and
    /// are passed through as compact JSON.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(title: Option<&str>) -> User {
        User {
            id: 1,
            email: "ada@example.com".to_string(),
            name: "ada Lovelace".to_string(),
            country: "UK".to_string(),
            title: title.map(str::to_string),
            specialization: None,
            photo_filename: None,
            created_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn test_display_name_with_and_without_title() {
        assert_eq!(user(Some("Dr")).display_name(), "Dr. ada Lovelace");
        assert_eq!(user(None).display_name(), "ada Lovelace");
        assert_eq!(user(Some("")).display_name(), "ada Lovelace");
        assert_eq!(user(None).initial(), "A");
    }

    #[test]
    fn test_blog_parses_without_optional_fields() {
        let json = serde_json::json!({
            "id": 7,
            "title": "Hello",
            "content": "World",
            "author": {
                "id": 1, "email": "a@b.c", "name": "A", "country": "X",
                "created_at": "2024-01-01T00:00:00"
            },
            "created_at": "2024-02-01T00:00:00"
        });

        let blog: Blog = serde_json::from_value(json).unwrap();
        assert_eq!(blog.likes, 0);
        assert!(blog.comments.is_empty());
        assert_eq!(blog.last_modified(), "2024-02-01T00:00:00");
    }

    #[test]
    fn test_error_body_message_variants() {
        let s: ErrorBody = serde_json::from_str(r#"{"detail":"Blog not found"}"#).unwrap();
        assert_eq!(s.message().as_deref(), Some("Blog not found"));

        let arr: ErrorBody = serde_json::from_str(r#"{"detail":[{"msg":"bad"}]}"#).unwrap();
        assert_eq!(arr.message().as_deref(), Some(r#"[{"msg":"bad"}]"#));

        let none: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(none.message().is_none());
    }
}
