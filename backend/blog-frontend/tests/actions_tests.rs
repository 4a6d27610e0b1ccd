//! Server actions against a mock backend

mod common;

use blog_frontend::actions::{
    self, ActionOutcome, CreateBlogForm, LoginForm, RegisterForm, COMMENT_FAILED, CREATE_BLOG_FAILED,
    LOGIN_FAILED, LOGIN_REQUIRED_TO_COMMENT, REGISTERED_SIGN_IN_MANUALLY, REGISTRATION_FAILED,
};
use blog_frontend::interaction::{CommentDraft, ShareReport};
use blog_frontend::session::SessionStore;
use common::{api_client, UNREACHABLE_API};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn login_form() -> LoginForm {
    LoginForm {
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    }
}

fn register_form() -> RegisterForm {
    RegisterForm {
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
        name: "Ada".to_string(),
        country: "UK".to_string(),
        title: Some("Dr".to_string()),
        specialization: None,
    }
}

async fn mount_token(server: &MockServer, status: u16) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-123" }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({ "detail": "Incorrect username or password" }))
    };

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_stores_token_and_redirects_home() {
    let server = MockServer::start().await;
    mount_token(&server, 200).await;

    let mut session = SessionStore::new(None, false);
    let outcome = actions::login(&api_client(&server.uri()), &mut session, &login_form()).await;

    assert_eq!(outcome, ActionOutcome::Redirect("/".to_string()));
    assert_eq!(session.get_token(), Some("tok-123"));
    assert!(session.pending_cookie().is_some());
}

#[tokio::test]
async fn test_login_failure_keeps_session_empty() {
    let server = MockServer::start().await;
    mount_token(&server, 401).await;

    let mut session = SessionStore::new(None, false);
    let outcome = actions::login(&api_client(&server.uri()), &mut session, &login_form()).await;

    assert_eq!(outcome.error(), Some(LOGIN_FAILED));
    assert!(!session.is_authenticated());
    assert!(session.pending_cookie().is_none());
}

#[tokio::test]
async fn test_login_during_outage_fails() {
    let mut session = SessionStore::new(None, false);
    let outcome = actions::login(&api_client(UNREACHABLE_API), &mut session, &login_form()).await;
    assert_eq!(outcome.error(), Some(LOGIN_FAILED));
}

#[tokio::test]
async fn test_register_signs_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "secret",
            "name": "Ada",
            "country": "UK",
            "title": "Dr"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;
    mount_token(&server, 200).await;

    let mut session = SessionStore::new(None, false);
    let outcome = actions::register(&api_client(&server.uri()), &mut session, &register_form()).await;

    assert_eq!(outcome, ActionOutcome::Redirect("/".to_string()));
    assert_eq!(session.get_token(), Some("tok-123"));
}

#[tokio::test]
async fn test_register_then_token_failure_asks_for_manual_sign_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .mount(&server)
        .await;
    mount_token(&server, 500).await;

    let mut session = SessionStore::new(None, false);
    let outcome = actions::register(&api_client(&server.uri()), &mut session, &register_form()).await;

    assert_eq!(outcome.error(), Some(REGISTERED_SIGN_IN_MANUALLY));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_register_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "Email already registered" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = SessionStore::new(None, false);
    let outcome = actions::register(&api_client(&server.uri()), &mut session, &register_form()).await;
    assert_eq!(outcome.error(), Some(REGISTRATION_FAILED));
}

#[test]
fn test_logout_clears_session() {
    let mut session = SessionStore::new(Some("tok".to_string()), false);
    let outcome = actions::logout(&mut session);

    assert_eq!(outcome, ActionOutcome::Redirect("/".to_string()));
    assert!(!session.is_authenticated());
    let cookie = session.pending_cookie().unwrap();
    assert_eq!(cookie.value(), "");
}

#[tokio::test]
async fn test_comment_without_session_never_calls_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogs/3/comments"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let session = SessionStore::new(None, false);
    let draft = CommentDraft::parse("Nice post").unwrap();
    let outcome = actions::create_comment(&api_client(&server.uri()), &session, 3, &draft).await;

    assert_eq!(outcome.error(), Some(LOGIN_REQUIRED_TO_COMMENT));
}

#[tokio::test]
async fn test_comment_posts_trimmed_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogs/3/comments"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({ "content": "Nice post" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 10 })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::new(Some("tok".to_string()), false);
    let draft = CommentDraft::parse("  Nice post \n").unwrap();
    let outcome = actions::create_comment(&api_client(&server.uri()), &session, 3, &draft).await;

    assert_eq!(outcome, ActionOutcome::Done);
}

#[tokio::test]
async fn test_comment_failure_surfaces_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogs/3/comments"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "detail": "Comments are closed" })))
        .mount(&server)
        .await;

    let session = SessionStore::new(Some("tok".to_string()), false);
    let draft = CommentDraft::parse("Nice post").unwrap();
    let outcome = actions::create_comment(&api_client(&server.uri()), &session, 3, &draft).await;
    assert_eq!(outcome.error(), Some("Comments are closed"));

    let outcome = actions::create_comment(&api_client(UNREACHABLE_API), &session, 3, &draft).await;
    assert_eq!(outcome.error(), Some(COMMENT_FAILED));
}

#[tokio::test]
async fn test_create_blog_without_session_redirects_to_login() {
    let session = SessionStore::new(None, false);
    let form = CreateBlogForm {
        title: "Engines".to_string(),
        content: "Body".to_string(),
    };

    let outcome = actions::create_blog(&api_client(UNREACHABLE_API), &session, &form).await;
    assert_eq!(outcome, ActionOutcome::Redirect("/login".to_string()));
}

#[tokio::test]
async fn test_share_returns_backend_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogs/8/share"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "shares": 4 })))
        .mount(&server)
        .await;

    let session = SessionStore::new(None, false);
    let report = actions::share(&api_client(&server.uri()), &session, 8).await.unwrap();

    assert_eq!(report, ShareReport { shares: 4 });
    assert_eq!(serde_json::to_value(&report).unwrap(), json!({ "shares": 4 }));
}

#[tokio::test]
async fn test_create_blog_posts_with_bearer_and_redirects_home() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogs"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({ "title": "Engines", "content": "Body text" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 11 })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::new(Some("tok".to_string()), false);
    let form = CreateBlogForm {
        title: "  Engines ".to_string(),
        content: "Body text".to_string(),
    };

    let outcome = actions::create_blog(&api_client(&server.uri()), &session, &form).await;
    assert_eq!(outcome, ActionOutcome::Redirect("/".to_string()));
}

#[tokio::test]
async fn test_create_blog_backend_failure_stays_on_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogs"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::new(Some("tok".to_string()), false);
    let form = CreateBlogForm {
        title: "Engines".to_string(),
        content: "Body text".to_string(),
    };

    let outcome = actions::create_blog(&api_client(&server.uri()), &session, &form).await;
    assert_eq!(
        outcome,
        ActionOutcome::Failed {
            error: CREATE_BLOG_FAILED.to_string()
        }
    );
}
