use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use super::*;
use crate::config::ClientConfig;
use crate::routes::{Protected, RouteDecision, RouteGuard};
use crate::session::{MemoryStore, SessionGuard, TokenStore};
use crate::test_support::{client_with, ok_json, session, status};
use crate::transport::{Transport, TransportError};

fn no_replies() -> Vec<Result<ApiResponse, TransportError>> {
    Vec::new()
}

fn authenticated(client: &crate::test_support::TestClient) -> bool {
    client.session().borrow().is_authenticated()
}

// =============================================================
// Interceptor
// =============================================================

#[tokio::test]
async fn bearer_attached_when_token_held() {
    let client = client_with(MemoryStore::with_session(session("tok-1")), [ok_json(&json!([]))]);
    client.execute(ApiRequest::get("/drives/drives/")).await.unwrap();

    let requests = client.transport().sent();
    let (url, sent) = &requests[0];
    assert_eq!(url, "http://127.0.0.1:8000/drives/drives/");
    assert_eq!(sent.header_value("authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
async fn no_bearer_without_token() {
    let client = client_with(MemoryStore::new(), [ok_json(&json!([]))]);
    client.execute(ApiRequest::get("/drives/drives/")).await.unwrap();
    assert_eq!(client.transport().last().header_value("Authorization"), None);
}

#[tokio::test]
async fn public_requests_never_carry_bearer() {
    let client = client_with(MemoryStore::with_session(session("tok-1")), [status(204)]);
    client.execute(ApiRequest::post("/auth/register/").public()).await.unwrap();
    assert_eq!(client.transport().last().header_value("Authorization"), None);
}

#[tokio::test]
async fn unauthorized_ends_session_exactly_once() {
    let store = MemoryStore::with_session(session("tok-1"));
    let client = client_with(store.clone(), [status(401), status(401)]);

    let first = client.execute(ApiRequest::get("/students/students/")).await;
    assert!(matches!(first, Err(ApiError::AuthorizationExpired)));
    assert!(!authenticated(&client));
    assert_eq!(store.snapshot(), None);
    assert_eq!(Protected.decide(authenticated(&client)), RouteDecision::Redirect("/login"));

    let second = client.execute(ApiRequest::get("/students/students/")).await;
    assert!(matches!(second, Err(ApiError::AuthorizationExpired)));
    assert!(!client.on_unauthorized(Some("tok-1")));
}

/// Signs the user out and back in with a new token while a request sent
/// with the old token is in flight, then answers that request with 401.
struct ReloginTransport {
    guard: Rc<RefCell<SessionGuard<MemoryStore>>>,
}

impl Transport for ReloginTransport {
    async fn send(&self, _url: &str, _request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.guard.borrow_mut().end(SessionExit::Logout);
        self.guard.borrow_mut().establish(session("tok-2")).unwrap();
        Ok(ApiResponse::new(401))
    }
}

#[tokio::test]
async fn late_unauthorized_for_replaced_token_keeps_new_session() {
    let store = MemoryStore::with_session(session("tok-1"));
    let guard = Rc::new(RefCell::new(SessionGuard::restore(store.clone())));
    let client = ApiClient::new(ClientConfig::default(), ReloginTransport { guard: guard.clone() }, guard.clone());

    let err = client.execute(ApiRequest::get("/drives/drives/")).await.unwrap_err();
    assert!(matches!(err, ApiError::AuthorizationExpired));
    assert!(guard.borrow().is_authenticated());
    assert_eq!(guard.borrow().bearer_token(), Some("tok-2"));
    assert_eq!(store.snapshot().map(|s| s.token), Some("tok-2".to_owned()));
    assert!(!client.on_unauthorized(Some("tok-1")));
    assert!(!client.on_unauthorized(None));
}

#[tokio::test]
async fn other_statuses_keep_session_and_carry_message() {
    let client = client_with(
        MemoryStore::with_session(session("tok-1")),
        [Ok(ApiResponse::new(400).with_json(&json!({ "message": "Drive already exists" })))],
    );
    let err = client.execute(ApiRequest::post("/drives/drives/")).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("Failed"), "Drive already exists");
    assert!(authenticated(&client));
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    let client = client_with(MemoryStore::with_session(session("tok-1")), [Err(TransportError::TimedOut(15))]);
    let err = client.execute(ApiRequest::get("/drives/drives/")).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(TransportError::TimedOut(15))));
    assert!(authenticated(&client));
}

// =============================================================
// Login
// =============================================================

#[tokio::test]
async fn login_success_persists_tokens_and_username() {
    let store = MemoryStore::new();
    let client = client_with(store.clone(), [ok_json(&json!({ "access": "acc", "refresh": "ref" }))]);

    let session = client.login(" admin ", "admin123").await.unwrap();
    assert_eq!(session.username, "admin");
    assert!(authenticated(&client));

    let stored = store.snapshot().unwrap();
    assert_eq!(stored.token, "acc");
    assert_eq!(stored.refresh_token.as_deref(), Some("ref"));

    let requests = client.transport().sent();
    let (url, sent) = &requests[0];
    assert_eq!(url, "http://127.0.0.1:8000/auth/login/");
    assert_eq!(sent.header_value("Authorization"), None);
    assert_eq!(sent.body, crate::RequestBody::Json(json!({ "username": "admin", "password": "admin123" })));
}

#[tokio::test]
async fn login_rejected_shows_default_message_and_clears_stale_tokens() {
    let store = MemoryStore::with_session(session("stale"));
    let client = client_with(store.clone(), [status(401)]);
    client.session().borrow_mut().end(SessionExit::Logout);
    store.save(&session("stale")).unwrap();

    let err = client.login("admin", "wrong").await.unwrap_err();
    assert!(matches!(&err, ApiError::Auth(m) if m == "Invalid username or password"));
    assert!(!authenticated(&client));
    assert_eq!(store.snapshot(), None);
}

#[tokio::test]
async fn login_rejected_prefers_backend_detail() {
    let client = client_with(
        MemoryStore::new(),
        [Ok(ApiResponse::new(400).with_json(&json!({ "detail": "Account disabled" })))],
    );
    let err = client.login("admin", "pw").await.unwrap_err();
    assert_eq!(err.user_message("fallback"), "Account disabled");
}

#[tokio::test]
async fn login_network_failure_stays_network_error() {
    let client = client_with(MemoryStore::new(), [Err(TransportError::Failed("refused".to_owned()))]);
    let err = client.login("admin", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(
        err.user_message("Unable to reach the server. Please try again."),
        "Unable to reach the server. Please try again."
    );
}

#[tokio::test]
async fn blank_credentials_never_reach_network() {
    let client = client_with(MemoryStore::new(), no_replies());
    let err = client.login("admin", "  ").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(client.transport().sent().is_empty());
}

// =============================================================
// Logout and signup
// =============================================================

#[tokio::test]
async fn logout_clears_even_when_backend_fails() {
    for reply in [status(500), Err(TransportError::TimedOut(15)), status(401)] {
        let store = MemoryStore::with_session(session("tok-1"));
        let client = client_with(store.clone(), [reply]);
        client.logout().await;
        assert!(!authenticated(&client));
        assert_eq!(store.snapshot(), None);
    }
}

#[tokio::test]
async fn logout_sends_bearer_when_signed_in() {
    let client = client_with(MemoryStore::with_session(session("tok-1")), [status(205)]);
    client.logout().await;
    let requests = client.transport().sent();
    let (url, sent) = &requests[0];
    assert_eq!(url, "http://127.0.0.1:8000/auth/logout/");
    assert_eq!(sent.header_value("Authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
async fn logout_while_signed_out_skips_backend() {
    let client = client_with(MemoryStore::new(), no_replies());
    client.logout().await;
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn signup_posts_public_registration() {
    let client = client_with(MemoryStore::new(), [status(201)]);
    let form = SignupForm {
        username: "nurse".to_owned(),
        email: "nurse@school.test".to_owned(),
        password: "pw".to_owned(),
        confirm_password: "pw".to_owned(),
    };
    client.signup(&form).await.unwrap();
    let sent = client.transport().last();
    assert_eq!(sent.path, "/auth/register/");
    assert!(!sent.authenticated);
    assert!(!authenticated(&client));
}
