use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::session::{MemoryStore, Session, SessionGuard};
use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};

pub type TestClient = ApiClient<ScriptedTransport, Rc<RefCell<SessionGuard<MemoryStore>>>>;

/// Replays canned responses in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
    sent: RefCell<Vec<(String, ApiRequest)>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Result<ApiResponse, TransportError>>) -> Self {
        Self { replies: RefCell::new(replies.into_iter().collect()), sent: RefCell::default() }
    }

    pub fn sent(&self) -> Vec<(String, ApiRequest)> {
        self.sent.borrow().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.sent.borrow().last().map(|(_, r)| r.clone()).unwrap()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, url: &str, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.sent.borrow_mut().push((url.to_owned(), request.clone()));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Failed("no scripted reply".to_owned())))
    }
}

pub fn session(token: &str) -> Session {
    Session { token: token.to_owned(), refresh_token: Some("refresh".to_owned()), username: "admin".to_owned() }
}

pub fn ok_json(value: &serde_json::Value) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::new(200).with_json(value))
}

pub fn status(code: u16) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::new(code))
}

/// Client over `replies` whose guard starts from `store`.
pub fn client_with(
    store: MemoryStore,
    replies: impl IntoIterator<Item = Result<ApiResponse, TransportError>>,
) -> TestClient {
    let guard = Rc::new(RefCell::new(SessionGuard::restore(store)));
    ApiClient::new(ClientConfig::default(), ScriptedTransport::new(replies), guard)
}
