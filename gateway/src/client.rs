//! The request boundary between the views and the backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call goes through [`ApiClient::execute`]. It is the only
//! place that reads the bearer token and the only place that reacts to a 401,
//! so no view can forget either. Endpoint wrappers live in `api`.
//!
//! TRADE-OFFS
//! ==========
//! There is no token refresh: a 401 ends the session and the route guards
//! send the user back to the login page. The refresh token is persisted so a
//! later refresh flow has it, but nothing reads it yet.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::ClientConfig;
use crate::error::{ApiError, INVALID_CREDENTIALS_MESSAGE};
use crate::session::{Session, SessionExit, SessionHandle, TokenPair};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::validation::{self, SignupForm};

pub const LOGIN_PATH: &str = "/auth/login/";
pub const LOGOUT_PATH: &str = "/auth/logout/";
pub const REGISTER_PATH: &str = "/auth/register/";

#[derive(Clone)]
pub struct ApiClient<T, H> {
    config: ClientConfig,
    transport: T,
    session: H,
}

impl<T: Transport, H: SessionHandle> ApiClient<T, H> {
    pub fn new(config: ClientConfig, transport: T, session: H) -> Self {
        Self { config, transport, session }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &H {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` through the interceptor chain.
    ///
    /// Authenticated requests get `Authorization: Bearer <token>` when a token
    /// is held. A 401 on an authenticated request ends the session before the
    /// error is returned.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] when the transport fails.
    /// - [`ApiError::AuthorizationExpired`] on a 401 to an authenticated request.
    /// - [`ApiError::Status`] for any other non-2xx status.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let sent_token = if request.authenticated { self.session.bearer_token() } else { None };
        if let Some(token) = &sent_token {
            request.set_header("Authorization", format!("Bearer {token}"));
        }

        let url = request.url(&self.config.base_url);
        tracing::debug!(method = request.method.as_str(), %url, "api request");
        let response = self.transport.send(&url, &request).await?;

        if response.status == 401 && request.authenticated {
            self.on_unauthorized(sent_token.as_deref());
            return Err(ApiError::AuthorizationExpired);
        }
        if !response.is_success() {
            tracing::debug!(status = response.status, %url, "api request failed");
            return Err(ApiError::from_response(&response));
        }
        Ok(response)
    }

    /// Tear the session down after a 401 to a request sent with
    /// `sent_token`. Returns whether this call ended it. Repeats, and 401s
    /// for a token the guard no longer holds, do nothing.
    pub fn on_unauthorized(&self, sent_token: Option<&str>) -> bool {
        let ended = sent_token.is_some_and(|token| self.session.expire(token));
        if ended {
            tracing::warn!("authorization expired; session cleared");
        }
        ended
    }

    /// [`Self::execute`] and decode the JSON body.
    ///
    /// # Errors
    ///
    /// As [`Self::execute`], plus [`ApiError::Decode`] for a malformed body.
    pub async fn fetch_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Exchange credentials for a session and persist it.
    ///
    /// Any failure leaves the guard signed out with storage cleared.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] for blank fields (nothing is sent).
    /// - [`ApiError::Auth`] when the backend rejects the credentials.
    /// - [`ApiError::Network`] when the backend cannot be reached.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let (username, password) = validation::validate_credentials(username, password)?;
        let request = ApiRequest::post(LOGIN_PATH)
            .public()
            .json(json!({ "username": username, "password": password }));

        match self.fetch_json::<TokenPair>(request).await {
            Ok(tokens) => {
                let session = Session::from_tokens(username, tokens);
                self.session.establish(session.clone())?;
                Ok(session)
            }
            Err(error) => {
                self.session.end(SessionExit::LoginRejected);
                tracing::info!(%error, "login rejected");
                Err(match error {
                    ApiError::Status { message, .. } => {
                        ApiError::Auth(message.unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_owned()))
                    }
                    other => other,
                })
            }
        }
    }

    /// Sign out. The backend call is best effort; local state is always
    /// cleared afterwards, whatever the backend answered.
    pub async fn logout(&self) {
        if self.session.bearer_token().is_some() {
            let request = ApiRequest::post(LOGOUT_PATH).json(json!({}));
            if let Err(error) = self.execute(request).await {
                tracing::warn!(%error, "logout request failed; clearing session anyway");
            }
        }
        self.session.end(SessionExit::Logout);
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for form errors, otherwise as [`Self::execute`].
    pub async fn signup(&self, form: &SignupForm) -> Result<(), ApiError> {
        let input = validation::validate_signup(form)?;
        let body = serde_json::to_value(&input).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.execute(ApiRequest::post(REGISTER_PATH).public().json(body)).await?;
        tracing::info!(username = %input.username, "account created");
        Ok(())
    }
}
