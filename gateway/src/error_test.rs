use super::*;

#[test]
fn from_response_prefers_message_field() {
    let response = ApiResponse::new(400).with_json(&serde_json::json!({
        "message": "Drive date clashes",
        "detail": "ignored",
    }));
    let error = ApiError::from_response(&response);
    assert_eq!(error.status(), Some(400));
    assert_eq!(error.user_message("Failed to save drive"), "Drive date clashes");
}

#[test]
fn from_response_falls_back_to_detail() {
    let response = ApiResponse::new(403).with_json(&serde_json::json!({ "detail": "Not allowed" }));
    assert_eq!(ApiError::from_response(&response).user_message("x"), "Not allowed");
}

#[test]
fn non_json_error_body_uses_fallback() {
    let response = ApiResponse::new(500).with_body("<html>oops</html>");
    let error = ApiError::from_response(&response);
    assert_eq!(error.user_message("Failed to load drives"), "Failed to load drives");
}

#[test]
fn network_errors_use_fallback() {
    let error = ApiError::from(TransportError::Failed("connection refused".to_owned()));
    assert_eq!(error.user_message("Failed to load reports"), "Failed to load reports");
}

#[test]
fn expired_authorization_reports_401() {
    assert_eq!(ApiError::AuthorizationExpired.status(), Some(401));
    assert_eq!(ApiError::AuthorizationExpired.user_message("x"), SESSION_EXPIRED_MESSAGE);
}
