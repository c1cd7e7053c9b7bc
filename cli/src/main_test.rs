use super::*;

#[test]
fn expired_authorization_becomes_session_expired() {
    let err = CliError::from(ApiError::AuthorizationExpired);
    assert!(matches!(err, CliError::SessionExpired));
    assert_eq!(err.to_string(), "session expired; run `vax-cli login`");
}

#[test]
fn signed_out_message_names_login() {
    assert_eq!(CliError::NotSignedIn.to_string(), "not signed in; run `vax-cli login`");
}

#[test]
fn other_api_errors_keep_their_message() {
    let err = CliError::from(ApiError::Status { status: 500, message: None });
    assert!(matches!(err, CliError::Api(_)));
    assert_eq!(err.to_string(), "server returned status 500");
}

#[test]
fn zero_timeout_is_rejected() {
    assert!(Cli::try_parse_from(["vax-cli", "--timeout-secs", "0", "status"]).is_err());
    let cli = Cli::try_parse_from(["vax-cli", "--timeout-secs", "5", "status"]).unwrap();
    assert_eq!(cli.timeout_secs, Some(5));
}

#[test]
fn flags_override_environment_config() {
    let config = client_config(Some("http://backend.test:9000/"), Some(5)).unwrap();
    assert_eq!(config.base_url, "http://backend.test:9000");
    assert_eq!(config.request_timeout, Duration::from_secs(5));
}

#[test]
fn bad_base_url_flag_is_a_config_error() {
    assert!(matches!(client_config(Some("backend.test"), None), Err(CliError::Config(_))));
}
