use super::*;

#[test]
fn new_trims_trailing_slashes() {
    let cfg = ClientConfig::new("https://vax.example.test//").unwrap();
    assert_eq!(cfg.base_url, "https://vax.example.test");
    assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
}

#[test]
fn new_rejects_non_http_urls() {
    assert_eq!(
        ClientConfig::new("ftp://vax.example.test"),
        Err(ConfigError::InvalidBaseUrl("ftp://vax.example.test".to_owned()))
    );
}

#[test]
fn default_points_at_local_backend() {
    assert_eq!(ClientConfig::default().base_url, DEFAULT_BASE_URL);
}

/// Only test touching these variables, so no cross-test env races.
#[test]
fn from_env_reads_overrides_and_ignores_bad_or_zero_timeout() {
    unsafe {
        std::env::set_var("VAX_API_BASE_URL", "http://backend.test:9000/");
        std::env::set_var("VAX_REQUEST_TIMEOUT_SECS", "3");
    }
    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "http://backend.test:9000");
    assert_eq!(cfg.request_timeout, Duration::from_secs(3));

    unsafe { std::env::set_var("VAX_REQUEST_TIMEOUT_SECS", "soon") };
    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

    unsafe { std::env::set_var("VAX_REQUEST_TIMEOUT_SECS", "0") };
    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

    unsafe {
        std::env::remove_var("VAX_API_BASE_URL");
        std::env::remove_var("VAX_REQUEST_TIMEOUT_SECS");
    }
}
