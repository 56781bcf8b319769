use chat_api::url::DEFAULT_ORIGIN;
use chat_api::{chat_endpoint, health_endpoint, validate_origin};

#[test]
fn endpoints_are_resolved_relative_to_origin() {
    assert_eq!(
        chat_endpoint("https://chat.example.com"),
        "https://chat.example.com/api/chat"
    );
    assert_eq!(
        health_endpoint("https://chat.example.com"),
        "https://chat.example.com/api/health"
    );
}

#[test]
fn trailing_slashes_are_trimmed_before_joining() {
    assert_eq!(
        chat_endpoint("http://localhost:5000///"),
        "http://localhost:5000/api/chat"
    );
}

#[test]
fn empty_origin_falls_back_to_default() {
    assert_eq!(chat_endpoint("  "), format!("{DEFAULT_ORIGIN}/api/chat"));
}

#[test]
fn origin_validation_requires_http_scheme_and_host() {
    assert!(validate_origin("http://127.0.0.1:8000").is_ok());
    assert!(validate_origin("https://chat.example.com/").is_ok());
    assert!(validate_origin("ftp://chat.example.com").is_err());
    assert!(validate_origin("chat.example.com").is_err());
    assert!(validate_origin("http://").is_err());
}
