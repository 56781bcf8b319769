use std::time::Duration;

use chat_api::retry::*;

#[test]
fn retry_server_errors_are_retryable() {
    assert!(is_retryable_status(500));
    assert!(is_retryable_status(502));
    assert!(is_retryable_status(503));
    assert!(is_retryable_status(599));
}

#[test]
fn retry_client_errors_and_success_are_terminal() {
    assert!(!is_retryable_status(200));
    assert!(!is_retryable_status(204));
    assert!(!is_retryable_status(400));
    assert!(!is_retryable_status(429));
    assert!(!is_retryable_status(499));
}

#[test]
fn retry_policy_defaults_to_three_attempts_two_seconds_apart() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.delay, Duration::from_millis(2000));
    assert!(policy.allows_another(1));
    assert!(policy.allows_another(2));
    assert!(!policy.allows_another(3));
}

#[test]
fn retry_policy_never_drops_below_one_attempt() {
    let policy = RetryPolicy::new(0, Duration::ZERO);
    assert_eq!(policy.max_attempts, 1);
    assert!(!policy.allows_another(1));
}
