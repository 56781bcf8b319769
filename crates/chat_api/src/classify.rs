use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::TransportError;

/// User-facing failure categories, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    Offline,
    TransportUnreachable,
    WarmingUp,
    RateLimited,
    ClientRejected,
    ServerErrorExhausted,
    Generic,
}

impl FailureCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::TransportUnreachable => "transport-unreachable",
            Self::WarmingUp => "warming-up",
            Self::RateLimited => "rate-limited",
            Self::ClientRejected => "client-rejected",
            Self::ServerErrorExhausted => "server-error-exhausted",
            Self::Generic => "generic",
        }
    }

    /// Text shown in the transcript for this category.
    pub fn user_message(self, detail: &str) -> String {
        match self {
            Self::Offline => {
                "No internet connection. Check your network and try again.".to_owned()
            }
            Self::TransportUnreachable => {
                "Unable to reach the chat service. It may be offline or restarting.".to_owned()
            }
            Self::WarmingUp => {
                "The assistant is warming up. Please try again in a moment.".to_owned()
            }
            Self::RateLimited => {
                "Too many requests. Please wait a moment before trying again.".to_owned()
            }
            Self::ClientRejected => format!("The request was rejected: {detail}"),
            Self::ServerErrorExhausted => format!(
                "The chat service is having trouble right now ({detail}). Please try again later."
            ),
            Self::Generic => format!("Sorry, something went wrong: {detail}"),
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What ended a dispatch without a reply.
#[derive(Debug, Clone, Copy)]
pub enum FailureCause<'a> {
    Transport(&'a TransportError),
    Status { status: u16, detail: &'a str },
    Other(&'a str),
}

impl FailureCause<'_> {
    pub fn detail(&self) -> String {
        match self {
            Self::Transport(error) => error.to_string(),
            Self::Status { detail, .. } => (*detail).to_owned(),
            Self::Other(message) => (*message).to_owned(),
        }
    }
}

fn warming_up_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)\bloading\b|warming.?up|initiali[sz]ing|model.?is.?starting")
            .expect("warming-up regex must compile")
    })
}

fn rate_limited_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)rate.?limit|too.?many.?requests")
            .expect("rate-limit regex must compile")
    })
}

/// Classify a terminal failure.
pub fn classify_failure(online: bool, cause: &FailureCause<'_>) -> FailureCategory {
    if !online {
        return FailureCategory::Offline;
    }

    let text = match cause {
        FailureCause::Transport(_) => return FailureCategory::TransportUnreachable,
        FailureCause::Status { detail, .. } => *detail,
        FailureCause::Other(message) => *message,
    };

    if warming_up_regex().is_match(text) {
        return FailureCategory::WarmingUp;
    }
    if rate_limited_regex().is_match(text) {
        return FailureCategory::RateLimited;
    }

    match cause {
        FailureCause::Status { status, .. } if (400..=499).contains(status) => {
            FailureCategory::ClientRejected
        }
        FailureCause::Status { status, .. } if (500..=599).contains(status) => {
            FailureCategory::ServerErrorExhausted
        }
        _ => FailureCategory::Generic,
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_failure, FailureCategory, FailureCause};
    use crate::error::TransportError;

    #[test]
    fn offline_wins_over_every_other_cause() {
        let transport = TransportError::connect("refused");
        assert_eq!(
            classify_failure(false, &FailureCause::Transport(&transport)),
            FailureCategory::Offline
        );
        assert_eq!(
            classify_failure(
                false,
                &FailureCause::Status {
                    status: 503,
                    detail: "Model is loading"
                }
            ),
            FailureCategory::Offline
        );
    }

    #[test]
    fn transport_failures_are_unreachable() {
        let transport = TransportError::connect("connection refused");
        assert_eq!(
            classify_failure(true, &FailureCause::Transport(&transport)),
            FailureCategory::TransportUnreachable
        );
    }

    #[test]
    fn detail_text_selects_warming_up_before_rate_limit() {
        let cause = FailureCause::Status {
            status: 503,
            detail: "Model is loading, rate limit applies",
        };
        assert_eq!(classify_failure(true, &cause), FailureCategory::WarmingUp);

        let cause = FailureCause::Status {
            status: 429,
            detail: "Rate limit exceeded",
        };
        assert_eq!(classify_failure(true, &cause), FailureCategory::RateLimited);
    }

    #[test]
    fn status_ranges_map_to_rejected_and_exhausted() {
        let cause = FailureCause::Status {
            status: 400,
            detail: "bad input",
        };
        assert_eq!(classify_failure(true, &cause), FailureCategory::ClientRejected);

        let cause = FailureCause::Status {
            status: 500,
            detail: "HTTP 500 Internal Server Error",
        };
        assert_eq!(
            classify_failure(true, &cause),
            FailureCategory::ServerErrorExhausted
        );
    }

    #[test]
    fn everything_else_is_generic() {
        assert_eq!(
            classify_failure(true, &FailureCause::Other("expected value at line 1")),
            FailureCategory::Generic
        );
        assert_eq!(
            classify_failure(
                true,
                &FailureCause::Status {
                    status: 304,
                    detail: "HTTP 304 Not Modified"
                }
            ),
            FailureCategory::Generic
        );
    }

    #[test]
    fn user_messages_interpolate_detail_where_useful() {
        assert!(FailureCategory::Generic
            .user_message("boom")
            .ends_with("boom"));
        assert!(FailureCategory::ClientRejected
            .user_message("too long")
            .contains("too long"));
        assert!(!FailureCategory::Offline.user_message("ignored").contains("ignored"));
    }
}
