use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of reading a 2xx chat body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    Reply(String),
    /// Valid JSON without a string `response` field.
    MissingReply,
}

/// Extract the `response` field from a successful chat body.
pub fn parse_reply_body(body: &str) -> Result<ReplyBody, serde_json::Error> {
    let value = serde_json::from_str::<Value>(body)?;
    Ok(match value.get("response").and_then(Value::as_str) {
        Some(reply) => ReplyBody::Reply(reply.to_owned()),
        None => ReplyBody::MissingReply,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_reply_body, ChatRequest, ReplyBody};

    #[test]
    fn request_serializes_as_message_object() {
        let json = serde_json::to_value(ChatRequest::new("hello")).expect("serialize request");
        assert_eq!(json, serde_json::json!({"message": "hello"}));
    }

    #[test]
    fn reply_body_reads_response_field() {
        assert_eq!(
            parse_reply_body(r#"{"response":"hi"}"#).expect("json"),
            ReplyBody::Reply("hi".to_owned())
        );
    }

    #[test]
    fn reply_body_without_string_response_is_missing() {
        assert_eq!(
            parse_reply_body(r#"{"answer":"hi"}"#).expect("json"),
            ReplyBody::MissingReply
        );
        assert_eq!(
            parse_reply_body(r#"{"response":null}"#).expect("json"),
            ReplyBody::MissingReply
        );
    }

    #[test]
    fn reply_body_rejects_non_json() {
        assert!(parse_reply_body("<html>").is_err());
    }
}
