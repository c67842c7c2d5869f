//! Chat message and wire types.
//!
//! A message only ever exists as an entry in the conversation log, so the
//! types here are the sender tag and the two JSON bodies exchanged with the
//! `/get` endpoint.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Who a message in the conversation log is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The human operator of the page.
    User,
    /// The automated responder.
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// Request body for `POST /get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub msg: String,
}

/// Response body for `POST /get`.
///
/// The server uses the same shape for its own failures, so a client shows
/// whatever arrives in `response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

impl ChatReply {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_display_and_parse() {
        assert_eq!(Sender::Bot.to_string(), "bot");
        assert_eq!("USER".parse::<Sender>().unwrap(), Sender::User);
        assert!("robot".parse::<Sender>().is_err());
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let body = serde_json::to_string(&ChatRequest {
            msg: "hello".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"msg":"hello"}"#);
    }

    #[test]
    fn test_chat_reply_requires_response_field() {
        let ok: ChatReply = serde_json::from_str(r#"{"response":"hi"}"#).unwrap();
        assert_eq!(ok.response, "hi");

        let missing = serde_json::from_str::<ChatReply>(r#"{"answer":"hi"}"#);
        assert!(missing.is_err());
    }
}
