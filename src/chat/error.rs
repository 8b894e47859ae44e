//! Chat error types and the user-facing fallback for each.

use reqwest::StatusCode;
use thiserror::Error;

pub const HIGH_TRAFFIC_MESSAGE: &str =
    "I'm currently experiencing high traffic. Please try again in a moment.";
pub const CONFIGURATION_ISSUE_MESSAGE: &str =
    "I'm unable to respond right now because of a configuration issue. Please check the API token and try again.";
pub const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again.";
pub const GENERIC_ERROR_MESSAGE: &str =
    "I apologize, but I encountered an error. Please try again.";

/// Errors that can occur when asking the inference endpoint for a reply.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No API token configured
    #[error("API configuration error: inference API token is not set")]
    MissingToken,

    /// 429
    #[error("rate limited by the inference endpoint")]
    RateLimited,

    /// 401
    #[error("inference endpoint rejected the API token")]
    Unauthorized,

    #[error("inference request timed out")]
    Timeout,

    /// Any other non-success status
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("http request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    #[error("could not extract assistant response")]
    EmptyReply,
}

impl ChatError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            429 => ChatError::RateLimited,
            401 => ChatError::Unauthorized,
            code => ChatError::Api {
                status: code,
                message: body,
            },
        }
    }

    /// The string shown in place of an assistant reply
    pub fn fallback_message(&self) -> &'static str {
        match self {
            ChatError::RateLimited => HIGH_TRAFFIC_MESSAGE,
            ChatError::Unauthorized | ChatError::MissingToken => CONFIGURATION_ISSUE_MESSAGE,
            ChatError::Timeout => TIMEOUT_MESSAGE,
            ChatError::Api { .. }
            | ChatError::Request(_)
            | ChatError::InvalidResponse(_)
            | ChatError::EmptyReply => GENERIC_ERROR_MESSAGE,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ChatError::MissingToken)
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Timeout
        } else {
            ChatError::Request(err)
        }
    }
}
