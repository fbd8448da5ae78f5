use http::StatusCode;
use serde::Deserialize;

use crate::core::request::FailureMessage;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ApiError {
    #[display("failed to reach the backend: {_0}")]
    Transport(reqwest::Error),

    #[display("backend responded with `{status}`: {}", message.as_deref().unwrap_or("no message"))]
    #[from(skip)]
    Backend { status: StatusCode, message: Option<String> },

    #[display("failed to deserialize the response: {_0}")]
    Decode(serde_json::Error),

    #[display("`{_0}` cannot be used as a base URL")]
    #[from(skip)]
    InvalidBaseUrl(#[error(not(source))] String),

    #[display("`{_0}` does not name an uploaded file")]
    #[from(skip)]
    InvalidImageUrl(#[error(not(source))] String),
}

impl ApiError {
    /// Build the error from a failed response body.
    ///
    /// Bodies which are not a JSON object with a `message` produce no message.
    pub fn from_body(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body).ok().and_then(|body| body.message);
        Self::Backend { status, message }
    }
}

impl FailureMessage for ApiError {
    fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message, .. } => message.as_deref(),
            Self::Transport(_)
            | Self::Decode(_)
            | Self::InvalidBaseUrl(_)
            | Self::InvalidImageUrl(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_with_message() {
        // language=JSON
        let error = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"message": "Room is not available for the selected dates"}"#,
        );
        assert_eq!(error.failure_message(), Some("Room is not available for the selected dates"));
    }

    #[test]
    fn test_from_body_without_message() {
        let error = ApiError::from_body(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error": true}"#);
        assert_eq!(error.failure_message(), None);
    }

    #[test]
    fn test_from_html_body() {
        let error = ApiError::from_body(StatusCode::BAD_GATEWAY, b"<html>Bad Gateway</html>");
        assert_eq!(error.failure_message(), None);
        assert_eq!(error.to_string(), "backend responded with `502 Bad Gateway`: no message");
    }
}
