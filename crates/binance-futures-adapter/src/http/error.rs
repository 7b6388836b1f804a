/*
[INPUT]:  Error sources (transport, exchange rejections, payload decoding, caller input)
[OUTPUT]: Structured error type with kind classification and retry hints
[POS]:    Error handling layer - unified error type for the whole crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the exchange returns on rejection: `{"code": -1121, "msg": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

/// Coarse classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No usable HTTP response: connect, DNS, TLS, timeout, body read.
    Transport,
    /// The exchange answered and rejected the request.
    Exchange,
    /// The exchange answered 2xx but the body does not fit the declared shape.
    Protocol,
    /// Rejected locally before any I/O.
    InvalidRequest,
}

/// Main error type for the futures adapter
#[derive(Error, Debug)]
pub enum BinanceError {
    /// HTTP transport failed
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Exchange rejected the request
    #[error("exchange rejected request (HTTP {status}{}): {message}", code_suffix(.code))]
    Exchange {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// Successful response that does not decode into the expected shape
    #[error("unexpected response payload: {message}")]
    Protocol { message: String, body: String },

    /// Request rejected before sending
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|code| format!(", code {code}")).unwrap_or_default()
}

impl BinanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BinanceError::Transport(_) => ErrorKind::Transport,
            BinanceError::Exchange { .. } => ErrorKind::Exchange,
            BinanceError::Protocol { .. } => ErrorKind::Protocol,
            BinanceError::InvalidRequest(_) | BinanceError::UrlParse(_) => {
                ErrorKind::InvalidRequest
            }
        }
    }

    /// True when the request gave up waiting for the exchange.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BinanceError::Transport(err) if err.is_timeout())
    }

    /// Exchange error code, when the exchange supplied one.
    pub fn exchange_code(&self) -> Option<i64> {
        match self {
            BinanceError::Exchange { code, .. } => *code,
            _ => None,
        }
    }

    /// Check if the error is worth retrying by the caller.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            BinanceError::Transport(_) => true,
            BinanceError::Exchange { status, code, .. } => {
                // -1001 disconnected, -1003 too many requests, -1007 backend timeout,
                // -1015 too many orders
                matches!(code, Some(-1001 | -1003 | -1007 | -1015))
                    || *status == StatusCode::TOO_MANY_REQUESTS.as_u16()
                    || *status == 418
                    || *status >= 500
            }
            _ => false,
        }
    }

    /// Create an exchange error from a status code and a raw body.
    ///
    /// A structured `{"code","msg"}` body keeps code and message verbatim;
    /// anything else becomes the message as-is.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(err) => BinanceError::Exchange {
                status: status.as_u16(),
                code: Some(err.code),
                message: err.msg,
            },
            Err(_) => BinanceError::Exchange {
                status: status.as_u16(),
                code: None,
                message: body.trim().to_string(),
            },
        }
    }

    pub(crate) fn protocol(err: serde_json::Error, body: &str) -> Self {
        const MAX_BODY: usize = 512;
        let body = match body.char_indices().nth(MAX_BODY) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        BinanceError::Protocol {
            message: err.to_string(),
            body,
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, BinanceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn structured_body_preserves_code_and_message() {
        let err = BinanceError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"code":-1121,"msg":"Invalid symbol."}"#,
        );

        assert_eq!(err.kind(), ErrorKind::Exchange);
        assert_eq!(err.exchange_code(), Some(-1121));
        match err {
            BinanceError::Exchange {
                status, message, ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid symbol.");
            }
            _ => panic!("Expected Exchange error variant"),
        }
    }

    #[test]
    fn unstructured_body_becomes_message() {
        let err = BinanceError::from_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>\n");
        assert_eq!(err.exchange_code(), None);
        assert_eq!(
            err.to_string(),
            "exchange rejected request (HTTP 502): <html>bad gateway</html>"
        );
    }

    #[test]
    fn display_includes_exchange_code() {
        let err = BinanceError::Exchange {
            status: 400,
            code: Some(-2019),
            message: "Margin is insufficient.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "exchange rejected request (HTTP 400, code -2019): Margin is insufficient."
        );
    }

    #[rstest]
    #[case(429, None, true)]
    #[case(418, Some(-1003), true)]
    #[case(503, None, true)]
    #[case(400, Some(-1007), true)]
    #[case(400, Some(-1121), false)]
    #[case(401, Some(-2015), false)]
    fn exchange_errors_retry_hint(
        #[case] status: u16,
        #[case] code: Option<i64>,
        #[case] expected: bool,
    ) {
        let err = BinanceError::Exchange {
            status,
            code,
            message: String::new(),
        };
        assert_eq!(err.is_retryable(), expected);
    }

    #[test]
    fn local_errors_are_not_retryable() {
        let err = BinanceError::InvalidRequest("missing symbol".to_string());
        assert!(!err.is_retryable());
        assert!(!err.is_timeout());
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn protocol_error_truncates_large_bodies() {
        let body = "x".repeat(2_000);
        let source = serde_json::from_str::<u8>("\"nope\"").unwrap_err();
        let err = BinanceError::protocol(source, &body);

        assert_eq!(err.kind(), ErrorKind::Protocol);
        match err {
            BinanceError::Protocol { body, .. } => assert_eq!(body.len(), 515),
            _ => panic!("Expected Protocol error variant"),
        }
    }
}
