//! Journey API transport error types.

use std::fmt;

/// Errors from the journey API transport.
#[derive(Debug)]
pub enum TflError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Response body was not valid JSON
    Json {
        message: String,
        body: Option<String>,
    },

    /// Base URL cannot be used to build journey requests
    InvalidBaseUrl(String),

    /// Invalid API key or unauthorized
    Unauthorized,

    /// A scripted mock has no response left to serve
    MockExhausted { url: String },

    /// Mock fixture could not be loaded
    Fixture(String),
}

impl fmt::Display for TflError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TflError::Http(e) => write!(f, "HTTP error: {e}"),
            TflError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TflError::InvalidBaseUrl(url) => write!(f, "invalid base URL: {url}"),
            TflError::Unauthorized => write!(f, "unauthorized (check the app key)"),
            TflError::MockExhausted { url } => {
                write!(f, "no scripted response left for {url}")
            }
            TflError::Fixture(msg) => write!(f, "fixture error: {msg}"),
        }
    }
}

impl std::error::Error for TflError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TflError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TflError {
    fn from(err: reqwest::Error) -> Self {
        TflError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TflError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized (check the app key)");

        let err = TflError::MockExhausted {
            url: "http://mock/Journey".into(),
        };
        assert_eq!(
            err.to_string(),
            "no scripted response left for http://mock/Journey"
        );

        let err = TflError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));
    }
}
