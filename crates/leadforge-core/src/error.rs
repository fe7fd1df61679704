//! Error types for LeadForge.
//!
//! Display strings double as the user-facing messages returned by the
//! HTTP layer, so they are worded for operators rather than developers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required credential or setting is absent.
    #[error("{0}")]
    Config(String),

    /// The LLM provider answered with a non-2xx status.
    #[error("OpenAI request failed ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Model output did not contain usable JSON, or contained no options.
    #[error("{0}")]
    Parse(String),

    /// Malformed request shape.
    #[error("{0}")]
    Validation(String),

    /// Transport failure or timeout talking to an external service.
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the error came from the LLM path and may be replaced by
    /// the rule-based generator when fallback is enabled.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::Upstream { .. } | Error::Parse(_) | Error::Http(_) | Error::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
