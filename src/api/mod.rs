mod client;
pub mod types;

use reqwest::StatusCode;
use thiserror::Error;

pub use client::*;
pub use types::*;

/// Fixed banner placed in front of every user-facing failure message.
pub const ERROR_BANNER_PREFIX: &str = "API Error. Check backend. ";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status code {}", .status.as_u16())]
    Server {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Analysis task aborted: {0}")]
    Aborted(String),
}

impl AnalysisError {
    /// Server-supplied `detail`, when the error body carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AnalysisError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The message shown in the error banner: the server's detail if present,
    /// otherwise this error's own description.
    pub fn user_message(&self) -> String {
        let reason = match self.detail() {
            Some(detail) => detail.to_string(),
            None => self.to_string(),
        };
        format!("{ERROR_BANNER_PREFIX}{reason}")
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Transport(e) => {
                if e.is_timeout() {
                    ErrorKind::Timeout
                } else {
                    ErrorKind::Network
                }
            }
            AnalysisError::Server { status, .. } => {
                if status.is_server_error() {
                    ErrorKind::Server
                } else {
                    ErrorKind::Client
                }
            }
            AnalysisError::Decode(_) => ErrorKind::Deserialize,
            AnalysisError::Aborted(_) => ErrorKind::Aborted,
        }
    }
}

/// Coarse failure class, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    Server,
    Client,
    Deserialize,
    Aborted,
}
