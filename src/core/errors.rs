use thiserror::Error;

use crate::core::constants::REQUEST_FAILED;

/// Why an exchange with the backend failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// No response was received (connection refused, reset, DNS, ...).
    #[error("{message}")]
    Network { message: String },

    /// The backend answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Application { status: u16, detail: Option<String> },

    /// Anything that fits neither of the above, e.g. an undecodable reply or a timeout.
    #[error("{}", .message.as_deref().unwrap_or(REQUEST_FAILED))]
    Unknown { message: Option<String> },
}

impl ExchangeError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn application(status: u16, detail: Option<String>) -> Self {
        Self::Application { status, detail }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: Some(message.into()),
        }
    }

    /// Structured detail supplied by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ExchangeError::Application { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Generic message describing the failure, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            ExchangeError::Network { message } => Some(message.clone()),
            ExchangeError::Application { .. } => Some(self.to_string()),
            ExchangeError::Unknown { message } => message.clone(),
        }
    }

    /// Text for the error slot: detail, then message, then a fixed fallback.
    pub fn banner_text(&self) -> String {
        self.detail()
            .filter(|detail| !detail.is_empty())
            .map(str::to_owned)
            .or_else(|| self.message().filter(|message| !message.is_empty()))
            .unwrap_or_else(|| REQUEST_FAILED.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a request is already in flight")]
    AlreadySending,
}
