//! UI/backend events and error modeling for the desktop GUI controller.

use client_core::{CancelToken, FetchError};
use shared::{domain::CoinId, protocol::CoinRecord};

use crate::backend_bridge::icons::IconImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    CoinsFetched {
        token: CancelToken,
        result: Result<Vec<CoinRecord>, FetchError>,
    },
    IconFetched {
        id: CoinId,
        result: Result<IconImage, String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn label(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Transport => "Transport",
            UiErrorCategory::Unknown => "Unexpected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_disconnected_queue_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::CommandQueue,
            "Backend command processor disconnected; restart the app",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::CommandQueue);
        assert_eq!(err.label(), "Transport");
    }

    #[test]
    fn unknown_messages_keep_their_text() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: out of file handles",
        );
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert!(err.message().starts_with("backend worker startup failure"));
    }
}
