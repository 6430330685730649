//! UI/backend events and error modeling for desktop GUI controller.

use client_core::ClientError;
use shared::protocol::PokemonDetail;

pub enum UiEvent {
    Info(String),
    LookupFinished(Result<PokemonDetail, ClientError>),
    UpdateFinished(Result<PokemonDetail, ClientError>),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Dispatch,
}

/// Failures that belong in the status bar rather than in the display
/// region or the alert.
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
        let category = if message_lower.contains("invalid")
            || message_lower.contains("cannot carry")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("disconnect")
            || message_lower.contains("queue is full")
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

    pub fn status_line(&self) -> String {
        let label = match self.category {
            UiErrorCategory::Transport => "Connection problem",
            UiErrorCategory::Validation => "Configuration problem",
            UiErrorCategory::Unknown => "Error",
        };
        match self.context {
            UiErrorContext::BackendStartup => format!("{label} (startup): {}", self.message),
            UiErrorContext::Dispatch => format!("{label}: {}", self.message),
        }
    }
}
