//! Backend-to-UI events and the user-facing error model.

use client_core::OrderApiError;
use shared::domain::Order;

use crate::backend_bridge::commands::RequestId;
use crate::clipboard::ClipboardError;

pub enum UiEvent {
    OrderLoaded {
        request: RequestId,
        order: Box<Order>,
    },
    OrderCreated {
        request: RequestId,
        order_id: String,
    },
    RequestFailed {
        request: RequestId,
        error: UiError,
    },
    SamplesReady(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    NotFound,
    Server,
    Transport,
    Decode,
    Clipboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Lookup,
    Create,
    Export,
}

impl UiErrorContext {
    fn failure_prefix(self) -> &'static str {
        match self {
            Self::Lookup => "Failed to fetch order",
            Self::Create => "Failed to create order",
            Self::Export => "Failed to copy JSON",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn validation(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context,
            message: message.into(),
        }
    }

    pub fn transport(context: UiErrorContext, cause: impl std::fmt::Display) -> Self {
        Self {
            category: UiErrorCategory::Transport,
            context,
            message: format!("{}: {cause}", context.failure_prefix()),
        }
    }

    pub fn from_api(context: UiErrorContext, err: &OrderApiError) -> Self {
        let prefix = context.failure_prefix();
        let (category, message) = match err {
            OrderApiError::NotFound { .. } => {
                (UiErrorCategory::NotFound, "Order not found".to_string())
            }
            OrderApiError::Server { status, .. } => {
                let detail = match (context, err.server_body()) {
                    (UiErrorContext::Create, Some(body)) => body.trim().to_string(),
                    _ => format!("server error {status}"),
                };
                (UiErrorCategory::Server, format!("{prefix}: {detail}"))
            }
            OrderApiError::Transport(_) | OrderApiError::InvalidBaseUrl { .. } => {
                (UiErrorCategory::Transport, format!("{prefix}: {err}"))
            }
            OrderApiError::Decode(_) => (UiErrorCategory::Decode, format!("{prefix}: {err}")),
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_clipboard(err: &ClipboardError) -> Self {
        tracing::debug!(error = %err, "clipboard failure mapped to generic message");
        Self {
            category: UiErrorCategory::Clipboard,
            context: UiErrorContext::Export,
            message: UiErrorContext::Export.failure_prefix().to_string(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self.category {
            UiErrorCategory::NotFound => Severity::Warning,
            _ => Severity::Error,
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
}
