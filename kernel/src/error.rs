use std::fmt::Display;

use error_stack::{Context, Report};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Unauthorized,
    BadCredential,
    Forbidden,
    InvalidRequest,
    NotFound,
    AlreadyReturned,
    OutOfStock,
    StockUpdateFailed,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Unauthorized => write!(f, "Access denied. No token provided."),
            KernelError::BadCredential => write!(f, "Invalid token."),
            KernelError::Forbidden => write!(f, "Access denied."),
            KernelError::InvalidRequest => write!(f, "Invalid request"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::AlreadyReturned => write!(f, "Movie is already returned."),
            KernelError::OutOfStock => write!(f, "Movie not in stock."),
            KernelError::StockUpdateFailed => write!(f, "Stock reconciliation failed"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

impl KernelError {
    /// Builds a report carrying a message that is safe to show to the client.
    pub fn with_message(self, message: impl Into<String>) -> Report<KernelError> {
        Report::new(self).attach_printable(ErrorMessage::new(message))
    }
}

/// Client facing description of a failure, rendered as the response body.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ErrorMessage(String);

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ErrorMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
