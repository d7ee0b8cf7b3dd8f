use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use kernel::{ErrorMessage, KernelError};
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::Unauthorized => StatusCode::UNAUTHORIZED,
            KernelError::BadCredential => StatusCode::BAD_REQUEST,
            KernelError::Forbidden => StatusCode::FORBIDDEN,
            KernelError::InvalidRequest => StatusCode::BAD_REQUEST,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::AlreadyReturned => StatusCode::BAD_REQUEST,
            KernelError::OutOfStock => StatusCode::BAD_REQUEST,
            KernelError::Concurrency => StatusCode::CONFLICT,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::StockUpdateFailed | KernelError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Attached message if any, the variant's own text otherwise. Server faults never leak
    /// their details.
    fn body(&self) -> String {
        match self.0.current_context() {
            KernelError::StockUpdateFailed | KernelError::Internal => {
                "Something failed.".to_string()
            }
            context => self
                .0
                .downcast_ref::<ErrorMessage>()
                .map(ToString::to_string)
                .unwrap_or_else(|| context.to_string()),
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{}: {}", status, self.0.current_context());
        }
        (status, self.body()).into_response()
    }
}
