use error_stack::Report;
use sqlx::migrate::MigrateError;

use kernel::{ErrorMessage, KernelError};

/// Lifts library errors into a [`KernelError`] report at the driver boundary.
pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                sqlx::Error::PoolTimedOut => KernelError::Timeout,
                sqlx::Error::Database(database) if database.is_unique_violation() => {
                    KernelError::Concurrency
                }
                _ => KernelError::Internal,
            };
            let report = Report::from(error).change_context(context);
            match context {
                KernelError::Concurrency => report.attach_printable(ErrorMessage::new(
                    "The record was changed by another request.",
                )),
                _ => report,
            }
        })
    }
}

impl<T> ConvertError for Result<T, MigrateError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}

impl<T> ConvertError for Result<T, dotenvy::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}
