use kernel::KernelError;

use crate::error::ConvertError;

pub mod database;
pub mod error;
pub mod identity;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .convert_error()
        .map_err(|report| report.attach_printable(format!("missing environment variable {key}")))
}

/// Optional variable parsed as `T`, `default` when unset.
pub(crate) fn env_or<T>(key: &str, default: T) -> error_stack::Result<T, KernelError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match dotenvy::var(key) {
        Ok(value) => value.parse().map_err(|error: T::Err| {
            error_stack::Report::new(KernelError::Internal)
                .attach_printable(format!("invalid {key}: {error}"))
        }),
        Err(_) => Ok(default),
    }
}
