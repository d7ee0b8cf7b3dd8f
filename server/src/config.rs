use std::time::Duration;

use axum::http::{HeaderName, Method};
use error_stack::Report;
use kernel::KernelError;
use tower_http::cors::{Any, CorsLayer};

use crate::header::X_AUTH_TOKEN;

static PORT: &str = "PORT";
static APP_ENV: &str = "APP_ENV";
static REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

/// Process level settings, read once at startup.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub production: bool,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            production: false,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let default = Self::default();
        let port = match lookup(PORT) {
            Some(port) => parse(PORT, &port)?,
            None => default.port,
        };
        let request_timeout = match lookup(REQUEST_TIMEOUT_SECS) {
            Some(secs) => Duration::from_secs(parse(REQUEST_TIMEOUT_SECS, &secs)?),
            None => default.request_timeout,
        };
        let production = lookup(APP_ENV).is_some_and(|env| env.eq_ignore_ascii_case("production"));
        Ok(Self {
            port,
            production,
            request_timeout,
        })
    }

    /// Outside production any origin may call the api and read the issued token header.
    pub fn cors(&self) -> Option<CorsLayer> {
        if self.production {
            return None;
        }
        Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    HeaderName::from_static(X_AUTH_TOKEN),
                ])
                .expose_headers([HeaderName::from_static(X_AUTH_TOKEN)]),
        )
    }
}

fn parse<T>(key: &str, value: &str) -> error_stack::Result<T, KernelError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|error: T::Err| {
        Report::new(KernelError::Internal).attach_printable(format!("invalid {key}: {error}"))
    })
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::time::Duration;

    use kernel::KernelError;

    use super::AppConfig;

    fn config(vars: &[(&str, &str)]) -> error_stack::Result<AppConfig, KernelError> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.cors().is_some());
    }

    #[test]
    fn production_disables_cors() {
        let config = config(&[("APP_ENV", "production"), ("PORT", "8080")]).unwrap();
        assert!(config.production);
        assert_eq!(config.port, 8080);
        assert!(config.cors().is_none());
    }

    #[test]
    fn timeout_is_read_in_seconds() {
        let config = config(&[("REQUEST_TIMEOUT_SECS", "5")]).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn malformed_port_fails_startup() {
        let report = config(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
