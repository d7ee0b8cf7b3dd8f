use axum::http::{HeaderName, HeaderValue};
use axum_extra::headers::{self, Header};
use kernel::prelude::entity::Credential;

pub const X_AUTH_TOKEN: &str = "x-auth-token";

static X_AUTH_TOKEN_NAME: HeaderName = HeaderName::from_static(X_AUTH_TOKEN);

/// Token clients send to identify themselves. An empty value is treated as no header at all.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct XAuthToken(Credential);

impl XAuthToken {
    pub fn new(credential: Credential) -> Self {
        Self(credential)
    }

    pub fn credential(&self) -> &Credential {
        &self.0
    }
}

impl Header for XAuthToken {
    fn name() -> &'static HeaderName {
        &X_AUTH_TOKEN_NAME
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let token = values
            .next()
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(headers::Error::invalid)?;
        Ok(Self(Credential::new(token)))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        let token: &String = self.0.as_ref();
        if let Ok(value) = HeaderValue::from_str(token) {
            values.extend(std::iter::once(value));
        }
    }
}
