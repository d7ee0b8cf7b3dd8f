use application::service::AuthorizeService;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use axum_extra::TypedHeader;
use error_stack::Report;
use kernel::prelude::entity::Credential;
use kernel::{ErrorMessage, KernelError};
use uuid::Uuid;

use crate::handler::AppModule;
use crate::header::XAuthToken;

pub use self::{
    auth::*, customer::*, genre::*, movie::*, rental::*, returns::*, user::*,
};

mod auth;
mod customer;
mod genre;
mod movie;
mod rental;
mod returns;
mod user;

pub(crate) fn credential(header: Option<TypedHeader<XAuthToken>>) -> Option<Credential> {
    header.map(|TypedHeader(token)| token.credential().clone())
}

/// A body axum could not read is an invalid request like any other, not a 415 or 422.
pub(crate) fn json_body<T>(
    body: Result<Json<T>, JsonRejection>,
) -> error_stack::Result<T, KernelError> {
    body.map(|Json(body)| body).map_err(|rejection| {
        let message = rejection.body_text();
        Report::from(rejection)
            .change_context(KernelError::InvalidRequest)
            .attach_printable(ErrorMessage::new(message))
    })
}

/// Caller first, body second: a request without a token is `Unauthorized` whatever it carries.
pub(crate) fn authenticated_body<T>(
    module: &AppModule,
    credential: Option<&Credential>,
    body: Result<Json<T>, JsonRejection>,
) -> error_stack::Result<T, KernelError> {
    module.authenticate(credential)?;
    json_body(body)
}

/// A path segment that is not an id cannot name an existing record.
pub(crate) fn path_id(raw: &str, not_found: &'static str) -> error_stack::Result<Uuid, KernelError> {
    Uuid::parse_str(raw).map_err(|e| {
        Report::from(e)
            .change_context(KernelError::NotFound)
            .attach_printable(ErrorMessage::new(not_found))
    })
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::extract::rejection::JsonRejection;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};
    use axum::Json;
    use kernel::{ErrorMessage, KernelError};
    use serde::Deserialize;
    use uuid::Uuid;

    use super::{json_body, path_id};

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Pair {
        customer_id: Option<String>,
        movie_id: Option<String>,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Json<Pair>, JsonRejection> {
        let mut request = Request::builder().method("POST").uri("/api/returns");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(Body::from(body.to_string())).unwrap();
        Json::<Pair>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn numeric_id_is_an_invalid_request() {
        let body = extract(
            Some("application/json"),
            r#"{"customerId":123,"movieId":"8f1f8b1e-52ad-4b7a-a26f-3c1f6cf1f3a5"}"#,
        )
        .await;
        let report = json_body(body).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidRequest);
        let message = report.downcast_ref::<ErrorMessage>().map(AsRef::as_ref);
        assert!(message.is_some_and(|message| message.contains("customerId")));
    }

    #[tokio::test]
    async fn missing_content_type_is_an_invalid_request() {
        let report = json_body(extract(None, "{}").await).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidRequest);

        let report = json_body(extract(Some("application/json"), "{").await).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidRequest);
    }

    #[tokio::test]
    async fn readable_body_passes_through() {
        let pair = json_body(extract(Some("application/json"), r#"{"movieId":"a"}"#).await).unwrap();
        assert!(pair.customer_id.is_none());
        assert_eq!(pair.movie_id.as_deref(), Some("a"));
    }

    #[test]
    fn malformed_path_id_is_not_found() {
        let report = path_id("1234", "The genre with the given ID was not found.").unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert_eq!(
            report.downcast_ref::<ErrorMessage>().map(AsRef::as_ref),
            Some("The genre with the given ID was not found.")
        );

        let id = Uuid::new_v4();
        assert_eq!(path_id(&id.to_string(), "").unwrap(), id);
    }
}
