use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::header::XAuthToken;
use crate::route::{authenticated_body, credential};
use application::service::ReturnService;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::TypedHeader;

use self::request::{ReturnRequest, Transformer};
use self::response::Presenter;

mod request;
mod response;

pub trait ReturnRouter {
    fn route_return(self) -> Self;
}

impl ReturnRouter for Router<AppModule> {
    fn route_return(self) -> Self {
        self.route(
            "/api/returns",
            post(
                |State(module): State<AppModule>,
                 token: Option<TypedHeader<XAuthToken>>,
                 body: Result<Json<ReturnRequest>, JsonRejection>| async move {
                    let credential = credential(token);
                    let req = authenticated_body(&module, credential.as_ref(), body)
                        .map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move {
                            module.process_return(credential.as_ref(), dto).await
                        })
                        .await
                },
            ),
        )
    }
}
