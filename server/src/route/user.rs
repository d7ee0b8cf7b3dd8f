use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::header::XAuthToken;
use crate::route::{credential, json_body};
use application::service::{GetUserService, RegisterUserService};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::TypedHeader;

use self::request::{CreateRequest, Transformer};
use self::response::Presenter;

mod request;
mod response;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/api/users",
            post(
                |State(module): State<AppModule>,
                 body: Result<Json<CreateRequest>, JsonRejection>| async move {
                    let req = json_body(body).map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.register_user(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/api/users/me",
            get(
                |State(module): State<AppModule>, token: Option<TypedHeader<XAuthToken>>| async move {
                    let credential = credential(token);
                    Controller::new((), Presenter)
                        .bypass(|| async move { module.get_me(credential.as_ref()).await })
                        .await
                },
            ),
        )
    }
}
