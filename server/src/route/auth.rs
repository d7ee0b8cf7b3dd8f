use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::json_body;
use application::service::LoginService;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use self::request::{LoginRequest, Transformer};
use self::response::Presenter;

mod request;
mod response;

pub trait AuthRouter {
    fn route_auth(self) -> Self;
}

impl AuthRouter for Router<AppModule> {
    fn route_auth(self) -> Self {
        self.route(
            "/api/auth",
            post(
                |State(module): State<AppModule>,
                 body: Result<Json<LoginRequest>, JsonRejection>| async move {
                    let req = json_body(body).map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.login(dto).await })
                        .await
                },
            ),
        )
    }
}
