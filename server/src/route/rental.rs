use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::header::XAuthToken;
use crate::route::{authenticated_body, credential};
use application::service::{CheckoutService, GetRentalService};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::TypedHeader;

use self::request::{CheckoutRequest, GetAllRequest, GetRequest, Transformer};
use self::response::Presenter;

pub(crate) use self::response::RentalResponse;

mod request;
mod response;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/api/rentals",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetAllRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|page| async move { module.get_all_rentals(page).await })
                        .await
                },
            )
            .post(
                |State(module): State<AppModule>,
                 token: Option<TypedHeader<XAuthToken>>,
                 body: Result<Json<CheckoutRequest>, JsonRejection>| async move {
                    let credential = credential(token);
                    let req = authenticated_body(&module, credential.as_ref(), body)
                        .map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.checkout(credential.as_ref(), dto).await })
                        .await
                },
            ),
        )
        .route(
            "/api/rentals/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(GetRequest::new(id))?
                        .try_handle(|dto| async move { module.get_rental(dto).await })
                        .await
                },
            ),
        )
    }
}
