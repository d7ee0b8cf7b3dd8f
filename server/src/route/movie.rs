use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::header::XAuthToken;
use crate::route::{authenticated_body, credential};
use application::service::{
    CreateMovieService, DeleteMovieService, GetMovieService, UpdateMovieService,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::TypedHeader;

use self::request::{DeleteRequest, GetAllRequest, GetRequest, MovieRequest, Transformer};
use self::response::Presenter;

mod request;
mod response;

pub trait MovieRouter {
    fn route_movie(self) -> Self;
}

impl MovieRouter for Router<AppModule> {
    fn route_movie(self) -> Self {
        self.route(
            "/api/movies",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetAllRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|page| async move { module.get_all_movies(page).await })
                        .await
                },
            )
            .post(
                |State(module): State<AppModule>,
                 token: Option<TypedHeader<XAuthToken>>,
                 body: Result<Json<MovieRequest>, JsonRejection>| async move {
                    let credential = credential(token);
                    let req = authenticated_body(&module, credential.as_ref(), body)
                        .map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)?
                        .handle(|dto| async move {
                            module.create_movie(credential.as_ref(), dto).await
                        })
                        .await
                },
            ),
        )
        .route(
            "/api/movies/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(GetRequest::new(id))?
                        .try_handle(|dto| async move { module.get_movie(dto).await })
                        .await
                },
            )
            .put(
                |State(module): State<AppModule>,
                 token: Option<TypedHeader<XAuthToken>>,
                 Path(id): Path<String>,
                 body: Result<Json<MovieRequest>, JsonRejection>| async move {
                    let credential = credential(token);
                    let req = authenticated_body(&module, credential.as_ref(), body)
                        .map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .try_intake((id, req))?
                        .handle(|dto| async move {
                            module.update_movie(credential.as_ref(), dto).await
                        })
                        .await
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 token: Option<TypedHeader<XAuthToken>>,
                 Path(id): Path<String>| async move {
                    let credential = credential(token);
                    Controller::new(Transformer, Presenter)
                        .try_intake(DeleteRequest::new(id))?
                        .handle(|dto| async move {
                            module.delete_movie(credential.as_ref(), dto).await
                        })
                        .await
                },
            ),
        )
    }
}
