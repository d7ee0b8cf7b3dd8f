use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::header::XAuthToken;
use crate::route::{authenticated_body, credential};
use application::service::{
    CreateGenreService, DeleteGenreService, GetGenreService, UpdateGenreService,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::TypedHeader;

use self::request::{CreateRequest, DeleteRequest, GetAllRequest, GetRequest, Transformer, UpdateRequest};
use self::response::Presenter;

mod request;
mod response;

pub trait GenreRouter {
    fn route_genre(self) -> Self;
}

impl GenreRouter for Router<AppModule> {
    fn route_genre(self) -> Self {
        self.route(
            "/api/genres",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetAllRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|page| async move { module.get_all_genres(page).await })
                        .await
                },
            )
            .post(
                |State(module): State<AppModule>,
                 token: Option<TypedHeader<XAuthToken>>,
                 body: Result<Json<CreateRequest>, JsonRejection>| async move {
                    let credential = credential(token);
                    let req = authenticated_body(&module, credential.as_ref(), body)
                        .map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move {
                            module.create_genre(credential.as_ref(), dto).await
                        })
                        .await
                },
            ),
        )
        .route(
            "/api/genres/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(GetRequest::new(id))?
                        .try_handle(|dto| async move { module.get_genre(dto).await })
                        .await
                },
            )
            .put(
                |State(module): State<AppModule>,
                 token: Option<TypedHeader<XAuthToken>>,
                 Path(id): Path<String>,
                 body: Result<Json<UpdateRequest>, JsonRejection>| async move {
                    let credential = credential(token);
                    let req = authenticated_body(&module, credential.as_ref(), body)
                        .map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .try_intake((id, req))?
                        .handle(|dto| async move {
                            module.update_genre(credential.as_ref(), dto).await
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
                            module.delete_genre(credential.as_ref(), dto).await
                        })
                        .await
                },
            ),
        )
    }
}
