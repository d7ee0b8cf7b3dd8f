use application::transfer::GenreDto;
use axum::Json;
use kernel::KernelError;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::{Exhaust, TryExhaust};
use crate::route::genre::request::GENRE_NOT_FOUND;

#[derive(Debug, Serialize)]
pub struct GenreResponse {
    id: Uuid,
    name: String,
}

impl From<GenreDto> for GenreResponse {
    fn from(value: GenreDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

pub struct Presenter;

impl Exhaust<GenreDto> for Presenter {
    type To = Json<GenreResponse>;
    fn emit(&self, input: GenreDto) -> Self::To {
        Json(input.into())
    }
}

impl Exhaust<Vec<GenreDto>> for Presenter {
    type To = Json<Vec<GenreResponse>>;
    fn emit(&self, input: Vec<GenreDto>) -> Self::To {
        Json(input.into_iter().map(GenreResponse::from).collect())
    }
}

impl TryExhaust<Option<GenreDto>> for Presenter {
    type To = Json<GenreResponse>;
    fn emit(&self, input: Option<GenreDto>) -> error_stack::Result<Self::To, KernelError> {
        input
            .map(|genre| Json(genre.into()))
            .ok_or_else(|| KernelError::NotFound.with_message(GENRE_NOT_FOUND))
    }
}
