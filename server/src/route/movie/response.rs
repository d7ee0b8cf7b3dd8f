use application::transfer::{GenreDto, MovieDto};
use axum::Json;
use kernel::KernelError;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::{Exhaust, TryExhaust};
use crate::route::movie::request::MOVIE_NOT_FOUND;

#[derive(Debug, Serialize)]
pub struct MovieGenreResponse {
    id: Uuid,
    name: String,
}

impl From<GenreDto> for MovieGenreResponse {
    fn from(value: GenreDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    id: Uuid,
    title: String,
    genre: MovieGenreResponse,
    number_in_stock: i32,
    daily_rental_rate: i32,
}

impl From<MovieDto> for MovieResponse {
    fn from(value: MovieDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            genre: value.genre.into(),
            number_in_stock: value.number_in_stock,
            daily_rental_rate: value.daily_rental_rate,
        }
    }
}

pub struct Presenter;

impl Exhaust<MovieDto> for Presenter {
    type To = Json<MovieResponse>;
    fn emit(&self, input: MovieDto) -> Self::To {
        Json(input.into())
    }
}

impl Exhaust<Vec<MovieDto>> for Presenter {
    type To = Json<Vec<MovieResponse>>;
    fn emit(&self, input: Vec<MovieDto>) -> Self::To {
        Json(input.into_iter().map(MovieResponse::from).collect())
    }
}

impl TryExhaust<Option<MovieDto>> for Presenter {
    type To = Json<MovieResponse>;
    fn emit(&self, input: Option<MovieDto>) -> error_stack::Result<Self::To, KernelError> {
        input
            .map(|movie| Json(movie.into()))
            .ok_or_else(|| KernelError::NotFound.with_message(MOVIE_NOT_FOUND))
    }
}
