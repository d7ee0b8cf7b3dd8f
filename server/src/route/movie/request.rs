use application::transfer::{
    CreateMovieDto, DeleteMovieDto, GetMovieDto, PageDto, UpdateMovieDto,
};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use kernel::KernelError;
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::route::path_id;

pub(super) static MOVIE_NOT_FOUND: &str = "The movie with the given ID was not found.";

/// Body shared by create and full replacement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    #[serde(default)]
    title: String,
    genre_id: Option<String>,
    number_in_stock: Option<i32>,
    daily_rental_rate: Option<i32>,
}

struct MovieFields {
    title: String,
    genre_id: Option<String>,
    number_in_stock: i32,
    daily_rental_rate: i32,
}

impl MovieRequest {
    fn into_fields(self) -> error_stack::Result<MovieFields, KernelError> {
        Ok(MovieFields {
            number_in_stock: required("numberInStock", self.number_in_stock)?,
            daily_rental_rate: required("dailyRentalRate", self.daily_rental_rate)?,
            title: self.title,
            genre_id: self.genre_id,
        })
    }
}

fn required(field: &str, value: Option<i32>) -> error_stack::Result<i32, KernelError> {
    value.ok_or_else(|| KernelError::InvalidRequest.with_message(format!("\"{field}\" is required")))
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: String,
}

impl DeleteRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
    #[serde(default)]
    limit: SelectLimit,
    #[serde(default)]
    offset: SelectOffset,
}

#[derive(Debug)]
pub struct GetRequest {
    id: String,
}

impl GetRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl TryIntake<MovieRequest> for Transformer {
    type To = CreateMovieDto;
    fn emit(&self, input: MovieRequest) -> error_stack::Result<Self::To, KernelError> {
        let fields = input.into_fields()?;
        Ok(CreateMovieDto {
            title: fields.title,
            genre_id: fields.genre_id,
            number_in_stock: fields.number_in_stock,
            daily_rental_rate: fields.daily_rental_rate,
        })
    }
}

impl TryIntake<(String, MovieRequest)> for Transformer {
    type To = UpdateMovieDto;
    fn emit(&self, (id, input): (String, MovieRequest)) -> error_stack::Result<Self::To, KernelError> {
        let id = path_id(&id, MOVIE_NOT_FOUND)?;
        let fields = input.into_fields()?;
        Ok(UpdateMovieDto {
            id,
            title: fields.title,
            genre_id: fields.genre_id,
            number_in_stock: fields.number_in_stock,
            daily_rental_rate: fields.daily_rental_rate,
        })
    }
}

impl TryIntake<DeleteRequest> for Transformer {
    type To = DeleteMovieDto;
    fn emit(&self, input: DeleteRequest) -> error_stack::Result<Self::To, KernelError> {
        Ok(DeleteMovieDto {
            id: path_id(&input.id, MOVIE_NOT_FOUND)?,
        })
    }
}

impl TryIntake<GetRequest> for Transformer {
    type To = GetMovieDto;
    fn emit(&self, input: GetRequest) -> error_stack::Result<Self::To, KernelError> {
        Ok(GetMovieDto {
            id: path_id(&input.id, MOVIE_NOT_FOUND)?,
        })
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = PageDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        PageDto {
            limit: input.limit,
            offset: input.offset,
        }
    }
}
