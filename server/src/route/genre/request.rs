use application::transfer::{
    CreateGenreDto, DeleteGenreDto, GetGenreDto, PageDto, UpdateGenreDto,
};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use kernel::KernelError;
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::route::path_id;

pub(super) static GENRE_NOT_FOUND: &str = "The genre with the given ID was not found.";

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    name: String,
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

// I want to use primitive type(i64) in these fields, but default attribute not supported for literals(https://github.com/serde-rs/serde/issues/368)
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

impl Intake<CreateRequest> for Transformer {
    type To = CreateGenreDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateGenreDto { name: input.name }
    }
}

impl TryIntake<(String, UpdateRequest)> for Transformer {
    type To = UpdateGenreDto;
    fn emit(&self, (id, input): (String, UpdateRequest)) -> error_stack::Result<Self::To, KernelError> {
        Ok(UpdateGenreDto {
            id: path_id(&id, GENRE_NOT_FOUND)?,
            name: input.name,
        })
    }
}

impl TryIntake<DeleteRequest> for Transformer {
    type To = DeleteGenreDto;
    fn emit(&self, input: DeleteRequest) -> error_stack::Result<Self::To, KernelError> {
        Ok(DeleteGenreDto {
            id: path_id(&input.id, GENRE_NOT_FOUND)?,
        })
    }
}

impl TryIntake<GetRequest> for Transformer {
    type To = GetGenreDto;
    fn emit(&self, input: GetRequest) -> error_stack::Result<Self::To, KernelError> {
        Ok(GetGenreDto {
            id: path_id(&input.id, GENRE_NOT_FOUND)?,
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
