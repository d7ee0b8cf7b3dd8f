use application::transfer::{CheckoutDto, GetRentalDto, PageDto};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use kernel::KernelError;
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::route::path_id;

pub(super) static RENTAL_NOT_FOUND: &str = "The rental with the given ID was not found.";

/// Ids are kept as raw strings so a malformed one gets the same answer as a missing one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    customer_id: Option<String>,
    movie_id: Option<String>,
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

impl Intake<CheckoutRequest> for Transformer {
    type To = CheckoutDto;
    fn emit(&self, input: CheckoutRequest) -> Self::To {
        CheckoutDto {
            customer_id: input.customer_id,
            movie_id: input.movie_id,
        }
    }
}

impl TryIntake<GetRequest> for Transformer {
    type To = GetRentalDto;
    fn emit(&self, input: GetRequest) -> error_stack::Result<Self::To, KernelError> {
        Ok(GetRentalDto {
            id: path_id(&input.id, RENTAL_NOT_FOUND)?,
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
