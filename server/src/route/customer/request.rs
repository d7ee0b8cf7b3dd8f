use application::transfer::{
    CreateCustomerDto, DeleteCustomerDto, GetCustomerDto, PageDto, UpdateCustomerDto,
};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use kernel::KernelError;
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::route::path_id;

pub(super) static CUSTOMER_NOT_FOUND: &str = "The customer with the given ID was not found.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    is_gold: bool,
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

impl Intake<CustomerRequest> for Transformer {
    type To = CreateCustomerDto;
    fn emit(&self, input: CustomerRequest) -> Self::To {
        CreateCustomerDto {
            name: input.name,
            phone: input.phone,
            is_gold: input.is_gold,
        }
    }
}

impl TryIntake<(String, CustomerRequest)> for Transformer {
    type To = UpdateCustomerDto;
    fn emit(&self, (id, input): (String, CustomerRequest)) -> error_stack::Result<Self::To, KernelError> {
        Ok(UpdateCustomerDto {
            id: path_id(&id, CUSTOMER_NOT_FOUND)?,
            name: input.name,
            phone: input.phone,
            is_gold: input.is_gold,
        })
    }
}

impl TryIntake<DeleteRequest> for Transformer {
    type To = DeleteCustomerDto;
    fn emit(&self, input: DeleteRequest) -> error_stack::Result<Self::To, KernelError> {
        Ok(DeleteCustomerDto {
            id: path_id(&input.id, CUSTOMER_NOT_FOUND)?,
        })
    }
}

impl TryIntake<GetRequest> for Transformer {
    type To = GetCustomerDto;
    fn emit(&self, input: GetRequest) -> error_stack::Result<Self::To, KernelError> {
        Ok(GetCustomerDto {
            id: path_id(&input.id, CUSTOMER_NOT_FOUND)?,
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
