use application::transfer::CustomerDto;
use axum::Json;
use kernel::KernelError;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::{Exhaust, TryExhaust};
use crate::route::customer::request::CUSTOMER_NOT_FOUND;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    id: Uuid,
    name: String,
    phone: String,
    is_gold: bool,
}

impl From<CustomerDto> for CustomerResponse {
    fn from(value: CustomerDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            phone: value.phone,
            is_gold: value.is_gold,
        }
    }
}

pub struct Presenter;

impl Exhaust<CustomerDto> for Presenter {
    type To = Json<CustomerResponse>;
    fn emit(&self, input: CustomerDto) -> Self::To {
        Json(input.into())
    }
}

impl Exhaust<Vec<CustomerDto>> for Presenter {
    type To = Json<Vec<CustomerResponse>>;
    fn emit(&self, input: Vec<CustomerDto>) -> Self::To {
        Json(input.into_iter().map(CustomerResponse::from).collect())
    }
}

impl TryExhaust<Option<CustomerDto>> for Presenter {
    type To = Json<CustomerResponse>;
    fn emit(&self, input: Option<CustomerDto>) -> error_stack::Result<Self::To, KernelError> {
        input
            .map(|customer| Json(customer.into()))
            .ok_or_else(|| KernelError::NotFound.with_message(CUSTOMER_NOT_FOUND))
    }
}
