use application::transfer::{RentalCustomerDto, RentalDto, RentalMovieDto};
use axum::Json;
use kernel::KernelError;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::{Exhaust, TryExhaust};
use crate::route::rental::request::RENTAL_NOT_FOUND;

#[derive(Debug, Serialize)]
pub struct RentalCustomerResponse {
    id: Uuid,
    name: String,
    phone: String,
}

impl From<RentalCustomerDto> for RentalCustomerResponse {
    fn from(value: RentalCustomerDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            phone: value.phone,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalMovieResponse {
    id: Uuid,
    title: String,
    daily_rental_rate: i32,
}

impl From<RentalMovieDto> for RentalMovieResponse {
    fn from(value: RentalMovieDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            daily_rental_rate: value.daily_rental_rate,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    id: Uuid,
    customer: RentalCustomerResponse,
    movie: RentalMovieResponse,
    #[serde(with = "time::serde::rfc3339")]
    date_out: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    date_returned: Option<OffsetDateTime>,
    rental_fee: Option<i64>,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            customer: value.customer.into(),
            movie: value.movie.into(),
            date_out: value.date_out,
            date_returned: value.date_returned,
            rental_fee: value.rental_fee,
        }
    }
}

pub struct Presenter;

impl Exhaust<RentalDto> for Presenter {
    type To = Json<RentalResponse>;
    fn emit(&self, input: RentalDto) -> Self::To {
        Json(input.into())
    }
}

impl Exhaust<Vec<RentalDto>> for Presenter {
    type To = Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        Json(input.into_iter().map(RentalResponse::from).collect())
    }
}

impl TryExhaust<Option<RentalDto>> for Presenter {
    type To = Json<RentalResponse>;
    fn emit(&self, input: Option<RentalDto>) -> error_stack::Result<Self::To, KernelError> {
        input
            .map(|rental| Json(rental.into()))
            .ok_or_else(|| KernelError::NotFound.with_message(RENTAL_NOT_FOUND))
    }
}
