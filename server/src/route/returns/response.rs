use application::transfer::ReturnedRentalDto;
use axum::http::header::WARNING;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::controller::Exhaust;
use crate::route::rental::RentalResponse;

static STOCK_WARNING: &str = "199 - \"stock reconciliation failed\"";

/// The closed rental. A return whose restock failed still succeeds, with a `Warning` header.
#[derive(Debug)]
pub struct ReturnResponse {
    rental: RentalResponse,
    stock_reconciled: bool,
}

impl IntoResponse for ReturnResponse {
    fn into_response(self) -> Response {
        let mut response = Json(self.rental).into_response();
        if !self.stock_reconciled {
            response
                .headers_mut()
                .insert(WARNING, HeaderValue::from_static(STOCK_WARNING));
        }
        response
    }
}

pub struct Presenter;

impl Exhaust<ReturnedRentalDto> for Presenter {
    type To = ReturnResponse;
    fn emit(&self, input: ReturnedRentalDto) -> Self::To {
        ReturnResponse {
            rental: input.rental.into(),
            stock_reconciled: input.stock_reconciled,
        }
    }
}
