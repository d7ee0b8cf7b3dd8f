use application::transfer::ReturnRentalDto;
use serde::Deserialize;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    customer_id: Option<String>,
    movie_id: Option<String>,
}

pub struct Transformer;

impl Intake<ReturnRequest> for Transformer {
    type To = ReturnRentalDto;
    fn emit(&self, input: ReturnRequest) -> Self::To {
        ReturnRentalDto {
            customer_id: input.customer_id,
            movie_id: input.movie_id,
        }
    }
}
