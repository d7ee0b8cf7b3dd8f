use kernel::prelude::entity::{
    DestructRental, DestructRentalCustomer, DestructRentalMovie, Rental, RentalCustomer,
    RentalMovie,
};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalCustomerDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

impl From<RentalCustomer> for RentalCustomerDto {
    fn from(value: RentalCustomer) -> Self {
        let DestructRentalCustomer { id, name, phone } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalMovieDto {
    pub id: Uuid,
    pub title: String,
    pub daily_rental_rate: i32,
}

impl From<RentalMovie> for RentalMovieDto {
    fn from(value: RentalMovie) -> Self {
        let DestructRentalMovie {
            id,
            title,
            daily_rental_rate,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            daily_rental_rate: daily_rental_rate.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDto {
    pub id: Uuid,
    pub customer: RentalCustomerDto,
    pub movie: RentalMovieDto,
    pub date_out: OffsetDateTime,
    pub date_returned: Option<OffsetDateTime>,
    pub rental_fee: Option<i64>,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            customer,
            movie,
            date_out,
            date_returned,
            rental_fee,
        } = value.into_destruct();
        Self {
            id: id.into(),
            customer: customer.into(),
            movie: movie.into(),
            date_out: date_out.into(),
            date_returned: date_returned.map(Into::into),
            rental_fee: rental_fee.map(Into::into),
        }
    }
}

/// Outcome of a return. The return itself always committed; `stock_reconciled` tells whether
/// the movie made it back into stock as well.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReturnedRentalDto {
    pub rental: RentalDto,
    pub stock_reconciled: bool,
}

pub struct GetRentalDto {
    pub id: Uuid,
}

pub struct CheckoutDto {
    pub customer_id: Option<String>,
    pub movie_id: Option<String>,
}

pub struct ReturnRentalDto {
    pub customer_id: Option<String>,
    pub movie_id: Option<String>,
}
