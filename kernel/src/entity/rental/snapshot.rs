use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::{
    Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, Movie, MovieId,
    MovieTitle,
};

/// Copy of the customer taken at checkout. Later edits to the customer do not reach it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct RentalCustomer {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
}

impl RentalCustomer {
    pub fn new(id: CustomerId, name: CustomerName, phone: CustomerPhone) -> Self {
        Self { id, name, phone }
    }
}

impl From<&Customer> for RentalCustomer {
    fn from(customer: &Customer) -> Self {
        Self::new(
            *customer.id(),
            customer.name().clone(),
            customer.phone().clone(),
        )
    }
}

/// Copy of the movie taken at checkout. Fees are always billed with this rate.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
#[serde(rename_all = "camelCase")]
pub struct RentalMovie {
    id: MovieId,
    title: MovieTitle,
    daily_rental_rate: DailyRentalRate,
}

impl RentalMovie {
    pub fn new(id: MovieId, title: MovieTitle, daily_rental_rate: DailyRentalRate) -> Self {
        Self {
            id,
            title,
            daily_rental_rate,
        }
    }
}

impl From<&Movie> for RentalMovie {
    fn from(movie: &Movie) -> Self {
        Self::new(
            *movie.id(),
            movie.title().clone(),
            *movie.daily_rental_rate(),
        )
    }
}
