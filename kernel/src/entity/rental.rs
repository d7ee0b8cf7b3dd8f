mod date_out;
mod date_returned;
mod fee;
mod id;
mod snapshot;

pub use self::{date_out::*, date_returned::*, fee::*, id::*, snapshot::*};
use destructure::Destructure;
use time::OffsetDateTime;
use uuid::Uuid;
use vodca::References;

use crate::entity::{Customer, Movie};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rental {
    id: RentalId,
    customer: RentalCustomer,
    movie: RentalMovie,
    date_out: DateOut,
    date_returned: Option<DateReturned>,
    rental_fee: Option<RentalFee>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        customer: RentalCustomer,
        movie: RentalMovie,
        date_out: DateOut,
        date_returned: Option<DateReturned>,
        rental_fee: Option<RentalFee>,
    ) -> Self {
        Self {
            id,
            customer,
            movie,
            date_out,
            date_returned,
            rental_fee,
        }
    }

    /// Opens a new rental holding snapshots of both parties.
    pub fn checkout(customer: &Customer, movie: &Movie, date_out: DateOut) -> Self {
        Self::new(
            RentalId::new(Uuid::new_v4()),
            RentalCustomer::from(customer),
            RentalMovie::from(movie),
            date_out,
            None,
            None,
        )
    }

    pub fn is_returned(&self) -> bool {
        self.date_returned.is_some()
    }

    /// Closes the rental at `now`, billing the snapshot rate for every whole day it was out.
    pub fn close(self, now: OffsetDateTime) -> error_stack::Result<Self, KernelError> {
        if self.is_returned() {
            return Err(KernelError::AlreadyReturned.with_message("Movie is already returned."));
        }
        let elapsed = now - *self.date_out.as_ref();
        let fee = RentalFee::calculate(self.movie.daily_rental_rate(), elapsed);
        Ok(Self {
            date_returned: Some(DateReturned::new(now)),
            rental_fee: Some(fee),
            ..self
        })
    }
}
