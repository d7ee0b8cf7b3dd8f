use crate::database::{DependOnDatabaseConnection, Transaction, TransactionOf};
use crate::entity::{CustomerId, MovieId, Rental, RentalId, SelectLimit, SelectOffset};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
    /// Newest `dateOut` first.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
    /// Open or closed. When the pair was rented more than once the most recently created
    /// rental wins. Absence is `Ok(None)`.
    async fn find_by_customer_and_movie(
        &self,
        con: &mut Self::Transaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
}

pub trait DependOnRentalQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalQuery: RentalQuery<Transaction = TransactionOf<Self>>;
    fn rental_query(&self) -> &Self::RentalQuery;
}
