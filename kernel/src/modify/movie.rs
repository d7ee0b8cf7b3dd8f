use crate::database::{DependOnDatabaseConnection, Transaction, TransactionOf};
use crate::entity::{Movie, MovieId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError>;
    /// Returns `false` when the movie is no longer in the catalog.
    async fn increment_stock(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
        by: i32,
    ) -> error_stack::Result<bool, KernelError>;
    /// Takes one copy out of stock. Returns `false` when none was left.
    async fn decrement_stock(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnMovieModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type MovieModifier: MovieModifier<Transaction = TransactionOf<Self>>;
    fn movie_modifier(&self) -> &Self::MovieModifier;
}
