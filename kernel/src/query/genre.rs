use crate::database::{DependOnDatabaseConnection, Transaction, TransactionOf};
use crate::entity::{Genre, GenreId, SelectLimit, SelectOffset};
use crate::KernelError;

#[async_trait::async_trait]
pub trait GenreQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &GenreId,
    ) -> error_stack::Result<Option<Genre>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Genre>, KernelError>;
}

pub trait DependOnGenreQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type GenreQuery: GenreQuery<Transaction = TransactionOf<Self>>;
    fn genre_query(&self) -> &Self::GenreQuery;
}
