use crate::database::{DependOnDatabaseConnection, Transaction, TransactionOf};
use crate::entity::Rental;
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;
    /// Stores the return date and fee of a closed rental, but only while the stored record is
    /// still open. `true` means this call performed the transition.
    async fn mark_returned(
        &self,
        con: &mut Self::Transaction,
        rental: &Rental,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnRentalModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalModifier: RentalModifier<Transaction = TransactionOf<Self>>;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
