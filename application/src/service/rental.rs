use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::identity::DependOnIdentityService;
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnMovieQuery, DependOnRentalQuery, MovieQuery,
    RentalQuery,
};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{Credential, CustomerId, DateOut, MovieId, Rental, RentalId};
use kernel::KernelError;

use crate::service::AuthorizeService;
use crate::transfer::{CheckoutDto, GetRentalDto, PageDto, RentalDto};
use crate::validation::require_id;

#[async_trait::async_trait]
pub trait GetRentalService: 'static + Sync + Send + DependOnRentalQuery {
    async fn get_rental(&self, dto: GetRentalDto) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let rental = self
            .rental_query()
            .find_by_id(&mut connection, &RentalId::new(dto.id))
            .await?;
        Ok(rental.map(RentalDto::from))
    }

    async fn get_all_rentals(&self, page: PageDto) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let rentals = self
            .rental_query()
            .find_all(&mut connection, &page.limit, &page.offset)
            .await?;
        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }
}

impl<T> GetRentalService for T where T: DependOnRentalQuery {}

#[async_trait::async_trait]
pub trait CheckoutService:
    'static
    + Sync
    + Send
    + DependOnCustomerQuery
    + DependOnMovieQuery
    + DependOnRentalQuery
    + DependOnMovieModifier
    + DependOnRentalModifier
    + DependOnIdentityService
{
    /// Opens a rental and takes one copy out of stock, both in a single transaction.
    async fn checkout(
        &self,
        credential: Option<&Credential>,
        dto: CheckoutDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        self.authenticate(credential)?;

        let customer_id = CustomerId::new(require_id("customerId", dto.customer_id.as_deref())?);
        let movie_id = MovieId::new(require_id("movieId", dto.movie_id.as_deref())?);

        let mut connection = self.database_connection().transact().await?;
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &customer_id)
            .await?
            .ok_or_else(|| KernelError::InvalidRequest.with_message("Invalid customer."))?;
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &movie_id)
            .await?
            .ok_or_else(|| KernelError::InvalidRequest.with_message("Invalid movie."))?;

        let open = self
            .rental_query()
            .find_by_customer_and_movie(&mut connection, &customer_id, &movie_id)
            .await?
            .is_some_and(|rental| !rental.is_returned());
        if open {
            return Err(KernelError::InvalidRequest
                .with_message("The customer already has this movie rented."));
        }

        let out_of_stock = || KernelError::OutOfStock.with_message("Movie not in stock.");
        if movie.number_in_stock().is_empty() {
            return Err(out_of_stock());
        }
        if !self
            .movie_modifier()
            .decrement_stock(&mut connection, &movie_id)
            .await?
        {
            connection.roll_back().await?;
            return Err(out_of_stock());
        }

        let rental = Rental::checkout(&customer, &movie, DateOut::new(OffsetDateTime::now_utc()));
        self.rental_modifier()
            .create(&mut connection, &rental)
            .await?;
        connection.commit().await?;

        tracing::info!(rental = %rental.id().as_ref(), "rental opened");
        Ok(rental.into())
    }
}

impl<T> CheckoutService for T where
    T: DependOnCustomerQuery
        + DependOnMovieQuery
        + DependOnRentalQuery
        + DependOnMovieModifier
        + DependOnRentalModifier
        + DependOnIdentityService
{
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::prelude::entity::{Customer, Movie};
    use kernel::KernelError;

    use crate::service::memory::MemoryModule;
    use crate::service::{CheckoutService, GetRentalService, ReturnService};
    use crate::transfer::{CheckoutDto, GetRentalDto, PageDto, ReturnRentalDto};

    fn checkout_dto(customer: &Customer, movie: &Movie) -> CheckoutDto {
        CheckoutDto {
            customer_id: Some(Uuid::from(*customer.id()).to_string()),
            movie_id: Some(Uuid::from(*movie.id()).to_string()),
        }
    }

    #[tokio::test]
    async fn checkout_snapshots_and_decrements_stock() {
        let module = MemoryModule::default();
        let token = module.token_for(Uuid::new_v4(), false);
        let customer = module.seed_customer("customer1");
        let movie = module.seed_movie("title1", 2, 3);

        let rental = module
            .checkout(Some(&token), checkout_dto(&customer, &movie))
            .await
            .unwrap();
        assert_eq!(rental.customer.name, "customer1");
        assert_eq!(rental.movie.daily_rental_rate, 3);
        assert_eq!(rental.date_returned, None);
        assert_eq!(rental.rental_fee, None);
        assert!(OffsetDateTime::now_utc() - rental.date_out < Duration::seconds(10));

        let stock = *module
            .movie((*movie.id()).into())
            .number_in_stock()
            .as_ref();
        assert_eq!(stock, 1);

        let found = module.get_rental(GetRentalDto { id: rental.id }).await.unwrap();
        assert_eq!(found, Some(rental));
    }

    #[tokio::test]
    async fn empty_stock_opens_nothing() {
        let module = MemoryModule::default();
        let token = module.token_for(Uuid::new_v4(), false);
        let customer = module.seed_customer("customer1");
        let movie = module.seed_movie("title1", 0, 3);

        let report = module
            .checkout(Some(&token), checkout_dto(&customer, &movie))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::OutOfStock);
        assert!(module.rentals().is_empty());
    }

    #[tokio::test]
    async fn unknown_customer_is_invalid() {
        let module = MemoryModule::default();
        let token = module.token_for(Uuid::new_v4(), false);
        let movie = module.seed_movie("title1", 1, 3);

        let report = module
            .checkout(
                Some(&token),
                CheckoutDto {
                    customer_id: Some(Uuid::new_v4().to_string()),
                    movie_id: Some(Uuid::from(*movie.id()).to_string()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidRequest);
        assert_eq!(*module.movie((*movie.id()).into()).number_in_stock().as_ref(), 1);
    }

    #[tokio::test]
    async fn open_rental_blocks_a_second_checkout_until_returned() {
        let module = MemoryModule::default();
        let token = module.token_for(Uuid::new_v4(), false);
        let customer = module.seed_customer("customer1");
        let movie = module.seed_movie("title1", 5, 3);

        module
            .checkout(Some(&token), checkout_dto(&customer, &movie))
            .await
            .unwrap();
        let report = module
            .checkout(Some(&token), checkout_dto(&customer, &movie))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidRequest);

        module
            .process_return(
                Some(&token),
                ReturnRentalDto {
                    customer_id: Some(Uuid::from(*customer.id()).to_string()),
                    movie_id: Some(Uuid::from(*movie.id()).to_string()),
                },
            )
            .await
            .unwrap();
        module
            .checkout(Some(&token), checkout_dto(&customer, &movie))
            .await
            .unwrap();
        assert_eq!(module.rentals().len(), 2);
    }

    #[tokio::test]
    async fn rentals_are_listed_newest_first() {
        let module = MemoryModule::default();
        let customer = module.seed_customer("customer1");
        let movie = module.seed_movie("title1", 5, 3);
        let now = OffsetDateTime::now_utc();
        let older = module.seed_rental(&customer, &movie, now - Duration::days(3));
        let newer = module.seed_rental(&customer, &movie, now - Duration::days(1));

        let ids = module
            .get_all_rentals(PageDto::default())
            .await
            .unwrap()
            .into_iter()
            .map(|rental| rental.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![Uuid::from(*newer.id()), Uuid::from(*older.id())]);
    }
}
