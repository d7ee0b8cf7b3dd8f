use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::identity::DependOnIdentityService;
use kernel::interface::query::{DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{Credential, CustomerId, MovieId};
use kernel::KernelError;

use crate::service::AuthorizeService;
use crate::transfer::{RentalDto, ReturnRentalDto, ReturnedRentalDto};
use crate::validation::require_id;

#[async_trait::async_trait]
pub trait ReturnService:
    'static
    + Sync
    + Send
    + Clone
    + DependOnDatabaseConnection
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnMovieModifier
    + DependOnIdentityService
{
    /// Closes the rental of `movieId` by `customerId` and puts the movie back into stock.
    ///
    /// The rental update is the record of the return. Restocking happens after it committed
    /// and its failure only shows up as `stock_reconciled == false`.
    async fn process_return(
        &self,
        credential: Option<&Credential>,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<ReturnedRentalDto, KernelError> {
        self.authenticate(credential)?;

        let customer_id = CustomerId::new(require_id("customerId", dto.customer_id.as_deref())?);
        let movie_id = MovieId::new(require_id("movieId", dto.movie_id.as_deref())?);

        let mut connection = self.database_connection().transact().await?;
        let rental = self
            .rental_query()
            .find_by_customer_and_movie(&mut connection, &customer_id, &movie_id)
            .await?
            .ok_or_else(|| {
                KernelError::NotFound.with_message(
                    "The rental with the given movieId and customerId was not found.",
                )
            })?;

        let rental = rental.close(OffsetDateTime::now_utc())?;

        // Another request may have closed it between our read and this write.
        if !self
            .rental_modifier()
            .mark_returned(&mut connection, &rental)
            .await?
        {
            connection.roll_back().await?;
            return Err(KernelError::AlreadyReturned.with_message("Movie is already returned."));
        }
        // A commit that started always gets its restock, even if the request is dropped.
        let module = self.clone();
        let task = tokio::spawn(async move {
            connection.commit().await?;
            tracing::info!(
                rental = %rental.id().as_ref(),
                fee = ?rental.rental_fee(),
                "rental returned"
            );
            let stock_reconciled = module.reconcile_stock(rental.movie().id()).await;
            Ok::<_, Report<KernelError>>((rental, stock_reconciled))
        });
        let (rental, stock_reconciled) = task
            .await
            .map_err(|error| Report::new(error).change_context(KernelError::Internal))??;

        Ok(ReturnedRentalDto {
            rental: RentalDto::from(rental),
            stock_reconciled,
        })
    }

    /// Puts the movie back into stock. A failure is logged and reported as `false`.
    async fn reconcile_stock(&self, movie_id: &MovieId) -> bool {
        match self.restock(movie_id).await {
            Ok(()) => true,
            Err(report) => {
                let report = report.change_context(KernelError::StockUpdateFailed);
                tracing::warn!(movie = %movie_id.as_ref(), "{report:?}");
                false
            }
        }
    }

    async fn restock(&self, movie_id: &MovieId) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let restocked = self
            .movie_modifier()
            .increment_stock(&mut connection, movie_id, 1)
            .await?;
        if !restocked {
            connection.roll_back().await?;
            return Err(KernelError::NotFound.with_message("The movie is no longer in the catalog."));
        }
        connection.commit().await
    }
}

impl<T> ReturnService for T where
    T: Clone
        + DependOnDatabaseConnection
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnMovieModifier
        + DependOnIdentityService
{
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::prelude::entity::Credential;
    use kernel::KernelError;

    use crate::service::memory::MemoryModule;
    use crate::service::ReturnService;
    use crate::transfer::ReturnRentalDto;

    struct Fixture {
        module: MemoryModule,
        token: Credential,
        customer_id: Uuid,
        movie_id: Uuid,
        rental_id: Uuid,
    }

    impl Fixture {
        fn checked_out_days_ago(days: i64) -> Self {
            let module = MemoryModule::default();
            let token = module.token_for(Uuid::new_v4(), false);
            let customer = module.seed_customer("customer1");
            let movie = module.seed_movie("title1", 10, 3);
            let rental = module.seed_rental(
                &customer,
                &movie,
                OffsetDateTime::now_utc() - Duration::days(days),
            );
            Self {
                module,
                token,
                customer_id: (*customer.id()).into(),
                movie_id: (*movie.id()).into(),
                rental_id: (*rental.id()).into(),
            }
        }

        fn request(&self) -> ReturnRentalDto {
            ReturnRentalDto {
                customer_id: Some(self.customer_id.to_string()),
                movie_id: Some(self.movie_id.to_string()),
            }
        }

        fn stock(&self) -> i32 {
            *self.module.movie(self.movie_id).number_in_stock().as_ref()
        }
    }

    #[tokio::test]
    async fn missing_credential_is_unauthorized() {
        let fixture = Fixture::checked_out_days_ago(1);
        let report = fixture
            .module
            .process_return(None, fixture.request())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Unauthorized);
    }

    #[tokio::test]
    async fn unverifiable_credential_is_rejected() {
        let fixture = Fixture::checked_out_days_ago(1);
        let token = Credential::new("null");
        let report = fixture
            .module
            .process_return(Some(&token), fixture.request())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::BadCredential);
    }

    #[tokio::test]
    async fn missing_ids_are_invalid_requests() {
        let fixture = Fixture::checked_out_days_ago(1);

        let mut without_movie = fixture.request();
        without_movie.movie_id = Some(String::new());
        let report = fixture
            .module
            .process_return(Some(&fixture.token), without_movie)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidRequest);

        let mut without_customer = fixture.request();
        without_customer.customer_id = None;
        let report = fixture
            .module
            .process_return(Some(&fixture.token), without_customer)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidRequest);
    }

    #[tokio::test]
    async fn unknown_pair_is_not_found_and_changes_nothing() {
        let fixture = Fixture::checked_out_days_ago(3);
        let request = ReturnRentalDto {
            customer_id: Some(Uuid::new_v4().to_string()),
            movie_id: Some(fixture.movie_id.to_string()),
        };
        let report = fixture
            .module
            .process_return(Some(&fixture.token), request)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert_eq!(fixture.stock(), 10);
        assert!(!fixture.module.rental(fixture.rental_id).is_returned());
    }

    #[tokio::test]
    async fn return_records_date_fee_and_restocks() {
        let fixture = Fixture::checked_out_days_ago(7);
        let returned = fixture
            .module
            .process_return(Some(&fixture.token), fixture.request())
            .await
            .unwrap();

        assert!(returned.stock_reconciled);
        assert_eq!(returned.rental.rental_fee, Some(21));
        let date_returned = returned.rental.date_returned.unwrap();
        assert!(OffsetDateTime::now_utc() - date_returned < Duration::seconds(10));

        let stored = fixture.module.rental(fixture.rental_id);
        assert_eq!(stored.rental_fee().as_ref().map(|fee| *fee.as_ref()), Some(21));
        assert_eq!(stored.date_returned().as_ref().map(|date| *date.as_ref()), Some(date_returned));
        assert_eq!(fixture.stock(), 11);
    }

    #[tokio::test]
    async fn same_day_return_costs_nothing() {
        let fixture = Fixture::checked_out_days_ago(0);
        let returned = fixture
            .module
            .process_return(Some(&fixture.token), fixture.request())
            .await
            .unwrap();
        assert_eq!(returned.rental.rental_fee, Some(0));
    }

    #[tokio::test]
    async fn second_return_is_rejected_without_touching_the_fee() {
        let fixture = Fixture::checked_out_days_ago(7);
        fixture
            .module
            .process_return(Some(&fixture.token), fixture.request())
            .await
            .unwrap();
        let first = fixture.module.rental(fixture.rental_id);

        let report = fixture
            .module
            .process_return(Some(&fixture.token), fixture.request())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::AlreadyReturned);
        assert_eq!(fixture.module.rental(fixture.rental_id), first);
        assert_eq!(fixture.stock(), 11);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_returns_have_a_single_winner() {
        let fixture = Fixture::checked_out_days_ago(2);
        // Both requests read the open rental before either writes.
        fixture.module.gather_rental_lookups(2);
        let (left, right) = tokio::join!(
            fixture
                .module
                .process_return(Some(&fixture.token), fixture.request()),
            fixture
                .module
                .process_return(Some(&fixture.token), fixture.request()),
        );

        let outcomes = [left, right];
        let winners = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
        assert_eq!(winners, 1);
        let loser = outcomes.iter().find_map(|outcome| outcome.as_ref().err());
        assert_eq!(
            loser.map(|report| *report.current_context()),
            Some(KernelError::AlreadyReturned)
        );
        assert_eq!(fixture.stock(), 11);
    }

    #[tokio::test]
    async fn losing_the_write_race_is_already_returned() {
        let fixture = Fixture::checked_out_days_ago(4);
        fixture
            .module
            .process_return(Some(&fixture.token), fixture.request())
            .await
            .unwrap();
        let winner = fixture.module.rental(fixture.rental_id);

        // The lookup now serves the rental as it looked before the first return committed.
        fixture.module.serve_stale_rentals();
        let report = fixture
            .module
            .process_return(Some(&fixture.token), fixture.request())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::AlreadyReturned);
        assert_eq!(fixture.module.rental(fixture.rental_id), winner);
        assert_eq!(fixture.stock(), 11);
    }

    #[tokio::test]
    async fn dropped_request_still_restocks_after_commit() {
        let fixture = Fixture::checked_out_days_ago(5);
        fixture.module.slow_commits(std::time::Duration::from_millis(100));

        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            fixture
                .module
                .process_return(Some(&fixture.token), fixture.request()),
        )
        .await;
        assert!(outcome.is_err());

        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        assert!(fixture.module.rental(fixture.rental_id).is_returned());
        assert_eq!(fixture.stock(), 11);
    }

    #[tokio::test]
    async fn failed_restock_keeps_the_return() {
        let fixture = Fixture::checked_out_days_ago(7);
        fixture.module.fail_restock();

        let returned = fixture
            .module
            .process_return(Some(&fixture.token), fixture.request())
            .await
            .unwrap();
        assert!(!returned.stock_reconciled);
        assert_eq!(returned.rental.rental_fee, Some(21));
        assert!(fixture.module.rental(fixture.rental_id).is_returned());
        assert_eq!(fixture.stock(), 10);
    }

    #[tokio::test]
    async fn movie_gone_from_catalog_keeps_the_return() {
        let fixture = Fixture::checked_out_days_ago(1);
        fixture.module.remove_movie(fixture.movie_id);

        let returned = fixture
            .module
            .process_return(Some(&fixture.token), fixture.request())
            .await
            .unwrap();
        assert!(!returned.stock_reconciled);
        assert!(fixture.module.rental(fixture.rental_id).is_returned());
    }
}
