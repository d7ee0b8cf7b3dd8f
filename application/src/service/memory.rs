//! In-memory module for service tests. Transactions share one store and commit as they go.

use std::sync::{Arc, Mutex, MutexGuard};

use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::identity::{DependOnIdentityService, IdentityService};
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnGenreQuery, DependOnMovieQuery,
    DependOnRentalQuery, DependOnUserQuery, GenreQuery, MovieQuery, RentalQuery, UserQuery,
};
use kernel::interface::update::{
    CustomerModifier, DependOnCustomerModifier, DependOnGenreModifier, DependOnMovieModifier,
    DependOnRentalModifier, DependOnUserModifier, GenreModifier, MovieModifier, RentalModifier,
    UserModifier,
};
use kernel::prelude::entity::{
    Credential, Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, DateOut,
    Genre, GenreId, GenreName, Identity, IsAdmin, IsGold, Movie, MovieId, MovieTitle,
    NumberInStock, PasswordDigest, Rental, RentalId, SelectLimit, SelectOffset, User, UserEmail,
    UserId, UserName,
};
use kernel::KernelError;

#[derive(Default)]
struct Store {
    genres: Vec<Genre>,
    movies: Vec<Movie>,
    customers: Vec<Customer>,
    rentals: Vec<Rental>,
    users: Vec<User>,
    stale_rentals: bool,
    fail_restock: bool,
    commit_delay: Option<std::time::Duration>,
    lookup_barrier: Option<Arc<tokio::sync::Barrier>>,
}

fn page<T: Clone>(items: &[T], limit: &SelectLimit, offset: &SelectOffset) -> Vec<T> {
    items
        .iter()
        .skip(*offset.as_ref() as usize)
        .take(*limit.as_ref() as usize)
        .cloned()
        .collect()
}

fn reopened(rental: &Rental) -> Rental {
    Rental::new(
        *rental.id(),
        rental.customer().clone(),
        rental.movie().clone(),
        *rental.date_out(),
        None,
        None,
    )
}

#[derive(Clone, Default)]
pub(crate) struct MemoryDatabase {
    store: Arc<Mutex<Store>>,
}

pub(crate) struct MemoryTransaction {
    store: Arc<Mutex<Store>>,
}

impl MemoryTransaction {
    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        Ok(MemoryTransaction {
            store: Arc::clone(&self.store),
        })
    }
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let delay = self.store().commit_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

/// Tokens look like `token:<uuid>:<is_admin>`, digests like `digest:<raw>`.
#[derive(Clone, Default)]
pub(crate) struct MemoryIdentity;

impl IdentityService for MemoryIdentity {
    fn issue(&self, identity: &Identity) -> error_stack::Result<Credential, KernelError> {
        let subject: &Uuid = identity.subject().as_ref();
        let is_admin: &bool = identity.is_admin().as_ref();
        Ok(Credential::new(format!("token:{subject}:{is_admin}")))
    }

    fn verify(&self, credential: &Credential) -> error_stack::Result<Identity, KernelError> {
        let token: &String = credential.as_ref();
        let invalid = || KernelError::BadCredential.with_message("Invalid token.");
        let mut parts = token.split(':');
        if parts.next() != Some("token") {
            return Err(invalid());
        }
        let subject = parts
            .next()
            .and_then(|subject| Uuid::parse_str(subject).ok())
            .ok_or_else(invalid)?;
        let is_admin = parts
            .next()
            .and_then(|flag| flag.parse::<bool>().ok())
            .ok_or_else(invalid)?;
        Ok(Identity::new(UserId::new(subject), IsAdmin::new(is_admin)))
    }

    fn digest_password(&self, raw: &str) -> error_stack::Result<PasswordDigest, KernelError> {
        Ok(PasswordDigest::new(format!("digest:{raw}")))
    }

    fn verify_password(&self, raw: &str, digest: &PasswordDigest) -> bool {
        let digest: &String = digest.as_ref();
        digest.strip_prefix("digest:") == Some(raw)
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryRepository;

#[derive(Clone, Default)]
pub(crate) struct MemoryModule {
    database: MemoryDatabase,
    repository: MemoryRepository,
    identity: MemoryIdentity,
}

impl MemoryModule {
    fn store(&self) -> MutexGuard<'_, Store> {
        self.database.store.lock().unwrap()
    }

    pub(crate) fn token_for(&self, subject: Uuid, is_admin: bool) -> Credential {
        self.identity
            .issue(&Identity::new(UserId::new(subject), IsAdmin::new(is_admin)))
            .unwrap()
    }

    pub(crate) fn seed_genre(&self, name: &str) -> Genre {
        let genre = Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new(name));
        self.store().genres.push(genre.clone());
        genre
    }

    pub(crate) fn seed_movie(&self, title: &str, stock: i32, rate: i32) -> Movie {
        let genre = self.seed_genre("genre1");
        let movie = Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new(title),
            genre,
            NumberInStock::new(stock),
            DailyRentalRate::new(rate),
        );
        self.store().movies.push(movie.clone());
        movie
    }

    pub(crate) fn seed_customer(&self, name: &str) -> Customer {
        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new(name),
            CustomerPhone::new("12345"),
            IsGold::default(),
        );
        self.store().customers.push(customer.clone());
        customer
    }

    pub(crate) fn seed_rental(
        &self,
        customer: &Customer,
        movie: &Movie,
        date_out: OffsetDateTime,
    ) -> Rental {
        let rental = Rental::checkout(customer, movie, DateOut::new(date_out));
        self.store().rentals.push(rental.clone());
        rental
    }

    pub(crate) fn seed_user(&self, email: &str, password: &str, is_admin: bool) -> User {
        let user = User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new("user1"),
            UserEmail::new(email),
            self.identity.digest_password(password).unwrap(),
            IsAdmin::new(is_admin),
        );
        self.store().users.push(user.clone());
        user
    }

    pub(crate) fn genre(&self, id: Uuid) -> Option<Genre> {
        let id = GenreId::new(id);
        self.store().genres.iter().find(|g| g.id() == &id).cloned()
    }

    pub(crate) fn movie(&self, id: Uuid) -> Movie {
        let id = MovieId::new(id);
        self.store()
            .movies
            .iter()
            .find(|m| m.id() == &id)
            .cloned()
            .expect("movie is seeded")
    }

    pub(crate) fn movies(&self) -> Vec<Movie> {
        self.store().movies.clone()
    }

    pub(crate) fn customer(&self, id: Uuid) -> Option<Customer> {
        let id = CustomerId::new(id);
        self.store().customers.iter().find(|c| c.id() == &id).cloned()
    }

    pub(crate) fn rental(&self, id: Uuid) -> Rental {
        let id = RentalId::new(id);
        self.store()
            .rentals
            .iter()
            .find(|r| r.id() == &id)
            .cloned()
            .expect("rental is seeded")
    }

    pub(crate) fn rentals(&self) -> Vec<Rental> {
        self.store().rentals.clone()
    }

    pub(crate) fn users(&self) -> Vec<User> {
        self.store().users.clone()
    }

    pub(crate) fn remove_movie(&self, id: Uuid) {
        let id = MovieId::new(id);
        self.store().movies.retain(|m| m.id() != &id);
    }

    /// Makes rental lookups answer with the record as it was before it got returned.
    pub(crate) fn serve_stale_rentals(&self) {
        self.store().stale_rentals = true;
    }

    pub(crate) fn fail_restock(&self) {
        self.store().fail_restock = true;
    }

    pub(crate) fn slow_commits(&self, delay: std::time::Duration) {
        self.store().commit_delay = Some(delay);
    }

    /// Rental lookups wait until `parties` of them are in flight.
    pub(crate) fn gather_rental_lookups(&self, parties: usize) {
        self.store().lookup_barrier = Some(Arc::new(tokio::sync::Barrier::new(parties)));
    }
}

impl DependOnDatabaseConnection for MemoryModule {
    type DatabaseConnection = MemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl DependOnIdentityService for MemoryModule {
    type IdentityService = MemoryIdentity;
    fn identity_service(&self) -> &Self::IdentityService {
        &self.identity
    }
}

macro_rules! depend_on_repository {
    ($($depend:ident :: $assoc:ident => $accessor:ident),* $(,)?) => {
        $(
            impl $depend for MemoryModule {
                type $assoc = MemoryRepository;
                fn $accessor(&self) -> &Self::$assoc {
                    &self.repository
                }
            }
        )*
    };
}

depend_on_repository! {
    DependOnGenreQuery::GenreQuery => genre_query,
    DependOnMovieQuery::MovieQuery => movie_query,
    DependOnCustomerQuery::CustomerQuery => customer_query,
    DependOnRentalQuery::RentalQuery => rental_query,
    DependOnUserQuery::UserQuery => user_query,
    DependOnGenreModifier::GenreModifier => genre_modifier,
    DependOnMovieModifier::MovieModifier => movie_modifier,
    DependOnCustomerModifier::CustomerModifier => customer_modifier,
    DependOnRentalModifier::RentalModifier => rental_modifier,
    DependOnUserModifier::UserModifier => user_modifier,
}

#[async_trait::async_trait]
impl GenreQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &GenreId,
    ) -> error_stack::Result<Option<Genre>, KernelError> {
        Ok(con.store().genres.iter().find(|g| g.id() == id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Genre>, KernelError> {
        let mut genres = con.store().genres.clone();
        genres.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(page(&genres, limit, offset))
    }
}

#[async_trait::async_trait]
impl GenreModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        genre: &Genre,
    ) -> error_stack::Result<(), KernelError> {
        con.store().genres.push(genre.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        genre: &Genre,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = con.store();
        if let Some(stored) = store.genres.iter_mut().find(|g| g.id() == genre.id()) {
            *stored = genre.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        genre_id: &GenreId,
    ) -> error_stack::Result<(), KernelError> {
        con.store().genres.retain(|g| g.id() != genre_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl MovieQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        Ok(con.store().movies.iter().find(|m| m.id() == id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Movie>, KernelError> {
        let mut movies = con.store().movies.clone();
        movies.sort_by(|a, b| a.title().as_ref().cmp(b.title().as_ref()));
        Ok(page(&movies, limit, offset))
    }
}

#[async_trait::async_trait]
impl MovieModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        con.store().movies.push(movie.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = con.store();
        if let Some(stored) = store.movies.iter_mut().find(|m| m.id() == movie.id()) {
            *stored = movie.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        con.store().movies.retain(|m| m.id() != movie_id);
        Ok(())
    }

    async fn increment_stock(
        &self,
        con: &mut MemoryTransaction,
        movie_id: &MovieId,
        by: i32,
    ) -> error_stack::Result<bool, KernelError> {
        let mut store = con.store();
        if store.fail_restock {
            return Err(KernelError::Internal.with_message("connection reset"));
        }
        let Some(stored) = store.movies.iter_mut().find(|m| m.id() == movie_id) else {
            return Ok(false);
        };
        let stock = NumberInStock::new(*stored.number_in_stock().as_ref() + by);
        *stored = stored.clone().reconstruct(|m| m.number_in_stock = stock);
        Ok(true)
    }

    async fn decrement_stock(
        &self,
        con: &mut MemoryTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        let mut store = con.store();
        let Some(stored) = store.movies.iter_mut().find(|m| m.id() == movie_id) else {
            return Ok(false);
        };
        if stored.number_in_stock().is_empty() {
            return Ok(false);
        }
        let stock = NumberInStock::new(*stored.number_in_stock().as_ref() - 1);
        *stored = stored.clone().reconstruct(|m| m.number_in_stock = stock);
        Ok(true)
    }
}

#[async_trait::async_trait]
impl CustomerQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        Ok(con.store().customers.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        let mut customers = con.store().customers.clone();
        customers.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(page(&customers, limit, offset))
    }
}

#[async_trait::async_trait]
impl CustomerModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        con.store().customers.push(customer.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = con.store();
        if let Some(stored) = store.customers.iter_mut().find(|c| c.id() == customer.id()) {
            *stored = customer.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        con.store().customers.retain(|c| c.id() != customer_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl RentalQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.store().rentals.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals = con.store().rentals.clone();
        rentals.sort_by(|a, b| b.date_out().as_ref().cmp(a.date_out().as_ref()));
        Ok(page(&rentals, limit, offset))
    }

    async fn find_by_customer_and_movie(
        &self,
        con: &mut MemoryTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let barrier = con.store().lookup_barrier.clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        let store = con.store();
        let found = store
            .rentals
            .iter()
            .rev()
            .find(|r| r.customer().id() == customer_id && r.movie().id() == movie_id);
        Ok(match found {
            Some(rental) if store.stale_rentals => Some(reopened(rental)),
            found => found.cloned(),
        })
    }
}

#[async_trait::async_trait]
impl RentalModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = con.store();
        let duplicate = store.rentals.iter().any(|r| {
            !r.is_returned()
                && r.customer().id() == rental.customer().id()
                && r.movie().id() == rental.movie().id()
        });
        if duplicate {
            return Err(KernelError::Concurrency.with_message("The rental is already open."));
        }
        store.rentals.push(rental.clone());
        Ok(())
    }

    async fn mark_returned(
        &self,
        con: &mut MemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<bool, KernelError> {
        let mut store = con.store();
        match store
            .rentals
            .iter_mut()
            .find(|r| r.id() == rental.id() && !r.is_returned())
        {
            Some(stored) => {
                *stored = rental.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl UserQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.store().users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        con: &mut MemoryTransaction,
        email: &UserEmail,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.store().users.iter().find(|u| u.email() == email).cloned())
    }
}

#[async_trait::async_trait]
impl UserModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = con.store();
        if store.users.iter().any(|u| u.email() == user.email()) {
            return Err(KernelError::Concurrency.with_message("User already registered."));
        }
        store.users.push(user.clone());
        Ok(())
    }
}
