use driver::database::{
    PostgresCustomerRepository, PostgresDatabase, PostgresGenreRepository,
    PostgresMovieRepository, PostgresRentalRepository, PostgresUserRepository,
};
use driver::identity::JwtIdentityService;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::identity::DependOnIdentityService;
use kernel::interface::query::{
    DependOnCustomerQuery, DependOnGenreQuery, DependOnMovieQuery, DependOnRentalQuery,
    DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnCustomerModifier, DependOnGenreModifier, DependOnMovieModifier,
    DependOnRentalModifier, DependOnUserModifier,
};
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    identity: JwtIdentityService,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let identity = JwtIdentityService::new()?;
        let pgpool = PostgresDatabase::new().await?;
        pgpool.migrate().await?;

        Ok(Self { pgpool, identity })
    }
}

impl DependOnDatabaseConnection for AppModule {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self.pgpool()
    }
}

impl DependOnIdentityService for AppModule {
    type IdentityService = JwtIdentityService;
    fn identity_service(&self) -> &Self::IdentityService {
        self.identity()
    }
}

macro_rules! depend_on_postgres {
    ($($depend:ident :: $getter:ident => $assoc:ident = $repository:ident),* $(,)?) => {
        $(
            impl $depend for AppModule {
                type $assoc = $repository;
                fn $getter(&self) -> &Self::$assoc {
                    &$repository
                }
            }
        )*
    };
}

depend_on_postgres!(
    DependOnGenreQuery::genre_query => GenreQuery = PostgresGenreRepository,
    DependOnGenreModifier::genre_modifier => GenreModifier = PostgresGenreRepository,
    DependOnMovieQuery::movie_query => MovieQuery = PostgresMovieRepository,
    DependOnMovieModifier::movie_modifier => MovieModifier = PostgresMovieRepository,
    DependOnCustomerQuery::customer_query => CustomerQuery = PostgresCustomerRepository,
    DependOnCustomerModifier::customer_modifier => CustomerModifier = PostgresCustomerRepository,
    DependOnRentalQuery::rental_query => RentalQuery = PostgresRentalRepository,
    DependOnRentalModifier::rental_modifier => RentalModifier = PostgresRentalRepository,
    DependOnUserQuery::user_query => UserQuery = PostgresUserRepository,
    DependOnUserModifier::user_modifier => UserModifier = PostgresUserRepository,
);
