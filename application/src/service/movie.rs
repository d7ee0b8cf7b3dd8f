use uuid::Uuid;

use kernel::interface::database::{
    DatabaseConnection, DependOnDatabaseConnection, Transaction, TransactionOf,
};
use kernel::interface::identity::DependOnIdentityService;
use kernel::interface::query::{DependOnGenreQuery, DependOnMovieQuery, GenreQuery, MovieQuery};
use kernel::interface::update::{DependOnMovieModifier, MovieModifier};
use kernel::prelude::entity::{
    Credential, DailyRentalRate, Genre, GenreId, Movie, MovieId, MovieTitle, NumberInStock,
};
use kernel::KernelError;

use crate::service::AuthorizeService;
use crate::transfer::{CreateMovieDto, DeleteMovieDto, GetMovieDto, MovieDto, PageDto, UpdateMovieDto};
use crate::validation::{require_id, require_length, require_range};

fn movie_not_found() -> error_stack::Report<KernelError> {
    KernelError::NotFound.with_message("The movie with the given ID was not found.")
}

fn validate(title: &str, number_in_stock: i32, daily_rental_rate: i32) -> error_stack::Result<(), KernelError> {
    require_length("title", title, 5, 255)?;
    require_range("numberInStock", number_in_stock, 0, 255)?;
    require_range("dailyRentalRate", daily_rental_rate, 0, 255)
}

/// Resolves the genre a write refers to. Unknown genres are a client mistake, not a 404.
async fn resolve_genre<T>(
    module: &T,
    connection: &mut TransactionOf<T>,
    genre_id: Option<&str>,
) -> error_stack::Result<Genre, KernelError>
where
    T: ?Sized + DependOnGenreQuery,
{
    let genre_id = GenreId::new(require_id("genreId", genre_id)?);
    module
        .genre_query()
        .find_by_id(connection, &genre_id)
        .await?
        .ok_or_else(|| KernelError::InvalidRequest.with_message("Invalid genre."))
}

#[async_trait::async_trait]
pub trait GetMovieService: 'static + Sync + Send + DependOnMovieQuery {
    async fn get_movie(&self, dto: GetMovieDto) -> error_stack::Result<Option<MovieDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &MovieId::new(dto.id))
            .await?;
        Ok(movie.map(MovieDto::from))
    }

    async fn get_all_movies(&self, page: PageDto) -> error_stack::Result<Vec<MovieDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let movies = self
            .movie_query()
            .find_all(&mut connection, &page.limit, &page.offset)
            .await?;
        Ok(movies.into_iter().map(MovieDto::from).collect())
    }
}

impl<T> GetMovieService for T where T: DependOnMovieQuery {}

#[async_trait::async_trait]
pub trait CreateMovieService:
    'static + Sync + Send + DependOnGenreQuery + DependOnMovieModifier + DependOnIdentityService
{
    async fn create_movie(
        &self,
        credential: Option<&Credential>,
        dto: CreateMovieDto,
    ) -> error_stack::Result<MovieDto, KernelError> {
        self.authenticate(credential)?;
        validate(&dto.title, dto.number_in_stock, dto.daily_rental_rate)?;

        let mut connection = self.database_connection().transact().await?;
        let genre = resolve_genre(self, &mut connection, dto.genre_id.as_deref()).await?;

        let movie = Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new(dto.title),
            genre,
            NumberInStock::new(dto.number_in_stock),
            DailyRentalRate::new(dto.daily_rental_rate),
        );
        self.movie_modifier().create(&mut connection, &movie).await?;
        connection.commit().await?;

        Ok(movie.into())
    }
}

impl<T> CreateMovieService for T where
    T: DependOnGenreQuery + DependOnMovieModifier + DependOnIdentityService
{
}

#[async_trait::async_trait]
pub trait UpdateMovieService:
    'static
    + Sync
    + Send
    + DependOnGenreQuery
    + DependOnMovieQuery
    + DependOnMovieModifier
    + DependOnIdentityService
{
    async fn update_movie(
        &self,
        credential: Option<&Credential>,
        dto: UpdateMovieDto,
    ) -> error_stack::Result<MovieDto, KernelError> {
        self.authenticate(credential)?;
        validate(&dto.title, dto.number_in_stock, dto.daily_rental_rate)?;

        let mut connection = self.database_connection().transact().await?;
        let genre = resolve_genre(self, &mut connection, dto.genre_id.as_deref()).await?;

        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &MovieId::new(dto.id))
            .await?
            .ok_or_else(movie_not_found)?;
        let movie = Movie::new(
            *movie.id(),
            MovieTitle::new(dto.title),
            genre,
            NumberInStock::new(dto.number_in_stock),
            DailyRentalRate::new(dto.daily_rental_rate),
        );
        self.movie_modifier().update(&mut connection, &movie).await?;
        connection.commit().await?;

        Ok(movie.into())
    }
}

impl<T> UpdateMovieService for T where
    T: DependOnGenreQuery + DependOnMovieQuery + DependOnMovieModifier + DependOnIdentityService
{
}

#[async_trait::async_trait]
pub trait DeleteMovieService:
    'static + Sync + Send + DependOnMovieQuery + DependOnMovieModifier + DependOnIdentityService
{
    async fn delete_movie(
        &self,
        credential: Option<&Credential>,
        dto: DeleteMovieDto,
    ) -> error_stack::Result<MovieDto, KernelError> {
        self.authorize_admin(credential)?;

        let id = MovieId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(movie_not_found)?;
        self.movie_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        Ok(movie.into())
    }
}

impl<T> DeleteMovieService for T where
    T: DependOnMovieQuery + DependOnMovieModifier + DependOnIdentityService
{
}
