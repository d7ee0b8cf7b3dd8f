use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::identity::DependOnIdentityService;
use kernel::interface::query::{DependOnGenreQuery, GenreQuery};
use kernel::interface::update::{DependOnGenreModifier, GenreModifier};
use kernel::prelude::entity::{Credential, Genre, GenreId, GenreName};
use kernel::KernelError;

use crate::service::AuthorizeService;
use crate::transfer::{
    CreateGenreDto, DeleteGenreDto, GenreDto, GetGenreDto, PageDto, UpdateGenreDto,
};
use crate::validation::require_length;

fn genre_not_found() -> error_stack::Report<KernelError> {
    KernelError::NotFound.with_message("The genre with the given ID was not found.")
}

fn validate(name: &str) -> error_stack::Result<(), KernelError> {
    require_length("name", name, 5, 50)
}

#[async_trait::async_trait]
pub trait GetGenreService: 'static + Sync + Send + DependOnGenreQuery {
    async fn get_genre(&self, dto: GetGenreDto) -> error_stack::Result<Option<GenreDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &GenreId::new(dto.id))
            .await?;
        Ok(genre.map(GenreDto::from))
    }

    async fn get_all_genres(&self, page: PageDto) -> error_stack::Result<Vec<GenreDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let genres = self
            .genre_query()
            .find_all(&mut connection, &page.limit, &page.offset)
            .await?;
        Ok(genres.into_iter().map(GenreDto::from).collect())
    }
}

impl<T> GetGenreService for T where T: DependOnGenreQuery {}

#[async_trait::async_trait]
pub trait CreateGenreService:
    'static + Sync + Send + DependOnGenreModifier + DependOnIdentityService
{
    async fn create_genre(
        &self,
        credential: Option<&Credential>,
        dto: CreateGenreDto,
    ) -> error_stack::Result<GenreDto, KernelError> {
        self.authenticate(credential)?;
        validate(&dto.name)?;

        let genre = Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new(dto.name));
        let mut connection = self.database_connection().transact().await?;
        self.genre_modifier().create(&mut connection, &genre).await?;
        connection.commit().await?;

        Ok(genre.into())
    }
}

impl<T> CreateGenreService for T where T: DependOnGenreModifier + DependOnIdentityService {}

#[async_trait::async_trait]
pub trait UpdateGenreService:
    'static + Sync + Send + DependOnGenreQuery + DependOnGenreModifier + DependOnIdentityService
{
    async fn update_genre(
        &self,
        credential: Option<&Credential>,
        dto: UpdateGenreDto,
    ) -> error_stack::Result<GenreDto, KernelError> {
        self.authenticate(credential)?;
        validate(&dto.name)?;

        let id = GenreId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(genre_not_found)?;

        let genre = Genre::new(*genre.id(), GenreName::new(dto.name));
        self.genre_modifier().update(&mut connection, &genre).await?;
        connection.commit().await?;

        Ok(genre.into())
    }
}

impl<T> UpdateGenreService for T where
    T: DependOnGenreQuery + DependOnGenreModifier + DependOnIdentityService
{
}

#[async_trait::async_trait]
pub trait DeleteGenreService:
    'static + Sync + Send + DependOnGenreQuery + DependOnGenreModifier + DependOnIdentityService
{
    async fn delete_genre(
        &self,
        credential: Option<&Credential>,
        dto: DeleteGenreDto,
    ) -> error_stack::Result<GenreDto, KernelError> {
        self.authorize_admin(credential)?;

        let id = GenreId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(genre_not_found)?;
        self.genre_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        Ok(genre.into())
    }
}

impl<T> DeleteGenreService for T where
    T: DependOnGenreQuery + DependOnGenreModifier + DependOnIdentityService
{
}
