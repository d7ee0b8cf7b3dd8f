use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::identity::{DependOnIdentityService, IdentityService};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{Credential, Identity, IsAdmin, User, UserEmail, UserId, UserName};
use kernel::KernelError;

use crate::service::AuthorizeService;
use crate::transfer::{CreateUserDto, RegisteredUserDto, UserDto};
use crate::validation::require_length;

#[async_trait::async_trait]
pub trait RegisterUserService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnUserModifier
    + DependOnIdentityService
{
    /// Registers a regular user and signs them in right away.
    async fn register_user(
        &self,
        dto: CreateUserDto,
    ) -> error_stack::Result<RegisteredUserDto, KernelError> {
        require_length("name", &dto.name, 5, 50)?;
        require_length("email", &dto.email, 5, 255)?;
        require_length("password", &dto.password, 5, 1024)?;

        let email = UserEmail::new(dto.email);
        let mut connection = self.database_connection().transact().await?;
        if self
            .user_query()
            .find_by_email(&mut connection, &email)
            .await?
            .is_some()
        {
            return Err(KernelError::InvalidRequest.with_message("User already registered."));
        }

        let password = self.identity_service().digest_password(&dto.password)?;
        let user = User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new(dto.name),
            email,
            password,
            IsAdmin::default(),
        );
        self.user_modifier().create(&mut connection, &user).await?;
        connection.commit().await?;

        let credential = self
            .identity_service()
            .issue(&Identity::new(*user.id(), *user.is_admin()))?;
        Ok(RegisteredUserDto {
            user: user.into(),
            credential,
        })
    }
}

impl<T> RegisterUserService for T where
    T: DependOnUserQuery + DependOnUserModifier + DependOnIdentityService
{
}

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery + DependOnIdentityService {
    async fn get_me(&self, credential: Option<&Credential>) -> error_stack::Result<UserDto, KernelError> {
        let identity = self.authenticate(credential)?;
        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_id(&mut connection, identity.subject())
            .await?
            .ok_or_else(|| KernelError::NotFound.with_message("The user was not found."))?;
        Ok(user.into())
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery + DependOnIdentityService {}
