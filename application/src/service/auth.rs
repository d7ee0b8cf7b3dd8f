use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::identity::{DependOnIdentityService, IdentityService};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::prelude::entity::{Credential, Identity, UserEmail};
use kernel::KernelError;

use crate::transfer::LoginDto;
use crate::validation::require_length;

pub trait AuthorizeService: 'static + Sync + Send + DependOnIdentityService {
    /// Any verified identity passes. An absent credential is `Unauthorized`, one that fails
    /// verification is `BadCredential`.
    fn authenticate(
        &self,
        credential: Option<&Credential>,
    ) -> error_stack::Result<Identity, KernelError> {
        let credential = credential.ok_or_else(|| {
            KernelError::Unauthorized.with_message("Access denied. No token provided.")
        })?;
        self.identity_service().verify(credential)
    }

    fn authorize_admin(
        &self,
        credential: Option<&Credential>,
    ) -> error_stack::Result<Identity, KernelError> {
        let identity = self.authenticate(credential)?;
        if !*identity.is_admin().as_ref() {
            return Err(KernelError::Forbidden.with_message("Access denied."));
        }
        Ok(identity)
    }
}

impl<T: ?Sized> AuthorizeService for T where T: DependOnIdentityService {}

#[async_trait::async_trait]
pub trait LoginService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnUserQuery + DependOnIdentityService
{
    async fn login(&self, dto: LoginDto) -> error_stack::Result<Credential, KernelError> {
        require_length("email", &dto.email, 5, 255)?;
        require_length("password", &dto.password, 5, 1024)?;

        let invalid = || KernelError::InvalidRequest.with_message("Invalid email or password.");

        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_email(&mut connection, &UserEmail::new(dto.email))
            .await?
            .ok_or_else(invalid)?;

        if !self
            .identity_service()
            .verify_password(&dto.password, user.password())
        {
            return Err(invalid());
        }

        self.identity_service()
            .issue(&Identity::new(*user.id(), *user.is_admin()))
    }
}

impl<T> LoginService for T where
    T: DependOnDatabaseConnection + DependOnUserQuery + DependOnIdentityService
{
}
