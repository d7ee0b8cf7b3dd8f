use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::identity::DependOnIdentityService;
use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{
    Credential, Customer, CustomerId, CustomerName, CustomerPhone, IsGold,
};
use kernel::KernelError;

use crate::service::AuthorizeService;
use crate::transfer::{
    CreateCustomerDto, CustomerDto, DeleteCustomerDto, GetCustomerDto, PageDto, UpdateCustomerDto,
};
use crate::validation::require_length;

fn customer_not_found() -> error_stack::Report<KernelError> {
    KernelError::NotFound.with_message("The customer with the given ID was not found.")
}

fn validate(name: &str, phone: &str) -> error_stack::Result<(), KernelError> {
    require_length("name", name, 5, 50)?;
    require_length("phone", phone, 5, 50)
}

#[async_trait::async_trait]
pub trait GetCustomerService: 'static + Sync + Send + DependOnCustomerQuery {
    async fn get_customer(
        &self,
        dto: GetCustomerDto,
    ) -> error_stack::Result<Option<CustomerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &CustomerId::new(dto.id))
            .await?;
        Ok(customer.map(CustomerDto::from))
    }

    async fn get_all_customers(
        &self,
        page: PageDto,
    ) -> error_stack::Result<Vec<CustomerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let customers = self
            .customer_query()
            .find_all(&mut connection, &page.limit, &page.offset)
            .await?;
        Ok(customers.into_iter().map(CustomerDto::from).collect())
    }
}

impl<T> GetCustomerService for T where T: DependOnCustomerQuery {}

#[async_trait::async_trait]
pub trait CreateCustomerService:
    'static + Sync + Send + DependOnCustomerModifier + DependOnIdentityService
{
    async fn create_customer(
        &self,
        credential: Option<&Credential>,
        dto: CreateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        self.authenticate(credential)?;
        validate(&dto.name, &dto.phone)?;

        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new(dto.name),
            CustomerPhone::new(dto.phone),
            IsGold::new(dto.is_gold),
        );
        let mut connection = self.database_connection().transact().await?;
        self.customer_modifier()
            .create(&mut connection, &customer)
            .await?;
        connection.commit().await?;

        Ok(customer.into())
    }
}

impl<T> CreateCustomerService for T where T: DependOnCustomerModifier + DependOnIdentityService {}

#[async_trait::async_trait]
pub trait UpdateCustomerService:
    'static
    + Sync
    + Send
    + DependOnCustomerQuery
    + DependOnCustomerModifier
    + DependOnIdentityService
{
    async fn update_customer(
        &self,
        credential: Option<&Credential>,
        dto: UpdateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        self.authenticate(credential)?;
        validate(&dto.name, &dto.phone)?;

        let mut connection = self.database_connection().transact().await?;
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &CustomerId::new(dto.id))
            .await?
            .ok_or_else(customer_not_found)?;
        let customer = Customer::new(
            *customer.id(),
            CustomerName::new(dto.name),
            CustomerPhone::new(dto.phone),
            IsGold::new(dto.is_gold),
        );
        self.customer_modifier()
            .update(&mut connection, &customer)
            .await?;
        connection.commit().await?;

        Ok(customer.into())
    }
}

impl<T> UpdateCustomerService for T where
    T: DependOnCustomerQuery + DependOnCustomerModifier + DependOnIdentityService
{
}

#[async_trait::async_trait]
pub trait DeleteCustomerService:
    'static
    + Sync
    + Send
    + DependOnCustomerQuery
    + DependOnCustomerModifier
    + DependOnIdentityService
{
    async fn delete_customer(
        &self,
        credential: Option<&Credential>,
        dto: DeleteCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        self.authorize_admin(credential)?;

        let id = CustomerId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(customer_not_found)?;
        self.customer_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        Ok(customer.into())
    }
}

impl<T> DeleteCustomerService for T where
    T: DependOnCustomerQuery + DependOnCustomerModifier + DependOnIdentityService
{
}
