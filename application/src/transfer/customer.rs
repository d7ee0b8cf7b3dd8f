use kernel::prelude::entity::{Customer, DestructCustomer};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CustomerDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub is_gold: bool,
}

impl From<Customer> for CustomerDto {
    fn from(value: Customer) -> Self {
        let DestructCustomer {
            id,
            name,
            phone,
            is_gold,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            is_gold: is_gold.into(),
        }
    }
}

pub struct GetCustomerDto {
    pub id: Uuid,
}

pub struct CreateCustomerDto {
    pub name: String,
    pub phone: String,
    pub is_gold: bool,
}

pub struct UpdateCustomerDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub is_gold: bool,
}

pub struct DeleteCustomerDto {
    pub id: Uuid,
}
