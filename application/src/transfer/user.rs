use kernel::prelude::entity::{Credential, DestructUser, User};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            email,
            is_admin,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            is_admin: is_admin.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisteredUserDto {
    pub user: UserDto,
    pub credential: Credential,
}

pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
}
