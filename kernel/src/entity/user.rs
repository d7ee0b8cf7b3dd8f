mod admin;
mod email;
mod id;
mod name;
mod password;

pub use self::{admin::*, email::*, id::*, name::*, password::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
    password: PasswordDigest,
    is_admin: IsAdmin,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: UserEmail,
        password: PasswordDigest,
        is_admin: IsAdmin,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            is_admin,
        }
    }
}
