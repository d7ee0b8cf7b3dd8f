mod auth;
mod customer;
mod genre;
mod movie;
mod rental;
mod returns;
mod user;

#[cfg(test)]
pub(crate) mod memory;

pub use self::{auth::*, customer::*, genre::*, movie::*, rental::*, returns::*, user::*};
