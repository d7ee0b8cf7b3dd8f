mod common;
mod customer;
mod genre;
mod identity;
mod movie;
mod rental;
mod user;

pub use self::{common::*, customer::*, genre::*, identity::*, movie::*, rental::*, user::*};
