mod auth;
mod customer;
mod genre;
mod movie;
mod page;
mod rental;
mod user;

pub use self::{auth::*, customer::*, genre::*, movie::*, page::*, rental::*, user::*};
