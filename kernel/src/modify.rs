mod customer;
mod genre;
mod movie;
mod rental;
mod user;

pub use self::{customer::*, genre::*, movie::*, rental::*, user::*};
