pub mod service;
pub mod transfer;

mod validation;
