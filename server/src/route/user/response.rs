use application::transfer::{RegisteredUserDto, UserDto};
use axum::Json;
use axum_extra::TypedHeader;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::header::XAuthToken;

/// Password digest and admin flag never leave the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: Uuid,
    name: String,
    email: String,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}

pub struct Presenter;

impl Exhaust<UserDto> for Presenter {
    type To = Json<UserResponse>;
    fn emit(&self, input: UserDto) -> Self::To {
        Json(input.into())
    }
}

impl Exhaust<RegisteredUserDto> for Presenter {
    type To = (TypedHeader<XAuthToken>, Json<UserResponse>);
    fn emit(&self, input: RegisteredUserDto) -> Self::To {
        (
            TypedHeader(XAuthToken::new(input.credential)),
            Json(input.user.into()),
        )
    }
}
