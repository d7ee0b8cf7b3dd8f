use destructure::Destructure;
use vodca::{AsRefln, Fromln, References};

use crate::entity::{IsAdmin, UserId};

/// Raw token presented by a client. Nothing about it is trusted until verified.
#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

/// A verified caller.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Identity {
    subject: UserId,
    is_admin: IsAdmin,
}

impl Identity {
    pub fn new(subject: UserId, is_admin: IsAdmin) -> Self {
        Self { subject, is_admin }
    }
}
