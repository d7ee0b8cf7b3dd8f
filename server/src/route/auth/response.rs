use kernel::prelude::entity::Credential;

use crate::controller::Exhaust;

pub struct Presenter;

/// The token goes back as the bare response body.
impl Exhaust<Credential> for Presenter {
    type To = String;
    fn emit(&self, input: Credential) -> Self::To {
        input.into()
    }
}
