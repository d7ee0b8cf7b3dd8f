use crate::entity::{Credential, Identity, PasswordDigest};
use crate::KernelError;

/// Issues and verifies the signed tokens clients authenticate with, and guards stored
/// passwords. Verification failures surface as [`KernelError::BadCredential`].
pub trait IdentityService: 'static + Sync + Send {
    fn issue(&self, identity: &Identity) -> error_stack::Result<Credential, KernelError>;
    fn verify(&self, credential: &Credential) -> error_stack::Result<Identity, KernelError>;
    fn digest_password(&self, raw: &str) -> error_stack::Result<PasswordDigest, KernelError>;
    fn verify_password(&self, raw: &str, digest: &PasswordDigest) -> bool;
}

pub trait DependOnIdentityService: 'static + Sync + Send {
    type IdentityService: IdentityService;
    fn identity_service(&self) -> &Self::IdentityService;
}
