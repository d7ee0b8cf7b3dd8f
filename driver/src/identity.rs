use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use error_stack::Report;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::identity::IdentityService;
use kernel::prelude::entity::{Credential, Identity, IsAdmin, PasswordDigest, UserId};
use kernel::{ErrorMessage, KernelError};

use crate::{env, env_or};

static JWT_PRIVATE_KEY: &str = "JWT_PRIVATE_KEY";
static JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    sub: Uuid,
    is_admin: bool,
    iat: i64,
    exp: i64,
}

/// HS256 tokens signed with a shared secret, argon2 password digests.
#[derive(Clone)]
pub struct JwtIdentityService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl JwtIdentityService {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let secret = env(JWT_PRIVATE_KEY)?;
        let hours = env_or(JWT_EXPIRY_HOURS, 24i64)?;
        Ok(Self::with_secret(secret.as_bytes(), Duration::hours(hours)))
    }

    pub fn with_secret(secret: &[u8], expiry: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            expiry,
        }
    }
}

impl IdentityService for JwtIdentityService {
    fn issue(&self, identity: &Identity) -> error_stack::Result<Credential, KernelError> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: *identity.subject().as_ref(),
            is_admin: *identity.is_admin().as_ref(),
            iat: now.unix_timestamp(),
            exp: (now + self.expiry).unix_timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|error| Report::new(error).change_context(KernelError::Internal))?;
        Ok(Credential::new(token))
    }

    fn verify(&self, credential: &Credential) -> error_stack::Result<Identity, KernelError> {
        let token: &String = credential.as_ref();
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|error| {
                Report::new(error)
                    .change_context(KernelError::BadCredential)
                    .attach_printable(ErrorMessage::new("Invalid token."))
            })?
            .claims;
        Ok(Identity::new(
            UserId::new(claims.sub),
            IsAdmin::new(claims.is_admin),
        ))
    }

    fn digest_password(&self, raw: &str) -> error_stack::Result<PasswordDigest, KernelError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|error| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("password hashing failed: {error}"))
            })?;
        Ok(PasswordDigest::new(digest.to_string()))
    }

    fn verify_password(&self, raw: &str, digest: &PasswordDigest) -> bool {
        let digest: &String = digest.as_ref();
        match PasswordHash::new(digest) {
            Ok(hash) => Argon2::default()
                .verify_password(raw.as_bytes(), &hash)
                .is_ok(),
            Err(error) => {
                tracing::warn!("stored password digest is unreadable: {error}");
                false
            }
        }
    }
}
