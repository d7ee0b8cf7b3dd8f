use vodca::{AsRefln, Fromln};

/// Encoded password hash. The raw password never leaves the request that carried it.
#[derive(Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(**)")
    }
}
