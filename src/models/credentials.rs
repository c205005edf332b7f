use std::fmt;

/// Mail account credentials.
///
/// The secret is kept out of `Debug` output so credentials can travel
/// through logged error paths without leaking.
#[derive(Clone)]
pub struct Credentials {
    pub address: String,
    secret: String,
}

impl Credentials {
    pub fn new(address: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            secret: secret.into(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("address", &self.address)
            .field("secret", &"***")
            .finish()
    }
}
