/*
[INPUT]:  API key and secret key, directly or from the environment
[OUTPUT]: Credentials for USER_STREAM and SIGNED endpoints
[POS]:    Auth layer - credential storage
[UPDATE]: When adding credential sources
*/

use std::fmt;

use crate::auth::HmacSigner;
use crate::http::{BinanceError, Result};

pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
pub const SECRET_KEY_ENV: &str = "BINANCE_SECRET_KEY";

/// API key pair. The secret never appears in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Load credentials from `BINANCE_API_KEY` and `BINANCE_SECRET_KEY`.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| BinanceError::InvalidRequest(format!("{name} is not set")))
        };
        Ok(Self::new(read(API_KEY_ENV)?, read(SECRET_KEY_ENV)?))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn signer(&self) -> Result<HmacSigner> {
        HmacSigner::new(&self.secret_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials::new("public-key", "very-secret");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("public-key"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_signer_uses_secret_key() {
        let credentials = Credentials::new("key", "secret");
        let expected = HmacSigner::new("secret").unwrap().sign("a=1");
        assert_eq!(credentials.signer().unwrap().sign("a=1"), expected);
    }
}
