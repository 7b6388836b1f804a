/*
[INPUT]:  Encoded query string and secret key
[OUTPUT]: Hex-encoded HMAC-SHA256 signatures
[POS]:    Auth layer - cryptographic signing for SIGNED endpoints
[UPDATE]: When changing signing algorithm or output encoding
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::http::{BinanceError, Result};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer keyed with the account secret.
///
/// The signature covers the exact bytes of the encoded query string, so the
/// caller must sign the same string it sends.
#[derive(Clone)]
pub struct HmacSigner {
    mac: HmacSha256,
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner").finish_non_exhaustive()
    }
}

impl HmacSigner {
    pub fn new(secret_key: &str) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret_key.as_bytes())
            .map_err(|err| BinanceError::InvalidRequest(format!("unusable secret key: {err}")))?;
        Ok(Self { mac })
    }

    /// Sign `payload` and return the lowercase hex digest.
    pub fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
