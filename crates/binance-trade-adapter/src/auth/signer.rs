/*
[INPUT]:  Message bytes and the API secret
[OUTPUT]: Lowercase hex HMAC-SHA256 digests
[POS]:    Auth layer - cryptographic primitive behind request signatures
[UPDATE]: When changing signing algorithm or digest encoding
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::http::{BinanceError, Result};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer keyed by the account secret
#[derive(Debug, Clone)]
pub struct HmacSigner {
    credentials: Credentials,
}

impl HmacSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign a message and return the 64-character lowercase hex digest
    pub fn sign(&self, message: &[u8]) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.api_secret().as_bytes())
            .map_err(|err| BinanceError::Signing(format!("invalid HMAC key: {err}")))?;
        mac.update(message);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Verify a hex digest against a message
    pub fn verify(&self, message: &[u8], signature_hex: &str) -> bool {
        let Ok(expected) = hex::decode(signature_hex) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.credentials.api_secret().as_bytes())
        else {
            return false;
        };
        mac.update(message);
        mac.verify_slice(&expected).is_ok()
    }
}
