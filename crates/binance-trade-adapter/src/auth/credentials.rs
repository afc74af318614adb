/*
[INPUT]:  API key and secret strings from configuration
[OUTPUT]: Validated, immutable credential pair with redacted Debug output
[POS]:    Auth layer - credential ownership for signed requests
[UPDATE]: When credential sources or validation rules change
*/

use std::fmt;

use crate::http::{BinanceError, Result};

/// API credentials for signed requests.
///
/// Both halves are required; the secret never appears in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create credentials, rejecting an empty key or secret
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() {
            return Err(BinanceError::Config("API key is required".to_string()));
        }
        if api_secret.trim().is_empty() {
            return Err(BinanceError::Config("API secret is required".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret,
        })
    }

    /// API key, sent as the `X-MBX-APIKEY` header (safe to log)
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Secret used as the HMAC key. Never log the return value.
    pub(crate) fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("my_api_key", "my_secret").unwrap();
        assert_eq!(creds.api_key(), "my_api_key");
        assert_eq!(creds.api_secret(), "my_secret");
    }

    #[test]
    fn test_empty_parts_rejected() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(BinanceError::Config(_))
        ));
        assert!(matches!(
            Credentials::new("key", ""),
            Err(BinanceError::Config(_))
        ));
        assert!(matches!(
            Credentials::new("   ", "secret"),
            Err(BinanceError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("my_api_key", "super_secret_key").unwrap();
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("my_api_key"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
