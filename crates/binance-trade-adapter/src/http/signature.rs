/*
[INPUT]:  Request parameters, timestamp and HMAC signer
[OUTPUT]: Canonical query strings and SignedRequest values (timestamp + signature)
[POS]:    HTTP layer - request signing for SIGNED endpoints
[UPDATE]: When changing canonical encoding or signature placement
*/

use std::collections::BTreeMap;

use reqwest::Method;
use url::form_urlencoded;

use crate::auth::{Credentials, HmacSigner};
use crate::http::Result;

/// Request parameters; `BTreeMap` keeps keys in canonical (byte) order
pub type Params = BTreeMap<String, String>;

pub const TIMESTAMP_PARAM: &str = "timestamp";
pub const SIGNATURE_PARAM: &str = "signature";

/// Encode params as the canonical query string.
///
/// Keys are sorted, keys and values are form-urlencoded, pairs joined by `&`.
pub fn canonical_query(params: &Params) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// A fully signed request, built fresh for every call
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub endpoint: String,
    /// Every parameter except the signature, `timestamp` included
    pub params: Params,
    pub timestamp: i64,
    pub signature: String,
}

impl SignedRequest {
    /// Query string exactly as sent: canonical params, then the signature
    pub fn query_string(&self) -> String {
        let mut query = canonical_query(&self.params);
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(SIGNATURE_PARAM);
        query.push('=');
        query.push_str(&self.signature);
        query
    }
}

/// Signs parameter sets for authenticated endpoints
#[derive(Debug, Clone)]
pub struct RequestSigner {
    signer: HmacSigner,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            signer: HmacSigner::new(credentials),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        self.signer.credentials()
    }

    /// HMAC-SHA256 of the canonical query string, lowercase hex
    pub fn sign(&self, params: &Params) -> Result<String> {
        self.signer.sign(canonical_query(params).as_bytes())
    }

    /// Add `timestamp`, sign everything, and attach the signature.
    ///
    /// A caller-supplied `timestamp` is replaced and any `signature` is dropped,
    /// so the result always carries exactly one of each.
    pub fn sign_request(
        &self,
        method: Method,
        endpoint: &str,
        mut params: Params,
        timestamp: i64,
    ) -> Result<SignedRequest> {
        params.remove(SIGNATURE_PARAM);
        params.insert(TIMESTAMP_PARAM.to_string(), timestamp.to_string());
        let signature = self.sign(&params)?;

        Ok(SignedRequest {
            method,
            endpoint: endpoint.to_string(),
            params,
            timestamp,
            signature,
        })
    }
}
