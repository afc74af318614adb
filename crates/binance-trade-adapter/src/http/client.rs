/*
[INPUT]:  HTTP configuration (base URL, timeouts) and credentials
[OUTPUT]: Signed REST calls returning parsed JSON or BinanceError
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use chrono::Utc;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use crate::auth::Credentials;
use crate::http::signature::{Params, RequestSigner, SignedRequest};
use crate::http::{BinanceError, Result};

/// Base URL for the Binance spot REST API
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Header carrying the API key on every signed call
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Signed REST client for the Binance spot API
#[derive(Debug, Clone)]
pub struct BinanceClient {
    http_client: Client,
    base_url: Url,
    signer: RequestSigner,
}

impl BinanceClient {
    /// Create a new client; credentials are validated by `Credentials::new`
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|err| BinanceError::Config(format!("failed to build HTTP client: {err}")))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|err| BinanceError::Config(format!("invalid base URL {}: {err}", config.base_url)))?;

        Ok(Self {
            http_client,
            base_url,
            signer: RequestSigner::new(credentials),
        })
    }

    /// Convenience constructor from raw key/secret strings
    pub fn from_keys(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        Self::new(Credentials::new(api_key, api_secret)?, config)
    }

    pub fn credentials(&self) -> &Credentials {
        self.signer.credentials()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Signature of `params` under this client's secret
    pub fn sign(&self, params: &Params) -> Result<String> {
        self.signer.sign(params)
    }

    /// Send a SIGNED request and return the JSON body.
    ///
    /// Injects `timestamp`, appends `signature`, and maps every failure to
    /// `BinanceError::Api` (or `Signing` if the MAC cannot be computed).
    pub async fn send_signed(&self, method: Method, endpoint: &str, params: Params) -> Result<Value> {
        if method != Method::GET && method != Method::POST && method != Method::DELETE {
            return Err(BinanceError::InvalidArgument(format!(
                "unsupported HTTP method: {method}"
            )));
        }

        let request = self.signer.sign_request(
            method,
            endpoint,
            params,
            Utc::now().timestamp_millis(),
        )?;

        self.execute(&request).await.inspect_err(|err| {
            error!(endpoint, error = %err, "signed request failed");
        })
    }

    async fn execute(&self, request: &SignedRequest) -> Result<Value> {
        let mut url = self
            .base_url
            .join(&request.endpoint)
            .map_err(|err| BinanceError::InvalidArgument(format!("invalid endpoint {}: {err}", request.endpoint)))?;
        url.set_query(Some(&request.query_string()));

        debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            timestamp = request.timestamp,
            param_count = request.params.len(),
            "sending signed request"
        );

        let response = self
            .http_client
            .request(request.method.clone(), url)
            .header(API_KEY_HEADER, self.credentials().api_key())
            .send()
            .await
            .map_err(BinanceError::from_transport)?;

        Self::read_json(response).await
    }

    async fn read_json(response: Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await.map_err(BinanceError::from_transport)?;

        if !status.is_success() {
            return Err(error_from_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| BinanceError::Api {
            status: Some(status.as_u16()),
            code: None,
            message: format!("invalid response body: {err}"),
        })
    }
}

/// Build the API error for a non-2xx response.
///
/// Prefers the body's `msg` field, then the status reason, then the bare code.
fn error_from_body(status: StatusCode, body: &str) -> BinanceError {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|value| value.get("code"))
        .and_then(Value::as_i64);
    let message = parsed
        .as_ref()
        .and_then(|value| value.get("msg"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| status.as_str().to_string());

    BinanceError::Api {
        status: Some(status.as_u16()),
        code,
        message: format!("HTTP error occurred: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_body_prefers_msg() {
        let err = error_from_body(
            StatusCode::BAD_REQUEST,
            r#"{"code":-1121,"msg":"Invalid symbol."}"#,
        );
        assert_eq!(err.api_code(), Some(-1121));
        assert!(err.to_string().contains("Invalid symbol."));
    }

    #[test]
    fn test_error_from_body_falls_back_to_status_text() {
        let err = error_from_body(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>");
        match err {
            BinanceError::Api {
                status, message, ..
            } => {
                assert_eq!(status, Some(503));
                assert_eq!(message, "HTTP error occurred: Service Unavailable");
            }
            _ => panic!("Expected Api error variant"),
        }
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        let result = BinanceClient::from_keys("key", "secret", config);
        assert!(matches!(result, Err(BinanceError::Config(_))));
    }
}
