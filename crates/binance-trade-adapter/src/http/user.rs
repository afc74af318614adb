/*
[INPUT]:  Symbol filter for open orders; nothing for the account snapshot
[OUTPUT]: Raw JSON for open orders and account balances
[POS]:    HTTP layer - user data endpoints (SIGNED)
[UPDATE]: When adding new user endpoints or changing query parameters
*/

use reqwest::Method;
use serde_json::Value;
use tracing::error;

use crate::http::signature::Params;
use crate::http::{BinanceClient, Result};
use crate::types::OpenOrdersRequest;

pub const OPEN_ORDERS_ENDPOINT: &str = "/api/v3/openOrders";
pub const ACCOUNT_ENDPOINT: &str = "/api/v3/account";

impl BinanceClient {
    /// Query open orders for a symbol
    ///
    /// GET /api/v3/openOrders?symbol={symbol}
    pub async fn view_orders(&self, symbol: &str) -> Result<Value> {
        let req = OpenOrdersRequest {
            symbol: symbol.to_string(),
        };
        req.validate()
            .map_err(|err| err.with_operation("view orders"))?;

        self.send_signed(Method::GET, OPEN_ORDERS_ENDPOINT, req.to_params())
            .await
            .map_err(|err| {
                error!(symbol, error = %err, "error viewing orders");
                err.with_operation("view orders")
            })
    }

    /// Query account information (balances, permissions)
    ///
    /// GET /api/v3/account
    pub async fn view_account(&self) -> Result<Value> {
        self.send_signed(Method::GET, ACCOUNT_ENDPOINT, Params::new())
            .await
            .map_err(|err| {
                error!(error = %err, "error viewing account");
                err.with_operation("view account")
            })
    }
}
