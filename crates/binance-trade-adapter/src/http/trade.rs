/*
[INPUT]:  Order arguments (symbol, side, type, quantity, price / order id)
[OUTPUT]: Raw JSON order responses from the exchange
[POS]:    HTTP layer - trading endpoints (SIGNED)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{error, info};

use crate::http::{BinanceClient, Result};
use crate::types::{CancelOrderRequest, NewOrderRequest, OrderType, Side, TimeInForce};

pub const ORDER_ENDPOINT: &str = "/api/v3/order";

impl BinanceClient {
    /// Create a new GTC order
    ///
    /// POST /api/v3/order
    pub async fn create_order(
        &self,
        symbol: &str,
        side: Side,
        order_type: OrderType,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<Value> {
        let req = NewOrderRequest {
            symbol: symbol.to_string(),
            side,
            order_type,
            quantity,
            price,
            time_in_force: TimeInForce::Gtc,
        };
        self.place_order(&req).await
    }

    /// Submit a prepared order request
    ///
    /// POST /api/v3/order
    pub async fn place_order(&self, req: &NewOrderRequest) -> Result<Value> {
        req.validate()
            .map_err(|err| err.with_operation("create order"))?;

        match self
            .send_signed(Method::POST, ORDER_ENDPOINT, req.to_params())
            .await
        {
            Ok(body) => {
                info!(symbol = %req.symbol, side = %req.side, "order created");
                Ok(body)
            }
            Err(err) => {
                error!(symbol = %req.symbol, error = %err, "error creating order");
                Err(err.with_operation("create order"))
            }
        }
    }

    /// Cancel an open order
    ///
    /// DELETE /api/v3/order
    pub async fn cancel_order(&self, symbol: &str, order_id: &str) -> Result<Value> {
        let req = CancelOrderRequest {
            symbol: symbol.to_string(),
            order_id: order_id.to_string(),
        };
        req.validate()
            .map_err(|err| err.with_operation("cancel order"))?;

        self.send_signed(Method::DELETE, ORDER_ENDPOINT, req.to_params())
            .await
            .map_err(|err| {
                error!(symbol, order_id, error = %err, "error canceling order");
                err.with_operation("cancel order")
            })
    }
}
