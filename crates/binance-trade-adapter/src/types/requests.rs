/*
[INPUT]:  Operation arguments from callers
[OUTPUT]: Validated request structs rendered as signed-request params
[POS]:    Data layer - request definitions and argument validation
[UPDATE]: When API schema changes or new request types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderType, Side, TimeInForce};
use crate::http::signature::Params;
use crate::http::{BinanceError, Result};

fn require_non_empty(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BinanceError::InvalidArgument(format!("{name} is required")));
    }
    Ok(())
}

fn require_positive(name: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(BinanceError::InvalidArgument(format!(
            "{name} must be greater than zero"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub time_in_force: TimeInForce,
}

impl NewOrderRequest {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("symbol", &self.symbol)?;
        require_positive("quantity", self.quantity)?;
        require_positive("price", self.price)
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("symbol".into(), self.symbol.clone());
        params.insert("side".into(), self.side.as_str().into());
        params.insert("type".into(), self.order_type.as_str().into());
        params.insert("quantity".into(), self.quantity.normalize().to_string());
        params.insert("price".into(), self.price.normalize().to_string());
        params.insert("timeInForce".into(), self.time_in_force.as_str().into());
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    pub symbol: String,
    pub order_id: String,
}

impl CancelOrderRequest {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("symbol", &self.symbol)?;
        require_non_empty("order ID", &self.order_id)
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("symbol".into(), self.symbol.clone());
        params.insert("orderId".into(), self.order_id.trim().to_string());
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrdersRequest {
    pub symbol: String,
}

impl OpenOrdersRequest {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("symbol", &self.symbol)
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("symbol".into(), self.symbol.clone());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn order(symbol: &str, quantity: &str, price: &str) -> NewOrderRequest {
        NewOrderRequest {
            symbol: symbol.to_string(),
            side: Side::Buy,
            order_type: OrderType::Limit,
            quantity: quantity.parse().unwrap(),
            price: price.parse().unwrap(),
            time_in_force: TimeInForce::Gtc,
        }
    }

    #[rstest]
    #[case("", "1", "100")]
    #[case("  ", "1", "100")]
    #[case("BTCUSDT", "0", "100")]
    #[case("BTCUSDT", "-1", "100")]
    #[case("BTCUSDT", "1", "0")]
    fn test_new_order_rejects_missing_fields(
        #[case] symbol: &str,
        #[case] quantity: &str,
        #[case] price: &str,
    ) {
        let result = order(symbol, quantity, price).validate();
        assert!(matches!(result, Err(BinanceError::InvalidArgument(_))));
    }

    #[test]
    fn test_new_order_params() {
        let request = order("BTCUSDT", "0.0100", "25000.50");
        request.validate().unwrap();

        let params = request.to_params();
        assert_eq!(params["symbol"], "BTCUSDT");
        assert_eq!(params["side"], "BUY");
        assert_eq!(params["type"], "LIMIT");
        assert_eq!(params["quantity"], "0.01");
        assert_eq!(params["price"], "25000.5");
        assert_eq!(params["timeInForce"], "GTC");
    }

    #[rstest]
    #[case("BTCUSDT", "")]
    #[case("", "12345")]
    fn test_cancel_order_requires_both(#[case] symbol: &str, #[case] order_id: &str) {
        let request = CancelOrderRequest {
            symbol: symbol.to_string(),
            order_id: order_id.to_string(),
        };
        assert!(matches!(
            request.validate(),
            Err(BinanceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_open_orders_params() {
        let request = OpenOrdersRequest {
            symbol: "ETHUSDT".to_string(),
        };
        request.validate().unwrap();
        assert_eq!(request.to_params().len(), 1);
    }
}
