/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Order and balance value objects decoded from exchange JSON
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order descriptor as returned by the order endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderId")]
    pub order_id: i64,
    pub symbol: String,
    #[serde(rename = "origQty", with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order(order_id={}, symbol={}, quantity={}, price={})",
            self.order_id,
            self.symbol,
            self.quantity.normalize(),
            self.price.normalize()
        )
    }
}

/// One asset line of the account endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub free: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub locked: Decimal,
}

impl Balance {
    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }

    pub fn is_zero(&self) -> bool {
        self.total().is_zero()
    }
}
