/*
[INPUT]:  Opaque JSON bodies returned by signed endpoints
[OUTPUT]: Typed views (orders, account balances) for display
[POS]:    Data layer - optional decoding on top of raw responses
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::{Balance, Order};

/// Subset of the account endpoint used for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub can_trade: bool,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub balances: Vec<Balance>,
}

impl AccountInfo {
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Balances with a non-zero free or locked amount
    pub fn non_zero_balances(&self) -> impl Iterator<Item = &Balance> {
        self.balances.iter().filter(|balance| !balance.is_zero())
    }
}

impl Order {
    /// Decode a single order body, `None` if the shape does not match
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Decode an order list body, `None` if the shape does not match
    pub fn list_from_value(value: &Value) -> Option<Vec<Self>> {
        serde_json::from_value(value.clone()).ok()
    }
}
