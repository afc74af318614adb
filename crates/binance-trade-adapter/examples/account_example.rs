/*
[INPUT]:  API_KEY / API_SECRET environment variables
[OUTPUT]: Account balances and open orders
[POS]:    Examples - signed user data endpoints
[UPDATE]: When user data API changes
*/

use binance_trade_adapter::*;

/// Example: signed read-only calls
///
/// Signed endpoints require:
/// 1. X-MBX-APIKEY header
/// 2. timestamp + HMAC-SHA256 signature query parameters
#[tokio::main]
async fn main() {
    println!("=== Binance Account Example ===\n");

    let api_key = std::env::var("API_KEY").unwrap_or_default();
    let api_secret = std::env::var("API_SECRET").unwrap_or_default();

    let client = match BinanceClient::from_keys(api_key, api_secret, ClientConfig::default()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created");

    match client.view_account().await {
        Ok(body) => match AccountInfo::from_value(&body) {
            Some(account) => {
                println!("✓ Account (can_trade={})", account.can_trade);
                for balance in account.non_zero_balances() {
                    println!("  {} free={} locked={}", balance.asset, balance.free, balance.locked);
                }
            }
            None => println!("✓ Account: {}", body),
        },
        Err(e) => eprintln!("Failed to view account: {}", e),
    }

    match client.view_orders("BTCUSDT").await {
        Ok(body) => match Order::list_from_value(&body) {
            Some(orders) => {
                println!("✓ {} open BTCUSDT orders", orders.len());
                for order in orders {
                    println!("  {}", order);
                }
            }
            None => println!("✓ Open orders: {}", body),
        },
        Err(e) => eprintln!("Failed to view orders: {}", e),
    }
}
