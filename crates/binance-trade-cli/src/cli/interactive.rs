/*
[INPUT]:  User input via terminal prompts, AppConfig, BinanceClient
[OUTPUT]: Signed REST calls and timed ticker sessions, results logged
[POS]:    CLI interactive flow
[UPDATE]: When adding menu actions or changing prompt rules
*/

use anyhow::Result;
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

use binance_trade_adapter::{
    AccountInfo, BinanceClient, Order, OrderType, SessionOutcome, Side, TimedStreamSession,
    ticker_stream_url,
};
use binance_trade_cli::AppConfig;

const ACTIONS: [&str; 6] = [
    "Create order",
    "Cancel order",
    "View orders",
    "View positions",
    "Subscribe to ticker",
    "Exit",
];

/// Menu loop. Action failures are logged and the loop continues; only
/// terminal I/O errors end it early.
pub async fn run_interactive(client: &BinanceClient, config: &AppConfig) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Binance Trade CLI").bold().cyan());

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("Select action")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match selection {
            0 => create_order(client, &theme).await?,
            1 => cancel_order(client, &theme).await?,
            2 => view_orders(client, &theme).await?,
            3 => view_positions(client).await,
            4 => subscribe_ticker(config, &theme).await?,
            _ => {
                info!("exiting");
                return Ok(());
            }
        }
    }
}

async fn create_order(client: &BinanceClient, theme: &ColorfulTheme) -> Result<()> {
    let symbol = prompt_symbol(theme)?;
    let sides = [Side::Buy, Side::Sell];
    let side_labels: Vec<&str> = sides.iter().map(Side::as_str).collect();
    let side_index = Select::with_theme(theme)
        .with_prompt("Side")
        .items(&side_labels)
        .default(0)
        .interact()?;
    let side = sides[side_index];
    let quantity = prompt_positive_decimal(theme, "Quantity")?;
    let price = prompt_positive_decimal(theme, "Price")?;

    match client
        .create_order(&symbol, side, OrderType::Limit, quantity, price)
        .await
    {
        Ok(body) => log_order(&body),
        Err(err) => error!(error = %err, "create order failed"),
    }
    Ok(())
}

async fn cancel_order(client: &BinanceClient, theme: &ColorfulTheme) -> Result<()> {
    let symbol = prompt_symbol(theme)?;
    let order_id: String = Input::with_theme(theme)
        .with_prompt("Order ID")
        .interact_text()?;

    match client.cancel_order(&symbol, order_id.trim()).await {
        Ok(body) => log_order(&body),
        Err(err) => error!(error = %err, "cancel order failed"),
    }
    Ok(())
}

async fn view_orders(client: &BinanceClient, theme: &ColorfulTheme) -> Result<()> {
    let symbol = prompt_symbol(theme)?;
    match client.view_orders(&symbol).await {
        Ok(body) => match Order::list_from_value(&body) {
            Some(orders) if orders.is_empty() => info!(symbol = %symbol, "no open orders"),
            Some(orders) => {
                for order in orders {
                    info!("{order}");
                }
            }
            None => info!(body = %body, "open orders"),
        },
        Err(err) => error!(error = %err, "view orders failed"),
    }
    Ok(())
}

async fn view_positions(client: &BinanceClient) {
    match client.view_account().await {
        Ok(body) => match AccountInfo::from_value(&body) {
            Some(account) => {
                let mut any = false;
                for balance in account.non_zero_balances() {
                    any = true;
                    info!(
                        asset = %balance.asset,
                        free = %balance.free.normalize(),
                        locked = %balance.locked.normalize(),
                        "balance"
                    );
                }
                if !any {
                    info!("no non-zero balances");
                }
            }
            None => info!(body = %body, "account"),
        },
        Err(err) => error!(error = %err, "view positions failed"),
    }
}

async fn subscribe_ticker(config: &AppConfig, theme: &ColorfulTheme) -> Result<()> {
    let symbol = prompt_symbol(theme)?;
    let secs: f64 = Input::with_theme(theme)
        .with_prompt("Duration (seconds)")
        .validate_with(|value: &f64| -> std::result::Result<(), &str> {
            if is_valid_duration(*value) {
                Ok(())
            } else {
                Err("duration must be a positive number of seconds within range")
            }
        })
        .interact_text()?;

    let url = match ticker_stream_url(&config.stream_url, &symbol) {
        Ok(url) => url,
        Err(err) => {
            error!(error = %err, "invalid ticker subscription");
            return Ok(());
        }
    };
    let session = match TimedStreamSession::new(url, config.session_config()) {
        Ok(session) => session,
        Err(err) => {
            error!(error = %err, "invalid stream configuration");
            return Ok(());
        }
    };

    match session.run_for_secs(secs).await {
        Ok(report) => {
            info!(
                frames = report.frames,
                malformed = report.malformed,
                "ticker subscription finished"
            );
            if let SessionOutcome::Detached(handle) = report.outcome {
                warn!("stream task still running after grace period, aborting it");
                handle.abort();
            }
        }
        Err(err) => error!(error = %err, "ticker subscription failed"),
    }
    Ok(())
}

fn log_order(body: &Value) {
    match Order::from_value(body) {
        Some(order) => info!("{order}"),
        None => info!(body = %body, "order response"),
    }
}

fn prompt_symbol(theme: &ColorfulTheme) -> Result<String> {
    let raw: String = Input::with_theme(theme)
        .with_prompt("Symbol (e.g. BTCUSDT)")
        .validate_with(|value: &String| -> std::result::Result<(), &str> {
            if value.trim().is_empty() {
                Err("symbol is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(normalize_symbol(&raw))
}

/// Re-asks until the input parses as a positive decimal
fn prompt_positive_decimal(theme: &ColorfulTheme, prompt: &str) -> Result<Decimal> {
    let value: Decimal = Input::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|value: &Decimal| -> std::result::Result<(), &str> {
            if value.is_sign_positive() && !value.is_zero() {
                Ok(())
            } else {
                Err("value must be greater than zero")
            }
        })
        .interact_text()?;
    Ok(value)
}

/// Positive and representable as a `Duration`
pub(crate) fn is_valid_duration(secs: f64) -> bool {
    secs > 0.0 && Duration::try_from_secs_f64(secs).is_ok()
}

pub(crate) fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
