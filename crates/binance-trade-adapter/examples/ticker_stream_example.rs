/*
[INPUT]:  Symbol and duration (seconds) from argv
[OUTPUT]: Ticker updates printed for the bounded session lifetime
[POS]:    Examples - timed WebSocket stream
[UPDATE]: When WebSocket session API changes
*/

use binance_trade_adapter::*;
use binance_trade_adapter::ws::DEFAULT_STREAM_URL;

/// Example: stream one ticker for a fixed number of seconds
///
/// cargo run --example ticker_stream_example -- BTCUSDT 5
#[tokio::main]
async fn main() {
    println!("=== Binance Ticker Stream Example ===\n");

    let mut args = std::env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "BTCUSDT".to_string());
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5.0);

    let url = match ticker_stream_url(DEFAULT_STREAM_URL, &symbol) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Invalid symbol: {}", e);
            return;
        }
    };

    let mut session = match TimedStreamSession::new(url.clone(), SessionConfig::default()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create session: {}", e);
            return;
        }
    };
    let mut receiver = session.take_receiver().expect("Receiver already taken");
    println!("✓ Session created for {}", url);

    let printer = tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            if let StreamMessage::Ticker(ticker) = message {
                println!(
                    "  {} last={} change={}%",
                    ticker.symbol, ticker.last_price, ticker.price_change_percent
                );
            }
        }
    });

    match session.run_for_secs(seconds).await {
        Ok(report) => {
            println!(
                "\n✓ Session closed: {} frames, {} malformed, detached={}",
                report.frames,
                report.malformed,
                report.is_detached()
            );
            // A detached worker still holds a frame sender
            if let SessionOutcome::Detached(handle) = report.outcome {
                handle.abort();
            }
        }
        Err(e) => eprintln!("Stream failed: {}", e),
    }

    drop(session);
    let _ = printer.await;
}
