/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for binance-trade-adapter tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use binance_trade_adapter::{BinanceClient, ClientConfig};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_API_SECRET: &str = "test-api-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server with a short timeout
pub fn client_for(server: &MockServer, timeout: Duration) -> BinanceClient {
    let config = ClientConfig {
        base_url: server.uri(),
        timeout,
        connect_timeout: Duration::from_secs(2),
    };
    BinanceClient::from_keys(TEST_API_KEY, TEST_API_SECRET, config).expect("client init")
}

/// What the mock stream server observed
#[derive(Debug)]
pub enum ServerEvent {
    Accepted,
    CloseReceived,
}

/// Local WebSocket server that sends `frames` after the handshake, then
/// idles until the client closes. Events are reported on the returned channel.
pub async fn spawn_stream_server(
    frames: Vec<String>,
) -> (SocketAddr, mpsc::UnboundedReceiver<ServerEvent>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(mut ws) = accept_async(stream).await else {
            return;
        };
        let _ = event_tx.send(ServerEvent::Accepted);

        for frame in frames {
            if ws.send(Message::Text(frame.into())).await.is_err() {
                return;
            }
        }

        while let Some(message) = ws.next().await {
            match message {
                Ok(Message::Close(_)) => {
                    let _ = event_tx.send(ServerEvent::CloseReceived);
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });

    (addr, event_rx)
}

/// Server that completes the handshake, then holds the socket without
/// reading, so a client close request is never acknowledged.
pub async fn spawn_unresponsive_server(hold: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(ws) = accept_async(stream).await else {
            return;
        };
        tokio::time::sleep(hold).await;
        drop(ws);
    });

    addr
}

/// Server that sends a Close frame right after the handshake
pub async fn spawn_closing_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(mut ws) = accept_async(stream).await else {
            return;
        };
        let _ = ws.close(None).await;
        while let Some(Ok(_)) = ws.next().await {}
    });

    addr
}

/// Address nothing is listening on
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    listener.local_addr().expect("local addr")
}

pub fn ticker_frame(symbol: &str, last_price: &str) -> String {
    serde_json::json!({
        "e": "24hrTicker",
        "E": 1_672_515_782_136_i64,
        "s": symbol,
        "P": "1.25",
        "c": last_price,
        "h": last_price,
        "l": last_price,
        "v": "100"
    })
    .to_string()
}
