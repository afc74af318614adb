/*
[INPUT]:  Raw WebSocket text frames from the ticker stream
[OUTPUT]: Parsed StreamMessage values (typed ticker or opaque JSON)
[POS]:    WebSocket layer - message parsing and stream URL construction
[UPDATE]: When adding new message types or changing format
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{BinanceError, Result};

/// Public market stream origin
pub const DEFAULT_STREAM_URL: &str = "wss://stream.binance.com:9443";

/// `<base>/ws/<symbol>@ticker`, symbol lower-cased
pub fn ticker_stream_url(base: &str, symbol: &str) -> Result<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(BinanceError::InvalidArgument("symbol is required".to_string()));
    }
    Ok(format!(
        "{}/ws/{}@ticker",
        base.trim_end_matches('/'),
        symbol.to_lowercase()
    ))
}

/// 24hr rolling ticker frame
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TickerData {
    #[serde(rename = "e")]
    pub event_type: String,
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "c", with = "rust_decimal::serde::str")]
    pub last_price: Decimal,
    #[serde(rename = "P", with = "rust_decimal::serde::str")]
    pub price_change_percent: Decimal,
    #[serde(rename = "h", with = "rust_decimal::serde::str")]
    pub high_price: Decimal,
    #[serde(rename = "l", with = "rust_decimal::serde::str")]
    pub low_price: Decimal,
    #[serde(rename = "v", with = "rust_decimal::serde::str")]
    pub volume: Decimal,
}

/// One well-formed frame from the stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    Ticker(TickerData),
    Other(Value),
}

impl StreamMessage {
    /// Parse a text frame; the error is the JSON failure for malformed input
    pub fn parse(text: &str) -> std::result::Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        let is_ticker = value.get("e").and_then(Value::as_str) == Some("24hrTicker");
        if is_ticker && let Ok(ticker) = serde_json::from_value::<TickerData>(value.clone()) {
            return StreamMessage::Ticker(ticker);
        }
        StreamMessage::Other(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKER_FRAME: &str = r#"{
        "e": "24hrTicker", "E": 1672515782136, "s": "BNBBTC",
        "p": "0.0015", "P": "250.00", "w": "0.0018", "x": "0.0009",
        "c": "0.0025", "Q": "10", "b": "0.0024", "B": "10",
        "a": "0.0026", "A": "100", "o": "0.0010", "h": "0.0025",
        "l": "0.0010", "v": "10000", "q": "18", "O": 0, "C": 86400000,
        "F": 0, "L": 18150, "n": 18151
    }"#;

    #[test]
    fn test_ticker_stream_url() {
        assert_eq!(
            ticker_stream_url(DEFAULT_STREAM_URL, "BTCUSDT").unwrap(),
            "wss://stream.binance.com:9443/ws/btcusdt@ticker"
        );
        assert_eq!(
            ticker_stream_url("ws://127.0.0.1:9000/", "EthUsdt").unwrap(),
            "ws://127.0.0.1:9000/ws/ethusdt@ticker"
        );
        assert!(matches!(
            ticker_stream_url(DEFAULT_STREAM_URL, " "),
            Err(BinanceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_ticker_frame() {
        match StreamMessage::parse(TICKER_FRAME).unwrap() {
            StreamMessage::Ticker(ticker) => {
                assert_eq!(ticker.symbol, "BNBBTC");
                assert_eq!(ticker.last_price.to_string(), "0.0025");
                assert_eq!(ticker.price_change_percent.to_string(), "250.00");
                assert_eq!(ticker.event_time, 1_672_515_782_136);
            }
            other => panic!("expected ticker, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_other_and_malformed() {
        assert!(matches!(
            StreamMessage::parse(r#"{"result":null,"id":1}"#),
            Ok(StreamMessage::Other(_))
        ));
        assert!(StreamMessage::parse("not json").is_err());
    }
}
