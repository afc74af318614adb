/*
[INPUT]:  Stream URL, session duration and grace period
[OUTPUT]: Bounded-lifetime ticker stream session
[POS]:    WebSocket layer - real-time data stream
[UPDATE]: When adding new channels or changing connection logic
*/

pub mod client;
pub mod message;

pub use client::{SessionConfig, SessionOutcome, SessionReport, SessionState, TimedStreamSession};
pub use message::{DEFAULT_STREAM_URL, StreamMessage, TickerData, ticker_stream_url};
