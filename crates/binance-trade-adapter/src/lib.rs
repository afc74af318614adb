/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Binance adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;
pub mod ws;

// Re-export commonly used types from auth
pub use auth::{Credentials, HmacSigner};

// Re-export commonly used types from http
pub use http::{
    BinanceClient,
    BinanceError,
    ClientConfig,
    Params,
    RequestSigner,
    Result,
    SignedRequest,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    SessionConfig,
    SessionOutcome,
    SessionReport,
    SessionState,
    StreamMessage,
    TickerData,
    TimedStreamSession,
    ticker_stream_url,
};
