/*
[INPUT]:  HTTP client configuration, credentials and API endpoints
[OUTPUT]: Signed REST calls and typed errors
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod signature;
pub mod trade;
pub mod user;

pub use error::{BinanceError, Result};
pub use signature::{Params, RequestSigner, SignedRequest, canonical_query};

pub use client::{BinanceClient, ClientConfig};
