/*
[INPUT]:  API key/secret configuration
[OUTPUT]: Validated credentials and HMAC signer
[POS]:    Auth layer - handles Binance API authentication material
[UPDATE]: When auth material or signature methods change
*/

pub mod credentials;
pub mod signer;

pub use credentials::Credentials;
pub use signer::HmacSigner;
