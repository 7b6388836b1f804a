/*
[INPUT]:  API key and secret key
[OUTPUT]: Credentials and HMAC-SHA256 request signatures
[POS]:    Auth layer - handles Binance API key authentication
[UPDATE]: When credential sources or signature methods change
*/

pub mod credentials;
pub mod signer;

pub use credentials::Credentials;
pub use signer::HmacSigner;
