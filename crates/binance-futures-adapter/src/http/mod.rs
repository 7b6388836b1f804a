/*
[INPUT]:  Request options, credentials and endpoint descriptors
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod market;
pub mod params;
pub mod statistics;
pub mod trade;
pub mod user_stream;

pub use error::{BinanceError, ErrorKind, Result};
pub use params::Params;

pub use client::{
    API_KEY_HEADER, DEFAULT_BASE_URL, FuturesClient, FuturesClientBuilder, PreparedRequest,
    RequestOptions,
};
