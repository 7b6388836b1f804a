/*
[INPUT]:  Request options (base URL, timeouts, proxy), credentials, endpoint descriptors
[OUTPUT]: Signed blocking HTTP requests and typed responses
[POS]:    HTTP layer - core client implementation and request dispatcher
[UPDATE]: When adding connection options or changing dispatch behavior
*/

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::HeaderValue;
use reqwest::{Method, Proxy, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::{Credentials, HmacSigner};
use crate::http::endpoint::Endpoint;
use crate::http::error::ApiErrorBody;
use crate::http::params::{self, Params, RECV_WINDOW, SIGNATURE, TIMESTAMP};
use crate::http::{BinanceError, Result};

/// Production REST host for USDⓈ-M futures
pub const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Connection and request options. Immutable once the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Bound on the whole request once issued.
    pub read_timeout: Duration,
    pub proxy: Option<String>,
    /// Added to every signed request that does not carry its own.
    pub recv_window: Option<u64>,
    pub user_agent: String,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            proxy: None,
            recv_window: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RequestOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Builder for [`FuturesClient`].
#[derive(Debug, Default)]
pub struct FuturesClientBuilder {
    credentials: Option<Credentials>,
    options: RequestOptions,
}

impl FuturesClientBuilder {
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<FuturesClient> {
        let base_url = Url::parse(&self.options.base_url).map_err(|err| {
            BinanceError::InvalidRequest(format!(
                "invalid base URL `{}`: {err}",
                self.options.base_url
            ))
        })?;

        let mut builder = Client::builder()
            .connect_timeout(self.options.connect_timeout)
            .timeout(self.options.read_timeout)
            .user_agent(self.options.user_agent.clone());

        if let Some(proxy) = &self.options.proxy {
            let proxy = Proxy::all(proxy.as_str()).map_err(|err| {
                BinanceError::InvalidRequest(format!("invalid proxy `{proxy}`: {err}"))
            })?;
            builder = builder.proxy(proxy);
        }

        let http_client = builder.build().map_err(|err| {
            BinanceError::InvalidRequest(format!("failed to build HTTP client: {err}"))
        })?;

        let signer = self
            .credentials
            .as_ref()
            .map(Credentials::signer)
            .transpose()?;

        Ok(FuturesClient {
            http_client,
            base_url,
            credentials: self.credentials,
            signer,
            options: self.options,
        })
    }
}

/// Fully assembled request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    /// Encoded query string; for signed endpoints, exactly the signed bytes
    /// followed by `signature`.
    pub query: String,
    /// Value of the API key header, marked sensitive.
    pub api_key: Option<HeaderValue>,
}

/// Blocking client for the USDⓈ-M futures REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct FuturesClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
    signer: Option<HmacSigner>,
    options: RequestOptions,
}

impl FuturesClient {
    /// Anonymous client with default options. Only public endpoints work.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> FuturesClientBuilder {
        FuturesClientBuilder::default()
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Validate, serialize and sign a request without performing I/O.
    pub fn prepare(&self, endpoint: &Endpoint, mut params: Params) -> Result<PreparedRequest> {
        let api_key = if endpoint.security.requires_api_key() {
            let credentials = self.credentials.as_ref().ok_or_else(|| {
                BinanceError::InvalidRequest(format!("{} requires credentials", endpoint.name))
            })?;
            let mut value = HeaderValue::from_str(credentials.api_key()).map_err(|err| {
                BinanceError::InvalidRequest(format!("API key is not a valid header value: {err}"))
            })?;
            value.set_sensitive(true);
            Some(value)
        } else {
            None
        };

        if endpoint.security.requires_signature() {
            if let Some(recv_window) = self.options.recv_window {
                if !params.contains(RECV_WINDOW) {
                    params.insert(RECV_WINDOW, recv_window);
                }
            }
            if !params.contains(TIMESTAMP) {
                params.insert(TIMESTAMP, chrono::Utc::now().timestamp_millis());
            }
        }

        let query = params::encode_pairs(params::canonical_pairs(endpoint, &params)?);

        let query = match (&self.signer, endpoint.security.requires_signature()) {
            (Some(signer), true) => {
                let signature = signer.sign(&query);
                params::append_pair(&query, SIGNATURE, &signature)
            }
            (None, true) => {
                return Err(BinanceError::InvalidRequest(format!(
                    "{} requires credentials",
                    endpoint.name
                )));
            }
            (_, false) => query,
        };

        let mut url = self.base_url.join(endpoint.path)?;
        url.set_query(if query.is_empty() { None } else { Some(query.as_str()) });

        Ok(PreparedRequest {
            method: endpoint.method.as_reqwest(),
            url,
            query,
            api_key,
        })
    }

    /// Send a request and decode the body into `T`.
    ///
    /// Use `serde::de::IgnoredAny` for endpoints whose body carries nothing.
    pub fn dispatch<T: DeserializeOwned>(&self, endpoint: &Endpoint, params: Params) -> Result<T> {
        let prepared = self.prepare(endpoint, params)?;
        debug!(
            method = %endpoint.method,
            path = endpoint.path,
            security = ?endpoint.security,
            "dispatching request"
        );

        let mut builder = self
            .http_client
            .request(prepared.method.clone(), prepared.url.clone());
        if let Some(api_key) = prepared.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }

        let response = builder.send().map_err(|err| {
            warn!(path = endpoint.path, timeout = err.is_timeout(), "transport error: {err}");
            BinanceError::Transport(err)
        })?;
        let status = response.status();
        let body = response.text()?;

        let result = decode_response(status, &body);
        if let Err(err @ BinanceError::Exchange { .. }) = &result {
            warn!(path = endpoint.path, status = status.as_u16(), "{err}");
        }
        result
    }
}

/// Map a status code and raw body to a typed result.
///
/// An empty body decodes as JSON `null`. A 2xx body shaped
/// `{"code": <negative>, "msg": ...}` is an exchange rejection.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(BinanceError::from_response(status, body));
    }

    let body = match body.trim() {
        "" => "null",
        trimmed => trimmed,
    };

    if body.starts_with('{') {
        if let Ok(err) = serde_json::from_str::<ApiErrorBody>(body) {
            if err.code < 0 {
                return Err(BinanceError::Exchange {
                    status: status.as_u16(),
                    code: Some(err.code),
                    message: err.msg,
                });
            }
        }
    }

    serde_json::from_str(body).map_err(|err| BinanceError::protocol(err, body))
}
