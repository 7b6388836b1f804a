/*
[INPUT]:  Named request parameters and an endpoint schema
[OUTPUT]: Canonical, deterministic form-encoded query strings
[POS]:    HTTP layer - parameter validation and serialization
[UPDATE]: When changing parameter encoding or validation rules
*/

use std::fmt::Display;

use url::form_urlencoded;

use crate::http::endpoint::Endpoint;
use crate::http::{BinanceError, Result};

pub const TIMESTAMP: &str = "timestamp";
pub const RECV_WINDOW: &str = "recvWindow";
pub const SIGNATURE: &str = "signature";

/// Names the dispatcher owns; endpoint schemas must not declare them.
pub const RESERVED_PARAMS: &[&str] = &[TIMESTAMP, RECV_WINDOW, SIGNATURE];

/// Named request parameters in wire-string form.
///
/// Setting a name twice replaces the earlier value. Insertion order is not
/// significant: serialization follows the endpoint schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(&'static str, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_opt<V: Display>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Caller-supplied request timestamp in milliseconds.
    pub fn with_timestamp(self, timestamp: Option<u64>) -> Self {
        self.with_opt(TIMESTAMP, timestamp)
    }

    pub fn insert(&mut self, name: &'static str, value: impl Display) {
        let value = value.to_string();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

/// Checks `params` against the schema and returns the pairs in canonical
/// order: schema order, then `recvWindow`, then `timestamp`.
///
/// `recvWindow` and `timestamp` are only accepted on signed endpoints;
/// `signature` is never accepted from callers.
pub fn canonical_pairs<'a>(
    endpoint: &Endpoint,
    params: &'a Params,
) -> Result<Vec<(&'static str, &'a str)>> {
    let signed = endpoint.security.requires_signature();

    for (name, _) in params.iter() {
        let reserved_ok = signed && (name == TIMESTAMP || name == RECV_WINDOW);
        if endpoint.param(name).is_none() && !reserved_ok {
            return Err(BinanceError::InvalidRequest(format!(
                "parameter `{name}` is not accepted by {}",
                endpoint.name
            )));
        }
    }

    let mut pairs = Vec::with_capacity(params.len());
    for spec in endpoint.params {
        match params.get(spec.name) {
            Some(value) => pairs.push((spec.name, value)),
            None if spec.required => {
                return Err(BinanceError::InvalidRequest(format!(
                    "{} requires parameter `{}`",
                    endpoint.name, spec.name
                )));
            }
            None => {}
        }
    }

    if signed {
        for name in [RECV_WINDOW, TIMESTAMP] {
            if let Some(value) = params.get(name) {
                pairs.push((name, value));
            }
        }
    }

    Ok(pairs)
}

/// Form-encodes pairs in the given order.
pub fn encode_pairs<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name.as_ref(), value.as_ref());
    }
    serializer.finish()
}

/// Appends one form-encoded pair to an encoded query string.
pub fn append_pair(query: &str, name: &str, value: &str) -> String {
    let tail = encode_pairs([(name, value)]);
    if query.is_empty() {
        tail
    } else {
        format!("{query}&{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::endpoint::{self, ORDER_BOOK};
    use crate::http::ErrorKind;

    #[test]
    fn serialization_follows_schema_order_not_insertion_order() {
        let forward = Params::new().with("symbol", "BTCUSDT").with("limit", 5);
        let reverse = Params::new().with("limit", 5).with("symbol", "BTCUSDT");

        let a = encode_pairs(canonical_pairs(&ORDER_BOOK, &forward).unwrap());
        let b = encode_pairs(canonical_pairs(&ORDER_BOOK, &reverse).unwrap());

        assert_eq!(a, "symbol=BTCUSDT&limit=5");
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_serialization_is_byte_identical() {
        let params = Params::new()
            .with("symbol", "ETHUSDT")
            .with("side", "BUY")
            .with("type", "LIMIT")
            .with("quantity", "1.25")
            .with("price", "2500.10")
            .with("timeInForce", "GTC")
            .with_timestamp(Some(1_700_000_000_000));

        let first = encode_pairs(canonical_pairs(&endpoint::NEW_ORDER, &params).unwrap());
        let second = encode_pairs(canonical_pairs(&endpoint::NEW_ORDER, &params.clone()).unwrap());

        assert_eq!(first, second);
        assert_eq!(
            first,
            "symbol=ETHUSDT&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1.25&price=2500.10&timestamp=1700000000000"
        );
    }

    #[test]
    fn insert_replaces_existing_value() {
        let params = Params::new().with("limit", 5).with("limit", 10);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("limit"), Some("10"));
    }

    #[test]
    fn missing_required_parameter_is_rejected() {
        let err = canonical_pairs(&ORDER_BOOK, &Params::new().with("limit", 5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(err.to_string().contains("symbol"));
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let params = Params::new().with("symbol", "BTCUSDT").with("depth", 5);
        let err = canonical_pairs(&ORDER_BOOK, &params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn timestamp_is_rejected_on_public_endpoints() {
        let params = Params::new()
            .with("symbol", "BTCUSDT")
            .with_timestamp(Some(1));
        assert!(canonical_pairs(&ORDER_BOOK, &params).is_err());
    }

    #[test]
    fn signature_is_never_accepted_from_callers() {
        let params = Params::new().with("signature", "forged");
        assert!(canonical_pairs(&endpoint::BALANCE, &params).is_err());
    }

    #[test]
    fn values_are_form_encoded() {
        let encoded = encode_pairs([("batchOrders", r#"[{"symbol":"BTCUSDT"}]"#)]);
        assert_eq!(
            encoded,
            "batchOrders=%5B%7B%22symbol%22%3A%22BTCUSDT%22%7D%5D"
        );
    }

    #[test]
    fn append_pair_handles_empty_query() {
        assert_eq!(append_pair("", "signature", "abc"), "signature=abc");
        assert_eq!(append_pair("a=1", "signature", "abc"), "a=1&signature=abc");
    }
}
