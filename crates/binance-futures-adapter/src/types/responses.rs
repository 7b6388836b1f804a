/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - acknowledgement and envelope types
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::PositionMarginType;
use super::models::Order;

pub use crate::http::error::ApiErrorBody;

/// Plain acknowledgement: `{"code": 200, "msg": "success"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseResult {
    pub code: i64,
    pub msg: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionMarginResponse {
    pub amount: Decimal,
    pub code: i64,
    pub msg: String,
    #[serde(rename = "type")]
    pub margin_type: PositionMarginType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionMode {
    /// `true` for hedge mode, `false` for one-way mode.
    pub dual_side_position: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenKey {
    pub listen_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    pub server_time: i64,
}

/// Per-entry outcome of a batch call. Entries keep the order of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchOrderResult {
    Placed(Order),
    Rejected(ApiErrorBody),
}

impl BatchOrderResult {
    pub fn order(&self) -> Option<&Order> {
        match self {
            BatchOrderResult::Placed(order) => Some(order),
            BatchOrderResult::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, BatchOrderResult::Rejected(_))
    }
}

/// Body that is a single object when a symbol is given and an array otherwise.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

// Dispatches on the JSON shape so field errors from `T` surface unchanged.
impl<'de, T: DeserializeOwned> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            items @ Value::Array(_) => Vec::<T>::deserialize(items)
                .map(OneOrMany::Many)
                .map_err(de::Error::custom),
            item => T::deserialize(item)
                .map(OneOrMany::One)
                .map_err(de::Error::custom),
        }
    }
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SymbolPrice;

    #[test]
    fn test_one_or_many_normalizes_single_object() {
        let single: OneOrMany<SymbolPrice> =
            serde_json::from_str(r#"{"symbol":"BTCUSDT","price":"6000.01","time":1589437530011}"#)
                .unwrap();
        let items = single.into_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].symbol, "BTCUSDT");
    }

    #[test]
    fn test_one_or_many_keeps_array() {
        let many: OneOrMany<SymbolPrice> = serde_json::from_str(
            r#"[{"symbol":"BTCUSDT","price":"1","time":1},{"symbol":"ETHUSDT","price":"2","time":2}]"#,
        )
        .unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn test_one_or_many_reports_field_error() {
        let err = serde_json::from_str::<OneOrMany<SymbolPrice>>(r#"{"symbol":"BTCUSDT"}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing field `price`"), "{err}");

        let err = serde_json::from_str::<OneOrMany<SymbolPrice>>(
            r#"[{"symbol":"BTCUSDT","price":"1"},{"symbol":"ETHUSDT","price":"x"}]"#,
        )
        .unwrap_err()
        .to_string();
        assert!(!err.contains("untagged"), "{err}");
    }

    #[test]
    fn test_batch_results_keep_entry_order() {
        let body = r#"[
            {"orderId":1,"symbol":"BTCUSDT","clientOrderId":"a","status":"NEW","side":"BUY",
             "type":"LIMIT","timeInForce":"GTC","price":"30000","origQty":"0.01","updateTime":1},
            {"code":-2022,"msg":"ReduceOnly Order is rejected."}
        ]"#;
        let results: Vec<BatchOrderResult> = serde_json::from_str(body).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].order().map(|order| order.order_id), Some(1));
        assert!(results[1].is_rejected());
        assert_eq!(
            results[1],
            BatchOrderResult::Rejected(ApiErrorBody {
                code: -2022,
                msg: "ReduceOnly Order is rejected.".to_string(),
            })
        );
    }

    #[test]
    fn test_position_margin_response() {
        let response: PositionMarginResponse = serde_json::from_str(
            r#"{"amount":100.0,"code":200,"msg":"Successfully modify position margin.","type":1}"#,
        )
        .unwrap();
        assert_eq!(response.amount, Decimal::from(100));
        assert_eq!(response.margin_type, PositionMarginType::Add);
    }
}
