/*
[INPUT]:  Caller-side order and query descriptions
[OUTPUT]: Validated request parameter sets in wire-string form
[POS]:    Data layer - request types for parameterized endpoints
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    CandlestickInterval, IncomeType, NewOrderRespType, OrderSide, OrderType, PeriodType,
    PositionMarginType, PositionSide, TimeInForce, WorkingType,
};
use crate::http::params::Params;
use crate::http::{BinanceError, Result};

/// Upper bound the exchange accepts for one batch placement.
pub const MAX_BATCH_ORDERS: usize = 5;
/// Upper bound the exchange accepts for one batch cancellation.
pub const MAX_BATCH_CANCELS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateTradesQuery {
    pub symbol: String,
    pub from_id: Option<i64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
}

impl AggregateTradesQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with_opt("fromId", self.from_id)
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
            .with_opt("limit", self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandlestickQuery {
    pub symbol: String,
    pub interval: CandlestickInterval,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
}

impl CandlestickQuery {
    pub fn new(symbol: impl Into<String>, interval: CandlestickInterval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            start_time: None,
            end_time: None,
            limit: None,
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("interval", self.interval)
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
            .with_opt("limit", self.limit)
    }
}

/// Shared by funding rate and liquidation order history; every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolRangeQuery {
    pub symbol: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
}

pub type FundingRateQuery = SymbolRangeQuery;
pub type LiquidationOrdersQuery = SymbolRangeQuery;

impl SymbolRangeQuery {
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with_opt("symbol", self.symbol.as_deref())
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
            .with_opt("limit", self.limit)
    }
}

/// Parameters for placing one order.
///
/// Decimal fields are sent in their plain string form, so `0.001` stays
/// `0.001` on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub position_side: Option<PositionSide>,
    pub order_type: OrderType,
    pub time_in_force: Option<TimeInForce>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub reduce_only: Option<bool>,
    pub new_client_order_id: Option<String>,
    pub stop_price: Option<Decimal>,
    pub close_position: Option<bool>,
    pub activation_price: Option<Decimal>,
    pub callback_rate: Option<Decimal>,
    pub working_type: Option<WorkingType>,
    pub price_protect: Option<bool>,
    pub new_order_resp_type: Option<NewOrderRespType>,
    /// Request timestamp in ms; the current time is used when absent.
    pub timestamp: Option<u64>,
}

impl NewOrderRequest {
    pub fn new(symbol: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            position_side: None,
            order_type,
            time_in_force: None,
            quantity: None,
            price: None,
            reduce_only: None,
            new_client_order_id: None,
            stop_price: None,
            close_position: None,
            activation_price: None,
            callback_rate: None,
            working_type: None,
            price_protect: None,
            new_order_resp_type: None,
            timestamp: None,
        }
    }

    /// GTC limit order.
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            time_in_force: Some(TimeInForce::Gtc),
            quantity: Some(quantity),
            price: Some(price),
            ..Self::new(symbol, side, OrderType::Limit)
        }
    }

    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::new(symbol, side, OrderType::Market)
        }
    }

    pub fn with_position_side(mut self, position_side: PositionSide) -> Self {
        self.position_side = Some(position_side);
        self
    }

    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    pub fn with_reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = Some(reduce_only);
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Reject combinations the exchange would refuse.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| {
            Err(BinanceError::InvalidRequest(format!(
                "{} order for {}: {msg}",
                self.order_type, self.symbol
            )))
        };

        if self.symbol.trim().is_empty() {
            return invalid("symbol is empty");
        }
        if self.order_type == OrderType::Liquidation {
            return invalid("order type cannot be placed");
        }
        if self.order_type.requires_price() && self.price.is_none() {
            return invalid("price is required");
        }
        if self.order_type.requires_stop_price() && self.stop_price.is_none() {
            return invalid("stopPrice is required");
        }
        if self.order_type == OrderType::Limit && self.time_in_force.is_none() {
            return invalid("timeInForce is required");
        }
        if self.order_type == OrderType::TrailingStopMarket && self.callback_rate.is_none() {
            return invalid("callbackRate is required");
        }
        if self.quantity.is_none() && self.close_position != Some(true) {
            return invalid("quantity is required unless closePosition is set");
        }
        if let Some(quantity) = self.quantity {
            if quantity <= Decimal::ZERO {
                return invalid("quantity must be positive");
            }
        }
        Ok(())
    }

    fn order_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("side", self.side)
            .with_opt("positionSide", self.position_side)
            .with("type", self.order_type)
            .with_opt("timeInForce", self.time_in_force)
            .with_opt("quantity", self.quantity)
            .with_opt("price", self.price)
            .with_opt("reduceOnly", self.reduce_only)
            .with_opt("newClientOrderId", self.new_client_order_id.as_deref())
            .with_opt("stopPrice", self.stop_price)
            .with_opt("closePosition", self.close_position)
            .with_opt("activationPrice", self.activation_price)
            .with_opt("callbackRate", self.callback_rate)
            .with_opt("workingType", self.working_type)
            .with_opt("priceProtect", self.price_protect)
            .with_opt("newOrderRespType", self.new_order_resp_type)
    }

    pub(crate) fn to_params(&self) -> Result<Params> {
        self.validate()?;
        Ok(self.order_params().with_timestamp(self.timestamp))
    }

    /// One element of the `batchOrders` JSON array. Every value is a string.
    pub(crate) fn to_batch_entry(&self) -> Result<serde_json::Value> {
        self.validate()?;
        let entry = self
            .order_params()
            .iter()
            .map(|(name, value)| (name.to_string(), serde_json::Value::String(value.to_string())))
            .collect::<serde_json::Map<_, _>>();
        Ok(serde_json::Value::Object(entry))
    }
}

/// Identifies one order either by exchange id or by client id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderRef {
    OrderId(i64),
    ClientOrderId(String),
}

impl OrderRef {
    pub(crate) fn apply(&self, params: Params) -> Params {
        match self {
            OrderRef::OrderId(id) => params.with("orderId", id),
            OrderRef::ClientOrderId(id) => params.with("origClientOrderId", id),
        }
    }
}

impl From<i64> for OrderRef {
    fn from(id: i64) -> Self {
        OrderRef::OrderId(id)
    }
}

impl From<&str> for OrderRef {
    fn from(id: &str) -> Self {
        OrderRef::ClientOrderId(id.to_string())
    }
}

/// Orders to cancel in one batch; one kind of identifier per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRefs {
    OrderIds(Vec<i64>),
    ClientOrderIds(Vec<String>),
}

impl OrderRefs {
    pub fn len(&self) -> usize {
        match self {
            OrderRefs::OrderIds(ids) => ids.len(),
            OrderRefs::ClientOrderIds(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn apply(&self, params: Params) -> Result<Params> {
        if self.is_empty() || self.len() > MAX_BATCH_CANCELS {
            return Err(BinanceError::InvalidRequest(format!(
                "batch cancel takes 1 to {MAX_BATCH_CANCELS} orders, got {}",
                self.len()
            )));
        }
        let encoded = match self {
            OrderRefs::OrderIds(ids) => ("orderIdList", serde_json::to_string(ids)),
            OrderRefs::ClientOrderIds(ids) => ("origClientOrderIdList", serde_json::to_string(ids)),
        };
        let (name, list) = encoded;
        let list = list.map_err(|err| BinanceError::InvalidRequest(err.to_string()))?;
        Ok(params.with(name, list))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMarginRequest {
    pub symbol: String,
    pub position_side: Option<PositionSide>,
    pub amount: Decimal,
    pub margin_type: PositionMarginType,
    pub timestamp: Option<u64>,
}

impl PositionMarginRequest {
    pub fn new(symbol: impl Into<String>, amount: Decimal, margin_type: PositionMarginType) -> Self {
        Self {
            symbol: symbol.into(),
            position_side: None,
            amount,
            margin_type,
            timestamp: None,
        }
    }

    pub(crate) fn to_params(&self) -> Result<Params> {
        if self.amount <= Decimal::ZERO {
            return Err(BinanceError::InvalidRequest(format!(
                "margin amount must be positive, got {}",
                self.amount
            )));
        }
        Ok(Params::new()
            .with("symbol", &self.symbol)
            .with_opt("positionSide", self.position_side)
            .with("amount", self.amount)
            .with("type", self.margin_type)
            .with_timestamp(self.timestamp))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMarginHistoryQuery {
    pub symbol: String,
    pub margin_type: Option<PositionMarginType>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
    pub timestamp: Option<u64>,
}

impl PositionMarginHistoryQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with_opt("type", self.margin_type)
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
            .with_opt("limit", self.limit)
            .with_timestamp(self.timestamp)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllOrdersQuery {
    pub symbol: String,
    pub order_id: Option<i64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
    pub timestamp: Option<u64>,
}

impl AllOrdersQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with_opt("orderId", self.order_id)
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
            .with_opt("limit", self.limit)
            .with_timestamp(self.timestamp)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountTradesQuery {
    pub symbol: String,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub from_id: Option<i64>,
    pub limit: Option<u32>,
    pub timestamp: Option<u64>,
}

impl AccountTradesQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
            .with_opt("fromId", self.from_id)
            .with_opt("limit", self.limit)
            .with_timestamp(self.timestamp)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeQuery {
    pub symbol: Option<String>,
    pub income_type: Option<IncomeType>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
    pub timestamp: Option<u64>,
}

impl IncomeQuery {
    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with_opt("symbol", self.symbol.as_deref())
            .with_opt("incomeType", self.income_type)
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
            .with_opt("limit", self.limit)
            .with_timestamp(self.timestamp)
    }
}

/// Query for the `/futures/data` trading statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsQuery {
    pub symbol: String,
    pub period: PeriodType,
    pub limit: Option<u32>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl StatisticsQuery {
    pub fn new(symbol: impl Into<String>, period: PeriodType) -> Self {
        Self {
            symbol: symbol.into(),
            period,
            limit: None,
            start_time: None,
            end_time: None,
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("period", self.period)
            .with_opt("limit", self.limit)
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ErrorKind;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_limit_order_params() {
        let order = NewOrderRequest::limit("BTCUSDT", OrderSide::Buy, dec("0.001"), dec("30000.10"))
            .with_client_order_id("mm-1")
            .with_timestamp(1_700_000_000_000);
        let params = order.to_params().unwrap();

        assert_eq!(params.get("type"), Some("LIMIT"));
        assert_eq!(params.get("timeInForce"), Some("GTC"));
        assert_eq!(params.get("quantity"), Some("0.001"));
        assert_eq!(params.get("price"), Some("30000.10"));
        assert_eq!(params.get("newClientOrderId"), Some("mm-1"));
        assert_eq!(params.get("timestamp"), Some("1700000000000"));
        assert!(!params.contains("stopPrice"));
    }

    #[rstest]
    #[case(NewOrderRequest::new("BTCUSDT", OrderSide::Buy, OrderType::Limit))]
    #[case(NewOrderRequest {
        quantity: Some(Decimal::ONE),
        ..NewOrderRequest::new("BTCUSDT", OrderSide::Sell, OrderType::StopMarket)
    })]
    #[case(NewOrderRequest {
        quantity: Some(Decimal::ONE),
        ..NewOrderRequest::new("BTCUSDT", OrderSide::Sell, OrderType::TrailingStopMarket)
    })]
    #[case(NewOrderRequest::market("BTCUSDT", OrderSide::Buy, Decimal::ZERO))]
    #[case(NewOrderRequest::market("", OrderSide::Buy, Decimal::ONE))]
    fn test_invalid_orders_rejected(#[case] order: NewOrderRequest) {
        let err = order.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_close_position_needs_no_quantity() {
        let order = NewOrderRequest {
            stop_price: Some(dec("25000")),
            close_position: Some(true),
            ..NewOrderRequest::new("BTCUSDT", OrderSide::Sell, OrderType::StopMarket)
        };
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_batch_entry_values_are_strings() {
        let order = NewOrderRequest::limit("BTCUSDT", OrderSide::Sell, dec("1"), dec("31000"))
            .with_reduce_only(true)
            .with_timestamp(1);
        let entry = order.to_batch_entry().unwrap();

        assert_eq!(entry["symbol"], "BTCUSDT");
        assert_eq!(entry["reduceOnly"], "true");
        assert_eq!(entry["quantity"], "1");
        assert!(entry.get("timestamp").is_none());
    }

    #[test]
    fn test_order_refs_encode_json_lists() {
        let params = OrderRefs::OrderIds(vec![1, 2])
            .apply(Params::new())
            .unwrap();
        assert_eq!(params.get("orderIdList"), Some("[1,2]"));

        let params = OrderRefs::ClientOrderIds(vec!["a".into(), "b".into()])
            .apply(Params::new())
            .unwrap();
        assert_eq!(params.get("origClientOrderIdList"), Some(r#"["a","b"]"#));
    }

    #[test]
    fn test_order_refs_bounds() {
        assert!(OrderRefs::OrderIds(vec![]).apply(Params::new()).is_err());
        assert!(OrderRefs::OrderIds((0..11).collect()).apply(Params::new()).is_err());
    }

    #[test]
    fn test_order_ref_selects_parameter() {
        let by_id = OrderRef::from(42).apply(Params::new());
        assert_eq!(by_id.get("orderId"), Some("42"));

        let by_client = OrderRef::from("mm-1").apply(Params::new());
        assert_eq!(by_client.get("origClientOrderId"), Some("mm-1"));
    }

    #[test]
    fn test_position_margin_request_params() {
        let params = PositionMarginRequest::new("BTCUSDT", dec("100"), PositionMarginType::Reduce)
            .to_params()
            .unwrap();
        assert_eq!(params.get("type"), Some("2"));
        assert_eq!(params.get("amount"), Some("100"));
    }

    #[test]
    fn test_statistics_query_params() {
        let params = StatisticsQuery::new("BTCUSDT", PeriodType::OneHour).to_params();
        assert_eq!(params.get("period"), Some("1h"));
        assert_eq!(params.len(), 2);
    }
}
