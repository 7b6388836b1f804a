/*
[INPUT]:  Order requests and order references
[OUTPUT]: Order responses, batch outcomes and trade history
[POS]:    HTTP layer - trading endpoints (require API key + signature)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use crate::http::endpoint;
use crate::http::{BinanceError, FuturesClient, Params, Result};
use crate::types::{
    AccountTradesQuery, AllOrdersQuery, BatchOrderResult, MAX_BATCH_ORDERS, MyTrade,
    NewOrderRequest, Order, OrderRef, OrderRefs, ResponseResult,
};

impl FuturesClient {
    /// Place up to five orders in one request.
    ///
    /// POST /fapi/v1/batchOrders
    ///
    /// Results follow the order of `orders`; an entry the exchange refused is
    /// returned as [`BatchOrderResult::Rejected`] without failing the call.
    pub fn post_batch_orders(
        &self,
        orders: &[NewOrderRequest],
        timestamp: Option<u64>,
    ) -> Result<Vec<BatchOrderResult>> {
        if orders.is_empty() || orders.len() > MAX_BATCH_ORDERS {
            return Err(BinanceError::InvalidRequest(format!(
                "batch placement takes 1 to {MAX_BATCH_ORDERS} orders, got {}",
                orders.len()
            )));
        }

        let entries = orders
            .iter()
            .map(NewOrderRequest::to_batch_entry)
            .collect::<Result<Vec<_>>>()?;
        let batch = serde_json::Value::Array(entries).to_string();

        let params = Params::new()
            .with("batchOrders", batch)
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::BATCH_ORDERS, params)
    }

    /// Create a new order
    ///
    /// POST /fapi/v1/order
    pub fn post_order(&self, request: &NewOrderRequest) -> Result<Order> {
        self.dispatch(&endpoint::NEW_ORDER, request.to_params()?)
    }

    /// Cancel an active order
    ///
    /// DELETE /fapi/v1/order
    pub fn cancel_order(
        &self,
        symbol: &str,
        order: &OrderRef,
        timestamp: Option<u64>,
    ) -> Result<Order> {
        let params = order
            .apply(Params::new().with("symbol", symbol))
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::CANCEL_ORDER, params)
    }

    /// DELETE /fapi/v1/allOpenOrders
    pub fn cancel_all_open_orders(
        &self,
        symbol: &str,
        timestamp: Option<u64>,
    ) -> Result<ResponseResult> {
        let params = Params::new()
            .with("symbol", symbol)
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::CANCEL_ALL_OPEN_ORDERS, params)
    }

    /// Cancel up to ten orders of one symbol.
    ///
    /// DELETE /fapi/v1/batchOrders
    pub fn batch_cancel_orders(
        &self,
        symbol: &str,
        orders: &OrderRefs,
        timestamp: Option<u64>,
    ) -> Result<Vec<BatchOrderResult>> {
        let params = orders
            .apply(Params::new().with("symbol", symbol))?
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::BATCH_CANCEL_ORDERS, params)
    }

    /// GET /fapi/v1/order
    pub fn get_order(
        &self,
        symbol: &str,
        order: &OrderRef,
        timestamp: Option<u64>,
    ) -> Result<Order> {
        let params = order
            .apply(Params::new().with("symbol", symbol))
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::QUERY_ORDER, params)
    }

    /// Open orders; all symbols when `symbol` is `None`.
    ///
    /// GET /fapi/v1/openOrders
    pub fn open_orders(&self, symbol: Option<&str>, timestamp: Option<u64>) -> Result<Vec<Order>> {
        let params = Params::new()
            .with_opt("symbol", symbol)
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::OPEN_ORDERS, params)
    }

    /// GET /fapi/v1/allOrders
    pub fn all_orders(&self, query: &AllOrdersQuery) -> Result<Vec<Order>> {
        self.dispatch(&endpoint::ALL_ORDERS, query.to_params())
    }

    /// Fills of the account
    ///
    /// GET /fapi/v1/userTrades
    pub fn account_trades(&self, query: &AccountTradesQuery) -> Result<Vec<MyTrade>> {
        self.dispatch(&endpoint::USER_TRADES, query.to_params())
    }
}
