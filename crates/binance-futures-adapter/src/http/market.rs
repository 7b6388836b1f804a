/*
[INPUT]:  Symbol identifiers and query parameters
[OUTPUT]: Market data (exchange info, depth, trades, klines, tickers)
[POS]:    HTTP layer - public market data endpoints (no auth except historical trades)
[UPDATE]: When adding new public endpoints or changing response format
*/

use serde::de::IgnoredAny;

use crate::http::endpoint;
use crate::http::{FuturesClient, Params, Result};
use crate::types::{
    AggregateTrade, AggregateTradesQuery, Candlestick, CandlestickQuery, ExchangeInformation,
    FundingRate, FundingRateQuery, LiquidationOrder, LiquidationOrdersQuery, MarkPrice, OrderBook,
    PriceChangeTicker, ServerTime, SymbolOrderBook, SymbolPrice, Trade,
};
use crate::types::responses::OneOrMany;

fn symbol_params(symbol: Option<&str>) -> Params {
    Params::new().with_opt("symbol", symbol)
}

impl FuturesClient {
    /// Test connectivity
    ///
    /// GET /fapi/v1/ping
    pub fn ping(&self) -> Result<()> {
        self.dispatch::<IgnoredAny>(&endpoint::PING, Params::new())?;
        Ok(())
    }

    /// GET /fapi/v1/time
    pub fn server_time(&self) -> Result<ServerTime> {
        self.dispatch(&endpoint::SERVER_TIME, Params::new())
    }

    /// Trading rules, rate limits and symbol metadata
    ///
    /// GET /fapi/v1/exchangeInfo
    pub fn exchange_information(&self) -> Result<ExchangeInformation> {
        self.dispatch(&endpoint::EXCHANGE_INFO, Params::new())
    }

    /// Query order book depth
    ///
    /// GET /fapi/v1/depth?symbol={symbol}&limit={limit}
    pub fn order_book(&self, symbol: &str, limit: Option<u32>) -> Result<OrderBook> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.dispatch(&endpoint::ORDER_BOOK, params)
    }

    /// GET /fapi/v1/trades
    pub fn recent_trades(&self, symbol: &str, limit: Option<u32>) -> Result<Vec<Trade>> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.dispatch(&endpoint::RECENT_TRADES, params)
    }

    /// Older market trades. Requires an API key.
    ///
    /// GET /fapi/v1/historicalTrades
    pub fn old_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
        from_id: Option<i64>,
    ) -> Result<Vec<Trade>> {
        let params = Params::new()
            .with("symbol", symbol)
            .with_opt("limit", limit)
            .with_opt("fromId", from_id);
        self.dispatch(&endpoint::HISTORICAL_TRADES, params)
    }

    /// GET /fapi/v1/aggTrades
    pub fn aggregate_trades(&self, query: &AggregateTradesQuery) -> Result<Vec<AggregateTrade>> {
        self.dispatch(&endpoint::AGG_TRADES, query.to_params())
    }

    /// Get kline/candlestick history
    ///
    /// GET /fapi/v1/klines
    pub fn candlesticks(&self, query: &CandlestickQuery) -> Result<Vec<Candlestick>> {
        self.dispatch(&endpoint::KLINES, query.to_params())
    }

    /// Mark price and funding data; all symbols when `symbol` is `None`.
    ///
    /// GET /fapi/v1/premiumIndex
    pub fn mark_price(&self, symbol: Option<&str>) -> Result<Vec<MarkPrice>> {
        self.dispatch::<OneOrMany<MarkPrice>>(&endpoint::PREMIUM_INDEX, symbol_params(symbol))
            .map(OneOrMany::into_vec)
    }

    /// GET /fapi/v1/fundingRate
    pub fn funding_rate(&self, query: &FundingRateQuery) -> Result<Vec<FundingRate>> {
        self.dispatch(&endpoint::FUNDING_RATE, query.to_params())
    }

    /// GET /fapi/v1/ticker/24hr
    pub fn ticker_24hr(&self, symbol: Option<&str>) -> Result<Vec<PriceChangeTicker>> {
        self.dispatch::<OneOrMany<PriceChangeTicker>>(&endpoint::TICKER_24HR, symbol_params(symbol))
            .map(OneOrMany::into_vec)
    }

    /// GET /fapi/v1/ticker/price
    pub fn symbol_price_ticker(&self, symbol: Option<&str>) -> Result<Vec<SymbolPrice>> {
        self.dispatch::<OneOrMany<SymbolPrice>>(&endpoint::TICKER_PRICE, symbol_params(symbol))
            .map(OneOrMany::into_vec)
    }

    /// Best bid/ask
    ///
    /// GET /fapi/v1/ticker/bookTicker
    pub fn symbol_order_book_ticker(&self, symbol: Option<&str>) -> Result<Vec<SymbolOrderBook>> {
        self.dispatch::<OneOrMany<SymbolOrderBook>>(&endpoint::BOOK_TICKER, symbol_params(symbol))
            .map(OneOrMany::into_vec)
    }

    /// GET /fapi/v1/allForceOrders
    pub fn liquidation_orders(
        &self,
        query: &LiquidationOrdersQuery,
    ) -> Result<Vec<LiquidationOrder>> {
        self.dispatch(&endpoint::FORCE_ORDERS, query.to_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandlestickInterval;

    #[test]
    fn test_candlestick_query_wire_order() {
        let client = FuturesClient::new().unwrap();
        let query = CandlestickQuery {
            limit: Some(100),
            start_time: Some(1_600_000_000_000),
            ..CandlestickQuery::new("BTCUSDT", CandlestickInterval::Hourly)
        };
        let prepared = client.prepare(&endpoint::KLINES, query.to_params()).unwrap();
        assert_eq!(
            prepared.query,
            "symbol=BTCUSDT&interval=1h&startTime=1600000000000&limit=100"
        );
    }

    #[test]
    fn test_all_symbols_query_is_empty() {
        let client = FuturesClient::new().unwrap();
        let prepared = client
            .prepare(&endpoint::TICKER_PRICE, symbol_params(None))
            .unwrap();
        assert_eq!(prepared.query, "");
        assert_eq!(prepared.url.query(), None);
    }
}
