/*
[INPUT]:  REST operation catalogue (verb, path, security, parameter schema)
[OUTPUT]: Static endpoint descriptors consumed by the dispatcher
[POS]:    HTTP layer - endpoint table
[UPDATE]: When adding endpoints or when the exchange changes a path or schema
*/

use std::fmt;

use reqwest::Method;

/// HTTP verb of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_reqwest(&self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// Authentication an endpoint demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Security {
    /// Public market data.
    None,
    /// API key header, no signature.
    MarketData,
    /// API key header, no signature. Listen key lifecycle.
    UserStream,
    /// API key header, `timestamp` and `signature`.
    Signed,
}

impl Security {
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Security::None)
    }

    pub fn requires_signature(&self) -> bool {
        matches!(self, Security::Signed)
    }
}

/// One accepted query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub required: bool,
}

const fn req(name: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        required: true,
    }
}

const fn opt(name: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        required: false,
    }
}

/// Static description of a REST operation.
///
/// `params` lists every accepted parameter in canonical wire order; the
/// dispatcher serializes in exactly this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub security: Security,
    pub params: &'static [ParamSpec],
}

impl Endpoint {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }
}

const STATISTICS_PARAMS: &[ParamSpec] = &[
    req("symbol"),
    req("period"),
    opt("limit"),
    opt("startTime"),
    opt("endTime"),
];

// ### Market data

pub const PING: Endpoint = Endpoint {
    name: "ping",
    method: HttpMethod::Get,
    path: "/fapi/v1/ping",
    security: Security::None,
    params: &[],
};

pub const SERVER_TIME: Endpoint = Endpoint {
    name: "server_time",
    method: HttpMethod::Get,
    path: "/fapi/v1/time",
    security: Security::None,
    params: &[],
};

pub const EXCHANGE_INFO: Endpoint = Endpoint {
    name: "exchange_information",
    method: HttpMethod::Get,
    path: "/fapi/v1/exchangeInfo",
    security: Security::None,
    params: &[],
};

pub const ORDER_BOOK: Endpoint = Endpoint {
    name: "order_book",
    method: HttpMethod::Get,
    path: "/fapi/v1/depth",
    security: Security::None,
    params: &[req("symbol"), opt("limit")],
};

pub const RECENT_TRADES: Endpoint = Endpoint {
    name: "recent_trades",
    method: HttpMethod::Get,
    path: "/fapi/v1/trades",
    security: Security::None,
    params: &[req("symbol"), opt("limit")],
};

pub const HISTORICAL_TRADES: Endpoint = Endpoint {
    name: "old_trades",
    method: HttpMethod::Get,
    path: "/fapi/v1/historicalTrades",
    security: Security::MarketData,
    params: &[req("symbol"), opt("limit"), opt("fromId")],
};

pub const AGG_TRADES: Endpoint = Endpoint {
    name: "aggregate_trades",
    method: HttpMethod::Get,
    path: "/fapi/v1/aggTrades",
    security: Security::None,
    params: &[
        req("symbol"),
        opt("fromId"),
        opt("startTime"),
        opt("endTime"),
        opt("limit"),
    ],
};

pub const KLINES: Endpoint = Endpoint {
    name: "candlesticks",
    method: HttpMethod::Get,
    path: "/fapi/v1/klines",
    security: Security::None,
    params: &[
        req("symbol"),
        req("interval"),
        opt("startTime"),
        opt("endTime"),
        opt("limit"),
    ],
};

pub const PREMIUM_INDEX: Endpoint = Endpoint {
    name: "mark_price",
    method: HttpMethod::Get,
    path: "/fapi/v1/premiumIndex",
    security: Security::None,
    params: &[opt("symbol")],
};

pub const FUNDING_RATE: Endpoint = Endpoint {
    name: "funding_rate",
    method: HttpMethod::Get,
    path: "/fapi/v1/fundingRate",
    security: Security::None,
    params: &[
        opt("symbol"),
        opt("startTime"),
        opt("endTime"),
        opt("limit"),
    ],
};

pub const TICKER_24HR: Endpoint = Endpoint {
    name: "ticker_24hr",
    method: HttpMethod::Get,
    path: "/fapi/v1/ticker/24hr",
    security: Security::None,
    params: &[opt("symbol")],
};

pub const TICKER_PRICE: Endpoint = Endpoint {
    name: "symbol_price_ticker",
    method: HttpMethod::Get,
    path: "/fapi/v1/ticker/price",
    security: Security::None,
    params: &[opt("symbol")],
};

pub const BOOK_TICKER: Endpoint = Endpoint {
    name: "symbol_order_book_ticker",
    method: HttpMethod::Get,
    path: "/fapi/v1/ticker/bookTicker",
    security: Security::None,
    params: &[opt("symbol")],
};

pub const FORCE_ORDERS: Endpoint = Endpoint {
    name: "liquidation_orders",
    method: HttpMethod::Get,
    path: "/fapi/v1/allForceOrders",
    security: Security::None,
    params: &[
        opt("symbol"),
        opt("startTime"),
        opt("endTime"),
        opt("limit"),
    ],
};

// ### Trading

pub const BATCH_ORDERS: Endpoint = Endpoint {
    name: "post_batch_orders",
    method: HttpMethod::Post,
    path: "/fapi/v1/batchOrders",
    security: Security::Signed,
    params: &[req("batchOrders")],
};

pub const NEW_ORDER: Endpoint = Endpoint {
    name: "post_order",
    method: HttpMethod::Post,
    path: "/fapi/v1/order",
    security: Security::Signed,
    params: &[
        req("symbol"),
        req("side"),
        opt("positionSide"),
        req("type"),
        opt("timeInForce"),
        opt("quantity"),
        opt("price"),
        opt("reduceOnly"),
        opt("newClientOrderId"),
        opt("stopPrice"),
        opt("closePosition"),
        opt("activationPrice"),
        opt("callbackRate"),
        opt("workingType"),
        opt("priceProtect"),
        opt("newOrderRespType"),
    ],
};

pub const CANCEL_ORDER: Endpoint = Endpoint {
    name: "cancel_order",
    method: HttpMethod::Delete,
    path: "/fapi/v1/order",
    security: Security::Signed,
    params: &[req("symbol"), opt("orderId"), opt("origClientOrderId")],
};

pub const CANCEL_ALL_OPEN_ORDERS: Endpoint = Endpoint {
    name: "cancel_all_open_orders",
    method: HttpMethod::Delete,
    path: "/fapi/v1/allOpenOrders",
    security: Security::Signed,
    params: &[req("symbol")],
};

pub const BATCH_CANCEL_ORDERS: Endpoint = Endpoint {
    name: "batch_cancel_orders",
    method: HttpMethod::Delete,
    path: "/fapi/v1/batchOrders",
    security: Security::Signed,
    params: &[
        req("symbol"),
        opt("orderIdList"),
        opt("origClientOrderIdList"),
    ],
};

pub const QUERY_ORDER: Endpoint = Endpoint {
    name: "get_order",
    method: HttpMethod::Get,
    path: "/fapi/v1/order",
    security: Security::Signed,
    params: &[req("symbol"), opt("orderId"), opt("origClientOrderId")],
};

pub const OPEN_ORDERS: Endpoint = Endpoint {
    name: "open_orders",
    method: HttpMethod::Get,
    path: "/fapi/v1/openOrders",
    security: Security::Signed,
    params: &[opt("symbol")],
};

pub const ALL_ORDERS: Endpoint = Endpoint {
    name: "all_orders",
    method: HttpMethod::Get,
    path: "/fapi/v1/allOrders",
    security: Security::Signed,
    params: &[
        req("symbol"),
        opt("orderId"),
        opt("startTime"),
        opt("endTime"),
        opt("limit"),
    ],
};

pub const USER_TRADES: Endpoint = Endpoint {
    name: "account_trades",
    method: HttpMethod::Get,
    path: "/fapi/v1/userTrades",
    security: Security::Signed,
    params: &[
        req("symbol"),
        opt("startTime"),
        opt("endTime"),
        opt("fromId"),
        opt("limit"),
    ],
};

// ### Account and positions

pub const CHANGE_POSITION_MODE: Endpoint = Endpoint {
    name: "change_position_mode",
    method: HttpMethod::Post,
    path: "/fapi/v1/positionSide/dual",
    security: Security::Signed,
    params: &[req("dualSidePosition")],
};

pub const POSITION_MODE: Endpoint = Endpoint {
    name: "position_mode",
    method: HttpMethod::Get,
    path: "/fapi/v1/positionSide/dual",
    security: Security::Signed,
    params: &[],
};

pub const CHANGE_MARGIN_TYPE: Endpoint = Endpoint {
    name: "change_margin_type",
    method: HttpMethod::Post,
    path: "/fapi/v1/marginType",
    security: Security::Signed,
    params: &[req("symbol"), req("marginType")],
};

pub const POSITION_MARGIN: Endpoint = Endpoint {
    name: "modify_isolated_position_margin",
    method: HttpMethod::Post,
    path: "/fapi/v1/positionMargin",
    security: Security::Signed,
    params: &[
        req("symbol"),
        opt("positionSide"),
        req("amount"),
        req("type"),
    ],
};

pub const POSITION_MARGIN_HISTORY: Endpoint = Endpoint {
    name: "position_margin_history",
    method: HttpMethod::Get,
    path: "/fapi/v1/positionMargin/history",
    security: Security::Signed,
    params: &[
        req("symbol"),
        opt("type"),
        opt("startTime"),
        opt("endTime"),
        opt("limit"),
    ],
};

pub const BALANCE: Endpoint = Endpoint {
    name: "balance",
    method: HttpMethod::Get,
    path: "/fapi/v2/balance",
    security: Security::Signed,
    params: &[],
};

pub const ACCOUNT: Endpoint = Endpoint {
    name: "account_information",
    method: HttpMethod::Get,
    path: "/fapi/v2/account",
    security: Security::Signed,
    params: &[],
};

pub const LEVERAGE: Endpoint = Endpoint {
    name: "change_initial_leverage",
    method: HttpMethod::Post,
    path: "/fapi/v1/leverage",
    security: Security::Signed,
    params: &[req("symbol"), req("leverage")],
};

pub const POSITION_RISK: Endpoint = Endpoint {
    name: "position_risk",
    method: HttpMethod::Get,
    path: "/fapi/v2/positionRisk",
    security: Security::Signed,
    params: &[opt("symbol")],
};

pub const INCOME: Endpoint = Endpoint {
    name: "income_history",
    method: HttpMethod::Get,
    path: "/fapi/v1/income",
    security: Security::Signed,
    params: &[
        opt("symbol"),
        opt("incomeType"),
        opt("startTime"),
        opt("endTime"),
        opt("limit"),
    ],
};

// ### User data stream

pub const LISTEN_KEY_START: Endpoint = Endpoint {
    name: "start_user_data_stream",
    method: HttpMethod::Post,
    path: "/fapi/v1/listenKey",
    security: Security::UserStream,
    params: &[],
};

pub const LISTEN_KEY_KEEPALIVE: Endpoint = Endpoint {
    name: "keep_user_data_stream",
    method: HttpMethod::Put,
    path: "/fapi/v1/listenKey",
    security: Security::UserStream,
    params: &[req("listenKey")],
};

pub const LISTEN_KEY_CLOSE: Endpoint = Endpoint {
    name: "close_user_data_stream",
    method: HttpMethod::Delete,
    path: "/fapi/v1/listenKey",
    security: Security::UserStream,
    params: &[req("listenKey")],
};

// ### Trading statistics

pub const OPEN_INTEREST_HIST: Endpoint = Endpoint {
    name: "open_interest_stat",
    method: HttpMethod::Get,
    path: "/futures/data/openInterestHist",
    security: Security::None,
    params: STATISTICS_PARAMS,
};

pub const TOP_ACCOUNT_RATIO: Endpoint = Endpoint {
    name: "top_trader_account_ratio",
    method: HttpMethod::Get,
    path: "/futures/data/topLongShortAccountRatio",
    security: Security::None,
    params: STATISTICS_PARAMS,
};

pub const TOP_POSITION_RATIO: Endpoint = Endpoint {
    name: "top_trader_position_ratio",
    method: HttpMethod::Get,
    path: "/futures/data/topLongShortPositionRatio",
    security: Security::None,
    params: STATISTICS_PARAMS,
};

pub const GLOBAL_ACCOUNT_RATIO: Endpoint = Endpoint {
    name: "global_account_ratio",
    method: HttpMethod::Get,
    path: "/futures/data/globalLongShortAccountRatio",
    security: Security::None,
    params: STATISTICS_PARAMS,
};

pub const TAKER_LONG_SHORT_RATIO: Endpoint = Endpoint {
    name: "taker_long_short_ratio",
    method: HttpMethod::Get,
    path: "/futures/data/takerlongshortRatio",
    security: Security::None,
    params: STATISTICS_PARAMS,
};

/// Every endpoint the client binds.
pub const ALL: &[Endpoint] = &[
    PING,
    SERVER_TIME,
    EXCHANGE_INFO,
    ORDER_BOOK,
    RECENT_TRADES,
    HISTORICAL_TRADES,
    AGG_TRADES,
    KLINES,
    PREMIUM_INDEX,
    FUNDING_RATE,
    TICKER_24HR,
    TICKER_PRICE,
    BOOK_TICKER,
    FORCE_ORDERS,
    BATCH_ORDERS,
    NEW_ORDER,
    CANCEL_ORDER,
    CANCEL_ALL_OPEN_ORDERS,
    BATCH_CANCEL_ORDERS,
    QUERY_ORDER,
    OPEN_ORDERS,
    ALL_ORDERS,
    USER_TRADES,
    CHANGE_POSITION_MODE,
    POSITION_MODE,
    CHANGE_MARGIN_TYPE,
    POSITION_MARGIN,
    POSITION_MARGIN_HISTORY,
    BALANCE,
    ACCOUNT,
    LEVERAGE,
    POSITION_RISK,
    INCOME,
    LISTEN_KEY_START,
    LISTEN_KEY_KEEPALIVE,
    LISTEN_KEY_CLOSE,
    OPEN_INTEREST_HIST,
    TOP_ACCOUNT_RATIO,
    TOP_POSITION_RATIO,
    GLOBAL_ACCOUNT_RATIO,
    TAKER_LONG_SHORT_RATIO,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::http::params::RESERVED_PARAMS;

    #[test]
    fn schemas_never_declare_reserved_parameters() {
        for endpoint in ALL {
            for spec in endpoint.params {
                assert!(
                    !RESERVED_PARAMS.contains(&spec.name),
                    "{} declares reserved parameter {}",
                    endpoint.name,
                    spec.name
                );
            }
        }
    }

    #[test]
    fn schemas_have_unique_parameter_names() {
        for endpoint in ALL {
            let names: HashSet<_> = endpoint.params.iter().map(|spec| spec.name).collect();
            assert_eq!(names.len(), endpoint.params.len(), "{}", endpoint.name);
        }
    }

    #[test]
    fn verb_and_path_pairs_are_unique() {
        let routes: HashSet<_> = ALL.iter().map(|ep| (ep.method, ep.path)).collect();
        assert_eq!(routes.len(), ALL.len());
    }

    #[test]
    fn endpoint_names_are_unique() {
        let names: HashSet<_> = ALL.iter().map(|ep| ep.name).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn mutations_are_signed_or_user_stream() {
        for endpoint in ALL.iter().filter(|ep| ep.method != HttpMethod::Get) {
            assert!(
                matches!(endpoint.security, Security::Signed | Security::UserStream),
                "{} mutates without credentials",
                endpoint.name
            );
        }
    }

    #[test]
    fn security_flags() {
        assert!(!Security::None.requires_api_key());
        assert!(Security::MarketData.requires_api_key());
        assert!(!Security::MarketData.requires_signature());
        assert!(!Security::UserStream.requires_signature());
        assert!(Security::Signed.requires_signature());
    }
}
