/*
[INPUT]:  Exchange JSON payloads (market data, orders, account state)
[OUTPUT]: Typed Rust records with serde support
[POS]:    Data layer - response value types
[UPDATE]: When the exchange payload schema changes or new records are added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    IncomeType, MarginType, OrderSide, OrderStatus, OrderType, PositionMarginType, PositionSide,
    TimeInForce, WorkingType,
};

// ### Market data

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInformation {
    pub timezone: String,
    pub server_time: i64,
    #[serde(default)]
    pub rate_limits: Vec<RateLimit>,
    #[serde(default)]
    pub exchange_filters: Vec<serde_json::Value>,
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub rate_limit_type: String,
    pub interval: String,
    pub interval_num: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    #[serde(default)]
    pub pair: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    pub status: String,
    #[serde(default)]
    pub maint_margin_percent: Option<Decimal>,
    #[serde(default)]
    pub required_margin_percent: Option<Decimal>,
    pub base_asset: String,
    pub quote_asset: String,
    #[serde(default)]
    pub margin_asset: Option<String>,
    pub price_precision: u32,
    pub quantity_precision: u32,
    pub base_asset_precision: u32,
    pub quote_precision: u32,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
    #[serde(default)]
    pub order_types: Vec<OrderType>,
    #[serde(default)]
    pub time_in_force: Vec<TimeInForce>,
}

/// Trading rule attached to a symbol. Filters this crate does not model are
/// kept as `Unknown` so new exchange filters never break parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filterType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolFilter {
    #[serde(rename_all = "camelCase")]
    PriceFilter {
        min_price: Decimal,
        max_price: Decimal,
        tick_size: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    LotSize {
        min_qty: Decimal,
        max_qty: Decimal,
        step_size: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    MarketLotSize {
        min_qty: Decimal,
        max_qty: Decimal,
        step_size: Decimal,
    },
    MaxNumOrders {
        limit: u32,
    },
    MaxNumAlgoOrders {
        limit: u32,
    },
    MinNotional {
        notional: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    PercentPrice {
        multiplier_up: Decimal,
        multiplier_down: Decimal,
        multiplier_decimal: Decimal,
    },
    #[serde(other)]
    Unknown,
}

/// One `[price, quantity]` level of the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel(pub Decimal, pub Decimal);

impl PriceLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn qty(&self) -> Decimal {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: i64,
    #[serde(rename = "E", default)]
    pub message_output_time: Option<i64>,
    #[serde(rename = "T", default)]
    pub transaction_time: Option<i64>,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: i64,
    pub price: Decimal,
    pub qty: Decimal,
    pub quote_qty: Decimal,
    pub time: i64,
    pub is_buyer_maker: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTrade {
    #[serde(rename = "a")]
    pub id: i64,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "q")]
    pub qty: Decimal,
    #[serde(rename = "f")]
    pub first_id: i64,
    #[serde(rename = "l")]
    pub last_id: i64,
    #[serde(rename = "T")]
    pub time: i64,
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
}

/// Kline bar. Arrives on the wire as a positional array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCandlestick")]
pub struct Candlestick {
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: i64,
    pub quote_asset_volume: Decimal,
    pub num_trades: u64,
    pub taker_buy_base_asset_volume: Decimal,
    pub taker_buy_quote_asset_volume: Decimal,
}

#[derive(Debug, Deserialize)]
struct RawCandlestick(
    i64,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    i64,
    Decimal,
    u64,
    Decimal,
    Decimal,
    serde_json::Value,
);

impl From<RawCandlestick> for Candlestick {
    fn from(raw: RawCandlestick) -> Self {
        Self {
            open_time: raw.0,
            open: raw.1,
            high: raw.2,
            low: raw.3,
            close: raw.4,
            volume: raw.5,
            close_time: raw.6,
            quote_asset_volume: raw.7,
            num_trades: raw.8,
            taker_buy_base_asset_volume: raw.9,
            taker_buy_quote_asset_volume: raw.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPrice {
    pub symbol: String,
    pub mark_price: Decimal,
    #[serde(default)]
    pub index_price: Option<Decimal>,
    #[serde(default)]
    pub estimated_settle_price: Option<Decimal>,
    /// Empty on delivery contracts.
    #[serde(default, deserialize_with = "serde_helpers::deserialize_decimal_opt_lenient")]
    pub last_funding_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_decimal_opt_lenient")]
    pub interest_rate: Option<Decimal>,
    pub next_funding_time: i64,
    pub time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRate {
    pub symbol: String,
    pub funding_rate: Decimal,
    pub funding_time: i64,
    #[serde(default)]
    pub mark_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChangeTicker {
    pub symbol: String,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub weighted_avg_price: Decimal,
    pub last_price: Decimal,
    pub last_qty: Decimal,
    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub volume: Decimal,
    pub quote_volume: Decimal,
    pub open_time: i64,
    pub close_time: i64,
    pub first_id: i64,
    pub last_id: i64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolPrice {
    pub symbol: String,
    pub price: Decimal,
    #[serde(default)]
    pub time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolOrderBook {
    pub symbol: String,
    pub bid_price: Decimal,
    pub bid_qty: Decimal,
    pub ask_price: Decimal,
    pub ask_qty: Decimal,
    #[serde(default)]
    pub time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidationOrder {
    pub symbol: String,
    pub price: Decimal,
    pub orig_qty: Decimal,
    pub executed_qty: Decimal,
    pub average_price: Decimal,
    pub status: OrderStatus,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: OrderSide,
    pub time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterestStat {
    pub symbol: String,
    pub sum_open_interest: Decimal,
    pub sum_open_interest_value: Decimal,
    pub timestamp: i64,
}

/// Long/short ratio shared by the account, position and global ratio feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonLongShortRatio {
    pub symbol: String,
    pub long_short_ratio: Decimal,
    #[serde(default)]
    pub long_account: Option<Decimal>,
    #[serde(default)]
    pub short_account: Option<Decimal>,
    #[serde(default)]
    pub long_position: Option<Decimal>,
    #[serde(default)]
    pub short_position: Option<Decimal>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakerLongShortStat {
    pub buy_sell_ratio: Decimal,
    pub buy_vol: Decimal,
    pub sell_vol: Decimal,
    pub timestamp: i64,
}

// ### Trading

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    pub symbol: String,
    pub client_order_id: String,
    pub status: OrderStatus,
    pub side: OrderSide,
    #[serde(default = "default_position_side")]
    pub position_side: PositionSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub orig_type: Option<OrderType>,
    pub time_in_force: TimeInForce,
    pub price: Decimal,
    #[serde(default)]
    pub avg_price: Decimal,
    pub orig_qty: Decimal,
    #[serde(default)]
    pub executed_qty: Decimal,
    #[serde(default)]
    pub cum_quote: Decimal,
    #[serde(default)]
    pub stop_price: Decimal,
    #[serde(default)]
    pub activate_price: Option<Decimal>,
    #[serde(default)]
    pub price_rate: Option<Decimal>,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub close_position: bool,
    #[serde(default)]
    pub working_type: Option<WorkingType>,
    #[serde(default)]
    pub price_protect: bool,
    #[serde(default)]
    pub time: Option<i64>,
    pub update_time: i64,
}

fn default_position_side() -> PositionSide {
    PositionSide::Both
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyTrade {
    pub id: i64,
    pub order_id: i64,
    pub symbol: String,
    pub side: OrderSide,
    pub position_side: PositionSide,
    pub price: Decimal,
    pub qty: Decimal,
    pub quote_qty: Decimal,
    pub realized_pnl: Decimal,
    pub commission: Decimal,
    pub commission_asset: String,
    pub buyer: bool,
    pub maker: bool,
    pub time: i64,
}

// ### Account

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_alias: String,
    pub asset: String,
    pub balance: Decimal,
    pub cross_wallet_balance: Decimal,
    #[serde(rename = "crossUnPnl")]
    pub cross_un_pnl: Decimal,
    pub available_balance: Decimal,
    pub max_withdraw_amount: Decimal,
    #[serde(default)]
    pub margin_available: Option<bool>,
    pub update_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInformation {
    pub fee_tier: u32,
    pub can_trade: bool,
    pub can_deposit: bool,
    pub can_withdraw: bool,
    pub update_time: i64,
    pub total_initial_margin: Decimal,
    pub total_maint_margin: Decimal,
    pub total_wallet_balance: Decimal,
    pub total_unrealized_profit: Decimal,
    pub total_margin_balance: Decimal,
    pub total_position_initial_margin: Decimal,
    pub total_open_order_initial_margin: Decimal,
    pub total_cross_wallet_balance: Decimal,
    #[serde(rename = "totalCrossUnPnl")]
    pub total_cross_un_pnl: Decimal,
    pub available_balance: Decimal,
    pub max_withdraw_amount: Decimal,
    #[serde(default)]
    pub assets: Vec<AccountAsset>,
    #[serde(default)]
    pub positions: Vec<AccountPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAsset {
    pub asset: String,
    pub wallet_balance: Decimal,
    pub unrealized_profit: Decimal,
    pub margin_balance: Decimal,
    pub maint_margin: Decimal,
    pub initial_margin: Decimal,
    pub position_initial_margin: Decimal,
    pub open_order_initial_margin: Decimal,
    #[serde(default)]
    pub cross_wallet_balance: Option<Decimal>,
    #[serde(default, rename = "crossUnPnl")]
    pub cross_un_pnl: Option<Decimal>,
    #[serde(default)]
    pub available_balance: Option<Decimal>,
    #[serde(default)]
    pub max_withdraw_amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPosition {
    pub symbol: String,
    pub initial_margin: Decimal,
    pub maint_margin: Decimal,
    pub unrealized_profit: Decimal,
    pub position_initial_margin: Decimal,
    pub open_order_initial_margin: Decimal,
    pub leverage: Decimal,
    pub isolated: bool,
    pub entry_price: Decimal,
    pub max_notional: Decimal,
    pub position_side: PositionSide,
    pub position_amt: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leverage {
    pub symbol: String,
    pub leverage: u32,
    #[serde(default)]
    pub max_notional_value: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRisk {
    pub symbol: String,
    pub position_amt: Decimal,
    pub entry_price: Decimal,
    pub mark_price: Decimal,
    #[serde(rename = "unRealizedProfit")]
    pub unrealized_profit: Decimal,
    pub liquidation_price: Decimal,
    pub leverage: Decimal,
    #[serde(default)]
    pub max_notional_value: Option<Decimal>,
    pub margin_type: MarginType,
    #[serde(default)]
    pub isolated_margin: Decimal,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_bool_lenient")]
    pub is_auto_add_margin: bool,
    pub position_side: PositionSide,
    #[serde(default)]
    pub notional: Option<Decimal>,
    #[serde(default)]
    pub update_time: Option<i64>,
}

/// Entry of the isolated position margin change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDeltaLog {
    pub symbol: String,
    #[serde(rename = "type")]
    pub margin_type: PositionMarginType,
    pub amount: Decimal,
    pub asset: String,
    pub time: i64,
    #[serde(default)]
    pub position_side: Option<PositionSide>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    #[serde(default)]
    pub symbol: String,
    pub income_type: IncomeType,
    pub income: Decimal,
    pub asset: String,
    #[serde(default)]
    pub info: String,
    pub time: i64,
    #[serde(default)]
    pub tran_id: i64,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_string_lenient")]
    pub trade_id: String,
}

mod serde_helpers {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Treats `null` and `""` as absent.
    pub fn deserialize_decimal_opt_lenient<'de, D>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::Null => return Ok(None),
            Value::String(raw) => raw,
            Value::Number(number) => number.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "invalid decimal value {other}"
                )));
            }
        };
        match raw.trim() {
            "" => Ok(None),
            trimmed => trimmed
                .parse::<Decimal>()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }

    /// Accepts `true`, `"true"` and their false counterparts.
    pub fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Bool(value) => Ok(value),
            Value::String(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(serde::de::Error::custom),
            Value::Null => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid bool value {other}"))),
        }
    }

    /// Accepts strings and numbers, keeping the textual form.
    pub fn deserialize_string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(raw) => Ok(raw),
            Value::Number(number) => Ok(number.to_string()),
            Value::Null => Ok(String::new()),
            other => Err(serde::de::Error::custom(format!("invalid string value {other}"))),
        }
    }
}
