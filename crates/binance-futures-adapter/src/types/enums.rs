/*
[INPUT]:  Exchange wire vocabulary (sides, order types, intervals, ...)
[OUTPUT]: Typed Rust enums with serde support and wire-string Display
[POS]:    Data layer - enumerations shared by requests and responses
[UPDATE]: When the exchange adds enum values or new parameter vocabularies
*/

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

/// Position side; `Both` is the only value accepted in one-way mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSide {
    Both,
    Long,
    Short,
}

impl PositionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSide::Both => "BOTH",
            PositionSide::Long => "LONG",
            PositionSide::Short => "SHORT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    Stop,
    StopMarket,
    TakeProfit,
    TakeProfitMarket,
    TrailingStopMarket,
    Liquidation,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::Stop => "STOP",
            OrderType::StopMarket => "STOP_MARKET",
            OrderType::TakeProfit => "TAKE_PROFIT",
            OrderType::TakeProfitMarket => "TAKE_PROFIT_MARKET",
            OrderType::TrailingStopMarket => "TRAILING_STOP_MARKET",
            OrderType::Liquidation => "LIQUIDATION",
        }
    }

    /// Order types that rest on the book at a limit price.
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::Stop | OrderType::TakeProfit)
    }

    /// Order types that carry a trigger price.
    pub fn requires_stop_price(&self) -> bool {
        matches!(
            self,
            OrderType::Stop
                | OrderType::StopMarket
                | OrderType::TakeProfit
                | OrderType::TakeProfitMarket
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Fok,
    /// Good till crossing (post only)
    Gtx,
    Gtd,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
            TimeInForce::Gtx => "GTX",
            TimeInForce::Gtd => "GTD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkingType {
    MarkPrice,
    ContractPrice,
}

impl WorkingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkingType::MarkPrice => "MARK_PRICE",
            WorkingType::ContractPrice => "CONTRACT_PRICE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewOrderRespType {
    Ack,
    Result,
}

impl NewOrderRespType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewOrderRespType::Ack => "ACK",
            NewOrderRespType::Result => "RESULT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
    ExpiredInMatch,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Expired => "EXPIRED",
            OrderStatus::ExpiredInMatch => "EXPIRED_IN_MATCH",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::New | OrderStatus::PartiallyFilled)
    }
}

/// Margin mode. Requests use `ISOLATED`/`CROSSED`, position payloads report
/// lowercase `isolated`/`cross`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarginType {
    #[serde(rename = "ISOLATED", alias = "isolated")]
    Isolated,
    #[serde(rename = "CROSSED", alias = "cross", alias = "crossed", alias = "CROSS")]
    Crossed,
}

impl MarginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarginType::Isolated => "ISOLATED",
            MarginType::Crossed => "CROSSED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandlestickInterval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    HalfHourly,
    #[serde(rename = "1h")]
    Hourly,
    #[serde(rename = "2h")]
    TwoHourly,
    #[serde(rename = "4h")]
    FourHourly,
    #[serde(rename = "6h")]
    SixHourly,
    #[serde(rename = "8h")]
    EightHourly,
    #[serde(rename = "12h")]
    TwelveHourly,
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "3d")]
    ThreeDaily,
    #[serde(rename = "1w")]
    Weekly,
    #[serde(rename = "1M")]
    Monthly,
}

impl CandlestickInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandlestickInterval::OneMinute => "1m",
            CandlestickInterval::ThreeMinutes => "3m",
            CandlestickInterval::FiveMinutes => "5m",
            CandlestickInterval::FifteenMinutes => "15m",
            CandlestickInterval::HalfHourly => "30m",
            CandlestickInterval::Hourly => "1h",
            CandlestickInterval::TwoHourly => "2h",
            CandlestickInterval::FourHourly => "4h",
            CandlestickInterval::SixHourly => "6h",
            CandlestickInterval::EightHourly => "8h",
            CandlestickInterval::TwelveHourly => "12h",
            CandlestickInterval::Daily => "1d",
            CandlestickInterval::ThreeDaily => "3d",
            CandlestickInterval::Weekly => "1w",
            CandlestickInterval::Monthly => "1M",
        }
    }
}

/// Aggregation period of the `/futures/data` statistics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::FiveMinutes => "5m",
            PeriodType::FifteenMinutes => "15m",
            PeriodType::ThirtyMinutes => "30m",
            PeriodType::OneHour => "1h",
            PeriodType::TwoHours => "2h",
            PeriodType::FourHours => "4h",
            PeriodType::SixHours => "6h",
            PeriodType::TwelveHours => "12h",
            PeriodType::OneDay => "1d",
        }
    }
}

/// Income record categories. Unrecognized categories deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeType {
    Transfer,
    WelcomeBonus,
    RealizedPnl,
    FundingFee,
    Commission,
    InsuranceClear,
    ReferralKickback,
    CommissionRebate,
    ApiRebate,
    ContestReward,
    CrossCollateralTransfer,
    InternalTransfer,
    AutoExchange,
    #[serde(other)]
    Other,
}

impl IncomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeType::Transfer => "TRANSFER",
            IncomeType::WelcomeBonus => "WELCOME_BONUS",
            IncomeType::RealizedPnl => "REALIZED_PNL",
            IncomeType::FundingFee => "FUNDING_FEE",
            IncomeType::Commission => "COMMISSION",
            IncomeType::InsuranceClear => "INSURANCE_CLEAR",
            IncomeType::ReferralKickback => "REFERRAL_KICKBACK",
            IncomeType::CommissionRebate => "COMMISSION_REBATE",
            IncomeType::ApiRebate => "API_REBATE",
            IncomeType::ContestReward => "CONTEST_REWARD",
            IncomeType::CrossCollateralTransfer => "CROSS_COLLATERAL_TRANSFER",
            IncomeType::InternalTransfer => "INTERNAL_TRANSFER",
            IncomeType::AutoExchange => "AUTO_EXCHANGE",
            IncomeType::Other => "OTHER",
        }
    }
}

/// Direction of an isolated margin adjustment. Sent and received as `1`/`2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PositionMarginType {
    Add,
    Reduce,
}

impl PositionMarginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionMarginType::Add => "1",
            PositionMarginType::Reduce => "2",
        }
    }
}

impl From<PositionMarginType> for u8 {
    fn from(value: PositionMarginType) -> Self {
        match value {
            PositionMarginType::Add => 1,
            PositionMarginType::Reduce => 2,
        }
    }
}

impl TryFrom<u8> for PositionMarginType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PositionMarginType::Add),
            2 => Ok(PositionMarginType::Reduce),
            other => Err(format!("unknown position margin type {other}")),
        }
    }
}

macro_rules! impl_wire_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

impl_wire_display!(
    OrderSide,
    PositionSide,
    OrderType,
    TimeInForce,
    WorkingType,
    NewOrderRespType,
    OrderStatus,
    MarginType,
    CandlestickInterval,
    PeriodType,
    IncomeType,
    PositionMarginType,
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OrderType::StopMarket, "STOP_MARKET")]
    #[case(OrderType::TrailingStopMarket, "TRAILING_STOP_MARKET")]
    #[case(OrderType::TakeProfit, "TAKE_PROFIT")]
    fn order_type_display_matches_serde(#[case] value: OrderType, #[case] wire: &str) {
        assert_eq!(value.to_string(), wire);
        assert_eq!(serde_json::to_string(&value).unwrap(), format!("\"{wire}\""));
    }

    #[rstest]
    #[case(CandlestickInterval::OneMinute, "1m")]
    #[case(CandlestickInterval::Monthly, "1M")]
    #[case(CandlestickInterval::EightHourly, "8h")]
    fn interval_wire_strings(#[case] value: CandlestickInterval, #[case] wire: &str) {
        assert_eq!(value.as_str(), wire);
        let parsed: CandlestickInterval = serde_json::from_str(&format!("\"{wire}\"")).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn margin_type_accepts_position_payload_spelling() {
        let cross: MarginType = serde_json::from_str("\"cross\"").unwrap();
        let isolated: MarginType = serde_json::from_str("\"isolated\"").unwrap();
        assert_eq!(cross, MarginType::Crossed);
        assert_eq!(isolated, MarginType::Isolated);
        assert_eq!(cross.to_string(), "CROSSED");
    }

    #[test]
    fn unknown_income_type_maps_to_other() {
        let parsed: IncomeType = serde_json::from_str("\"STRATEGY_UMFUTURES_TRANSFER\"").unwrap();
        assert_eq!(parsed, IncomeType::Other);
    }

    #[test]
    fn position_margin_type_is_numeric() {
        assert_eq!(serde_json::to_string(&PositionMarginType::Reduce).unwrap(), "2");
        let parsed: PositionMarginType = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, PositionMarginType::Add);
        assert!(serde_json::from_str::<PositionMarginType>("3").is_err());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!OrderStatus::New.is_terminal());
        assert!(!OrderStatus::PartiallyFilled.is_terminal());
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
    }
}
