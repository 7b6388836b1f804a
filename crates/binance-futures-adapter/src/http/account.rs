/*
[INPUT]:  Account settings, margin adjustments and history queries
[OUTPUT]: Balances, account state, positions and income records
[POS]:    HTTP layer - account endpoints (require API key + signature)
[UPDATE]: When adding account endpoints or when response payloads change
*/

use crate::http::endpoint;
use crate::http::{BinanceError, FuturesClient, Params, Result};
use crate::types::{
    AccountBalance, AccountInformation, Income, IncomeQuery, Leverage, MarginType,
    PositionMarginHistoryQuery, PositionMarginRequest, PositionMarginResponse, PositionMode,
    PositionRisk, ResponseResult, WalletDeltaLog,
};

/// Leverage bounds the exchange accepts on any symbol.
const LEVERAGE_RANGE: std::ops::RangeInclusive<u32> = 1..=125;

impl FuturesClient {
    /// Switch between hedge mode (`true`) and one-way mode (`false`).
    ///
    /// POST /fapi/v1/positionSide/dual
    pub fn change_position_mode(
        &self,
        dual_side_position: bool,
        timestamp: Option<u64>,
    ) -> Result<ResponseResult> {
        let params = Params::new()
            .with("dualSidePosition", dual_side_position)
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::CHANGE_POSITION_MODE, params)
    }

    /// GET /fapi/v1/positionSide/dual
    pub fn position_mode(&self, timestamp: Option<u64>) -> Result<PositionMode> {
        self.dispatch(
            &endpoint::POSITION_MODE,
            Params::new().with_timestamp(timestamp),
        )
    }

    /// POST /fapi/v1/marginType
    pub fn change_margin_type(
        &self,
        symbol: &str,
        margin_type: MarginType,
        timestamp: Option<u64>,
    ) -> Result<ResponseResult> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("marginType", margin_type)
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::CHANGE_MARGIN_TYPE, params)
    }

    /// Add or remove isolated margin
    ///
    /// POST /fapi/v1/positionMargin
    pub fn modify_isolated_position_margin(
        &self,
        request: &PositionMarginRequest,
    ) -> Result<PositionMarginResponse> {
        self.dispatch(&endpoint::POSITION_MARGIN, request.to_params()?)
    }

    /// GET /fapi/v1/positionMargin/history
    pub fn position_margin_history(
        &self,
        query: &PositionMarginHistoryQuery,
    ) -> Result<Vec<WalletDeltaLog>> {
        self.dispatch(&endpoint::POSITION_MARGIN_HISTORY, query.to_params())
    }

    /// Query futures wallet balances
    ///
    /// GET /fapi/v2/balance
    pub fn balance(&self, timestamp: Option<u64>) -> Result<Vec<AccountBalance>> {
        self.dispatch(&endpoint::BALANCE, Params::new().with_timestamp(timestamp))
    }

    /// GET /fapi/v2/account
    pub fn account_information(&self, timestamp: Option<u64>) -> Result<AccountInformation> {
        self.dispatch(&endpoint::ACCOUNT, Params::new().with_timestamp(timestamp))
    }

    /// Change leverage for a symbol
    ///
    /// POST /fapi/v1/leverage
    pub fn change_initial_leverage(
        &self,
        symbol: &str,
        leverage: u32,
        timestamp: Option<u64>,
    ) -> Result<Leverage> {
        if !LEVERAGE_RANGE.contains(&leverage) {
            return Err(BinanceError::InvalidRequest(format!(
                "leverage must be within {}..={}, got {leverage}",
                LEVERAGE_RANGE.start(),
                LEVERAGE_RANGE.end()
            )));
        }
        let params = Params::new()
            .with("symbol", symbol)
            .with("leverage", leverage)
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::LEVERAGE, params)
    }

    /// Position details; all symbols when `symbol` is `None`.
    ///
    /// GET /fapi/v2/positionRisk
    pub fn position_risk(
        &self,
        symbol: Option<&str>,
        timestamp: Option<u64>,
    ) -> Result<Vec<PositionRisk>> {
        let params = Params::new()
            .with_opt("symbol", symbol)
            .with_timestamp(timestamp);
        self.dispatch(&endpoint::POSITION_RISK, params)
    }

    /// GET /fapi/v1/income
    pub fn income_history(&self, query: &IncomeQuery) -> Result<Vec<Income>> {
        self.dispatch(&endpoint::INCOME, query.to_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::http::{ErrorKind, RequestOptions};
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(126)]
    fn test_leverage_out_of_range(#[case] leverage: u32) {
        let client = FuturesClient::builder()
            .credentials(Credentials::new("key", "secret"))
            .options(RequestOptions::default().with_base_url("http://127.0.0.1:9"))
            .build()
            .unwrap();
        let err = client
            .change_initial_leverage("BTCUSDT", leverage, None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_margin_type_wire_value() {
        let client = FuturesClient::builder()
            .credentials(Credentials::new("key", "secret"))
            .build()
            .unwrap();
        let params = Params::new()
            .with("symbol", "BTCUSDT")
            .with("marginType", MarginType::Crossed)
            .with_timestamp(Some(7));
        let prepared = client.prepare(&endpoint::CHANGE_MARGIN_TYPE, params).unwrap();
        assert!(prepared
            .query
            .starts_with("symbol=BTCUSDT&marginType=CROSSED&timestamp=7&signature="));
    }
}
