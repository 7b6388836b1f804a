/*
[INPUT]:  Symbol, aggregation period and time range
[OUTPUT]: Open interest and long/short ratio series
[POS]:    HTTP layer - public trading statistics under /futures/data
[UPDATE]: When adding statistics endpoints
*/

use crate::http::endpoint;
use crate::http::{FuturesClient, Result};
use crate::types::{CommonLongShortRatio, OpenInterestStat, StatisticsQuery, TakerLongShortStat};

impl FuturesClient {
    /// GET /futures/data/openInterestHist
    pub fn open_interest_stat(&self, query: &StatisticsQuery) -> Result<Vec<OpenInterestStat>> {
        self.dispatch(&endpoint::OPEN_INTEREST_HIST, query.to_params())
    }

    /// Long/short account ratio of top traders
    ///
    /// GET /futures/data/topLongShortAccountRatio
    pub fn top_trader_account_ratio(
        &self,
        query: &StatisticsQuery,
    ) -> Result<Vec<CommonLongShortRatio>> {
        self.dispatch(&endpoint::TOP_ACCOUNT_RATIO, query.to_params())
    }

    /// Long/short position ratio of top traders
    ///
    /// GET /futures/data/topLongShortPositionRatio
    pub fn top_trader_position_ratio(
        &self,
        query: &StatisticsQuery,
    ) -> Result<Vec<CommonLongShortRatio>> {
        self.dispatch(&endpoint::TOP_POSITION_RATIO, query.to_params())
    }

    /// GET /futures/data/globalLongShortAccountRatio
    pub fn global_account_ratio(
        &self,
        query: &StatisticsQuery,
    ) -> Result<Vec<CommonLongShortRatio>> {
        self.dispatch(&endpoint::GLOBAL_ACCOUNT_RATIO, query.to_params())
    }

    /// GET /futures/data/takerlongshortRatio
    pub fn taker_long_short_ratio(&self, query: &StatisticsQuery) -> Result<Vec<TakerLongShortStat>> {
        self.dispatch(&endpoint::TAKER_LONG_SHORT_RATIO, query.to_params())
    }
}
