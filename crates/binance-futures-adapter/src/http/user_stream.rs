/*
[INPUT]:  Listen keys
[OUTPUT]: User data stream lifecycle (start, keepalive, close)
[POS]:    HTTP layer - USER_STREAM endpoints (API key, no signature)
[UPDATE]: When the listen key lifecycle changes
*/

use serde::de::IgnoredAny;

use crate::http::endpoint;
use crate::http::{FuturesClient, Params, Result};
use crate::types::ListenKey;

impl FuturesClient {
    /// Open a user data stream and return its listen key.
    ///
    /// POST /fapi/v1/listenKey
    pub fn start_user_data_stream(&self) -> Result<String> {
        let key: ListenKey = self.dispatch(&endpoint::LISTEN_KEY_START, Params::new())?;
        Ok(key.listen_key)
    }

    /// Extend the validity of a listen key.
    ///
    /// PUT /fapi/v1/listenKey
    pub fn keep_user_data_stream(&self, listen_key: &str) -> Result<()> {
        let params = Params::new().with("listenKey", listen_key);
        self.dispatch::<IgnoredAny>(&endpoint::LISTEN_KEY_KEEPALIVE, params)?;
        Ok(())
    }

    /// DELETE /fapi/v1/listenKey
    pub fn close_user_data_stream(&self, listen_key: &str) -> Result<()> {
        let params = Params::new().with("listenKey", listen_key);
        self.dispatch::<IgnoredAny>(&endpoint::LISTEN_KEY_CLOSE, params)?;
        Ok(())
    }
}
