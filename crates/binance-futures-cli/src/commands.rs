/*
[INPUT]:  Parsed command and a configured futures client
[OUTPUT]: JSON value of the command result
[POS]:    Command layer - maps CLI commands to client calls
[UPDATE]: When adding commands
*/

use anyhow::{Context, Result};
use binance_futures_adapter::FuturesClient;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::cli::{Command, ListenKeyAction};

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).context("encode result as JSON")
}

/// Run one command against the exchange.
pub fn execute(client: &FuturesClient, command: &Command) -> Result<Value> {
    debug!(?command, "executing command");
    match command {
        Command::Ping => {
            client.ping().context("ping")?;
            Ok(json!({ "ping": "ok" }))
        }
        Command::Time => to_json(client.server_time().context("server time")?),
        Command::Depth { symbol, limit } => {
            to_json(client.order_book(symbol, *limit).context("order book")?)
        }
        Command::Ticker { symbol } => {
            to_json(client.ticker_24hr(symbol.as_deref()).context("24h ticker")?)
        }
        Command::MarkPrice { symbol } => {
            to_json(client.mark_price(symbol.as_deref()).context("mark price")?)
        }
        Command::Balance => to_json(client.balance(None).context("balance")?),
        Command::Account => to_json(
            client
                .account_information(None)
                .context("account information")?,
        ),
        Command::Positions { symbol } => to_json(
            client
                .position_risk(symbol.as_deref(), None)
                .context("position risk")?,
        ),
        Command::OpenOrders { symbol } => to_json(
            client
                .open_orders(symbol.as_deref(), None)
                .context("open orders")?,
        ),
        Command::Leverage { symbol, leverage } => to_json(
            client
                .change_initial_leverage(symbol, *leverage, None)
                .context("change leverage")?,
        ),
        Command::ListenKey { action } => match action {
            ListenKeyAction::Start => {
                let key = client
                    .start_user_data_stream()
                    .context("start user data stream")?;
                Ok(json!({ "listenKey": key }))
            }
            ListenKeyAction::Keepalive { key } => {
                client
                    .keep_user_data_stream(key)
                    .context("keep user data stream alive")?;
                Ok(json!({ "listenKey": key, "status": "extended" }))
            }
            ListenKeyAction::Close { key } => {
                client
                    .close_user_data_stream(key)
                    .context("close user data stream")?;
                Ok(json!({ "listenKey": key, "status": "closed" }))
            }
        },
    }
}
