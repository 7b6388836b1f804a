/*
[INPUT]:  Command-line arguments
[OUTPUT]: Parsed global flags and subcommand
[POS]:    CLI layer - argument definitions
[UPDATE]: When adding commands or flags
*/

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "binance-futures-cli",
    version,
    about = "Binance USDⓈ-M futures REST client"
)]
pub struct Cli {
    /// Optional YAML file; BINANCE_* environment variables override it
    #[arg(long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Test connectivity
    Ping,
    /// Exchange server time
    Time,
    /// Order book depth
    Depth {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// 24h price change statistics
    Ticker {
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Mark price and funding rate
    MarkPrice {
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Futures wallet balances
    Balance,
    /// Account information
    Account,
    /// Position risk
    Positions {
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Open orders
    OpenOrders {
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Change initial leverage of a symbol
    Leverage {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        leverage: u32,
    },
    /// User data stream listen key
    ListenKey {
        #[command(subcommand)]
        action: ListenKeyAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ListenKeyAction {
    Start,
    Keepalive { key: String },
    Close { key: String },
}

impl Command {
    /// Commands that hit API-key protected endpoints.
    pub fn requires_credentials(&self) -> bool {
        matches!(
            self,
            Command::Balance
                | Command::Account
                | Command::Positions { .. }
                | Command::OpenOrders { .. }
                | Command::Leverage { .. }
                | Command::ListenKey { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_depth() {
        let cli = Cli::try_parse_from(["binance-futures-cli", "depth", "--symbol", "BTCUSDT", "--limit", "5"])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Depth {
                symbol: "BTCUSDT".to_string(),
                limit: Some(5)
            }
        );
        assert_eq!(cli.log_level, "warn");
        assert!(cli.config_path.is_none());
    }

    #[test]
    fn test_parse_listen_key_keepalive() {
        let cli = Cli::try_parse_from([
            "binance-futures-cli",
            "--log-level",
            "debug",
            "listen-key",
            "keepalive",
            "abc",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::ListenKey {
                action: ListenKeyAction::Keepalive {
                    key: "abc".to_string()
                }
            }
        );
        assert!(cli.command.requires_credentials());
    }

    #[test]
    fn test_leverage_requires_arguments() {
        assert!(Cli::try_parse_from(["binance-futures-cli", "leverage", "--symbol", "BTCUSDT"]).is_err());
    }

    #[test]
    fn test_public_commands_need_no_credentials() {
        assert!(!Command::Ping.requires_credentials());
        assert!(!Command::MarkPrice { symbol: None }.requires_credentials());
    }
}
