/*
[INPUT]:  CLI arguments, optional YAML configuration file, BINANCE_* environment
[OUTPUT]: Pretty-printed JSON result on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use binance_futures_adapter::FuturesClient;
use binance_futures_cli::{Cli, CliConfig, execute};

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = CliConfig::load(args.config_path.as_deref()).context("load config")?;
    let options = config.request_options();
    info!(base_url = %options.base_url, "configuration loaded");

    let mut builder = FuturesClient::builder().options(options);
    match config.credentials() {
        Some(credentials) => builder = builder.credentials(credentials),
        None if args.command.requires_credentials() => {
            bail!("this command needs BINANCE_API_KEY and BINANCE_SECRET_KEY (or api_key/secret_key in the config file)")
        }
        None => {}
    }
    let client = builder.build().context("build futures client")?;

    let output = execute(&client, &args.command)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("render output")?
    );
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
