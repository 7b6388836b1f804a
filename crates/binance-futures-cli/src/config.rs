/*
[INPUT]:  Optional YAML configuration file and BINANCE_* environment variables
[OUTPUT]: Request options and credentials for the futures client
[POS]:    Configuration layer - layered settings
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use binance_futures_adapter::{Credentials, RequestOptions};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "BINANCE";

/// CLI configuration. Every field is optional; unset fields keep the
/// client defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    pub base_url: Option<String>,
    pub connect_timeout_ms: Option<u64>,
    pub read_timeout_ms: Option<u64>,
    pub proxy: Option<String>,
    pub recv_window: Option<u64>,
}

impl CliConfig {
    /// Load the YAML file (when given) overlaid with `BINANCE_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_sources(path, Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_sources(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            let path_str = path.to_str().context("config path must be valid utf-8")?;
            builder = builder.add_source(File::new(path_str, FileFormat::Yaml).required(true));
        }

        builder
            .add_source(environment.try_parsing(true))
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")
    }

    pub fn request_options(&self) -> RequestOptions {
        let mut options = RequestOptions::default();
        if let Some(base_url) = &self.base_url {
            options.base_url = base_url.clone();
        }
        if let Some(ms) = self.connect_timeout_ms {
            options.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.read_timeout_ms {
            options.read_timeout = Duration::from_millis(ms);
        }
        options.proxy = self.proxy.clone();
        options.recv_window = self.recv_window;
        options
    }

    /// Credentials when both halves of the key pair are present.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.api_key, &self.secret_key) {
            (Some(api_key), Some(secret_key)) => Some(Credentials::new(api_key, secret_key)),
            _ => None,
        }
    }
}
