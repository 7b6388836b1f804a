/*
[INPUT]:  Configuration fixtures and mock HTTP responses
[OUTPUT]: Test results for configuration layering and command execution
[POS]:    Integration tests - CLI
[UPDATE]: When commands or configuration keys change
*/

use std::path::PathBuf;
use std::time::Duration;

use binance_futures_adapter::FuturesClient;
use binance_futures_cli::{CliConfig, Command, ListenKeyAction, execute};
use config::{Environment, Map};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_yaml(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{name}-{}.yaml", std::process::id()));
    std::fs::write(&path, contents).expect("write config fixture");
    path
}

fn environment(vars: &[(&str, &str)]) -> Environment {
    let map: Map<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Environment::with_prefix("BINANCE").source(Some(map))
}

#[test]
fn test_yaml_file_is_loaded() {
    let path = write_yaml(
        "binance-cli-file",
        "api_key: file-key\nsecret_key: file-secret\nbase_url: https://testnet.binancefuture.com\nrecv_window: 5000\nread_timeout_ms: 1500\n",
    );

    let config = assert_ok!(CliConfig::from_sources(Some(path.as_path()), environment(&[])));
    assert_eq!(config.api_key.as_deref(), Some("file-key"));
    assert_eq!(config.recv_window, Some(5000));

    let options = config.request_options();
    assert_eq!(options.base_url, "https://testnet.binancefuture.com");
    assert_eq!(options.read_timeout, Duration::from_millis(1500));
    assert_eq!(options.recv_window, Some(5000));
    assert!(config.credentials().is_some());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_environment_overrides_file() {
    let path = write_yaml("binance-cli-env", "api_key: file-key\nsecret_key: file-secret\n");

    let config = assert_ok!(CliConfig::from_sources(
        Some(path.as_path()),
        environment(&[("BINANCE_API_KEY", "env-key"), ("BINANCE_RECV_WINDOW", "2500")]),
    ));
    assert_eq!(config.api_key.as_deref(), Some("env-key"));
    assert_eq!(config.secret_key.as_deref(), Some("file-secret"));
    assert_eq!(config.recv_window, Some(2500));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_file_is_an_error() {
    let path = PathBuf::from("/nonexistent/binance-cli.yaml");
    assert!(CliConfig::from_sources(Some(path.as_path()), environment(&[])).is_err());
}

#[test]
fn test_defaults_without_sources() {
    let config = assert_ok!(CliConfig::from_sources(None, environment(&[])));
    assert_eq!(config, CliConfig::default());
    assert!(config.credentials().is_none());
    assert_eq!(config.request_options().base_url, "https://fapi.binance.com");
}

#[tokio::test]
async fn test_depth_command_outputs_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fapi/v1/depth"))
        .and(query_param("symbol", "BTCUSDT"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"lastUpdateId":7,"bids":[["100.5","2"]],"asks":[["101","1"]]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = CliConfig {
        base_url: Some(server.uri()),
        ..CliConfig::default()
    };
    let output = tokio::task::spawn_blocking(move || {
        let client = FuturesClient::builder()
            .options(config.request_options())
            .build()
            .expect("client init");
        execute(
            &client,
            &Command::Depth {
                symbol: "BTCUSDT".to_string(),
                limit: None,
            },
        )
    })
    .await
    .expect("blocking task panicked")
    .expect("depth command failed");

    assert_eq!(output["lastUpdateId"], 7);
    assert_eq!(output["bids"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_listen_key_start_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/listenKey"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"listenKey":"key-123"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let config = CliConfig {
        base_url: Some(server.uri()),
        api_key: Some("k".to_string()),
        secret_key: Some("s".to_string()),
        ..CliConfig::default()
    };
    let output = tokio::task::spawn_blocking(move || {
        let client = FuturesClient::builder()
            .options(config.request_options())
            .credentials(config.credentials().expect("credentials configured"))
            .build()
            .expect("client init");
        execute(
            &client,
            &Command::ListenKey {
                action: ListenKeyAction::Start,
            },
        )
    })
    .await
    .expect("blocking task panicked")
    .expect("listen key command failed");

    assert_eq!(output["listenKey"], "key-123");
}
