/*
[INPUT]:  Layered configuration (YAML files + environment), terminal input
[OUTPUT]: Interactive trading session against the exchange
[POS]:    Binary entry point
[UPDATE]: When changing startup flow or fatal error handling
*/

mod cli;

use anyhow::Result;
use std::process::ExitCode;
use tracing::{error, info};

use binance_trade_adapter::{BinanceClient, Credentials};
use binance_trade_cli::{AppConfig, logging};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = AppConfig::load()?;
    let _log_guard = logging::init_tracing(&config.log_level, config.log_dir.as_deref())?;

    info!(
        base_url = %config.base_url,
        stream_url = %config.stream_url,
        "starting binance-trade"
    );

    let client = match build_client(&config) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "failed to initialize client");
            return Ok(ExitCode::FAILURE);
        }
    };

    cli::run_interactive(&client, &config).await?;
    Ok(ExitCode::SUCCESS)
}

fn build_client(config: &AppConfig) -> binance_trade_adapter::Result<BinanceClient> {
    let credentials = Credentials::new(config.api_key.as_str(), config.api_secret.as_str())?;
    BinanceClient::new(credentials, config.client_config())
}
