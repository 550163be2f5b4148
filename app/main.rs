use std::sync::Arc;

use clap::Parser;
use cli::AppCli;
use errors::AppResult;
use relay::RelayHandler;
use rtsp_server::server::RtspServer;
use tokio::signal;

use crate::config::AppConfig;

mod cli;
mod config;
mod errors;
mod relay;
mod util;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("nvr_rtsp exit with error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = AppCli::parse();
    let mut config = AppConfig::new(cli.config.clone())?;
    config.apply(cli);
    config.validate()?;

    let _log_guard = util::init_logger(&config.logger)?;
    tracing::info!("nvr_rtsp is starting, paths: {}", config.paths.len());

    let relay = Arc::new(RelayHandler::new(&config.paths)?);
    let server = Arc::new(RtspServer::bind((&config.rtsp_server).into(), relay.clone()).await?);

    let runner = server.clone();
    let server_task = tokio::spawn(async move {
        if let Err(err) = runner.run().await {
            tracing::error!("rtsp server exit with err: {}", err);
        }
    });

    tracing::info!("rtsp server is started on {}", server.local_addr()?);
    let _ = signal::ctrl_c().await;

    tracing::info!("shutting down");
    server.close();
    relay.close();
    let _ = server_task.await;
    Ok(())
}
