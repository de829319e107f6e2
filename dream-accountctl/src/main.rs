//! `dream-accountctl`: drive the account client from a shell.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dream_account_config::validation::{normalize_base_url, parse_timeout};
use dream_account_config::{ConfigLoad, ConfigLoader, StaticSettings};
use dream_account_core::{AccountSession, ReqwestTransport};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command, ServerArgs};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = load_settings(&cli.server)?;
    let transport = ReqwestTransport::new().context("failed to build HTTP client")?;
    let session = AccountSession::new(transport, settings.clone());

    match cli.command {
        Command::Register(args) => commands::register(&session, args).await,
        Command::Login {
            credentials,
            authenticate,
        } => commands::login(&session, credentials, authenticate).await,
        Command::Ping { url } => commands::ping(&session, &settings, url).await,
    }
}

fn load_settings(args: &ServerArgs) -> anyhow::Result<StaticSettings> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad {
        mut config,
        mut warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(raw) = &args.base_url {
        config.server.base_url = Some(normalize_base_url(raw, &mut warnings)?);
    }
    if let Some(raw) = &args.timeout {
        config.server.timeout = parse_timeout(raw)?;
    }

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "loaded config file");
    }
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    Ok(StaticSettings::from(&config))
}
