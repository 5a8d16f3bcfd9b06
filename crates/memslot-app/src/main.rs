mod cli;
mod commands;
mod loopback;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use memslot_bridge::{connect, SlotPanel};
use memslot_config::MemslotConfig;
use memslot_host::{GameSettings, MemoryProcess};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::loopback::Loopback;

const DEFAULT_LOG_DIRECTIVE: &str = "memslot=info";

fn init_logging(directive: &str) {
    let directive = directive.parse().unwrap_or_else(|_| {
        DEFAULT_LOG_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let loaded = match &args.config {
        Some(path) => memslot_config::load_config_from(Path::new(path)),
        None => memslot_config::load_config(),
    };

    let directive = args.log_level.clone().unwrap_or_else(|| match &loaded {
        Ok(config) => config.logging.level.clone(),
        Err(_) => DEFAULT_LOG_DIRECTIVE.to_string(),
    });
    init_logging(&directive);

    tracing::info!("memslot v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        MemslotConfig::default()
    });
    if let Err(e) = memslot_config::validation::validate(&config) {
        tracing::warn!("{e}");
    }

    // The loopback must outlive the command so its host tasks keep running.
    let (service, _loopback) = if args.offline || config.bridge.offline {
        (connect(None).service, None)
    } else {
        let process = Arc::new(MemoryProcess::ready(GameSettings::default()));
        match Loopback::spawn(&config.host, process) {
            Ok(loopback) => (Arc::clone(&loopback.connection.service), Some(loopback)),
            Err(e) => {
                tracing::warn!("Host unavailable, falling back to offline data: {e}");
                (connect(None).service, None)
            }
        }
    };

    let mut panel = SlotPanel::new(service);
    let mut stdout = std::io::stdout();
    match commands::run(&args.command, &mut panel, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
