//! campusgate-tui — terminal dashboard for campus web-filtering admin.

mod action;
mod app;
mod bridge;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use campusgate_core::ServiceConfig;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "campusgate-tui", version, about = "Campus web-filtering dashboard")]
struct Cli {
    /// Filtering service URL (overrides profile config)
    #[arg(long, env = "CAMPUSGATE_URL")]
    url: Option<String>,

    /// Named profile from the config file
    #[arg(long, short)]
    profile: Option<String>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Accept invalid TLS certificates (lab setups only)
    #[arg(long)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Auto-refresh interval in seconds (0 disables)
    #[arg(long)]
    refresh: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "/tmp/campusgate-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Logs go to a file; stdout belongs to the terminal UI.
fn setup_tracing(cli: &Cli) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let directory = cli.log_file.parent().unwrap_or_else(|| ".".as_ref());
    let file_name = cli
        .log_file
        .file_name()
        .unwrap_or_else(|| "campusgate-tui.log".as_ref());

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "campusgate_tui={level},campusgate_core={level},campusgate_api={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

/// CLI flags beat the profile, which beats the global defaults.
fn resolve_service(cli: &Cli) -> Result<ServiceConfig> {
    let mut service = if let Some(url) = &cli.url {
        ServiceConfig {
            base_url: url.clone(),
            ..ServiceConfig::default()
        }
    } else {
        let config = match &cli.config {
            Some(path) => campusgate_config::load_config_from(path)?,
            None => campusgate_config::load_config_or_default(),
        };

        match config.resolve_profile(cli.profile.as_deref()) {
            Ok((name, profile)) => {
                info!("using profile '{name}'");
                campusgate_config::profile_to_service_config(profile, &config.defaults)?
            }
            // No config file and no explicit profile: talk to a local
            // service rather than refusing to start.
            Err(campusgate_config::ConfigError::UnknownProfile { .. })
                if cli.profile.is_none() && config.profiles.is_empty() =>
            {
                info!("no profiles configured, using local defaults");
                ServiceConfig::default()
            }
            Err(e) => return Err(e.into()),
        }
    };

    if cli.insecure {
        service.accept_invalid_certs = true;
    }
    if let Some(timeout) = cli.timeout {
        service.timeout = Duration::from_secs(timeout);
    }
    if let Some(refresh) = cli.refresh {
        service.refresh_interval_secs = refresh;
    }

    Ok(service)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first so panics during init still restore the terminal.
    tui::install_hooks()?;
    let _guard = setup_tracing(&cli)?;

    let service = resolve_service(&cli)?;
    info!("connecting to {}", service.base_url);

    App::new(service).run().await
}
