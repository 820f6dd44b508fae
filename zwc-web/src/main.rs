//! zwc-web - Zynthian web configurator
//!
//! Serves the dashboard, hardware wiring and keyboard binding pages.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zwc_common::config::{load_toml_config, locate_config_file, CliOverrides, SettingsResolver};
use zwc_common::ProcessEnv;
use zwc_web::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "zwc-web", version, about = "Zynthian web configurator")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:80
    #[arg(long)]
    bind: Option<String>,

    /// Appliance install root
    #[arg(long)]
    zynthian_dir: Option<PathBuf>,

    /// Appliance configuration directory
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// User data directory
    #[arg(long = "data-dir")]
    my_data_dir: Option<PathBuf>,

    /// Default log level (RUST_LOG overrides)
    #[arg(long, env = "ZWC_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind: self.bind.clone(),
            zynthian_dir: self.zynthian_dir.clone(),
            config_dir: self.config_dir.clone(),
            my_data_dir: self.my_data_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = Arc::new(ProcessEnv);

    // Tracing is not up yet, so a config problem is reported after init
    let config_path = locate_config_file(args.config.as_deref(), env.as_ref());
    let (toml, config_error) = load_toml_config(config_path.as_deref());
    let cli = args.overrides();
    let settings = SettingsResolver::new(&cli, env.as_ref(), &toml).resolve();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting Zynthian web configurator (zwc-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match (&config_path, config_error) {
        (_, Some(e)) => warn!("{} (using defaults)", e),
        (Some(path), None) => info!("Config file: {}", path.display()),
        (None, None) => info!("No config file found, using defaults"),
    }
    info!("Zynthian dir: {}", settings.zynthian_dir.display());
    info!("Config dir: {}", settings.config_dir.display());
    info!("Data dir: {}", settings.my_data_dir.display());
    if settings.session_token.is_some() {
        info!("Session check enabled");
    } else {
        info!("Session check disabled (no session token configured)");
    }

    let bind = settings.bind.clone();
    let state = AppState::new(settings, env);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("zwc-web listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
