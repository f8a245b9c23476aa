//! rankboard server binary.
//!
//! Reads `rankboard.toml` (or the path specified with `--config`), loads the
//! profile snapshot it points at, and serves the dashboard API over HTTP.
//!
//! # Text dashboard
//!
//! To print the dashboard for the configured snapshot and exit:
//!
//! ```
//! cargo run -p rankboard-server -- --print
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use rankboard_api::InMemorySession;
use rankboard_server::{ServerConfig, dashboard::Dashboard, load_profile};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Rankboard profile dashboard server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rankboard.toml")]
  config: PathBuf,

  /// Print the text dashboard for the loaded profile and exit.
  #[arg(long)]
  print: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;
  let settings = server_cfg.api_settings();

  let profile = load_profile(&server_cfg.profile_path).with_context(|| {
    format!("failed to load profile from {:?}", server_cfg.profile_path)
  })?;

  // Helper mode: render and exit.
  if cli.print {
    print!("{}", Dashboard::new(&profile, &settings));
    return Ok(());
  }

  tracing::info!(
    profile_id = %profile.id,
    matches = profile.history.len(),
    "loaded profile snapshot"
  );

  let session = Arc::new(InMemorySession::new(profile));
  let app = rankboard_server::router(session, settings);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
