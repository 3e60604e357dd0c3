use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use lantern::config::ServerConfig;
use lantern::logger::DailyLogger;
use lantern::server::Listener;
use lantern::site::Site;

/// Serve a directory of static files over HTTP/1.1.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Config file (JSON, or YAML for .yaml/.yml). Created with defaults if missing.
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    if !config_path.exists() {
        println!(
            "Config not found at {}. Creating a default one.",
            config_path.display()
        );
        ServerConfig::write_default(&config_path)?;
    }

    let cfg = ServerConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    std::fs::create_dir_all(&cfg.web_root)
        .with_context(|| format!("creating web root {}", cfg.web_root.display()))?;

    let log_dir = cfg.log_dir();
    let logger = DailyLogger::open(&log_dir)
        .with_context(|| format!("opening log directory {}", log_dir.display()))?;

    let site = Arc::new(Site::new(&cfg.web_root, cfg.enable_gzip, Arc::new(logger))?);
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, cfg.port));
    let listener = Listener::bind(addr, site).await?;

    println!(
        "Server listening on port {}, serving {}",
        cfg.port,
        cfg.web_root.display()
    );
    println!("Press Ctrl+C to exit.");

    listener
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    Ok(())
}

fn default_config_path() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("locating executable")?;
    let dir = exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(dir.join("serverconfig.json"))
}
