mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod log_layer;
mod mpv;
mod theme;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::broadcast;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use radio_core::config::Config;
use radio_core::controller::Controller;
use radio_core::platform;

use crate::log_layer::UiLogLayer;
use crate::mpv::MpvLauncher;

#[derive(Parser, Debug)]
#[command(name = "radioplayer", about = "Internet radio player in the terminal")]
struct Args {
    /// Station list to load at startup (overrides the config file).
    #[arg(long, value_name = "FILE")]
    stations: Option<PathBuf>,

    /// Initial volume, 0–100.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: Option<u8>,

    /// Only look for mpv on PATH.
    #[arg(long)]
    system_mpv: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (log_tx, log_rx) = broadcast::channel::<String>(64);

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("radioplayer.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(UiLogLayer::new(log_tx))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,radio_core=debug,radioplayer=debug")
            }),
        )
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("radioplayer log: {}", log_path.display());
    tracing::info!("radioplayer starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config: {:#}, using defaults", e);
        Config::default()
    });
    if let Some(volume) = args.volume {
        config.player.default_volume = f32::from(volume);
    }
    if args.system_mpv {
        config.player.use_system_mpv = true;
    }
    platform::set_use_system_deps(config.player.use_system_mpv);

    let stations_file = args.stations.or_else(|| config.stations.stations_file.clone());

    // ── Controller + UI ──────────────────────────────────────────────────────
    let controller = Controller::new(
        MpvLauncher::new(),
        config.engine_options(),
        config.default_station(),
    );
    let mut app = app::App::new(controller, config.player.audio_client_name.clone());
    app.startup(stations_file).await;
    app.run(log_rx).await?;

    Ok(())
}
