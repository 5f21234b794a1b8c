//! Telldus Live watch app host.
//!
//! Runs the watch-side dispatcher against a simulated phone: commands come in
//! as JSON lines on stdin, outbound frames go out as JSON lines on stdout, and
//! everything the watch would draw is logged to stderr.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ WatchConfig::load()          -- TOML file, CLI overrides
//!  └─ Dispatcher::new()            -- LogDisplay + StdoutChannel
//!  └─ pump_lines() task            -- stdin ─► mpsc
//!  └─ Host::run()                  -- mpsc ─► Dispatcher::handle_event
//! ```
//!
//! Example session:
//!
//! ```bash
//! printf '%s\n' \
//!   '{"inbound": {"module": "auth", "action": "done"}}' \
//!   '{"inbound": {"module": "device", "action": "add", "name": "Lamp", "id": 7}}' \
//!   '{"select": 0}' | RUST_LOG=debug tlive-watch
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tlive_watch::application::{Dispatcher, OutboundChannel, Variant, WatchDisplay};
use tlive_watch::infrastructure::{
    channel::StdoutChannel,
    display::LogDisplay,
    simulator::{pump_lines, Host},
    storage::WatchConfig,
};

/// Capacity of the stdin ─► host queue.
const INPUT_QUEUE_DEPTH: usize = 32;

#[derive(Debug, Parser)]
#[command(
    name = "tlive-watch",
    about = "Telldus Live watch app driven by a simulated phone on stdin/stdout",
    version
)]
struct Cli {
    /// Path to a TOML config file.  Missing files fall back to defaults.
    #[arg(long, default_value = "tlive-watch.toml", env = "TLIVE_CONFIG")]
    config: PathBuf,

    /// App variant, overriding the config file.
    #[arg(long, env = "TLIVE_VARIANT")]
    variant: Option<Variant>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<WatchConfig> {
        let mut cfg = WatchConfig::load(&self.config)
            .with_context(|| format!("failed to load config from '{}'", self.config.display()))?;
        if let Some(variant) = self.variant {
            cfg.variant = variant;
        }
        Ok(cfg)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = cli.load_config()?;

    if cli.print_config {
        print!("{}", cfg.to_toml_string().context("failed to render config")?);
        return Ok(());
    }

    // Stdout carries the simulator protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level)),
        )
        .init();

    let dispatcher_cfg = cfg.dispatcher_config();
    info!(
        variant = ?dispatcher_cfg.variant,
        inbox = dispatcher_cfg.inbox_size,
        outbox = dispatcher_cfg.outbox_size,
        "Telldus Live watch app starting"
    );

    let display = Arc::new(LogDisplay::new());
    let channel = Arc::new(StdoutChannel::stdout());
    let dispatcher = Dispatcher::new(
        dispatcher_cfg,
        Arc::clone(&display) as Arc<dyn WatchDisplay>,
        channel as Arc<dyn OutboundChannel>,
    );
    dispatcher.start();

    let host = Host::new(dispatcher, display, std::io::stdout());
    let (tx, rx) = mpsc::channel(INPUT_QUEUE_DEPTH);
    let reader = tokio::spawn(pump_lines(BufReader::new(tokio::io::stdin()), tx));

    tokio::select! {
        _ = host.run(rx) => {
            match reader.await.context("input task panicked")? {
                Ok(n) => info!("input closed after {n} commands"),
                Err(e) => warn!("stdin read error: {e}"),
            }
        }
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl-C")?;
            info!("shutdown signal received");
        }
    }

    info!("Telldus Live watch app stopped");
    Ok(())
}
