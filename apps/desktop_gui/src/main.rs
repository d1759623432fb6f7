mod backend_bridge;
mod controller;
mod ui;

use std::sync::Arc;

use clap::Parser;
use client_core::{load_settings, HttpCoinSource, Settings};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::CoinTrackerApp;

#[derive(Parser, Debug)]
#[command(name = "coin-tracker", about = "Searchable, sortable cryptocurrency price table")]
struct Args {
    /// Override the coins list endpoint.
    #[arg(long)]
    endpoint: Option<String>,
    /// tracing env-filter directive, e.g. `client_core=debug`.
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(endpoint) = self.endpoint {
            settings.endpoint = endpoint;
        }
        if let Some(log_filter) = self.log_filter {
            settings.log_filter = log_filter;
        }
        settings
    }
}

fn main() -> eframe::Result<()> {
    let settings = Args::parse().apply(load_settings());
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();
    tracing::info!(endpoint = %settings.endpoint, "starting coin tracker");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let source = Arc::new(HttpCoinSource::from_settings(&settings));
    backend_bridge::runtime::launch(cmd_rx, ui_tx, source.clone(), source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Coin Tracker")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Coin Tracker",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(CoinTrackerApp::new(
                cmd_tx,
                ui_rx,
                settings.endpoint,
            )))
        }),
    )
}
