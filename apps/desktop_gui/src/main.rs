use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{PokedexApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the Pokédex server; falls back to POKEDEX_SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    let startup = StartupConfig::resolve(args.server_url);
    tracing::info!(server_url = %startup.server_url, "starting desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(startup.server_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Pokédex")
            .with_inner_size([520.0, 560.0])
            .with_min_inner_size([360.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Pokédex",
        options,
        Box::new(|_cc| Ok(Box::new(PokedexApp::new(cmd_tx, ui_rx)))),
    )
}
