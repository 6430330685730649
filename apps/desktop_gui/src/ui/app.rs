use std::time::Duration;

use client_core::{
    begin_lookup, finish_lookup, finish_update, prepare_update, reveal_update,
    view::{PLACEHOLDER_SPRITE, SEARCHING_TEXT},
    ClientError, DisplayRegion, PokedexView, RenderedRecord, DEFAULT_SERVER_URL,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

pub const SERVER_URL_ENV: &str = "POKEDEX_SERVER_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub server_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl StartupConfig {
    /// Command line first, then `POKEDEX_SERVER_URL`, then the default.
    pub fn resolve(cli_server_url: Option<String>) -> Self {
        Self::resolve_with(cli_server_url, |name| std::env::var(name).ok())
    }

    fn resolve_with(
        cli_server_url: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let server_url = cli_server_url
            .or_else(|| lookup(SERVER_URL_ENV))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        match server_url {
            Some(server_url) => Self { server_url },
            None => Self::default(),
        }
    }
}

pub struct PokedexApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: PokedexView,
    status: String,
}

impl PokedexApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: PokedexView::new(),
            status: "Starting backend worker...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::LookupFinished(result) => {
                    finish_lookup(&mut self.view, result);
                }
                UiEvent::UpdateFinished(result) => {
                    finish_update(&mut self.view, result);
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.status = err.status_line();
                }
            }
        }
    }

    fn on_search_clicked(&mut self) {
        let request = begin_lookup(&mut self.view);
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Lookup(request),
            &mut self.status,
        ) {
            let reason = ClientError::Unavailable(self.status.clone());
            finish_lookup(&mut self.view, Err(reason));
        }
    }

    fn on_update_clicked(&mut self) {
        reveal_update(&mut self.view);
    }

    fn on_submit_clicked(&mut self) {
        let Some(request) = prepare_update(&self.view) else {
            return;
        };
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Update(request),
            &mut self.status,
        ) {
            let reason = ClientError::Unavailable(self.status.clone());
            finish_update(&mut self.view, Err(reason));
        }
    }

    fn show_search_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Pokémon:");
            let input = ui.text_edit_singleline(&mut self.view.identifier_input);
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Search").clicked() || submitted {
                self.on_search_clicked();
            }
        });
    }

    fn show_display_region(&self, ui: &mut egui::Ui) {
        match self.view.display() {
            DisplayRegion::Empty => {}
            DisplayRegion::Searching => {
                ui.label(SEARCHING_TEXT);
            }
            DisplayRegion::Record(record) => show_record(ui, record),
            DisplayRegion::Error(message) => {
                ui.colored_label(egui::Color32::RED, message.as_str());
            }
        }
    }

    fn show_update_controls(&mut self, ui: &mut egui::Ui) {
        if self.view.update_trigger_visible() && ui.button("Update").clicked() {
            self.on_update_clicked();
        }

        if !self.view.update_fields_visible() {
            return;
        }
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Abilities:");
                ui.text_edit_singleline(&mut self.view.abilities_input);
            });
            ui.horizontal(|ui| {
                ui.label("Types:");
                ui.text_edit_singleline(&mut self.view.types_input);
            });
            ui.small("Separate multiple values with commas.");
            if ui.button("Submit").clicked() {
                self.on_submit_clicked();
            }
        });
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.view.alert().map(str::to_owned) else {
            return;
        };

        let mut acknowledged = false;
        egui::Window::new("Update failed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message.as_str());
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        if acknowledged {
            self.view.dismiss_alert();
        }
    }
}

fn show_record(ui: &mut egui::Ui, record: &RenderedRecord) {
    ui.heading(record.heading.as_str());
    if record.image_src == PLACEHOLDER_SPRITE {
        ui.label(format!("[{}] {}", record.image_alt, PLACEHOLDER_SPRITE));
    } else {
        ui.hyperlink_to(format!("[{}] sprite", record.image_alt), &record.image_src);
    }
    ui.label(record.abilities_line.as_str());
    ui.label(record.pokedex_line.as_str());
    ui.label(record.types_line.as_str());
}

impl eframe::App for PokedexApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        // The alert blocks the rest of the screen until acknowledged.
        let interactive = self.view.alert().is_none();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(self.status.as_str());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(interactive, |ui| {
                self.show_search_bar(ui);
                ui.separator();
                self.show_display_region(ui);
                ui.add_space(8.0);
                self.show_update_controls(ui);
            });
        });
        self.show_alert(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use client_core::Phase;
    use crossbeam_channel::bounded;
    use shared::{domain::PokedexNumber, protocol::PokemonDetail};

    use super::*;

    fn pikachu() -> PokemonDetail {
        PokemonDetail {
            name: "pikachu".into(),
            abilities: vec!["static".into()],
            pokedex_number: PokedexNumber(25),
            sprites: Vec::new(),
            types: vec!["electric".into()],
        }
    }

    fn app() -> (PokedexApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        (PokedexApp::new(cmd_tx, ui_rx), cmd_rx, ui_tx)
    }

    #[test]
    fn startup_prefers_cli_then_env_then_default() {
        let env = HashMap::from([(SERVER_URL_ENV, "http://env.test:8000")]);
        let lookup = |name: &str| env.get(name).map(|v| v.to_string());

        assert_eq!(
            StartupConfig::resolve_with(Some("http://cli.test".into()), lookup).server_url,
            "http://cli.test"
        );
        assert_eq!(
            StartupConfig::resolve_with(None, lookup).server_url,
            "http://env.test:8000"
        );
        assert_eq!(
            StartupConfig::resolve_with(Some("  ".into()), |_| None),
            StartupConfig::default()
        );
    }

    #[test]
    fn search_click_queues_lowercased_lookup() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.view.identifier_input = "PIKACHU".into();

        app.on_search_clicked();

        assert_eq!(app.view.display(), &DisplayRegion::Searching);
        match cmd_rx.try_recv() {
            Ok(BackendCommand::Lookup(request)) => assert_eq!(request.key.as_str(), "pikachu"),
            _ => panic!("expected a lookup command"),
        }
    }

    #[test]
    fn lookup_results_drive_update_controls() {
        let (mut app, _cmd_rx, ui_tx) = app();
        app.view.identifier_input = "pikachu".into();
        app.on_search_clicked();

        ui_tx
            .send(UiEvent::LookupFinished(Ok(pikachu())))
            .expect("send");
        app.process_ui_events();
        assert!(app.view.update_trigger_visible());

        app.on_search_clicked();
        ui_tx
            .send(UiEvent::LookupFinished(Err(ClientError::NotFound { status: 404 })))
            .expect("send");
        app.process_ui_events();
        assert!(!app.view.update_trigger_visible());
        assert!(!app.view.update_fields_visible());
        assert_eq!(
            app.view.display(),
            &DisplayRegion::Error("Pokémon not found".into())
        );
    }

    #[test]
    fn submit_click_queues_update_for_searched_pokemon() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.view.identifier_input = "Pikachu".into();
        app.on_search_clicked();
        let _ = cmd_rx.try_recv();
        ui_tx
            .send(UiEvent::LookupFinished(Ok(pikachu())))
            .expect("send");
        app.process_ui_events();

        app.on_update_clicked();
        app.view.abilities_input = "fly, swim".into();
        app.on_submit_clicked();

        match cmd_rx.try_recv() {
            Ok(BackendCommand::Update(request)) => {
                assert_eq!(request.key.as_str(), "pikachu");
                assert_eq!(
                    request.payload.abilities,
                    Some(vec!["fly".to_string(), "swim".to_string()])
                );
                assert_eq!(request.payload.sprites, Some(Vec::new()));
            }
            _ => panic!("expected an update command"),
        }

        ui_tx
            .send(UiEvent::UpdateFinished(Err(ClientError::UpdateFailed {
                status: 500,
            })))
            .expect("send");
        app.process_ui_events();
        assert_eq!(app.view.alert(), Some("Error updating information"));
        assert_eq!(app.view.phase(), Phase::UpdateFailed);
    }

    #[test]
    fn search_with_stopped_worker_fails_inline() {
        let (mut app, cmd_rx, _ui_tx) = app();
        drop(cmd_rx);
        app.view.identifier_input = "pikachu".into();

        app.on_search_clicked();

        assert_ne!(app.view.display(), &DisplayRegion::Searching);
        assert_eq!(app.view.phase(), Phase::NotFound);
        match app.view.display() {
            DisplayRegion::Error(message) => {
                assert!(message.contains("Backend worker disconnected"))
            }
            other => panic!("expected an inline error, got {other:?}"),
        }
        assert!(!app.view.update_trigger_visible());
        assert!(!app.view.update_fields_visible());
    }

    #[test]
    fn submit_with_full_queue_raises_alert() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let (_ui_tx, ui_rx) = bounded(1);
        let mut app = PokedexApp::new(cmd_tx, ui_rx);
        app.view.identifier_input = "pikachu".into();
        app.on_search_clicked();
        finish_lookup(&mut app.view, Ok(pikachu()));
        app.on_update_clicked();

        app.on_submit_clicked();

        assert_eq!(app.view.phase(), Phase::UpdateFailed);
        assert!(app
            .view
            .alert()
            .is_some_and(|alert| alert.contains("queue is full")));
        assert!(app.view.update_fields_visible());
    }

    #[test]
    fn info_and_errors_update_status_line() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::Info("Ready - server http://localhost:8000".into()))
            .expect("send");
        app.process_ui_events();
        assert_eq!(app.status, "Ready - server http://localhost:8000");

        ui_tx
            .send(UiEvent::Error(crate::controller::events::UiError::from_message(
                crate::controller::events::UiErrorContext::BackendStartup,
                "invalid server url 'x': relative URL without a base",
            )))
            .expect("send");
        app.process_ui_events();
        assert!(app.status.starts_with("Configuration problem (startup)"));
    }
}
