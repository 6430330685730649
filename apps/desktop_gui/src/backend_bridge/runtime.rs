//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{PokedexClient, PokemonApi};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the worker thread. Commands run one at a time, in queue order.
pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                return;
            }
        };

        let client = match PokedexClient::new(&server_url) {
            Ok(client) => client,
            Err(err) => {
                tracing::error!(%server_url, "backend worker cannot start: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    err.to_string(),
                )));
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!("Ready - server {server_url}")));

        // Results wait for queue space; one per user action.
        while let Ok(cmd) = cmd_rx.recv() {
            let event = runtime.block_on(run_command(&client, cmd));
            if ui_tx.send(event).is_err() {
                tracing::warn!("ui event queue closed; stopping backend worker");
                break;
            }
        }
        tracing::debug!("backend worker stopped");
    });
}

pub async fn run_command(api: &dyn PokemonApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Lookup(request) => {
            UiEvent::LookupFinished(api.fetch_pokemon(&request.key).await)
        }
        BackendCommand::Update(request) => UiEvent::UpdateFinished(
            api.update_pokemon(&request.key, &request.payload).await,
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use client_core::{ClientError, LookupRequest, UpdateRequest};
    use crossbeam_channel::bounded;
    use shared::{
        domain::{PokedexNumber, PokemonKey},
        protocol::{PokemonDetail, PokemonUpdate},
    };

    use super::*;

    struct EchoApi;

    #[async_trait]
    impl PokemonApi for EchoApi {
        async fn fetch_pokemon(&self, key: &PokemonKey) -> Result<PokemonDetail, ClientError> {
            if key.as_str() == "ditto" {
                Ok(PokemonDetail {
                    name: "ditto".into(),
                    abilities: vec!["limber".into()],
                    pokedex_number: PokedexNumber(132),
                    sprites: Vec::new(),
                    types: vec!["normal".into()],
                })
            } else {
                Err(ClientError::NotFound { status: 404 })
            }
        }

        async fn update_pokemon(
            &self,
            _key: &PokemonKey,
            _update: &PokemonUpdate,
        ) -> Result<PokemonDetail, ClientError> {
            Err(ClientError::UpdateFailed { status: 500 })
        }
    }

    #[tokio::test]
    async fn lookup_command_yields_lookup_event() {
        let event = run_command(
            &EchoApi,
            BackendCommand::Lookup(LookupRequest {
                key: PokemonKey::new("Ditto"),
            }),
        )
        .await;
        match event {
            UiEvent::LookupFinished(Ok(detail)) => assert_eq!(detail.name, "ditto"),
            _ => panic!("expected a successful lookup event"),
        }
    }

    #[tokio::test]
    async fn update_command_yields_update_event() {
        let event = run_command(
            &EchoApi,
            BackendCommand::Update(UpdateRequest {
                key: PokemonKey::new("ditto"),
                payload: PokemonUpdate::default(),
            }),
        )
        .await;
        assert!(matches!(
            event,
            UiEvent::UpdateFinished(Err(ClientError::UpdateFailed { status: 500 }))
        ));
    }

    #[test]
    fn result_waits_for_space_in_full_event_queue() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let (cmd_tx, cmd_rx) = bounded(1);
        let (ui_tx, ui_rx) = bounded(1);
        launch(format!("http://{addr}"), cmd_rx, ui_tx);
        cmd_tx
            .send(BackendCommand::Lookup(LookupRequest {
                key: PokemonKey::new("pikachu"),
            }))
            .expect("send");

        // Leave the "ready" notice queued while the lookup completes.
        std::thread::sleep(Duration::from_millis(500));

        assert!(matches!(
            ui_rx.recv_timeout(Duration::from_secs(5)),
            Ok(UiEvent::Info(_))
        ));
        assert!(matches!(
            ui_rx.recv_timeout(Duration::from_secs(10)),
            Ok(UiEvent::LookupFinished(Err(ClientError::Transport(_))))
        ));
    }

    #[test]
    fn invalid_server_url_reports_startup_error() {
        let (_cmd_tx, cmd_rx) = bounded(1);
        let (ui_tx, ui_rx) = bounded(4);

        launch("not a url".to_string(), cmd_rx, ui_tx);

        match ui_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(UiEvent::Error(err)) => {
                assert_eq!(err.context(), UiErrorContext::BackendStartup);
                assert!(err.message().contains("invalid server url"));
            }
            _ => panic!("expected a startup error event"),
        }
    }
}
