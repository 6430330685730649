//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

/// Queues `cmd` for the backend worker. On failure the reason is written to
/// the status line and `false` is returned.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    let reason = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return true;
        }
        Err(TrySendError::Full(_)) => "UI command queue is full; please retry",
        Err(TrySendError::Disconnected(_)) => "Backend worker disconnected; restart the app",
    };

    tracing::warn!(command = cmd_name, reason, "failed to queue ui->backend command");
    *status = UiError::from_message(UiErrorContext::Dispatch, reason).status_line();
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::LookupRequest;
    use crossbeam_channel::bounded;
    use shared::domain::PokemonKey;

    fn lookup(name: &str) -> BackendCommand {
        BackendCommand::Lookup(LookupRequest {
            key: PokemonKey::new(name),
        })
    }

    #[test]
    fn queues_command_without_touching_status() {
        let (tx, rx) = bounded(1);
        let mut status = "idle".to_string();

        assert!(dispatch_backend_command(&tx, lookup("mew"), &mut status));
        assert_eq!(status, "idle");
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::Lookup(_))));
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();

        assert!(dispatch_backend_command(&tx, lookup("mew"), &mut status));
        assert!(!dispatch_backend_command(&tx, lookup("mew"), &mut status));
        assert_eq!(
            status,
            "Connection problem: UI command queue is full; please retry"
        );
    }

    #[test]
    fn reports_disconnected_worker() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();

        assert!(!dispatch_backend_command(&tx, lookup("mew"), &mut status));
        assert!(status.contains("Backend worker disconnected"));
    }
}
