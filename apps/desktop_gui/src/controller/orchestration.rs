//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use shared::domain::CoinId;

use crate::backend_bridge::commands::BackendCommand;

/// Slots left free for user-initiated commands while icons are queued.
const ICON_QUEUE_HEADROOM: usize = 4;

/// Queues `cmd`; on failure writes a user-facing reason into `status`.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    tracing::debug!(command = cmd_name, "queueing ui->backend command");

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend command processor disconnected; restart the app".to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            false
        }
    }
}

/// Queues icon downloads until only the headroom is left; returns the ids that
/// were queued. The rest are offered again on a later frame.
pub fn queue_icon_fetches(
    cmd_tx: &Sender<BackendCommand>,
    wanted: impl IntoIterator<Item = (CoinId, String)>,
) -> Vec<CoinId> {
    let mut queued = Vec::new();
    for (id, url) in wanted {
        let crowded = cmd_tx
            .capacity()
            .is_some_and(|cap| cmd_tx.len() + ICON_QUEUE_HEADROOM >= cap);
        if crowded {
            tracing::debug!(queued = queued.len(), "deferring icon requests; queue crowded");
            break;
        }
        match cmd_tx.try_send(BackendCommand::FetchIcon {
            id: id.clone(),
            url,
        }) {
            Ok(()) => queued.push(id),
            Err(TrySendError::Full(_)) => break,
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!("dropping icon requests; backend disconnected");
                break;
            }
        }
    }
    queued
}
