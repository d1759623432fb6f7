//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{fetch_unless_cancelled, CoinSource, IconSource};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::{commands::BackendCommand, icons::decode_icon};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn CoinSource>,
    icons: Arc<dyn IconSource>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::FetchCoins { token } => {
                    let source = source.clone();
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let Some(result) = fetch_unless_cancelled(source.as_ref(), &token).await
                        else {
                            return;
                        };
                        if ui_tx
                            .send(UiEvent::CoinsFetched { token, result })
                            .is_err()
                        {
                            tracing::warn!("ui event queue closed before fetch result delivery");
                        }
                    });
                }
                BackendCommand::FetchIcon { id, url } => {
                    let icons = icons.clone();
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let result = match icons.fetch_icon(&url).await {
                            Ok(bytes) => decode_icon(&bytes),
                            Err(err) => Err(err.to_string()),
                        };
                        if let Err(err) = &result {
                            tracing::debug!(coin = %id, "icon unavailable: {err}");
                        }
                        if ui_tx.send(UiEvent::IconFetched { id, result }).is_err() {
                            tracing::warn!("ui event queue closed before icon delivery");
                        }
                    });
                }
            }
        }
        tracing::debug!("ui command queue closed; backend worker exiting");
    })
}
