//! Backend commands queued from UI to backend worker.

use client_core::CancelToken;
use shared::domain::CoinId;

pub enum BackendCommand {
    /// Fetch one snapshot; the result is dropped if `token` is cancelled.
    FetchCoins { token: CancelToken },
    FetchIcon { id: CoinId, url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchCoins { .. } => "fetch_coins",
            BackendCommand::FetchIcon { .. } => "fetch_icon",
        }
    }
}
