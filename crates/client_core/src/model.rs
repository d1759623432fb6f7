//! View model for the coin table: view state, fetch lifecycle and the cached
//! derived row order.

use std::time::{Duration, Instant};

use shared::{
    domain::{SortDirection, SortKey},
    protocol::CoinRecord,
};
use tracing::{debug, error, info, warn};

use crate::{cancel::CancelToken, debounce::Debouncer, error::FetchError, rows::derive_indices};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub debounced_search_text: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub loading: bool,
    pub error_message: Option<String>,
}

/// Inputs the rendering layer and the fetch task feed into the model.
#[derive(Debug)]
pub enum ViewEvent {
    SearchTextChanged(String),
    ColumnHeaderClicked(SortKey),
    FetchCompleted {
        token: CancelToken,
        result: Result<Vec<CoinRecord>, FetchError>,
    },
    Tick,
}

#[derive(Debug, Default)]
pub struct CoinTableModel {
    records: Vec<CoinRecord>,
    state: ViewState,
    search_debounce: Debouncer<String>,
    active_fetch: Option<CancelToken>,
    visible: Vec<usize>,
    torn_down: bool,
}

impl CoinTableModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce_window(window: Duration) -> Self {
        Self {
            search_debounce: Debouncer::new(window),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn records(&self) -> &[CoinRecord] {
        &self.records
    }

    /// Rows to display, filtered and sorted by the current view state.
    pub fn rows(&self) -> impl Iterator<Item = &CoinRecord> + '_ {
        self.visible.iter().map(|&idx| &self.records[idx])
    }

    pub fn row_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn handle(&mut self, event: ViewEvent, now: Instant) {
        match event {
            ViewEvent::SearchTextChanged(text) => self.on_search_text_changed(text, now),
            ViewEvent::ColumnHeaderClicked(key) => self.on_column_header_clicked(key),
            ViewEvent::FetchCompleted { token, result } => self.apply_fetch_result(&token, result),
            ViewEvent::Tick => self.tick(now),
        }
    }

    /// Starts a fetch, superseding any request still in flight.
    pub fn begin_fetch(&mut self) -> CancelToken {
        if let Some(previous) = self.active_fetch.take() {
            previous.cancel();
        }
        let token = CancelToken::new();
        if self.torn_down {
            token.cancel();
            return token;
        }
        self.active_fetch = Some(token.clone());
        self.state.loading = true;
        self.state.error_message = None;
        info!("coins: fetch started");
        token
    }

    pub fn apply_fetch_result(
        &mut self,
        token: &CancelToken,
        result: Result<Vec<CoinRecord>, FetchError>,
    ) {
        let is_active = self
            .active_fetch
            .as_ref()
            .is_some_and(|active| active.same_as(token));
        if self.torn_down || token.is_cancelled() || !is_active {
            warn!(
                torn_down = self.torn_down,
                "coins: ignoring stale fetch result"
            );
            return;
        }
        self.active_fetch = None;
        self.state.loading = false;

        match result {
            Ok(records) => {
                info!(count = records.len(), "coins: snapshot applied");
                self.records = records;
                self.state.error_message = None;
            }
            Err(err) => {
                error!("coins: fetch failed: {err}");
                self.records.clear();
                self.state.error_message = Some(err.user_message().to_string());
            }
        }
        self.refresh_rows();
    }

    /// Abandons the in-flight fetch, e.g. when it could not be dispatched.
    pub fn cancel_fetch(&mut self) {
        if let Some(token) = self.active_fetch.take() {
            token.cancel();
        }
        self.state.loading = false;
    }

    pub fn on_search_text_changed(&mut self, text: String, now: Instant) {
        if self.torn_down {
            return;
        }
        self.state.search_text = text.clone();
        self.search_debounce.push(text, now);
    }

    /// Same column flips the direction; a different column starts ascending.
    pub fn on_column_header_clicked(&mut self, key: SortKey) {
        if self.torn_down {
            return;
        }
        if self.state.sort_key == key {
            self.state.sort_direction = self.state.sort_direction.toggled();
        } else {
            self.state.sort_key = key;
            self.state.sort_direction = SortDirection::Ascending;
        }
        self.refresh_rows();
    }

    /// Commits the debounced search text once its window has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        if let Some(text) = self.search_debounce.poll(now) {
            if text != self.state.debounced_search_text {
                self.state.debounced_search_text = text;
                self.refresh_rows();
            }
        }
    }

    /// When the next `tick` could change anything, if a commit is pending.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.search_debounce.time_until_due(now)
    }

    pub fn teardown(&mut self) {
        if let Some(token) = self.active_fetch.take() {
            token.cancel();
        }
        self.search_debounce.cancel();
        self.state.loading = false;
        self.torn_down = true;
        debug!("coins: view model torn down");
    }

    fn refresh_rows(&mut self) {
        self.visible = derive_indices(
            &self.records,
            &self.state.debounced_search_text,
            self.state.sort_key,
            self.state.sort_direction,
        );
        debug!(
            rows = self.visible.len(),
            sort_key = %self.state.sort_key,
            "coins: rows derived"
        );
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
