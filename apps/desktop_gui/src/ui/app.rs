use std::time::{Duration, Instant};

use client_core::{CoinTableModel, DisplayPhase, RowCells, TablePresentation, ViewEvent};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::CoinId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, queue_icon_fetches};
use crate::ui::icons::IconCache;
use crate::ui::table::show_coin_table;

const LOADING_REPAINT: Duration = Duration::from_millis(100);
const IDLE_REPAINT: Duration = Duration::from_millis(500);

pub struct CoinTrackerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    model: CoinTableModel,
    icons: IconCache,
    search_input: String,
    status: String,
    status_banner: Option<UiError>,
    endpoint: String,
}

impl CoinTrackerApp {
    /// Builds the app and queues the startup fetch.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        endpoint: impl Into<String>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            model: CoinTableModel::new(),
            icons: IconCache::default(),
            search_input: String::new(),
            status: "Starting".to_string(),
            status_banner: None,
            endpoint: endpoint.into(),
        };
        app.start_fetch();
        app
    }

    pub fn model(&self) -> &CoinTableModel {
        &self.model
    }

    fn start_fetch(&mut self) {
        let token = self.model.begin_fetch();
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchCoins { token },
            &mut self.status,
        );
        if !queued {
            self.model.cancel_fetch();
            self.status_banner = Some(UiError::from_message(
                UiErrorContext::CommandQueue,
                self.status.clone(),
            ));
        }
    }

    pub fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.status = err.message().to_string();
                    self.status_banner = Some(err);
                }
                UiEvent::IconFetched { id, result } => {
                    self.icons.store(id, result);
                }
                UiEvent::CoinsFetched { token, result } => {
                    self.model
                        .handle(ViewEvent::FetchCompleted { token, result }, now);
                    if self.model.state().error_message.is_none() && !self.model.state().loading {
                        self.status = format!("{} coins loaded", self.model.records().len());
                    }
                }
            }
        }
        self.model.handle(ViewEvent::Tick, now);
    }

    /// Queues logo downloads for displayed rows that have not asked yet.
    pub fn request_missing_icons(&mut self, rows: &[RowCells]) {
        let wanted: Vec<(CoinId, String)> = rows
            .iter()
            .filter(|row| self.icons.wants(&row.id))
            .filter_map(|row| {
                let url = row.icon_url.as_deref().filter(|url| !url.is_empty())?;
                Some((CoinId::new(row.id.clone()), url.to_string()))
            })
            .collect();
        if wanted.is_empty() {
            return;
        }
        for id in queue_icon_fetches(&self.cmd_tx, wanted) {
            self.icons.mark_requested(id);
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, now: Instant) {
        egui::TopBottomPanel::top("coin_top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("All Cryptocurrencies");
            ui.horizontal(|ui| {
                let search = ui.add(
                    egui::TextEdit::singleline(&mut self.search_input)
                        .hint_text("Search...")
                        .desired_width(260.0),
                );
                if search.changed() {
                    self.model.handle(
                        ViewEvent::SearchTextChanged(self.search_input.clone()),
                        now,
                    );
                }

                let refresh = ui.add_enabled(
                    !self.model.state().loading,
                    egui::Button::new("Refresh"),
                );
                if refresh.clicked() {
                    self.start_fetch();
                }
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("coin_status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(self.endpoint.as_str());
                });
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        ui.horizontal_wrapped(|ui| {
            ui.colored_label(
                egui::Color32::from_rgb(220, 110, 110),
                format!("{}: {}", banner.label(), banner.message()),
            );
            if ui.button("Dismiss").clicked() {
                self.status_banner = None;
            }
        });
        ui.separator();
    }

    fn show_main(&mut self, ctx: &egui::Context, table: &TablePresentation, now: Instant) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            match &table.phase {
                DisplayPhase::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading...");
                    });
                }
                DisplayPhase::Failed(message) => {
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), message.as_str());
                }
                DisplayPhase::Ready => {}
            }

            let icons = &self.icons;
            let clicked = show_coin_table(ui, &table.headers, &table.rows, |id| {
                icons.texture_id(id)
            });
            if let Some(key) = clicked {
                self.model.handle(ViewEvent::ColumnHeaderClicked(key), now);
            }
        });
    }
}

impl eframe::App for CoinTrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events(now);
        self.icons.upload(ctx);

        self.show_top_bar(ctx, now);
        self.show_status_bar(ctx);
        let table = TablePresentation::from_model(&self.model);
        self.request_missing_icons(&table.rows);
        self.show_main(ctx, &table, now);

        let repaint_after = match self.model.next_tick_in(now) {
            Some(due) => due,
            None if self.model.state().loading => LOADING_REPAINT,
            None => IDLE_REPAINT,
        };
        ctx.request_repaint_after(repaint_after);
    }
}

impl Drop for CoinTrackerApp {
    fn drop(&mut self) {
        self.model.teardown();
    }
}
