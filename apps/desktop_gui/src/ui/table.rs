//! Coin table widget: clickable header row plus one grid row per coin.

use client_core::{HeaderCell, RowCells};
use eframe::egui;
use shared::domain::SortKey;

const ROW_SPACING: [f32; 2] = [18.0, 6.0];
const ICON_SIZE: f32 = 20.0;

/// Draws the table and returns the header the user clicked this frame.
/// `icon_for` maps a coin id to its logo texture, once loaded.
pub fn show_coin_table(
    ui: &mut egui::Ui,
    headers: &[HeaderCell],
    rows: &[RowCells],
    icon_for: impl Fn(&str) -> Option<egui::TextureId>,
) -> Option<SortKey> {
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("coin_table")
                .striped(true)
                .spacing(ROW_SPACING)
                .show(ui, |ui| {
                    for header in headers {
                        let text = egui::RichText::new(header.text()).strong();
                        let response = ui
                            .add(egui::Button::new(text).frame(false))
                            .on_hover_cursor(egui::CursorIcon::PointingHand);
                        if response.clicked() {
                            clicked = Some(header.key);
                        }
                    }
                    ui.end_row();

                    for row in rows {
                        show_row(ui, row, icon_for(&row.id));
                        ui.end_row();
                    }
                });
        });

    clicked
}

fn show_row(ui: &mut egui::Ui, row: &RowCells, icon: Option<egui::TextureId>) {
    ui.label(row.rank.as_str());
    ui.horizontal(|ui| {
        if let Some(texture) = icon {
            ui.add(egui::Image::new((texture, egui::vec2(ICON_SIZE, ICON_SIZE))));
        }
        match row.website_url.as_deref() {
            Some(url) if !url.is_empty() => {
                ui.hyperlink_to(row.name.as_str(), url);
            }
            _ => {
                ui.label(row.name.as_str());
            }
        }
    });
    for cell in &row.cells()[2..] {
        ui.monospace(*cell);
    }
}
