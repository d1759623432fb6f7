//! What a renderer needs from the model: the display phase, header cells and
//! pre-formatted row cells.

use shared::{domain::SortKey, protocol::CoinRecord};

use crate::model::CoinTableModel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayPhase {
    Loading,
    Failed(String),
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: SortKey,
    pub label: &'static str,
    /// Arrow on the active sort column only.
    pub indicator: Option<&'static str>,
}

impl HeaderCell {
    pub fn text(&self) -> String {
        match self.indicator {
            Some(arrow) => format!("{} {arrow}", self.label),
            None => self.label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    pub id: String,
    pub rank: String,
    pub name: String,
    pub symbol: String,
    pub market_cap: String,
    pub price: String,
    pub available_supply: String,
    pub volume: String,
    pub icon_url: Option<String>,
    pub website_url: Option<String>,
}

impl RowCells {
    pub fn from_record(record: &CoinRecord) -> Self {
        Self {
            id: record.id.to_string(),
            rank: record.rank.to_string(),
            name: record.name.clone(),
            symbol: record.symbol.clone(),
            market_cap: format!("${}", format_grouped(record.market_cap)),
            price: format!("${:.2}", record.price),
            available_supply: format_grouped(record.available_supply),
            volume: format_grouped(record.volume),
            icon_url: record.icon.clone(),
            website_url: record.website_url.clone(),
        }
    }

    /// Cell text in `SortKey::ALL` column order.
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.rank,
            &self.name,
            &self.symbol,
            &self.market_cap,
            &self.price,
            &self.available_supply,
            &self.volume,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePresentation {
    pub phase: DisplayPhase,
    pub search_text: String,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowCells>,
}

impl TablePresentation {
    pub fn from_model(model: &CoinTableModel) -> Self {
        let state = model.state();
        let phase = if state.loading {
            DisplayPhase::Loading
        } else if let Some(message) = &state.error_message {
            DisplayPhase::Failed(message.clone())
        } else {
            DisplayPhase::Ready
        };

        let headers = SortKey::ALL
            .into_iter()
            .map(|key| HeaderCell {
                key,
                label: key.label(),
                indicator: (key == state.sort_key).then(|| state.sort_direction.indicator()),
            })
            .collect();

        Self {
            phase,
            search_text: state.search_text.clone(),
            headers,
            rows: model.rows().map(RowCells::from_record).collect(),
        }
    }
}

/// en-US style grouping: comma thousands separators and at most three
/// fraction digits, trailing zeros dropped.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    if value < 0.0 && grouped.chars().any(|c| c != '0' && c != ',' && c != '.') {
        grouped.insert(0, '-');
    }
    grouped
}
