use super::*;

use shared::domain::CoinId;

use crate::{debounce::SEARCH_DEBOUNCE, error::FETCH_FAILED_MESSAGE};

fn coin(id: &str, rank: u32, name: &str, price: f64) -> CoinRecord {
    CoinRecord {
        id: CoinId::new(id),
        rank,
        name: name.to_string(),
        symbol: id.to_ascii_uppercase(),
        market_cap: price * 100.0,
        price,
        available_supply: 100.0,
        volume: price / 2.0,
        icon: None,
        website_url: None,
    }
}

fn bitcoin_and_ethereum() -> Vec<CoinRecord> {
    vec![
        coin("bitcoin", 1, "Bitcoin", 50000.0),
        coin("ethereum", 2, "Ethereum", 3000.0),
    ]
}

fn fetch_error() -> FetchError {
    let err = serde_json::from_str::<serde_json::Value>("{").expect_err("broken json");
    FetchError::Payload(err)
}

fn loaded_model(records: Vec<CoinRecord>) -> CoinTableModel {
    let mut model = CoinTableModel::new();
    let token = model.begin_fetch();
    model.apply_fetch_result(&token, Ok(records));
    model
}

fn row_ids(model: &CoinTableModel) -> Vec<String> {
    model.rows().map(|r| r.id.to_string()).collect()
}

#[test]
fn starts_with_default_view_state() {
    let model = CoinTableModel::new();
    assert_eq!(model.state(), &ViewState::default());
    assert_eq!(model.state().sort_key, SortKey::Rank);
    assert_eq!(model.state().sort_direction, SortDirection::Ascending);
    assert_eq!(model.row_count(), 0);
}

#[test]
fn begin_fetch_sets_loading_and_clears_error() {
    let mut model = CoinTableModel::new();
    let token = model.begin_fetch();
    model.apply_fetch_result(&token, Err(fetch_error()));
    assert!(model.state().error_message.is_some());

    let _retry = model.begin_fetch();
    assert!(model.state().loading);
    assert!(model.state().error_message.is_none());
}

#[test]
fn successful_fetch_populates_rows_in_rank_order() {
    let model = loaded_model(vec![
        coin("ethereum", 2, "Ethereum", 3000.0),
        coin("bitcoin", 1, "Bitcoin", 50000.0),
    ]);
    assert!(!model.state().loading);
    assert_eq!(model.records()[0].id.as_str(), "ethereum");
    assert_eq!(row_ids(&model), vec!["bitcoin", "ethereum"]);
}

#[test]
fn failed_fetch_surfaces_message_and_leaves_records_empty() {
    let mut model = CoinTableModel::new();
    let token = model.begin_fetch();
    model.handle(
        ViewEvent::FetchCompleted {
            token,
            result: Err(fetch_error()),
        },
        Instant::now(),
    );

    let state = model.state();
    assert_eq!(state.error_message.as_deref(), Some(FETCH_FAILED_MESSAGE));
    assert!(!state.loading);
    assert!(model.records().is_empty());
    assert_eq!(model.row_count(), 0);
}

#[test]
fn result_after_teardown_leaves_state_untouched() {
    let mut model = CoinTableModel::new();
    let token = model.begin_fetch();
    model.teardown();
    assert!(token.is_cancelled());
    assert!(!model.state().loading);

    model.apply_fetch_result(&token, Ok(bitcoin_and_ethereum()));
    assert!(model.records().is_empty());
    assert!(model.state().error_message.is_none());
    assert_eq!(model.row_count(), 0);

    model.apply_fetch_result(&token, Err(fetch_error()));
    assert!(model.state().error_message.is_none());
    assert!(!model.state().loading);
}

#[test]
fn superseded_fetch_result_is_ignored() {
    let mut model = CoinTableModel::new();
    let first = model.begin_fetch();
    let second = model.begin_fetch();
    assert!(first.is_cancelled());

    model.apply_fetch_result(&first, Ok(vec![coin("doge", 9, "Dogecoin", 0.1)]));
    assert!(model.records().is_empty());
    assert!(model.state().loading);

    model.apply_fetch_result(&second, Ok(bitcoin_and_ethereum()));
    assert_eq!(row_ids(&model), vec!["bitcoin", "ethereum"]);
}

#[test]
fn refresh_replaces_records_wholesale() {
    let mut model = loaded_model(bitcoin_and_ethereum());
    let token = model.begin_fetch();
    model.apply_fetch_result(&token, Ok(vec![coin("solana", 5, "Solana", 150.0)]));
    assert_eq!(row_ids(&model), vec!["solana"]);
}

#[test]
fn search_applies_only_after_debounce_window() {
    let start = Instant::now();
    let mut model = loaded_model(bitcoin_and_ethereum());

    model.handle(ViewEvent::SearchTextChanged("e".into()), start);
    model.handle(
        ViewEvent::SearchTextChanged("et".into()),
        start + Duration::from_millis(100),
    );
    model.handle(
        ViewEvent::SearchTextChanged("eth".into()),
        start + Duration::from_millis(200),
    );
    assert_eq!(model.state().search_text, "eth");

    model.handle(ViewEvent::Tick, start + Duration::from_millis(450));
    assert_eq!(model.state().debounced_search_text, "");
    assert_eq!(model.row_count(), 2);

    let due = start + Duration::from_millis(200) + SEARCH_DEBOUNCE;
    model.handle(ViewEvent::Tick, due);
    assert_eq!(model.state().debounced_search_text, "eth");
    assert_eq!(row_ids(&model), vec!["ethereum"]);
}

#[test]
fn clearing_search_restores_full_set_after_debounce() {
    let start = Instant::now();
    let mut model = loaded_model(bitcoin_and_ethereum());
    model.on_search_text_changed("bit".into(), start);
    model.tick(start + SEARCH_DEBOUNCE);
    assert_eq!(model.row_count(), 1);

    let later = start + Duration::from_secs(1);
    model.on_search_text_changed(String::new(), later);
    model.tick(later);
    assert_eq!(model.row_count(), 1);
    model.tick(later + SEARCH_DEBOUNCE);
    assert_eq!(model.row_count(), 2);
}

#[test]
fn teardown_cancels_pending_search_commit() {
    let start = Instant::now();
    let mut model = loaded_model(bitcoin_and_ethereum());
    model.on_search_text_changed("eth".into(), start);
    model.teardown();
    model.tick(start + SEARCH_DEBOUNCE);
    assert_eq!(model.state().debounced_search_text, "");
    assert_eq!(model.next_tick_in(start), None);
}

#[test]
fn next_tick_reports_pending_window() {
    let start = Instant::now();
    let mut model = CoinTableModel::with_debounce_window(Duration::from_millis(50));
    assert_eq!(model.next_tick_in(start), None);
    model.on_search_text_changed("x".into(), start);
    assert_eq!(
        model.next_tick_in(start + Duration::from_millis(20)),
        Some(Duration::from_millis(30))
    );
}

#[test]
fn clicking_active_column_flips_direction() {
    let mut model = loaded_model(vec![
        coin("ethereum", 2, "Ethereum", 3000.0),
        coin("bitcoin", 1, "Bitcoin", 50000.0),
    ]);
    model.handle(ViewEvent::ColumnHeaderClicked(SortKey::Price), Instant::now());
    assert_eq!(model.state().sort_key, SortKey::Price);
    assert_eq!(model.state().sort_direction, SortDirection::Ascending);
    assert_eq!(row_ids(&model), vec!["ethereum", "bitcoin"]);

    model.on_column_header_clicked(SortKey::Price);
    assert_eq!(model.state().sort_direction, SortDirection::Descending);
    assert_eq!(row_ids(&model), vec!["bitcoin", "ethereum"]);
}

#[test]
fn switching_column_resets_to_ascending() {
    let mut model = loaded_model(bitcoin_and_ethereum());
    model.on_column_header_clicked(SortKey::Rank);
    assert_eq!(model.state().sort_direction, SortDirection::Descending);

    model.on_column_header_clicked(SortKey::Name);
    assert_eq!(model.state().sort_key, SortKey::Name);
    assert_eq!(model.state().sort_direction, SortDirection::Ascending);
    assert_eq!(row_ids(&model), vec!["bitcoin", "ethereum"]);
}

#[test]
fn events_after_teardown_are_ignored() {
    let mut model = loaded_model(bitcoin_and_ethereum());
    model.teardown();
    model.on_column_header_clicked(SortKey::Price);
    model.on_search_text_changed("eth".into(), Instant::now());
    assert_eq!(model.state().sort_key, SortKey::Rank);
    assert_eq!(model.state().search_text, "");

    let token = model.begin_fetch();
    assert!(token.is_cancelled());
    assert!(!model.state().loading);
}

#[test]
fn cancel_fetch_stops_loading_and_rejects_late_result() {
    let mut model = CoinTableModel::new();
    let token = model.begin_fetch();
    model.cancel_fetch();
    assert!(token.is_cancelled());
    assert!(!model.state().loading);

    model.apply_fetch_result(&token, Ok(bitcoin_and_ethereum()));
    assert!(model.records().is_empty());
}
