use std::time::Instant;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use client_core::{
    fetch_unless_cancelled, load_settings, CoinTableModel, DisplayPhase, HttpCoinSource,
    TablePresentation, ViewEvent, SEARCH_DEBOUNCE,
};
use shared::domain::SortKey;

#[derive(Parser, Debug)]
#[command(name = "coin-table", about = "Print the cryptocurrency price table once")]
struct Args {
    /// Case-insensitive filter on the coin name.
    #[arg(long, default_value = "")]
    search: String,
    /// Column to sort by (rank, name, symbol, marketCap, price, availableSupply, volume).
    #[arg(long, default_value = "rank", value_parser = parse_sort_key)]
    sort: SortKey,
    #[arg(long)]
    descending: bool,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    SortKey::parse(raw).ok_or_else(|| format!("unknown column '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(endpoint) = args.endpoint.clone() {
        settings.endpoint = endpoint;
    }
    if let Some(log_filter) = args.log_filter.clone() {
        settings.log_filter = log_filter;
    }
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let source = HttpCoinSource::from_settings(&settings);
    tracing::debug!(endpoint = source.endpoint(), "coin-table: fetching");
    let mut model = CoinTableModel::new();
    apply_view_args(&mut model, &args, Instant::now());

    let token = model.begin_fetch();
    let outcome = tokio::select! {
        outcome = fetch_unless_cancelled(&source, &token) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted; cancelling coin fetch");
            model.teardown();
            None
        }
    };
    let Some(result) = outcome else {
        bail!("interrupted before the coin list arrived");
    };
    model.handle(ViewEvent::FetchCompleted { token, result }, Instant::now());

    let table = TablePresentation::from_model(&model);
    if let DisplayPhase::Failed(message) = &table.phase {
        tracing::error!("coin-table: no rows to print");
        return Err(anyhow!("{message}"));
    }
    print!("{}", render_table(&table));
    tracing::info!(
        rows = table.rows.len(),
        sort_key = %args.sort,
        descending = args.descending,
        "coin-table: printed"
    );
    Ok(())
}

/// Feeds the flags through the same events a renderer would send.
fn apply_view_args(model: &mut CoinTableModel, args: &Args, now: Instant) {
    if model.state().sort_key != args.sort {
        model.handle(ViewEvent::ColumnHeaderClicked(args.sort), now);
    }
    if args.descending {
        model.handle(ViewEvent::ColumnHeaderClicked(args.sort), now);
    }
    if !args.search.is_empty() {
        model.handle(ViewEvent::SearchTextChanged(args.search.clone()), now);
        model.handle(ViewEvent::Tick, now + SEARCH_DEBOUNCE);
    }
}

fn render_table(table: &TablePresentation) -> String {
    let header: Vec<String> = table.headers.iter().map(|h| h.text()).collect();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, header.iter().map(String::as_str), &widths);
    for row in &table.rows {
        push_line(&mut out, row.cells().into_iter(), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
