//! Filter-then-sort projection of a fetched snapshot.

use std::cmp::Ordering;

use shared::{
    domain::{SortDirection, SortKey},
    protocol::CoinRecord,
};

/// Case-insensitive substring match against the coin name.
pub fn matches_search(record: &CoinRecord, search: &str) -> bool {
    search.is_empty() || record.name.to_lowercase().contains(&search.to_lowercase())
}

/// Natural ordering of `key` between two records, ascending.
pub fn compare_by_key(a: &CoinRecord, b: &CoinRecord, key: SortKey) -> Ordering {
    match (a.text_value(key), b.text_value(key)) {
        (Some(left), Some(right)) => left.cmp(right),
        _ => {
            let left = a.numeric_value(key).unwrap_or_default();
            let right = b.numeric_value(key).unwrap_or_default();
            left.total_cmp(&right)
        }
    }
}

/// Indices into `records` of the rows to display, in display order.
///
/// Equal keys fall back to the coin id so the order is deterministic.
pub fn derive_indices(
    records: &[CoinRecord],
    search: &str,
    key: SortKey,
    direction: SortDirection,
) -> Vec<usize> {
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_search(record, search))
        .map(|(idx, _)| idx)
        .collect();

    indices.sort_by(|&a, &b| {
        let (a, b) = (&records[a], &records[b]);
        let primary = match direction {
            SortDirection::Ascending => compare_by_key(a, b, key),
            SortDirection::Descending => compare_by_key(b, a, key),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
    indices
}

pub fn derive_rows<'a>(
    records: &'a [CoinRecord],
    search: &str,
    key: SortKey,
    direction: SortDirection,
) -> Vec<&'a CoinRecord> {
    derive_indices(records, search, key, direction)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}

#[cfg(test)]
#[path = "tests/rows_tests.rs"]
mod tests;
