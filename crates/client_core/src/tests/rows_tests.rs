use super::*;

use shared::domain::CoinId;

fn coin(id: &str, rank: u32, name: &str, price: f64) -> CoinRecord {
    CoinRecord {
        id: CoinId::new(id),
        rank,
        name: name.to_string(),
        symbol: id.to_ascii_uppercase(),
        market_cap: price * 1000.0,
        price,
        available_supply: 1000.0 / f64::from(rank),
        volume: f64::from(rank) * 10.0,
        icon: None,
        website_url: None,
    }
}

fn sample() -> Vec<CoinRecord> {
    vec![
        coin("btc", 1, "Bitcoin", 50000.0),
        coin("eth", 2, "Ethereum", 3000.0),
        coin("usdt", 3, "Tether", 1.0),
        coin("etc", 4, "Ethereum Classic", 25.0),
        coin("bch", 5, "Bitcoin Cash", 300.0),
        coin("dai", 6, "Dai", 1.0),
    ]
}

fn ids(rows: &[&CoinRecord]) -> Vec<String> {
    rows.iter().map(|r| r.id.to_string()).collect()
}

#[test]
fn search_eth_keeps_only_ethereum() {
    let records = vec![
        coin("btc", 1, "Bitcoin", 50000.0),
        coin("eth", 2, "Ethereum", 3000.0),
    ];
    let rows = derive_rows(&records, "eth", SortKey::Rank, SortDirection::Ascending);
    assert_eq!(ids(&rows), vec!["eth"]);
}

#[test]
fn price_ascending_keeps_order_and_toggle_reverses() {
    let records = vec![
        coin("eth", 2, "Ethereum", 3000.0),
        coin("btc", 1, "Bitcoin", 50000.0),
    ];
    let asc = derive_rows(&records, "", SortKey::Price, SortDirection::Ascending);
    assert_eq!(ids(&asc), vec!["eth", "btc"]);

    let desc = derive_rows(
        &records,
        "",
        SortKey::Price,
        SortDirection::Ascending.toggled(),
    );
    assert_eq!(ids(&desc), vec!["btc", "eth"]);
}

#[test]
fn empty_search_returns_permutation_for_every_key() {
    let records = sample();
    for key in SortKey::ALL {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let rows = derive_rows(&records, "", key, direction);
            let mut got = ids(&rows);
            got.sort();
            let mut expected: Vec<String> = records.iter().map(|r| r.id.to_string()).collect();
            expected.sort();
            assert_eq!(got, expected, "key={key} direction={direction:?}");
        }
    }
}

#[test]
fn search_is_case_insensitive_and_complete() {
    let records = sample();
    for search in ["BIT", "ethereum", "e", "CLASSIC", "zzz", "t"] {
        let rows = derive_rows(&records, search, SortKey::Name, SortDirection::Ascending);
        let needle = search.to_lowercase();
        assert!(rows
            .iter()
            .all(|r| r.name.to_lowercase().contains(&needle)));
        let expected = records
            .iter()
            .filter(|r| matches_search(r, search))
            .count();
        assert_eq!(rows.len(), expected, "search={search}");
    }
}

#[test]
fn numeric_keys_are_monotonic_in_both_directions() {
    let records = sample();
    let numeric = SortKey::ALL.into_iter().filter(|k| k.is_numeric());
    for key in numeric {
        let asc = derive_rows(&records, "", key, SortDirection::Ascending);
        let values: Vec<f64> = asc.iter().filter_map(|r| r.numeric_value(key)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "asc {key}");

        let desc = derive_rows(&records, "", key, SortDirection::Descending);
        let values: Vec<f64> = desc.iter().filter_map(|r| r.numeric_value(key)).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]), "desc {key}");
    }
}

#[test]
fn strings_sort_lexicographically() {
    let records = sample();
    let rows = derive_rows(&records, "", SortKey::Name, SortDirection::Ascending);
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Bitcoin",
            "Bitcoin Cash",
            "Dai",
            "Ethereum",
            "Ethereum Classic",
            "Tether"
        ]
    );
}

#[test]
fn equal_values_fall_back_to_id_in_both_directions() {
    let records = sample();
    let asc = derive_rows(&records, "", SortKey::Price, SortDirection::Ascending);
    assert_eq!(ids(&asc[..2]), vec!["dai", "usdt"]);

    let desc = derive_rows(&records, "", SortKey::Price, SortDirection::Descending);
    assert_eq!(ids(&desc[4..]), vec!["dai", "usdt"]);
}

#[test]
fn derivation_leaves_source_untouched() {
    let records = sample();
    let before = records.clone();
    let _ = derive_rows(&records, "bit", SortKey::Volume, SortDirection::Descending);
    assert_eq!(records, before);
}

#[test]
fn indices_point_back_into_source() {
    let records = sample();
    let indices = derive_indices(&records, "bitcoin", SortKey::Rank, SortDirection::Descending);
    assert_eq!(indices, vec![4, 0]);
}
