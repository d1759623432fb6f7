use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    domain::{CoinId, SortKey},
    error::SnapshotError,
};

/// Body of the upstream list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinsResponse {
    pub coins: Vec<CoinRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinRecord {
    pub id: CoinId,
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    pub market_cap: f64,
    pub price: f64,
    pub available_supply: f64,
    /// The upstream sends this either as a number or as a numeric string.
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub volume: f64,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

impl CoinRecord {
    /// Value of a numeric column, `None` for the string columns.
    pub fn numeric_value(&self, key: SortKey) -> Option<f64> {
        match key {
            SortKey::Rank => Some(f64::from(self.rank)),
            SortKey::MarketCap => Some(self.market_cap),
            SortKey::Price => Some(self.price),
            SortKey::AvailableSupply => Some(self.available_supply),
            SortKey::Volume => Some(self.volume),
            SortKey::Name | SortKey::Symbol => None,
        }
    }

    pub fn text_value(&self, key: SortKey) -> Option<&str> {
        match key {
            SortKey::Name => Some(&self.name),
            SortKey::Symbol => Some(&self.symbol),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        if self.rank == 0 {
            return Err(SnapshotError::ZeroRank {
                id: self.id.clone(),
            });
        }
        let fields = [
            ("marketCap", self.market_cap),
            ("price", self.price),
            ("availableSupply", self.available_supply),
            ("volume", self.volume),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SnapshotError::InvalidNumber {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Checks id uniqueness and numeric sanity across one fetched snapshot.
pub fn validate_snapshot(records: &[CoinRecord]) -> Result<(), SnapshotError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(&record.id) {
            return Err(SnapshotError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|err| serde::de::Error::custom(format!("volume {text:?}: {err}"))),
    }
}
