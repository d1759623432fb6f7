use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinId(pub String);

impl CoinId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CoinId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sortable table columns, one per header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Rank,
    Name,
    Symbol,
    MarketCap,
    Price,
    AvailableSupply,
    Volume,
}

impl SortKey {
    /// Columns in display order.
    pub const ALL: [SortKey; 7] = [
        SortKey::Rank,
        SortKey::Name,
        SortKey::Symbol,
        SortKey::MarketCap,
        SortKey::Price,
        SortKey::AvailableSupply,
        SortKey::Volume,
    ];

    /// Field name as it appears in the upstream payload.
    pub fn wire_name(self) -> &'static str {
        match self {
            SortKey::Rank => "rank",
            SortKey::Name => "name",
            SortKey::Symbol => "symbol",
            SortKey::MarketCap => "marketCap",
            SortKey::Price => "price",
            SortKey::AvailableSupply => "availableSupply",
            SortKey::Volume => "volume",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Rank => "RANK",
            SortKey::Name => "NAME",
            SortKey::Symbol => "SYMBOL",
            SortKey::MarketCap => "MARKETCAP",
            SortKey::Price => "PRICE",
            SortKey::AvailableSupply => "AVAILABLESUPPLY",
            SortKey::Volume => "VOLUME",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, SortKey::Name | SortKey::Symbol)
    }

    /// Parses either the wire name or the header label, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.wire_name().eq_ignore_ascii_case(raw) || key.label() == raw)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}
