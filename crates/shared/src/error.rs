use thiserror::Error;

use crate::domain::CoinId;

/// A fetched snapshot that breaks the record-set invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("duplicate coin id {0}")]
    DuplicateId(CoinId),
    #[error("coin {id} has a non-finite or negative {field}: {value}")]
    InvalidNumber {
        id: CoinId,
        field: &'static str,
        value: f64,
    },
    #[error("coin {id} has rank 0; ranks are 1-based")]
    ZeroRank { id: CoinId },
}
