//! Coin table core: the one-shot cancellable fetch, the debounced search and
//! the filter/sort projection behind every renderer.

pub mod cancel;
pub mod config;
pub mod debounce;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod presentation;
pub mod rows;

pub use cancel::CancelToken;
pub use config::{load_settings, Settings};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::{FetchError, FETCH_FAILED_MESSAGE};
pub use fetcher::{fetch_unless_cancelled, CoinSource, HttpCoinSource, IconSource};
pub use model::{CoinTableModel, ViewEvent, ViewState};
pub use presentation::{DisplayPhase, HeaderCell, RowCells, TablePresentation};
pub use rows::derive_rows;
