//! UI layer: app shell and the coin table widget.

pub mod app;
pub mod icons;
pub mod table;

pub use app::CoinTrackerApp;
