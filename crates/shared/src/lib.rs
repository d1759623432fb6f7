//! Data model shared by the coin table core and its renderers.

pub mod domain;
pub mod error;
pub mod protocol;
