//! Backend worker: a tokio runtime on its own thread, fed by the UI command
//! queue and reporting back through the UI event queue.

pub mod commands;
pub mod icons;
pub mod runtime;
